use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::LitStr;

fn is_json_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

fn vector_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_json_file(&path) {
            files.push(path);
        }
    }
    // read_dir order is platform dependent
    files.sort();
    Ok(files)
}

pub fn test_generator_impl(input: LitStr) -> TokenStream {
    let root = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let dir = Path::new(&root).join(input.value());
    let files = match vector_files(&dir) {
        Ok(files) => files,
        Err(err) => {
            let message = format!("cannot read {}: {}", dir.display(), err);
            return syn::Error::new(input.span(), message).to_compile_error();
        }
    };

    let tests = files.iter().map(|path| {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().replace(['.', '-'], "_"))
            .unwrap_or_default();
        let test_name = format_ident!("test_{}", stem);
        let path_str = path.to_string_lossy();
        quote! {
            #[test]
            fn #test_name() {
                run_vector_file(#path_str)
            }
        }
    });
    quote! {
        #(#tests)*
    }
}
