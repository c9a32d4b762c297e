use proc_macro::TokenStream;
use syn::parse_macro_input;

mod test_generator;

/// Emits one `#[test]` per JSON file in the given directory (relative to the
/// calling crate's manifest). Each test calls `run_vector_file(path)`.
#[proc_macro]
pub fn generate_instruction_tests(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input);
    test_generator::test_generator_impl(input).into()
}
