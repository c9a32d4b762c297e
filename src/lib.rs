pub mod bits;
pub mod case;
pub mod config;
pub mod executor;
pub mod flags;
pub mod harness;
pub mod native;
pub mod operand;
pub mod operation;
pub mod operations;
pub mod oracle;
pub mod registry;
pub mod suites;
pub mod traits;
pub mod vector;
