//! bork - minimal command-line argument classification.
//!
//! The core is [`Scanner`], a single pass over an argument list that tells
//! long options, short options and positionals apart and lets the caller
//! take the following token as an option's value. The remaining modules
//! drive the scanner from a JSON option table and render the result.

pub mod classify;
pub mod config;
pub mod output;
pub mod scanner;

pub use classify::{classify_args, Classified, ClassifyError};
pub use config::{Config, ConfigError, OptionConfig, ValueMode};
pub use output::{render, write_temp_file, Format};
pub use scanner::{classify_arg, scan, split_inline_value, ScanError, Scanner, Token};
