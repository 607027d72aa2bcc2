//! Map definition discovery.
//!
//! Finds the YAML files a batch run should process.

mod scanner;

pub use scanner::{is_definition_file, scan_directory, ScanResult};
