// Security module for template name and path validation
//
// Keeps every file the catalog opens inside the configured template
// directory, whatever name a client sends.

pub mod path_validator;

pub use path_validator::{ensure_within_root, validate_file_stem, PathSecurityError};
