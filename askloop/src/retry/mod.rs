//! Retry loops built on top of [`Terminal::acquire`](crate::utils::Terminal::acquire).

pub mod file_input;
pub use file_input::{ExportTarget, ImportedFile, clean_path, exporting_path_input, file_input};

pub mod policy;
pub use policy::RetryPolicy;

pub mod validated;
pub use validated::{ValidatedRetryLoop, Validation};
