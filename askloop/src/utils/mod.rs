pub mod format;
pub use format::{Padding, RoundStyle, WithSpace};

pub mod fs;
pub use fs::{NewDirectory, create_new_directory};

pub mod sanitize;
pub use sanitize::{Bounds, DesiredType, Rejection, ScalarValue, sanitize};

pub mod terminal;
pub use terminal::{PromptSpec, Terminal};
