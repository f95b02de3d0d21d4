mod dirs;
mod settings;
mod validation;

pub use dirs::Directories;
pub use settings::{ApiConfig, Config, ListConfig};
pub use validation::warn_unknown_fields;
