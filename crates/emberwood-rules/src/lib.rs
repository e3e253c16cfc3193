pub mod loader;
pub mod validator;

pub use loader::{default_config, load_config_file, load_config_from_str, load_validated_config, LoadError};
pub use validator::{validate_config, ValidationError};
