pub mod loader;
pub mod model;

pub use loader::{DEFAULT_ENVIRONMENT, ENV_VAR, active_environment, from_str, load};
pub use model::{DatabaseConfig, StoreConfig};
