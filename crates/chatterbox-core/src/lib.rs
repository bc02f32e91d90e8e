pub mod config;
pub mod error;
pub mod types;

pub use config::ChatterboxConfig;
pub use error::{ChatterboxError, Result};
pub use types::*;
