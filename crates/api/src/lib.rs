#![forbid(unsafe_code)]

pub mod error;
pub mod gateway;
pub mod memory;
pub mod rest;
pub mod vault;

pub use error::{ApiError, VaultError};
pub use memory::InMemoryGateway;
pub use rest::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
pub use vault::{FileSessionVault, InMemorySessionVault, SessionVault};
