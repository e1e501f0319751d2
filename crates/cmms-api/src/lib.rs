// cmms-api: Async Rust client for the CMMS Directus backend.
//
// Everything in this crate speaks the backend's dialect: collection paths,
// filter JSON, snake_case rows. `cmms-core` is the only intended consumer.

pub mod auth;
pub mod client;
pub mod datasource;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::{MemoryTokenStore, TokenKey, TokenStore};
pub use client::DirectusClient;
pub use datasource::interventions::InterventionQuery;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
