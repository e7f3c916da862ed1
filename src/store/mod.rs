pub mod auth;
pub mod rest;
pub mod traits;

pub use auth::{AuthGateway, RestAuth};
pub use rest::RestStore;
pub use traits::DataStore;
