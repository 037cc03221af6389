//! # Services Layer
//!
//! The remote data gateway and its implementations: the real HTTP one and an
//! in-memory mock used by the controller tests.

pub mod gateway;
pub mod http_gateway;
pub mod mock_gateway;

// Re-export service types
pub use gateway::PostGateway;
pub use http_gateway::{HttpGateway, JSON_CONTENT_TYPE};
pub use mock_gateway::{GatewayCall, MockGateway};
