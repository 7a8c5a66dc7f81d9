//! Funnel HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::FunnelHandlers;
pub use routes::funnel_routes;
