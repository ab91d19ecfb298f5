//! Shoplink relays a live stream's now-playing feed to a storefront: it turns
//! the current artist into a short-lived purchase link and resolves provider
//! playlist URLs into stream identifiers.

pub mod api;
pub mod common;
pub mod configs;
pub mod offer;
pub mod server;
pub mod store;
pub mod stream;
pub mod transport;
