pub mod base;
pub mod logging;
pub mod offer;
pub mod provider;
pub mod server;
pub mod shop;

pub use base::*;
pub use logging::*;
pub use offer::*;
pub use provider::*;
pub use server::*;
pub use shop::*;
