pub mod health;
pub mod links;
pub mod nowplaying;
pub mod offer;
pub mod stream;
