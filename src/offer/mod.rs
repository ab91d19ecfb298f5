//! Now-playing driven product offers and their short purchase links.

pub mod catalog;
pub mod links;
pub mod now_playing;
pub mod qr;
pub mod resolver;
pub mod snapshot;

pub use catalog::{Catalog, Product, WooCatalog};
pub use links::LinkBuilder;
pub use now_playing::{NowPlaying, NowPlayingState};
pub use qr::{PngQrRenderer, QrError, QrRenderer};
pub use resolver::{ActiveOffer, ArtistRef, NoOfferReason, OfferOutcome, OfferResolver, OfferTicket};
pub use snapshot::ProductSnapshot;
