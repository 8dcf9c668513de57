pub mod client;
pub mod error;
pub mod normalize;
pub(crate) mod rate_limit;
pub mod types;

pub use client::KakaoClient;
pub use error::KakaoError;
pub use types::{Coord2AddressResponse, KeywordSearchResponse, PlaceDocument};
