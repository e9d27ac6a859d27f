// Client side of the cocktail proxy API.
// Public API:
//   - Envelope, DrinkRecord: typed response structures
//   - CocktailSource: async seam used by the controllers
//   - HttpSource: reqwest implementation against a configurable base url
//   - ThumbnailProvider / NetworkThumbnails: card image downloads
//
// Endpoints (relative to the base url):
//   GET api/cocktails?name=<name>
//   GET api/demo

mod error;
mod source;
mod thumbnail;
mod types;

pub use error::ApiError;
pub use source::{CocktailSource, HttpSource, UnavailableSource};
pub use thumbnail::{ImageData, NetworkThumbnails, NoThumbnails, ThumbnailProvider};
pub use types::{DrinkRecord, Envelope, ErrorBody};
