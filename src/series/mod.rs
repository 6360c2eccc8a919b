mod ranker;
mod timeline;

pub use ranker::rank;
pub use timeline::{resolve, FallbackDateLookup, Resolution, NOT_FOUND_COVER};
