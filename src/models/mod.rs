mod date;
mod series;

pub use date::PartialDate;
pub use series::{SeriesMembership, SeriesTimeline, Work};
