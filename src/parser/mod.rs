use anyhow;
use scraper::{ElementRef, Selector};

mod author_url;
mod google;
mod series_list;
mod series_works;

pub use author_url::{AuthorRef, AuthorUrl};
pub use google::{GoogleBooks, Volume, VolumeSearch};
pub use series_list::SeriesList;
pub use series_works::SeriesWorks;

pub trait Parser {
    type RequestData;
    type ParseData;

    fn request_data(&self) -> anyhow::Result<&Box<Self::RequestData>>;

    fn url(&self) -> anyhow::Result<String>;

    fn request(self) -> anyhow::Result<Box<Self>>;

    fn parse(&self) -> anyhow::Result<Self::ParseData>;
}

/// Trimmed text of the first element matching `selector`, or `None` when
/// the element is absent or empty.
///
/// Only the element's own text nodes count. The source emits empty
/// self-closing tags like `<original_publication_year/>`, which the HTML
/// tree builder keeps open so that following siblings land inside them;
/// descendant text would leak those siblings' values.
pub(crate) fn text_of(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text = element
        .select(selector)
        .next()?
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect::<String>();
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
