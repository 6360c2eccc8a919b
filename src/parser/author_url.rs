use anyhow;
use log::trace;
use reqwest;
use scraper::{Html, Selector};

use crate::error::FetchError;
use crate::parser::{text_of, Parser};

/// Resolved identity of an author on the series source.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRef {
    pub id: String,
    pub name: String,
}

/// Looks an author up by display name. Parses to `None` when the source
/// knows no such author, which is a business answer, not a failure.
pub struct AuthorUrl {
    author_name: String,
    key: String,
    request_data: Option<Box<String>>,
}

impl AuthorUrl {
    pub fn new(author_name: &str, key: &str) -> AuthorUrl {
        AuthorUrl {
            author_name: author_name.to_string(),
            key: key.to_string(),
            request_data: None,
        }
    }
}

/// ```xml
/// <!-- Response of https://www.goodreads.com/api/author_url/John%20Doe -->
/// <GoodreadsResponse>
///   <author id="40">
///     <name>John Doe</name>
///   </author>
/// </GoodreadsResponse>
/// ```
pub fn parse_author(document: &Html) -> Option<AuthorRef> {
    let author_selector = Selector::parse("author").unwrap();
    let name_selector = Selector::parse("author > name").unwrap();

    let author = document.select(&author_selector).next()?;
    let id = author.value().attr("id")?.to_string();
    let name = text_of(&document.root_element(), &name_selector)?;

    Some(AuthorRef { id, name })
}

impl Parser for AuthorUrl {
    type RequestData = String;
    type ParseData = Option<AuthorRef>;

    fn request_data(&self) -> anyhow::Result<&Box<Self::RequestData>> {
        match self.request_data {
            Some(ref rd) => Ok(rd),
            None => Err(anyhow::Error::msg("Can't get request_data")),
        }
    }

    fn url(&self) -> anyhow::Result<String> {
        // The name rides in the path; it needs percent-encoding, not raw
        // interpolation, to survive spaces and `#`.
        let mut url = reqwest::Url::parse("https://www.goodreads.com/api/author_url/")?;

        url.path_segments_mut()
            .map_err(|_| anyhow::Error::msg("Can't extend author_url endpoint path"))?
            .pop_if_empty()
            .push(&self.author_name);
        url.query_pairs_mut().append_pair("key", &self.key);

        Ok(url.to_string())
    }

    fn request(mut self) -> anyhow::Result<Box<Self>> {
        trace!("AuthorUrl::request()");
        let client = reqwest::blocking::Client::builder().build()?;

        let response = client.get(self.url()?.as_str()).send()?;

        if !response.status().is_success() {
            return Err(FetchError {
                status: response.status().as_u16(),
            }
            .into());
        }

        self.request_data = Some(Box::new(response.text()?));
        Ok(Box::new(self))
    }

    fn parse(&self) -> anyhow::Result<Self::ParseData> {
        trace!("AuthorUrl::parse()");
        let document = Html::parse_document(self.request_data()?);

        Ok(parse_author(&document))
    }
}
