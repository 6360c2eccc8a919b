use anyhow;
use log::trace;
use reqwest;
use scraper::{Html, Selector};

use crate::error::FetchError;
use crate::models::SeriesMembership;
use crate::parser::{text_of, Parser};

/// Fetches every series an author has works in, one membership per
/// `<series_work>` node. An author with no series parses to an empty list,
/// distinct from a fetch failure.
pub struct SeriesList {
    author_id: String,
    key: String,
    request_data: Option<Box<String>>,
}

impl SeriesList {
    pub fn new(author_id: &str, key: &str) -> SeriesList {
        SeriesList {
            author_id: author_id.to_string(),
            key: key.to_string(),
            request_data: None,
        }
    }
}

/// ```xml
/// <!-- Response of https://www.goodreads.com/series/list?id=12345 -->
/// <GoodreadsResponse>
///   <series_works>
///     <series_work>
///       <user_position>1</user_position>
///       <series>
///         <id>5</id>
///         <title>The Answer</title>
///       </series>
///     </series_work>
///   </series_works>
/// </GoodreadsResponse>
/// ```
pub fn parse_memberships(document: &Html) -> Vec<SeriesMembership> {
    let work_selector = Selector::parse("series_works > series_work").unwrap();
    let rank_selector = Selector::parse("user_position").unwrap();
    let id_selector = Selector::parse("series > id").unwrap();
    let name_selector = Selector::parse("series > title").unwrap();

    document
        .select(&work_selector)
        .filter_map(|element| {
            let series_id = text_of(&element, &id_selector)?;
            let series_name = text_of(&element, &name_selector)?;
            let rank = text_of(&element, &rank_selector);

            Some(SeriesMembership {
                rank,
                series_id,
                series_name,
            })
        })
        .collect()
}

impl Parser for SeriesList {
    type RequestData = String;
    type ParseData = Vec<SeriesMembership>;

    fn request_data(&self) -> anyhow::Result<&Box<Self::RequestData>> {
        match self.request_data {
            Some(ref rd) => Ok(rd),
            None => Err(anyhow::Error::msg("Can't get request_data")),
        }
    }

    fn url(&self) -> anyhow::Result<String> {
        Ok(format!(
            "https://www.goodreads.com/series/list?format=xml&key={}&id={}",
            self.key, self.author_id
        ))
    }

    fn request(mut self) -> anyhow::Result<Box<Self>> {
        trace!("SeriesList::request()");
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
        trace!("SeriesList::parse()");
        let document = Html::parse_document(self.request_data()?);

        Ok(parse_memberships(&document))
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::models::SeriesMembership;

    use super::parse_memberships;

    fn membership(rank: Option<&str>, id: &str, name: &str) -> SeriesMembership {
        SeriesMembership {
            rank: rank.map(|r| r.to_string()),
            series_id: id.to_string(),
            series_name: name.to_string(),
        }
    }

    #[test]
    fn parse_no_series() {
        let document = Html::parse_document("<series> </series>");

        assert_eq!(Vec::<SeriesMembership>::new(), parse_memberships(&document));
    }

    #[test]
    fn parse_one_series() {
        let document = Html::parse_document(
            "<series_works>
            <series_work>
            <user_position>1</user_position>
            <series>
                <id>400</id>
                <title>Test</title>
            </series>
            </series_work>
            </series_works>",
        );

        let expected = vec![membership(Some("1"), "400", "Test")];

        assert_eq!(expected, parse_memberships(&document));
    }

    #[test]
    fn parse_many_series() {
        let document = Html::parse_document(
            "<series_works>
            <series_work> <user_position>1</user_position>
            <series> <id>5</id> <title>The Answer</title> </series>
            </series_work>
            <series_work> <user_position>0.5</user_position>
            <series> <id>573</id> <title>Not Right</title> </series>
            </series_work>
            <series_work> <user_position/>
            <series> <id>60</id> <title>Unranked</title> </series>
            </series_work>
            </series_works>",
        );

        let expected = vec![
            membership(Some("1"), "5", "The Answer"),
            membership(Some("0.5"), "573", "Not Right"),
            membership(None, "60", "Unranked"),
        ];

        assert_eq!(expected, parse_memberships(&document));
    }
}
