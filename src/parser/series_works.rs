use std::collections::HashMap;

use anyhow::{self, Context};
use log::{debug, trace};
use reqwest;
use scraper::{Html, Selector};

use crate::error::FetchError;
use crate::models::{PartialDate, SeriesTimeline, Work};
use crate::parser::{text_of, Parser};

/// Fetches the full work list of one series, keyed by user position.
pub struct SeriesWorks {
    series_id: String,
    key: String,
    request_data: Option<Box<String>>,
}

impl SeriesWorks {
    pub fn new(series_id: &str, key: &str) -> SeriesWorks {
        SeriesWorks {
            series_id: series_id.to_string(),
            key: key.to_string(),
            request_data: None,
        }
    }
}

/// ```xml
/// <!-- Response of https://www.goodreads.com/series/show/?id=5 -->
/// <GoodreadsResponse>
///   <series>
///     <primary_work_count>2</primary_work_count>
///     <series_works>
///       <series_work>
///         <user_position>2</user_position>
///         <work>
///           <best_book>
///             <title>Second Book</title>
///             <author><name>Bob Smith</name></author>
///             <image_url>https://covers.example/2.jpg</image_url>
///           </best_book>
///           <original_publication_year>2016</original_publication_year>
///           <original_publication_month>7</original_publication_month>
///           <original_publication_day>7</original_publication_day>
///         </work>
///       </series_work>
///     </series_works>
///   </series>
/// </GoodreadsResponse>
/// ```
pub fn parse_timeline(document: &Html) -> anyhow::Result<SeriesTimeline> {
    let length_selector = Selector::parse("primary_work_count").unwrap();
    let work_selector = Selector::parse("series_works > series_work").unwrap();

    let root = document.root_element();

    let series_length =
        text_of(&root, &length_selector).context("series payload missing primary_work_count")?;

    let mut works = HashMap::new();

    for element in document.select(&work_selector) {
        let work = parse_work(&element)?;

        debug!("work = {:?}", work);

        // Unpositioned works cannot be keyed and never enter a walk.
        if let Some(ref position) = work.position {
            works.insert(position.clone(), work);
        }
    }

    Ok(SeriesTimeline {
        series_length,
        works,
    })
}

fn parse_work(element: &scraper::ElementRef<'_>) -> anyhow::Result<Work> {
    let position_selector = Selector::parse("user_position").unwrap();
    let title_selector = Selector::parse("best_book > title").unwrap();
    let author_selector = Selector::parse("author > name").unwrap();
    let image_selector = Selector::parse("image_url").unwrap();
    let year_selector = Selector::parse("original_publication_year").unwrap();
    let month_selector = Selector::parse("original_publication_month").unwrap();
    let day_selector = Selector::parse("original_publication_day").unwrap();

    let title = text_of(element, &title_selector).context("series_work missing title")?;
    let author = text_of(element, &author_selector).context("series_work missing author name")?;

    let publication_date = PartialDate::from_parts(
        text_of(element, &year_selector).as_deref(),
        text_of(element, &month_selector).as_deref(),
        text_of(element, &day_selector).as_deref(),
    );

    Ok(Work {
        position: text_of(element, &position_selector),
        title,
        author,
        publication_date,
        cover_image_url: text_of(element, &image_selector),
    })
}

impl Parser for SeriesWorks {
    type RequestData = String;
    type ParseData = SeriesTimeline;

    fn request_data(&self) -> anyhow::Result<&Box<Self::RequestData>> {
        match self.request_data {
            Some(ref rd) => Ok(rd),
            None => Err(anyhow::Error::msg("Can't get request_data")),
        }
    }

    fn url(&self) -> anyhow::Result<String> {
        Ok(format!(
            "https://www.goodreads.com/series/show/?format=xml&key={}&id={}",
            self.key, self.series_id
        ))
    }

    fn request(mut self) -> anyhow::Result<Box<Self>> {
        trace!("SeriesWorks::request()");
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
        trace!("SeriesWorks::parse()");
        let document = Html::parse_document(self.request_data()?);

        parse_timeline(&document)
    }
}
