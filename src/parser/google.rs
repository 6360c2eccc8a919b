use anyhow::{self, Context};
use log::{debug, trace};
use reqwest;
use serde::Deserialize;
use serde_json;

use crate::error::FetchError;
use crate::models::PartialDate;
use crate::parser::Parser;
use crate::series::FallbackDateLookup;

#[derive(Debug, Deserialize)]
struct VolumesPayload {
    #[serde(default)]
    items: Vec<VolumeItem>,
}

#[derive(Debug, Deserialize)]
struct VolumeItem {
    id: String,
}

#[derive(Debug, Deserialize)]
struct VolumePayload {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
}

/// Title search over the volumes endpoint; parses to the id of the best
/// matching volume.
pub struct VolumeSearch {
    query: String,
    key: String,
    request_data: Option<Box<String>>,
}

impl VolumeSearch {
    pub fn new(query: &str, key: &str) -> VolumeSearch {
        VolumeSearch {
            query: query.to_string(),
            key: key.to_string(),
            request_data: None,
        }
    }
}

impl Parser for VolumeSearch {
    type RequestData = String;
    type ParseData = String;

    fn request_data(&self) -> anyhow::Result<&Box<Self::RequestData>> {
        match self.request_data {
            Some(ref rd) => Ok(rd),
            None => Err(anyhow::Error::msg("Can't get request_data")),
        }
    }

    fn url(&self) -> anyhow::Result<String> {
        // Titles carry `&` and `#` freely; raw interpolation would split the
        // query or truncate it into a fragment.
        let mut url = reqwest::Url::parse("https://www.googleapis.com/books/v1/volumes")?;

        url.query_pairs_mut()
            .append_pair("q", &self.query)
            .append_pair("langRestrict", "en")
            .append_pair("printType", "books")
            .append_pair("key", &self.key);

        Ok(url.to_string())
    }

    fn request(mut self) -> anyhow::Result<Box<Self>> {
        trace!("VolumeSearch::request()");
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
        trace!("VolumeSearch::parse()");
        let payload: VolumesPayload = serde_json::from_str(self.request_data()?)?;

        let first = payload
            .items
            .into_iter()
            .next()
            .with_context(|| format!("no volumes matched {:?}", self.query))?;

        Ok(first.id)
    }
}

/// Single-volume fetch; parses to the volume's publication date.
pub struct Volume {
    volume_id: String,
    key: String,
    request_data: Option<Box<String>>,
}

impl Volume {
    pub fn new(volume_id: &str, key: &str) -> Volume {
        Volume {
            volume_id: volume_id.to_string(),
            key: key.to_string(),
            request_data: None,
        }
    }
}

impl Parser for Volume {
    type RequestData = String;
    type ParseData = PartialDate;

    fn request_data(&self) -> anyhow::Result<&Box<Self::RequestData>> {
        match self.request_data {
            Some(ref rd) => Ok(rd),
            None => Err(anyhow::Error::msg("Can't get request_data")),
        }
    }

    fn url(&self) -> anyhow::Result<String> {
        let mut url = reqwest::Url::parse("https://www.googleapis.com/books/v1/volumes/")?;

        url.path_segments_mut()
            .map_err(|_| anyhow::Error::msg("Can't extend volumes endpoint path"))?
            .pop_if_empty()
            .push(&self.volume_id);
        url.query_pairs_mut().append_pair("key", &self.key);

        Ok(url.to_string())
    }

    fn request(mut self) -> anyhow::Result<Box<Self>> {
        trace!("Volume::request()");
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
        trace!("Volume::parse()");
        let payload: VolumePayload = serde_json::from_str(self.request_data()?)?;

        let published = payload
            .volume_info
            .published_date
            .with_context(|| format!("volume {} has no publication date", self.volume_id))?;

        Ok(PartialDate::parse(&published)?)
    }
}

/// The secondary date source: volume search by title, then a volume fetch
/// for the publication date.
pub struct GoogleBooks {
    key: String,
}

impl GoogleBooks {
    pub fn new(key: &str) -> GoogleBooks {
        GoogleBooks {
            key: key.to_string(),
        }
    }
}

impl FallbackDateLookup for GoogleBooks {
    fn pub_date_by_title(&self, title: &str) -> anyhow::Result<PartialDate> {
        debug!("fallback date lookup for {:?}", title);

        let search = VolumeSearch::new(title, &self.key).request()?;
        let volume_id = search.parse()?;

        let volume = Volume::new(&volume_id, &self.key).request()?;
        let date = volume.parse()?;

        Ok(date)
    }
}
