use std::fs;
use std::path::Path;

use crate::series::Resolution;

/// Append-ordered record of past resolutions, persisted as one line per
/// search. The resolver itself never touches this; the caller that owns the
/// log decides what to append and when to save.
pub struct SearchLog {
    entries: Vec<String>,
}

impl SearchLog {
    pub fn new() -> SearchLog {
        SearchLog { entries: Vec::new() }
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<SearchLog> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(SearchLog::new());
        }

        let text = fs::read_to_string(path)?;

        let entries = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect();

        Ok(SearchLog { entries })
    }

    pub fn record(&mut self, series_name: &str, resolution: &Resolution) {
        let line = match resolution {
            Resolution::Found { title, date, .. } => {
                format!("{}\t{}\t{}", series_name, title, date)
            }
            Resolution::NotFound { .. } => format!("{}\t-\t-", series_name),
        };

        self.entries.push(line);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let text = self.entries.iter().fold(String::new(), |mut acc, line| {
            acc.push_str(line);
            acc.push('\n');
            acc
        });

        fs::write(path, &text)?;

        Ok(())
    }
}

impl Default for SearchLog {
    fn default() -> SearchLog {
        SearchLog::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::PartialDate;
    use crate::series::{Resolution, NOT_FOUND_COVER};

    use super::SearchLog;

    #[test]
    fn records_in_order() -> anyhow::Result<()> {
        let mut log = SearchLog::new();

        log.record(
            "The Answer",
            &Resolution::Found {
                title: "Second Book".to_string(),
                date: PartialDate::parse("2016-07-07")?,
                cover: None,
            },
        );
        log.record(
            "Another Answer",
            &Resolution::NotFound {
                cover: NOT_FOUND_COVER.to_string(),
            },
        );

        let expected = [
            "The Answer\tSecond Book\t2016-07-07".to_string(),
            "Another Answer\t-\t-".to_string(),
        ];

        assert_eq!(&expected[..], log.entries());

        Ok(())
    }

    #[test]
    fn save_then_load_round_trip() -> anyhow::Result<()> {
        let mut log = SearchLog::new();

        log.record(
            "The Answer",
            &Resolution::Found {
                title: "Second Book".to_string(),
                date: PartialDate::parse("2016-07-07")?,
                cover: None,
            },
        );
        log.record(
            "Another Answer",
            &Resolution::NotFound {
                cover: NOT_FOUND_COVER.to_string(),
            },
        );

        let path = std::env::temp_dir().join(format!("search_log_{}", std::process::id()));

        log.save(&path)?;
        let loaded = SearchLog::from_file(&path)?;
        std::fs::remove_file(&path)?;

        assert_eq!(log.entries(), loaded.entries());

        Ok(())
    }

    #[test]
    fn load_skips_blank_lines() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("search_log_blank_{}", std::process::id()));

        std::fs::write(&path, "The Answer\tSecond Book\t2016-07-07\n\n   \nAnother Answer\t-\t-\n")?;
        let loaded = SearchLog::from_file(&path)?;
        std::fs::remove_file(&path)?;

        let expected = [
            "The Answer\tSecond Book\t2016-07-07".to_string(),
            "Another Answer\t-\t-".to_string(),
        ];

        assert_eq!(&expected[..], loaded.entries());

        Ok(())
    }

    #[test]
    fn missing_file_is_empty_log() -> anyhow::Result<()> {
        let log = SearchLog::from_file("does/not/exist.log")?;

        assert!(log.entries().is_empty());

        Ok(())
    }
}
