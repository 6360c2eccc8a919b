use std::collections::HashMap;

use super::PartialDate;

/// One entry of a work's series listing: the series it belongs to plus the
/// user-curated rank of that series among same-named entries. The rank is
/// source text, not a clean integer ("0.5" marks side stories).
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMembership {
    pub rank: Option<String>,
    pub series_id: String,
    pub series_name: String,
}

/// A single published or announced item of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Work {
    /// Ordinal place in the series, as source text. Absent when the source
    /// provides none; such works never enter a timeline walk.
    pub position: Option<String>,
    pub title: String,
    pub author: String,
    pub publication_date: Option<PartialDate>,
    pub cover_image_url: Option<String>,
}

/// The positioned works of one series, keyed by position, plus the series'
/// declared work count. The declared count is only a starting point for the
/// backward walk; the map's own keys win when they disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTimeline {
    pub series_length: String,
    pub works: HashMap<String, Work>,
}

impl SeriesTimeline {
    /// The declared count as an integer; unparseable source text counts as
    /// zero, which skips the walk entirely.
    pub fn declared_length(&self) -> i64 {
        self.series_length.trim().parse().unwrap_or(0)
    }

    pub fn work_at(&self, position: i64) -> Option<&Work> {
        self.works.get(&position.to_string())
    }

    /// The work at the numerically largest available position. Positions
    /// that fail to parse as integers are ignored.
    pub fn last_positioned_work(&self) -> Option<&Work> {
        self.works
            .iter()
            .filter_map(|(position, work)| {
                position.trim().parse::<i64>().ok().map(|p| (p, work))
            })
            .max_by_key(|(position, _)| *position)
            .map(|(_, work)| work)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{SeriesTimeline, Work};

    fn work(title: &str) -> Work {
        Work {
            position: None,
            title: title.to_string(),
            author: "Bob Smith".to_string(),
            publication_date: None,
            cover_image_url: None,
        }
    }

    #[test]
    fn declared_length_tolerates_garbage() {
        let timeline = SeriesTimeline {
            series_length: "n/a".to_string(),
            works: HashMap::new(),
        };

        assert_eq!(0, timeline.declared_length());
    }

    #[test]
    fn last_positioned_work_is_numeric_not_lexicographic() {
        let mut works = HashMap::new();
        works.insert("9".to_string(), work("ninth"));
        works.insert("10".to_string(), work("tenth"));

        let timeline = SeriesTimeline {
            series_length: "12".to_string(),
            works,
        };

        assert_eq!("tenth", timeline.last_positioned_work().unwrap().title);
    }
}
