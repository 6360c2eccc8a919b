use std::fmt;

use time::Date;

use crate::error::DateParseError;

/// A publication date known only down to year, year-month, or full
/// year-month-day precision. Goodreads reports the three components as
/// separate, individually optional fields; Google Books reports a single
/// `YYYY[-MM[-DD]]` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialDate {
    pub year: i32,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl PartialDate {
    /// Parses a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<PartialDate, DateParseError> {
        let bad = || DateParseError(s.to_string());

        let mut parts = s.trim().split('-');

        let year = parts
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or_else(bad)?;
        let month = match parts.next() {
            Some(p) => Some(p.parse::<u8>().map_err(|_| bad())?),
            None => None,
        };
        let day = match parts.next() {
            Some(p) => Some(p.parse::<u8>().map_err(|_| bad())?),
            None => None,
        };

        if parts.next().is_some() {
            return Err(bad());
        }

        Ok(PartialDate { year, month, day })
    }

    /// Assembles a date from the three separate source fields. A month
    /// without a year, or a day without a month, is discarded: precision
    /// only counts underneath a present coarser component.
    pub fn from_parts(
        year: Option<&str>,
        month: Option<&str>,
        day: Option<&str>,
    ) -> Option<PartialDate> {
        let year = year?.trim().parse::<i32>().ok()?;
        let month = month.and_then(|m| m.trim().parse::<u8>().ok());
        let day = match month {
            Some(_) => day.and_then(|d| d.trim().parse::<u8>().ok()),
            None => None,
        };

        Some(PartialDate { year, month, day })
    }

    /// Lossy normalization for ordering and window containment: a missing
    /// month or day collapses to 1, so "2016" sorts as 2016-01-01 and
    /// "2016-02" as 2016-02-01.
    pub fn normalize(&self) -> anyhow::Result<Date> {
        let date = Date::try_from_ymd(self.year, self.month.unwrap_or(1), self.day.unwrap_or(1))?;

        Ok(date)
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.month, self.day) {
            (Some(month), Some(day)) => {
                write!(f, "{}-{:02}-{:02}", self.year, month, day)
            }
            (Some(month), _) => write!(f, "{}-{:02}", self.year, month),
            _ => write!(f, "{}", self.year),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::date;

    use super::PartialDate;

    #[test]
    fn parse_year() -> anyhow::Result<()> {
        let parsed = PartialDate::parse("2016")?;

        let expected = PartialDate {
            year: 2016,
            month: None,
            day: None,
        };

        assert_eq!(expected, parsed);
        assert_eq!(date!(2016 - 01 - 01), parsed.normalize()?);

        Ok(())
    }

    #[test]
    fn parse_year_month() -> anyhow::Result<()> {
        let parsed = PartialDate::parse("2016-02")?;

        let expected = PartialDate {
            year: 2016,
            month: Some(2),
            day: None,
        };

        assert_eq!(expected, parsed);
        assert_eq!(date!(2016 - 02 - 01), parsed.normalize()?);

        Ok(())
    }

    #[test]
    fn parse_year_month_day() -> anyhow::Result<()> {
        let parsed = PartialDate::parse("2016-02-02")?;

        let expected = PartialDate {
            year: 2016,
            month: Some(2),
            day: Some(2),
        };

        assert_eq!(expected, parsed);
        assert_eq!(date!(2016 - 02 - 02), parsed.normalize()?);

        Ok(())
    }

    #[test]
    fn parse_garbage() {
        assert!(PartialDate::parse("soon").is_err());
        assert!(PartialDate::parse("2016-02-02-09").is_err());
        assert!(PartialDate::parse("2016-xx").is_err());
    }

    #[test]
    fn from_parts_requires_year() {
        assert_eq!(None, PartialDate::from_parts(None, Some("7"), Some("7")));
    }

    #[test]
    fn from_parts_day_needs_month() {
        let assembled = PartialDate::from_parts(Some("2016"), None, Some("9"));

        let expected = PartialDate {
            year: 2016,
            month: None,
            day: None,
        };

        assert_eq!(Some(expected), assembled);
    }

    #[test]
    fn from_parts_empty_strings() {
        assert_eq!(None, PartialDate::from_parts(Some(""), Some(""), Some("")));
    }

    #[test]
    fn display_zero_pads() -> anyhow::Result<()> {
        assert_eq!("2016", PartialDate::parse("2016")?.to_string());
        assert_eq!("2016-03", PartialDate::parse("2016-3")?.to_string());
        assert_eq!("2016-04-09", PartialDate::parse("2016-4-9")?.to_string());

        Ok(())
    }

    #[test]
    fn normalize_rejects_bad_month() -> anyhow::Result<()> {
        let date = PartialDate::parse("2016-13")?;

        assert!(date.normalize().is_err());

        Ok(())
    }
}
