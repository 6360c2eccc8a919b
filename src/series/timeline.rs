use anyhow::Context;
use log::{debug, trace};
use time::{Date, Duration};

use crate::models::{PartialDate, SeriesTimeline};

/// Cover shown when no work qualifies. A successful "nothing qualifies"
/// answer, never to be confused with a fetch failure.
pub const NOT_FOUND_COVER: &str = "http://sendmeglobal.net/images/404.png";

/// Placeholder token for works whose identity is not finalized yet.
const UNTITLED: &str = "untitled";

/// Secondary source for publication dates, consulted only when the primary
/// source left a work dateless. A failed lookup aborts the whole resolution;
/// it never silently degrades to "no result".
pub trait FallbackDateLookup {
    fn pub_date_by_title(&self, title: &str) -> anyhow::Result<PartialDate>;
}

/// Outcome of a timeline resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found {
        title: String,
        date: PartialDate,
        cover: Option<String>,
    },
    NotFound {
        cover: String,
    },
}

impl Resolution {
    fn not_found() -> Resolution {
        Resolution::NotFound {
            cover: NOT_FOUND_COVER.to_string(),
        }
    }
}

/// Resolves "the" release of a series relative to `reference_date`.
///
/// Without a window the answer is the most-recent resolvable work: walk
/// positions downward from the declared series length, skipping provisional
/// entries (placeholder "untitled" title and no date), and fill a missing
/// date through the fallback lookup.
///
/// With a window, the most-recent work only stands if its date falls inside
/// `[reference_date, reference_date + window]` (inclusive on both edges).
/// A date already behind the reference means nothing newer exists, so the
/// answer is immediately `NotFound`. A date beyond the far edge continues
/// the backward walk: the first work dated inside the window wins, and the
/// first work dated behind the reference stops the walk as `NotFound`.
/// That stop assumes dates are non-increasing as position decreases, which
/// the source does not actually guarantee; the literal policy is kept.
pub fn resolve(
    timeline: &SeriesTimeline,
    reference_date: Date,
    window: Option<Duration>,
    fallback: &impl FallbackDateLookup,
) -> anyhow::Result<Resolution> {
    trace!("timeline::resolve()");

    let mut position = timeline.declared_length();
    let mut title = UNTITLED.to_string();
    let mut date: Option<PartialDate> = None;
    let mut cover: Option<String> = None;

    while title.to_lowercase().contains(UNTITLED) && date.is_none() && position >= 1 {
        // Declared-length positions can be missing from unreliable source
        // data; degrade to the largest position actually present.
        let work = match timeline.work_at(position) {
            Some(work) => work,
            None => timeline
                .last_positioned_work()
                .context("series has no positioned works")?,
        };

        title = work.title.clone();
        date = work.publication_date.clone();
        cover = work.cover_image_url.clone();

        position -= 1;
    }

    let date = match date {
        Some(date) => date,
        None => fallback.pub_date_by_title(&title)?,
    };

    debug!("most recent work = {} ({})", title, date);

    let window = match window {
        Some(window) => window,
        None => return Ok(Resolution::Found { title, date, cover }),
    };

    let normalized = date.normalize()?;

    if reference_date <= normalized && normalized <= reference_date + window {
        return Ok(Resolution::Found { title, date, cover });
    }

    if normalized < reference_date {
        // Nothing newer than the reference exists for this series, short of
        // an unannounced upcoming book.
        return Ok(Resolution::not_found());
    }

    // Most-recent work lies beyond the window's far edge; keep walking down.
    while position >= 1 {
        let work = match timeline.work_at(position) {
            Some(work) => work,
            None => {
                position -= 1;
                continue;
            }
        };

        let work_date = match &work.publication_date {
            Some(date) => date.clone(),
            None => fallback.pub_date_by_title(&work.title)?,
        };

        let normalized = work_date.normalize()?;

        debug!("position {} = {} ({})", position, work.title, work_date);

        if normalized < reference_date {
            return Ok(Resolution::not_found());
        }

        if normalized <= reference_date + window {
            return Ok(Resolution::Found {
                title: work.title.clone(),
                date: work_date,
                cover: work.cover_image_url.clone(),
            });
        }

        position -= 1;
    }

    Ok(Resolution::not_found())
}
