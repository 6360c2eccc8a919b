use std::collections::HashMap;

use log::{debug, trace};

use crate::error::NoValidRankError;
use crate::models::SeriesMembership;

/// Selects the canonical series (or set of tied series) from a work's raw
/// series listing. Entries are grouped by their user rank; with more than
/// one group, the winning group is the one at the smallest rank that is
/// present and sorts at or above `"1"`.
///
/// Ranks compare as strings, not numbers: the source's ordinal field is not
/// guaranteed to be a clean integer (fractional codes like `"0.5"` mark
/// side stories), and the string floor of `"1"` is what excludes them.
///
/// The result maps series id to display name. Ties at the winning rank all
/// come back together; the caller presents every tied candidate.
pub fn rank(
    memberships: &[SeriesMembership],
) -> anyhow::Result<HashMap<String, String>> {
    trace!("ranker::rank()");

    let mut by_rank: HashMap<Option<String>, HashMap<String, String>> = HashMap::new();

    for membership in memberships {
        by_rank
            .entry(membership.rank.clone())
            .or_default()
            .insert(membership.series_id.clone(), membership.series_name.clone());
    }

    if by_rank.len() <= 1 {
        // Zero or one rank group: nothing to arbitrate, even when the lone
        // rank is absent or fractional.
        return Ok(by_rank.into_iter().map(|(_, group)| group).next().unwrap_or_default());
    }

    let smallest = by_rank
        .keys()
        .filter_map(|rank| rank.as_deref())
        .filter(|rank| *rank >= "1")
        .min()
        .ok_or(NoValidRankError)?
        .to_string();

    debug!("canonical rank = {:?}", smallest);

    let group = by_rank.remove(&Some(smallest)).unwrap_or_default();

    Ok(group)
}
