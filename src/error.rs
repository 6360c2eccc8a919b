use thiserror::Error;

/// An upstream source answered with a non-success status. Callers must be
/// able to tell this apart from "empty, zero results found", so it is a
/// typed value rather than a bare message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("upstream request failed with status {status}")]
pub struct FetchError {
    pub status: u16,
}

/// Raised by the ranker when several rank groups exist but every rank is
/// absent or sorts below "1".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no candidate rank at or above \"1\"")]
pub struct NoValidRankError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable publication date {0:?}")]
pub struct DateParseError(pub String);
