pub mod error;

pub mod history;

pub mod models;

pub mod parser;

pub mod series;

pub mod config {
    use anyhow::Context;

    pub fn goodreads_key() -> anyhow::Result<String> {
        std::env::var("GOODREADS_API_KEY").context("GOODREADS_API_KEY is not set")
    }

    pub fn google_books_key() -> anyhow::Result<String> {
        std::env::var("GOOGLE_BOOKS_API_KEY").context("GOOGLE_BOOKS_API_KEY is not set")
    }

    /// Path of the caller-side search log, if the user wants one kept.
    pub fn history_path() -> Option<String> {
        std::env::var("SERIES_TRACKER_HISTORY").ok()
    }
}
