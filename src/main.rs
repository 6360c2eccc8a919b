use std::env;

use anyhow::Context;
use log::info;
use time::{Duration, OffsetDateTime};

use series_tracker::config;
use series_tracker::history::SearchLog;
use series_tracker::parser::{AuthorUrl, GoogleBooks, Parser, SeriesList, SeriesWorks};
use series_tracker::series::{self, Resolution};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let author_name = args
        .next()
        .context("usage: series_tracker <author name> [window days]")?;
    let window = match args.next() {
        Some(days) => {
            let days = days
                .parse::<i64>()
                .context("window must be a whole number of days")?;
            Some(Duration::days(days))
        }
        None => None,
    };

    let goodreads_key = config::goodreads_key()?;
    let google_key = config::google_books_key()?;

    let author = AuthorUrl::new(&author_name, &goodreads_key)
        .request()?
        .parse()?;

    let author = match author {
        Some(author) => author,
        None => {
            println!("No author found for {:?}", author_name);
            return Ok(());
        }
    };

    info!("author {} = {}", author.name, author.id);

    let memberships = SeriesList::new(&author.id, &goodreads_key)
        .request()?
        .parse()?;

    let canonical = series::rank(&memberships)?;

    if canonical.is_empty() {
        println!("{} has no series", author.name);
        return Ok(());
    }

    let today = OffsetDateTime::now_utc().date();
    let fallback = GoogleBooks::new(&google_key);

    let mut search_log = match config::history_path() {
        Some(ref path) => SearchLog::from_file(path)?,
        None => SearchLog::new(),
    };

    for (series_id, series_name) in &canonical {
        let timeline = SeriesWorks::new(series_id, &goodreads_key)
            .request()?
            .parse()?;

        let resolution = series::resolve(&timeline, today, window, &fallback)?;

        match &resolution {
            Resolution::Found { title, date, .. } => {
                println!("{}: {} ({})", series_name, title, date)
            }
            Resolution::NotFound { .. } => println!("{}: nothing in range", series_name),
        }

        search_log.record(series_name, &resolution);
    }

    if let Some(path) = config::history_path() {
        search_log.save(&path)?;
    }

    Ok(())
}
