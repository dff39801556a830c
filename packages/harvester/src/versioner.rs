//! Title listing from the eCFR versioner API.
//!
//! The listing reports, for every CFR title, the date of its latest issue and
//! of its latest amendment. The issue date selects which full-title XML to
//! download.

use reqwest::blocking::Client;

use crate::config::{titles_url, HarvesterConfig};
use crate::error::{HarvesterError, Result};
use crate::http::{bytes_to_string, get, ACCEPT_JSON};
use crate::types::{DateChoice, TitleListing, TitleSummary};

/// Download the title listing.
///
/// # Errors
/// `HarvesterError::TitleListing` when the request fails or returns a
/// non-success status; `HarvesterError::Json` when the body is malformed.
pub fn fetch_titles(client: &Client, config: &HarvesterConfig) -> Result<Vec<TitleSummary>> {
    let url = titles_url(&config.api_base_url);
    let listing_error = |source: reqwest::Error| HarvesterError::TitleListing {
        url: url.clone(),
        source,
    };

    let response = get(client, &url, ACCEPT_JSON)
        .map_err(|e| match e {
            HarvesterError::Http(source) => listing_error(source),
            other => other,
        })?
        .error_for_status()
        .map_err(listing_error)?;
    let bytes = response.bytes()?;

    parse_title_listing(&bytes_to_string(&bytes, "title listing"))
}

/// Parse the JSON body of the title listing.
pub fn parse_title_listing(json: &str) -> Result<Vec<TitleSummary>> {
    let listing: TitleListing = serde_json::from_str(json)?;
    Ok(listing.titles)
}

/// Look up a date for `title` in an already downloaded listing.
///
/// # Examples
/// ```
/// use ecfr_harvester::types::{DateChoice, TitleSummary};
/// use ecfr_harvester::versioner::find_title_date;
///
/// let titles = vec![TitleSummary {
///     number: 29,
///     name: "Labor".to_string(),
///     latest_amended_on: Some("2024-04-01".to_string()),
///     latest_issue_date: Some("2024-05-01".to_string()),
///     up_to_date_as_of: None,
///     reserved: false,
/// }];
///
/// assert_eq!(find_title_date(&titles, 29, DateChoice::LatestIssueDate), Some("2024-05-01".to_string()));
/// assert_eq!(find_title_date(&titles, 35, DateChoice::LatestIssueDate), None);
/// ```
#[must_use]
pub fn find_title_date(titles: &[TitleSummary], title: u32, choice: DateChoice) -> Option<String> {
    titles
        .iter()
        .find(|t| t.number == title)
        .and_then(|t| t.date(choice))
        .map(str::to_string)
}

/// Resolve a date for `title` from the remote listing.
///
/// Returns `Ok(None)` when the listing has no such title, or the title has
/// no date of the requested kind.
pub fn resolve_title_date(
    client: &Client,
    config: &HarvesterConfig,
    title: u32,
    choice: DateChoice,
) -> Result<Option<String>> {
    let titles = fetch_titles(client, config)?;
    let date = find_title_date(&titles, title, choice);

    match &date {
        Some(date) => tracing::info!(title, date = %date, kind = choice.as_str(), "Resolved title date"),
        None => tracing::warn!(title, kind = choice.as_str(), "Title not found in listing"),
    }

    Ok(date)
}
