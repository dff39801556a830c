//! Full-title XML retrieval with a local file cache.
//!
//! A cached file is used as is, however old it is. Delete it (or pass
//! `--no-cache`) to pick up a newer issue.

use std::fs;

use reqwest::blocking::Client;

use crate::config::{full_title_url, validate_date, HarvesterConfig};
use crate::error::Result;
use crate::http::{bytes_to_string, get, ACCEPT_XML};
use crate::types::{DateChoice, XmlSource};
use crate::versioner::resolve_title_date;

/// Raw XML of one title and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleXml {
    pub xml: String,
    pub source: XmlSource,
}

/// Download the full XML of a title issue.
///
/// Returns `Ok(None)` when the server answers with a non-success status.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `config` - Harvest configuration (API base URL)
/// * `title` - CFR title number
/// * `date` - Issue date in YYYY-MM-DD format
pub fn download_title_xml(
    client: &Client,
    config: &HarvesterConfig,
    title: u32,
    date: &str,
) -> Result<Option<String>> {
    let url = full_title_url(&config.api_base_url, date, title);
    tracing::info!(title, url = %url, "Requesting title XML");

    let response = get(client, &url, ACCEPT_XML)?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(title, url = %url, status = %status, "Title XML request failed");
        return Ok(None);
    }

    let bytes = response.bytes()?;
    tracing::debug!(title, bytes = bytes.len(), "Title XML downloaded");
    Ok(Some(bytes_to_string(&bytes, &format!("title {title} XML"))))
}

/// Load the XML for a title, from the cache when possible.
///
/// On a cache miss (or when the cache is bypassed) the issue date is taken
/// from the configuration or resolved from the title listing, the XML is
/// downloaded and written to the cache.
///
/// Returns `Ok(None)` when the title is unknown to the listing or the
/// download answered with a non-success status.
pub fn load_title_xml(
    client: &Client,
    config: &HarvesterConfig,
    title: u32,
) -> Result<Option<TitleXml>> {
    let cache_path = config.cache_path(title);

    if !config.bypass_cache && cache_path.is_file() {
        tracing::info!(title, path = %cache_path.display(), "Title XML found in cache");
        let xml = fs::read_to_string(&cache_path)?;
        return Ok(Some(TitleXml {
            xml,
            source: XmlSource::Cache,
        }));
    }

    tracing::info!(title, "Title XML not in cache, downloading");

    let date = match &config.issue_date {
        Some(date) => {
            validate_date(date)?;
            date.clone()
        }
        None => match resolve_title_date(client, config, title, DateChoice::LatestIssueDate)? {
            Some(date) => date,
            None => return Ok(None),
        },
    };

    let Some(xml) = download_title_xml(client, config, title, &date)? else {
        return Ok(None);
    };

    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&cache_path, &xml)?;
    tracing::debug!(title, path = %cache_path.display(), "Title XML cached");

    Ok(Some(TitleXml {
        xml,
        source: XmlSource::Remote,
    }))
}
