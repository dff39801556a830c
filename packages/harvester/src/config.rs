//! Configuration constants, validation functions and URL builders for the harvester.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};
use crate::types::{LeafKind, PartScope};

/// Base URL for the eCFR versioner API.
pub const ECFR_API_URL: &str = "https://www.ecfr.gov/api/versioner/v1";

/// Base URL for the public eCFR regulation viewer.
pub const ECFR_VIEWER_URL: &str = "https://www.ecfr.gov/current";

/// HTTP timeout in seconds.
///
/// Full-title XML files run to hundreds of megabytes for the larger titles.
pub const HTTP_TIMEOUT_SECS: u64 = 120;

/// Default directory for cached title XML.
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Default root directory for the generated JSON documents.
pub const DEFAULT_OUTPUT_DIR: &str = "documents";

/// Highest title number in the CFR.
pub const MAX_TITLE_NUMBER: u32 = 50;

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Runtime configuration for a harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvesterConfig {
    /// Base URL of the versioner API (overridable for tests and mirrors).
    pub api_base_url: String,
    /// Directory holding `title<N>.xml` cache files.
    pub cache_dir: PathBuf,
    /// Root of the generated document tree.
    pub output_dir: PathBuf,
    /// Always download, even when a cache file exists.
    pub bypass_cache: bool,
    /// Pinned issue date; when unset the latest issue date is resolved.
    pub issue_date: Option<String>,
    /// Where parts and subparts are searched during the walk.
    pub part_scope: PartScope,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            api_base_url: ECFR_API_URL.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            bypass_cache: false,
            issue_date: None,
            part_scope: PartScope::default(),
        }
    }
}

impl HarvesterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_bypass_cache(mut self, bypass: bool) -> Self {
        self.bypass_cache = bypass;
        self
    }

    pub fn with_issue_date(mut self, date: impl Into<String>) -> Self {
        self.issue_date = Some(date.into());
        self
    }

    pub fn with_part_scope(mut self, scope: PartScope) -> Self {
        self.part_scope = scope;
        self
    }

    /// Cache file location for a title.
    #[must_use]
    pub fn cache_path(&self, title: u32) -> PathBuf {
        cache_file_path(&self.cache_dir, title)
    }
}

/// Validate a CFR title number.
///
/// # Examples
/// ```
/// use ecfr_harvester::config::validate_title_number;
///
/// assert!(validate_title_number(29).is_ok());
/// assert!(validate_title_number(0).is_err());
/// assert!(validate_title_number(51).is_err());
/// ```
pub fn validate_title_number(title: u32) -> Result<()> {
    if (1..=MAX_TITLE_NUMBER).contains(&title) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidTitle(title.to_string()))
    }
}

/// Validate date format (YYYY-MM-DD).
///
/// Rejects dates in the future since eCFR has no issues for them.
///
/// # Examples
/// ```
/// use ecfr_harvester::config::validate_date;
///
/// assert!(validate_date("2025-01-01").is_ok());
/// assert!(validate_date("invalid").is_err());
/// assert!(validate_date("2025-13-01").is_err()); // Invalid month
/// ```
pub fn validate_date(date_str: &str) -> Result<()> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(HarvesterError::InvalidDate(date_str.to_string()));
    }

    let parsed_date = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| HarvesterError::InvalidDate(date_str.to_string()))?;

    let today = chrono::Local::now().date_naive();
    if parsed_date > today {
        return Err(HarvesterError::InvalidDate(format!(
            "{date_str} is in the future (today is {today})"
        )));
    }

    Ok(())
}

/// Build the title listing URL.
pub fn titles_url(api_base: &str) -> String {
    format!("{api_base}/titles")
}

/// Build the full-title XML URL for a title issue.
///
/// # Panics
/// Debug builds panic if the date doesn't match the expected format.
pub fn full_title_url(api_base: &str, date: &str, title: u32) -> String {
    debug_assert!(
        DATE_PATTERN.is_match(date),
        "date should be validated before calling full_title_url"
    );
    format!("{api_base}/full/{date}/title-{title}.xml")
}

/// Cache file location for a title under `cache_dir`.
pub fn cache_file_path(cache_dir: &Path, title: u32) -> PathBuf {
    cache_dir.join(format!("title{title}.xml"))
}

/// Build the eCFR viewer URL for a section or appendix.
///
/// Only the leaf code is percent-encoded; ancestor codes are used verbatim.
///
/// # Examples
/// ```
/// use ecfr_harvester::config::ecfr_url;
/// use ecfr_harvester::types::LeafKind;
///
/// assert_eq!(
///     ecfr_url(29, "B", "XVII", "1910", "A", LeafKind::Section, "1910.1"),
///     "https://www.ecfr.gov/current/title-29/subtitle-B/chapter-XVII/part-1910/subpart-A/section-1910.1"
/// );
/// ```
pub fn ecfr_url(
    title: u32,
    subtitle: &str,
    chapter: &str,
    part: &str,
    subpart: &str,
    kind: LeafKind,
    code: &str,
) -> String {
    format!(
        "{ECFR_VIEWER_URL}/title-{title}/subtitle-{subtitle}/chapter-{chapter}/part-{part}/subpart-{subpart}/{}-{}",
        kind.url_segment(),
        urlencoding::encode(code)
    )
}
