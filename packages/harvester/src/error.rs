//! Error types for the harvester.
//!
//! Conditions the eCFR data legitimately produces (an unknown title, a
//! missing heading) are not errors; they surface as `Option`s or placeholder
//! text. Everything here aborts the current title.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Title number outside the CFR range.
    #[error("Invalid CFR title: '{0}'. Expected a number between 1 and 50")]
    InvalidTitle(String),

    /// Invalid date format.
    #[error("Invalid date format: '{0}'. Expected YYYY-MM-DD (e.g., 2025-01-01)")]
    InvalidDate(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download the title listing.
    #[error("Failed to download title listing from {url}: {source}")]
    TitleListing {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// A hierarchy element lacks its identifying attribute.
    #[error("Missing required attribute {attribute} on <{element}>")]
    MissingAttribute { attribute: String, element: String },

    /// No XML could be obtained for the title.
    #[error("No XML available for title {0}")]
    TitleUnavailable(u32),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
