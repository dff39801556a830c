//! eCFR Harvester - Download US federal regulations from the eCFR API.
//!
//! This crate downloads full-title XML of the Code of Federal Regulations
//! and splits it into one JSON document per section or appendix, each with
//! a Markdown body and the metadata of its place in the hierarchy.
//!
//! # Example
//!
//! ```
//! use ecfr_harvester::config;
//!
//! // Validate title number and date
//! assert!(config::validate_title_number(29).is_ok());
//! assert!(config::validate_date("2025-01-01").is_ok());
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Configuration, validation and URL builders
//! - [`types`]: Core data types (hierarchy nodes, output documents, etc.)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for the eCFR versioner API
//! - [`versioner`]: Title listing and date resolution
//! - [`content`]: Full-title XML download and cache
//! - [`xml`]: XML utilities
//! - [`render`]: Markdown rendering of sections and appendices
//! - [`walker`]: Hierarchy traversal producing output documents
//! - [`output`]: JSON document writer
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod harvester;
pub mod http;
pub mod output;
pub mod render;
pub mod types;
pub mod versioner;
pub mod walker;
pub mod xml;

// Re-export main functions
pub use harvester::{harvest_title, harvest_titles, parse_title_xml};

// Re-export commonly used items
pub use config::{validate_date, validate_title_number, HarvesterConfig};
pub use error::{HarvesterError, Result};
pub use types::{DateChoice, DocumentMetadata, LeafKind, OutputDocument, PartScope};
pub use walker::TitleWalker;
