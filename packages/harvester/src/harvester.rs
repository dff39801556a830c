//! Main harvester service that ties all components together.

use roxmltree::{Document, ParsingOptions};

use crate::config::{validate_title_number, HarvesterConfig};
use crate::content::load_title_xml;
use crate::error::{HarvesterError, Result};
use crate::http::create_client;
use crate::output::DocumentWriter;
use crate::types::HarvestSummary;
use crate::walker::TitleWalker;

/// Parse full-title XML.
///
/// eCFR title files carry a DOCTYPE, which roxmltree rejects unless DTDs
/// are allowed.
pub fn parse_title_xml(xml: &str) -> Result<Document<'_>> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Ok(Document::parse_with_options(xml, options)?)
}

/// Download (or load from cache), walk and write one CFR title.
///
/// # Arguments
/// * `config` - Harvest configuration
/// * `title` - CFR title number (1-50)
///
/// # Returns
/// A `HarvestSummary` with the number of documents written
pub fn harvest_title(config: &HarvesterConfig, title: u32) -> Result<HarvestSummary> {
    validate_title_number(title)?;

    let client = create_client()?;
    let title_xml =
        load_title_xml(&client, config, title)?.ok_or(HarvesterError::TitleUnavailable(title))?;
    tracing::info!(title, source = title_xml.source.as_str(), "XML loaded");

    let doc = parse_title_xml(&title_xml.xml)?;
    let walker = TitleWalker::new(&doc, title).with_part_scope(config.part_scope);
    let title_description = walker.title_description();
    tracing::info!(title, description = %title_description, "Walking title");

    let writer = DocumentWriter::new(&config.output_dir);
    let documents_written = writer.write_all(walker.documents())?;
    tracing::info!(title, documents = documents_written, "Title harvested");

    Ok(HarvestSummary {
        title_number: title,
        title_description,
        source: title_xml.source,
        documents_written,
        output_dir: config.output_dir.join(format!("title_{title}")),
    })
}

/// Harvest several titles one after another, stopping at the first failure.
pub fn harvest_titles(config: &HarvesterConfig, titles: &[u32]) -> Result<Vec<HarvestSummary>> {
    titles
        .iter()
        .map(|&title| harvest_title(config, title))
        .collect()
}
