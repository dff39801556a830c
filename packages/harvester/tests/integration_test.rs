//! End-to-end integration tests for the harvester pipeline.
//!
//! Tests the complete pipeline from XML parsing to JSON output using a
//! trimmed fixture of Title 29 (Labor).

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use ecfr_harvester::output::DocumentWriter;
use ecfr_harvester::types::XmlSource;
use ecfr_harvester::{
    harvest_title, parse_title_xml, HarvesterConfig, OutputDocument, PartScope, TitleWalker,
};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("title29")
        .join(name)
}

/// Walk the fixture with the given part scope.
fn run_walk(scope: PartScope) -> Vec<OutputDocument> {
    let xml = load_fixture("title29.xml");
    let doc = parse_title_xml(&xml).expect("Failed to parse title XML");
    TitleWalker::new(&doc, 29)
        .with_part_scope(scope)
        .documents()
        .collect::<Result<Vec<_>, _>>()
        .expect("Walk should succeed")
}

/// Config that reads title 29 from a cache copy of the fixture and never hits the network.
fn cached_config(root: &Path) -> HarvesterConfig {
    let cache_dir = root.join("cache");
    fs::create_dir_all(&cache_dir).unwrap();
    fs::copy(fixture_path("title29.xml"), cache_dir.join("title29.xml")).unwrap();

    HarvesterConfig::new()
        .with_api_base_url("http://127.0.0.1:1")
        .with_cache_dir(cache_dir)
        .with_output_dir(root.join("documents"))
}

/// Collect all files below `dir`, sorted, relative to `dir`.
fn list_files(dir: &Path) -> Vec<PathBuf> {
    fn visit(base: &Path, dir: &Path, files: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                visit(base, &path, files);
            } else {
                files.push(path.strip_prefix(base).unwrap().to_path_buf());
            }
        }
    }
    let mut files = Vec::new();
    visit(dir, dir, &mut files);
    files.sort();
    files
}

#[test]
fn test_walk_document_count() {
    let docs = run_walk(PartScope::Subchapter);

    // Part 1902 sits directly under the chapter and is not reached.
    assert_eq!(docs.len(), 5, "Expected 5 leaves, got {}", docs.len());
}

#[test]
fn test_walk_order() {
    let docs = run_walk(PartScope::Subchapter);
    let codes: Vec<_> = docs
        .iter()
        .map(|d| {
            d.metadata
                .section_number
                .clone()
                .or_else(|| d.metadata.appendix_number.clone())
                .unwrap()
        })
        .collect();

    assert_eq!(
        codes,
        vec![
            "1910.1",
            "1910.2",
            "1910.1000",
            "Appendix A to § 1910.1000",
            "1926.1"
        ]
    );
}

#[test]
fn test_section_content() {
    let docs = run_walk(PartScope::Subchapter);
    let section = &docs[0];
    let url = "https://www.ecfr.gov/current/title-29/subtitle-B/chapter-XVII/part-1910/subpart-A/section-1910.1";

    assert_eq!(
        section.page_content,
        format!(
            "\n    # § 1910.1   Purpose and scope.\n    \n    \
             (a) Section 6(a) of the Act requires the Secretary of Labor to adopt standards.\n\n\n\
             (b) The legal effect of a national consensus standard is described here.\n    \n    \
             **[39 FR 23502, June 27, 1974]**\n    \n\n__{url}__"
        )
    );
    assert_eq!(section.metadata.url, url);
}

#[test]
fn test_section_metadata() {
    let docs = run_walk(PartScope::Subchapter);
    let metadata = &docs[1].metadata;

    assert_eq!(metadata.title_number, 29);
    assert_eq!(metadata.title_description, "Title 29—Labor");
    assert_eq!(metadata.subtitle_number, "B");
    assert_eq!(metadata.chapter_number, "XVII");
    assert_eq!(metadata.subchapter_number, "A");
    assert_eq!(metadata.subchapter_description, "SUBCHAPTER A—GENERAL");
    assert_eq!(metadata.part_number, "1910");
    assert_eq!(metadata.sub_part_number, "A");
    assert_eq!(metadata.section_number.as_deref(), Some("1910.2"));
    assert_eq!(
        metadata.section_description.as_deref(),
        Some("§ 1910.2   Definitions.")
    );
    assert!(metadata.appendix_number.is_none());
}

#[test]
fn test_missing_citation_placeholder() {
    let docs = run_walk(PartScope::Subchapter);
    assert!(docs[1].page_content.contains("**NO CITE**"));
}

#[test]
fn test_appendix_document() {
    let docs = run_walk(PartScope::Subchapter);
    let appendix = &docs[3];

    assert_eq!(
        appendix.metadata.appendix_description.as_deref(),
        Some("Appendix A to § 1910.1000—Table Notes")
    );
    assert_eq!(
        appendix.metadata.url,
        "https://www.ecfr.gov/current/title-29/subtitle-B/chapter-XVII/part-1910/subpart-Z/appendix-Appendix%20A%20to%20%C2%A7%201910.1000"
    );
    assert_eq!(
        appendix.relative_path,
        PathBuf::from(
            "title_29/subtitle_B/chap_XVII/subchapt_A/part_1910/subpart_Z/Appendix%20A%20to%20%C2%A7%201910.1000.json"
        )
    );
}

#[test]
fn test_document_scope_reproduces_global_part_scan() {
    let docs = run_walk(PartScope::Document);

    // 2 subchapters x 3 parts x 6 leaves across all subparts
    assert_eq!(docs.len(), 36);

    // Part 1902 now appears below subchapter B, paired with subpart Z of part 1910.
    assert!(docs.iter().any(|d| d.relative_path
        == PathBuf::from(
            "title_29/subtitle_B/chap_XVII/subchapt_B/part_1902/subpart_Z/1910.1000.json"
        )));
}

#[test]
fn test_harvest_writes_tree() {
    let temp_dir = tempdir().unwrap();
    let config = cached_config(temp_dir.path());

    let summary = harvest_title(&config, 29).expect("Harvest should succeed");
    assert_eq!(summary.source, XmlSource::Cache);
    assert_eq!(summary.documents_written, 5);

    let files = list_files(&temp_dir.path().join("documents"));
    assert_eq!(files.len(), 5);
    assert!(files.contains(&PathBuf::from(
        "title_29/subtitle_B/chap_XVII/subchapt_B/part_1926/subpart_A/1926.1.json"
    )));

    let content = fs::read_to_string(
        temp_dir
            .path()
            .join("documents/title_29/subtitle_B/chap_XVII/subchapt_A/part_1910/subpart_Z/1910.1000.json"),
    )
    .unwrap();
    assert!(content.starts_with("{\n    \"page_content\": \"\\n    # § 1910.1000"));

    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["metadata"]["section_number"], "1910.1000");
    assert_eq!(parsed["metadata"]["part_description"], "PART 1910—OCCUPATIONAL SAFETY AND HEALTH STANDARDS");
}

#[test]
fn test_harvest_is_deterministic() {
    let temp_dir = tempdir().unwrap();
    let config = cached_config(temp_dir.path());
    let output = temp_dir.path().join("documents");

    harvest_title(&config, 29).unwrap();
    let first: Vec<_> = list_files(&output)
        .iter()
        .map(|f| fs::read(output.join(f)).unwrap())
        .collect();

    harvest_title(&config, 29).unwrap();
    let second: Vec<_> = list_files(&output)
        .iter()
        .map(|f| fs::read(output.join(f)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_writer_consumes_walk() {
    let temp_dir = tempdir().unwrap();
    let xml = load_fixture("title29.xml");
    let doc = parse_title_xml(&xml).unwrap();
    let writer = DocumentWriter::new(temp_dir.path());

    let written = writer
        .write_all(TitleWalker::new(&doc, 29).documents())
        .unwrap();
    assert_eq!(written, 5);
    assert_eq!(list_files(temp_dir.path()).len(), 5);
}
