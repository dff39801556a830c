//! JSON output for harvested documents.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::types::OutputDocument;

/// Serialize a document as JSON indented by four spaces, without a trailing newline.
pub fn to_pretty_json(document: &OutputDocument) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes documents below an output root.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    root: PathBuf,
}

impl DocumentWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write one document, replacing any previous file at its path.
    ///
    /// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
    ///
    /// # Returns
    /// Path to the saved file
    pub fn write(&self, document: &OutputDocument) -> Result<PathBuf> {
        let output_file = self.root.join(&document.relative_path);
        let output_dir = output_file.parent().unwrap_or(self.root.as_path()).to_path_buf();
        fs::create_dir_all(&output_dir)?;

        let file_name = output_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_file = output_dir.join(format!(".{file_name}.tmp"));

        let content = to_pretty_json(document)?;

        {
            let mut file = File::create(&temp_file)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if output_file.exists() {
            fs::remove_file(&output_file)?;
        }

        fs::rename(&temp_file, &output_file)?;
        tracing::trace!(path = %output_file.display(), "Document written");

        Ok(output_file)
    }

    /// Write every document of a walk, stopping at the first error.
    ///
    /// Files written before a failure are left in place.
    ///
    /// # Returns
    /// Number of documents written
    pub fn write_all<I>(&self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<OutputDocument>>,
    {
        let mut written = 0;
        for document in documents {
            self.write(&document?)?;
            written += 1;
        }
        Ok(written)
    }
}
