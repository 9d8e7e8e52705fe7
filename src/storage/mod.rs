// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::{Category, ResultSet};
use crate::reader::models::DocumentSummary;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self {
            base_dir: base_path,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes one category's numbers as a single-column CSV named
    /// `<category>_numbers.csv`. The caller guarantees the slice is unique
    /// and ascending; this layer just renders it.
    pub fn save_category_csv(
        &self,
        category: Category,
        numbers: &[u64],
    ) -> Result<PathBuf, StorageError> {
        let filename = format!("{}_numbers.csv", category.file_stem());
        let file_path = self.base_dir.join(filename);

        let mut writer = csv::Writer::from_path(&file_path)?;
        writer.write_record(["Numbers"])?;
        for number in numbers {
            writer.write_record([number.to_string()])?;
        }
        writer.flush().map_err(StorageError::IoError)?;

        tracing::info!(
            "Saved {} {} numbers to {}",
            numbers.len(),
            category,
            file_path.display()
        );

        Ok(file_path)
    }

    /// Saves every non-empty category of the result set; an empty category
    /// signals absence, not failure, and produces no file. Returns the
    /// paths written.
    pub fn save_results(&self, result: &ResultSet) -> Result<Vec<PathBuf>, StorageError> {
        let mut written = Vec::new();
        for (category, numbers) in result.iter() {
            if numbers.is_empty() {
                tracing::debug!("No {} numbers extracted, skipping file", category);
                continue;
            }
            written.push(self.save_category_csv(category, numbers)?);
        }
        Ok(written)
    }

    /// Saves metadata about the extraction run in JSON format
    pub fn save_run_metadata(
        &self,
        summary: &DocumentSummary,
        result: &ResultSet,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join("extraction_meta.json");

        let mut counts = serde_json::Map::new();
        for (category, numbers) in result.iter() {
            counts.insert(category.label().to_string(), numbers.len().into());
        }

        let metadata = serde_json::json!({
            "source": summary.source,
            "page_count": summary.page_count,
            "pages_with_text": summary.pages_with_text,
            "counts": counts,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::JournalExtractor;

    fn sample_result() -> ResultSet {
        let page = "54321 15/03/2021\n12345 01/01/2020\nCORRIGENDA\n98765\n";
        JournalExtractor::new().extract_all([Some(page)])
    }

    #[test]
    fn category_csv_has_header_and_ascending_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = StorageManager::new(dir.path()).expect("storage");

        let path = storage
            .save_category_csv(Category::Advertisement, &[12345, 54321])
            .expect("write csv");

        let contents = fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "Numbers\n12345\n54321\n");
        assert!(path.ends_with("advertisement_numbers.csv"));
    }

    #[test]
    fn empty_categories_produce_no_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = StorageManager::new(dir.path()).expect("storage");

        let written = storage.save_results(&sample_result()).expect("save");

        // Advertisement and Corrigenda matched; RC and Renewal did not.
        assert_eq!(written.len(), 2);
        assert!(!dir.path().join("rc_numbers.csv").exists());
        assert!(!dir.path().join("renewal_numbers.csv").exists());
    }

    #[test]
    fn metadata_records_per_category_counts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = StorageManager::new(dir.path()).expect("storage");
        let summary = DocumentSummary {
            source: PathBuf::from("journal.pdf"),
            page_count: 3,
            pages_with_text: 2,
        };

        let path = storage
            .save_run_metadata(&summary, &sample_result())
            .expect("metadata");

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).expect("read back")).expect("json");
        assert_eq!(parsed["page_count"], 3);
        assert_eq!(parsed["counts"]["Advertisement"], 2);
        assert_eq!(parsed["counts"]["RC"], 0);
    }
}
