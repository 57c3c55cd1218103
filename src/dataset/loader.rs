//! @ai:module:intent JSON dataset loader for benchmark questions
//! @ai:module:layer infrastructure
//! @ai:module:public_api DatasetLoader, DatasetLoaderTrait
//! @ai:module:stateless true

use crate::dataset::question::{Dataset, DatasetFile, DatasetInfo};
use crate::error::{PipelineError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Trait for loading question datasets
pub trait DatasetLoaderTrait: Send + Sync {
    /// @ai:intent Load the dataset `<datasets_dir>/<benchmark_id>.json`
    fn load(&self, datasets_dir: &Path, benchmark_id: &str) -> Result<Dataset>;

    /// @ai:intent Describe every readable dataset in the directory
    fn list(&self, datasets_dir: &Path) -> Result<Vec<DatasetInfo>>;
}

/// @ai:intent Loads datasets from JSON files
/// @ai:effects pure (stateless)
pub struct DatasetLoader;

impl DatasetLoader {
    /// @ai:intent Create a new dataset loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:effects pure
    pub fn dataset_path(datasets_dir: &Path, benchmark_id: &str) -> PathBuf {
        datasets_dir.join(format!("{benchmark_id}.json"))
    }

    /// @ai:intent Parse a single dataset file
    /// @ai:effects fs:read
    fn parse_dataset_file(path: &Path, benchmark_id: &str) -> Result<Dataset> {
        let content = std::fs::read_to_string(path)?;
        let file: DatasetFile =
            serde_json::from_str(&content).map_err(|source| PipelineError::DatasetParse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Dataset::from_file(benchmark_id, file))
    }

    /// @ai:intent Find all JSON files directly under the directory
    /// @ai:effects fs:read
    fn find_dataset_files(datasets_dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(datasets_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoaderTrait for DatasetLoader {
    /// @ai:intent Load a dataset by benchmark id
    /// @ai:post returned dataset has at least one question
    /// @ai:effects fs:read
    fn load(&self, datasets_dir: &Path, benchmark_id: &str) -> Result<Dataset> {
        let path = Self::dataset_path(datasets_dir, benchmark_id);

        if !path.is_file() {
            return Err(PipelineError::DatasetNotFound {
                benchmark: benchmark_id.to_string(),
                path,
            });
        }

        let dataset = Self::parse_dataset_file(&path, benchmark_id)?;
        if dataset.questions.is_empty() {
            return Err(PipelineError::EmptyDataset(benchmark_id.to_string()));
        }

        tracing::info!(
            "Loaded dataset '{}' with {} questions",
            benchmark_id,
            dataset.questions.len()
        );
        Ok(dataset)
    }

    /// @ai:intent List datasets, skipping files that do not parse
    /// @ai:effects fs:read
    fn list(&self, datasets_dir: &Path) -> Result<Vec<DatasetInfo>> {
        let mut infos = Vec::new();

        for path in Self::find_dataset_files(datasets_dir) {
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match Self::parse_dataset_file(&path, id) {
                Ok(dataset) => infos.push(DatasetInfo::from(&dataset)),
                Err(e) => {
                    tracing::warn!("Skipping invalid dataset file {}: {}", path.display(), e);
                }
            }
        }

        infos.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(infos)
    }
}
