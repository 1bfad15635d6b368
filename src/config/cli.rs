use crate::domain::ports::Storage;
use crate::utils::error::{Result, SweepError};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    type Writer = File;

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        // input paths are taken as given, not relative to the output directory
        fs::read(path).await.map_err(|source| SweepError::InputUnreadable {
            path: path.to_string(),
            source,
        })
    }

    async fn create_file(&self, path: &str) -> Result<File> {
        let full_path = self.resolve(path);
        File::create(&full_path)
            .await
            .map_err(|source| SweepError::OutputUncreatable {
                path: full_path.display().to_string(),
                source,
            })
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}
