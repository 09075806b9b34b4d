use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 本機檔案儲存；相對路徑以 `base_path` 為基準，絕對路徑直接使用
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}
