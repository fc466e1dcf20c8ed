use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf};

use anyhow::Context;
use tokio::sync::Mutex;

/// String key-value pairs kept in one JSON file. A missing file reads as an
/// empty map; writes replace the file through a temporary sibling.
pub struct KvStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl KvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        KvStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut entries = self.read_all().await?;
        Ok(entries.remove(key))
    }

    pub async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp_path = self.path.with_extension("tmp");
        let contents = serde_json::to_vec_pretty(&entries)?;
        tokio::fs::write(&tmp_path, contents)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }

    async fn read_all(&self) -> anyhow::Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("{} is not a JSON object", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }
}
