use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// YamlConnection owns the data directory all YAML documents live under
#[derive(Clone)]
pub struct YamlConnection {
    base_directory: PathBuf,
}

impl YamlConnection {
    /// Open a connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory holding one `<YYYY-MM-DD>.yaml` document per date
    pub fn claims_directory(&self) -> PathBuf {
        self.base_directory.join("claims")
    }

    pub fn ensure_claims_directory(&self) -> Result<PathBuf> {
        let dir = self.claims_directory();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            info!("Created claims directory: {}", dir.display());
        }
        Ok(dir)
    }
}

/// Write `contents` next to `path` first, then rename over it.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
