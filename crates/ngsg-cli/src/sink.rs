use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use ngsg_core::GeneratedFile;
use ngsg_core::pipeline::OutputSink;

/// Writes generated files below an output directory.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for FsSink {
    type Error = io::Error;

    async fn clear(&self) -> io::Result<()> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => {
                debug!("removed {}", self.root.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn write(&self, file: &GeneratedFile) -> io::Result<()> {
        let path = self.root.join(&file.path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &file.content).await?;
        eprintln!("  wrote {}", path.display());
        Ok(())
    }
}
