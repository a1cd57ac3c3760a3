//! Download sink that writes exports to a directory

use std::fs;
use std::path::{Path, PathBuf};

use painting::{DownloadSink, ExportError, decode_data_url};
use tracing::info;

/// Writes each delivered data URL's payload to `<dir>/<filename>`
pub struct FileDownload {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DownloadSink for FileDownload {
    fn deliver(&mut self, filename: &str, data_url: &str) -> Result<(), ExportError> {
        // Export names never contain separators; anything else is not ours to write
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(ExportError::Download(format!(
                "refusing to write {:?}",
                filename
            )));
        }

        let (mime, bytes) = decode_data_url(data_url)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, &bytes)?;

        info!("Wrote {} ({}, {} bytes)", path.display(), mime, bytes.len());
        self.written.push(path);
        Ok(())
    }
}
