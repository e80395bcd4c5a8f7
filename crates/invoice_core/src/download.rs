//! Delivery of generated documents.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};

pub trait DownloadSink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes documents into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDownloadSink {
    dir: PathBuf,
}

impl DirectoryDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Replaces path separators the way browsers do for download names.
fn sanitize_filename(filename: &str) -> Result<String> {
    let name: String = filename
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    if name.is_empty() || name == "." || name == ".." {
        return Err(anyhow!("invalid download filename '{filename}'"));
    }
    Ok(name)
}

/// Partially written download, removed on drop unless persisted.
struct PartialFile {
    path: PathBuf,
    persisted: bool,
}

impl PartialFile {
    fn create(path: PathBuf, bytes: &[u8]) -> Result<Self> {
        let partial = Self {
            path,
            persisted: false,
        };
        fs::write(&partial.path, bytes)
            .with_context(|| format!("failed to write '{}'", partial.path.display()))?;
        Ok(partial)
    }

    fn persist(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target).with_context(|| {
            format!(
                "failed to move '{}' to '{}'",
                self.path.display(),
                target.display()
            )
        })?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}

impl DownloadSink for DirectoryDownloadSink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = sanitize_filename(filename)?;

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create '{}'", self.dir.display()))?;

        let target = self.dir.join(&name);
        let partial = PartialFile::create(self.dir.join(format!("{name}.part")), bytes)?;
        partial.persist(&target)?;

        tracing::info!(path = %target.display(), bytes = bytes.len(), "document downloaded");
        Ok(target)
    }
}

/// Records deliveries without touching the file system.
#[derive(Debug, Clone, Default)]
pub struct MemoryDownloadSink {
    pub downloads: Vec<(String, Vec<u8>)>,
}

impl DownloadSink for MemoryDownloadSink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.downloads.push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_document_and_leaves_no_partial_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut sink = DirectoryDownloadSink::new(dir.path().join("out"));

        let path = sink
            .deliver("Invoice_9.xlsx", b"xlsx-bytes")
            .expect("deliver");

        assert_eq!(path, dir.path().join("out").join("Invoice_9.xlsx"));
        assert_eq!(fs::read(&path).expect("read"), b"xlsx-bytes");
        assert!(!dir.path().join("out").join("Invoice_9.xlsx.part").exists());
    }

    #[test]
    fn path_separators_in_invoice_number_stay_inside_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut sink = DirectoryDownloadSink::new(dir.path());

        let path = sink
            .deliver("Invoice_INV/2026/../7.xlsx", b"x")
            .expect("deliver");
        assert_eq!(path, dir.path().join("Invoice_INV_2026_.._7.xlsx"));
    }

    #[test]
    fn rejects_empty_filename() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut sink = DirectoryDownloadSink::new(dir.path());

        let err = sink.deliver("..", b"x").expect_err("should fail");
        assert!(err.to_string().contains("invalid download filename"));
    }

    #[test]
    fn partial_file_is_removed_when_not_persisted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.part");
        let partial = PartialFile::create(path.clone(), b"data").expect("create");
        assert!(path.exists());
        drop(partial);
        assert!(!path.exists());
    }
}
