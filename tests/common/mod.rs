//! Common test utilities - LogArchive builder for zipped log fixtures

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Builds a zip archive of log files inside a test directory
pub struct LogArchive {
    path: PathBuf,
    writer: ZipWriter<File>,
}

impl LogArchive {
    /// Start a new archive at `dir/name`
    pub fn create(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(name);
        let writer = ZipWriter::new(File::create(&path)?);
        Ok(Self { path, writer })
    }

    /// Add a log file, one entry per line
    pub fn log(mut self, name: &str, lines: &[&str]) -> Result<Self> {
        self.writer.start_file(name, SimpleFileOptions::default())?;
        for line in lines {
            writeln!(self.writer, "{}", line)?;
        }
        Ok(self)
    }

    /// Add a file with raw contents
    pub fn raw(mut self, name: &str, bytes: &[u8]) -> Result<Self> {
        self.writer.start_file(name, SimpleFileOptions::default())?;
        self.writer.write_all(bytes)?;
        Ok(self)
    }

    /// Add a directory entry
    pub fn dir(mut self, name: &str) -> Result<Self> {
        self.writer.add_directory(name, SimpleFileOptions::default())?;
        Ok(self)
    }

    /// Finish writing and return the archive path
    pub fn finish(self) -> Result<PathBuf> {
        self.writer.finish()?;
        Ok(self.path)
    }
}
