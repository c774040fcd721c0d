//! Opening a stored file for transmission

use std::fs::File;
use std::io::{self, Read};

use crate::{Result, SandboxedFileStore};

/// An open file ready to be streamed to a client.
///
/// The handle is owned; dropping the `Download` closes it on every path,
/// whether the transfer finished or failed part way.
#[derive(Debug)]
pub struct Download {
    pub file: File,
    /// Base name to suggest to the client
    pub file_name: String,
    /// Length in bytes at the time the file was opened
    pub len: u64,
}

impl Download {
    /// Read the remaining content into memory.
    pub fn read_all(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.file.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl Read for Download {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl SandboxedFileStore {
    /// Open the file at `relative` for reading.
    ///
    /// Directories are reported as not found: only files can be downloaded.
    pub fn download(&self, relative: &str) -> Result<Download> {
        let path = self.resolve_file(relative)?;

        let file = File::open(&path).map_err(|e| filebox_fs::Error::io(&path, e))?;
        let len = file
            .metadata()
            .map_err(|e| filebox_fs::Error::io(&path, e))?
            .len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::info!(path = relative, size = len, "download");
        Ok(Download {
            file,
            file_name,
            len,
        })
    }
}
