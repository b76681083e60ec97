//! Host-directory storage backend.
//!
//! Each kernel file is one regular file inside `root`. The namespace stays
//! flat: names that would escape `root` are rejected.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::Storage;
use crate::error::{KernelError, KernelResult};

#[derive(Debug, Clone)]
pub struct HostStorage {
    root: PathBuf,
}

impl HostStorage {
    /// Serve files from `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> KernelResult<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(KernelError::InvalidArgument);
        }
        Ok(self.root.join(name))
    }
}

fn map_io(err: std::io::Error) -> KernelError {
    match err.kind() {
        ErrorKind::NotFound => KernelError::NotFound,
        ErrorKind::AlreadyExists => KernelError::Conflict,
        _ => {
            log::warn!("[FS] host I/O error: {}", err);
            KernelError::InvalidArgument
        }
    }
}

impl Storage for HostStorage {
    type Handle = File;

    fn create(&mut self, name: &str) -> KernelResult<()> {
        let path = self.path(name)?;
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
            .map_err(map_io)
    }

    fn open(&mut self, name: &str) -> KernelResult<File> {
        let path = self.path(name)?;
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(map_io)
    }

    fn close(&mut self, handle: File) {
        drop(handle);
    }

    fn read_at(&mut self, handle: &File, offset: usize, buf: &mut [u8]) -> usize {
        let mut file = handle;
        if file.seek(SeekFrom::Start(offset as u64)).is_err() {
            return 0;
        }
        let mut total = 0;
        while total < buf.len() {
            match file.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("[FS] host read failed: {}", e);
                    break;
                }
            }
        }
        total
    }

    fn write_at(&mut self, handle: &File, offset: usize, bytes: &[u8]) -> usize {
        let mut file = handle;
        let written = file
            .seek(SeekFrom::Start(offset as u64))
            .and_then(|_| file.write_all(bytes));
        match written {
            Ok(()) => bytes.len(),
            Err(e) => {
                log::warn!("[FS] host write failed: {}", e);
                0
            }
        }
    }

    fn length(&mut self, handle: &File) -> usize {
        handle.metadata().map(|m| m.len() as usize).unwrap_or(0)
    }

    fn delete(&mut self, name: &str) -> KernelResult<()> {
        let path = self.path(name)?;
        fs::remove_file(path).map_err(map_io)
    }

    fn exists(&self, name: &str) -> bool {
        self.path(name).map(|p| p.is_file()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scratch() -> HostStorage {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let dir = std::env::temp_dir().join(format!(
            "trapgate-host-{}-{}",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = fs::remove_dir_all(&dir);
        HostStorage::new(dir).unwrap()
    }

    #[test]
    fn create_open_write_read() {
        let mut host = scratch();
        host.create("notes").unwrap();
        assert_eq!(host.create("notes"), Err(KernelError::Conflict));

        let h = host.open("notes").unwrap();
        assert_eq!(host.write_at(&h, 0, b"abc"), 3);
        assert_eq!(host.length(&h), 3);

        let mut buf = [0u8; 8];
        assert_eq!(host.read_at(&h, 1, &mut buf), 2);
        assert_eq!(&buf[..2], b"bc");
        host.close(h);

        host.delete("notes").unwrap();
        assert!(!host.exists("notes"));
        let _ = fs::remove_dir_all(host.root());
    }

    #[test]
    fn path_escapes_are_rejected() {
        let mut host = scratch();
        assert_eq!(host.create("../x"), Err(KernelError::InvalidArgument));
        assert_eq!(host.open("..").err(), Some(KernelError::InvalidArgument));
        assert_eq!(host.open("missing").err(), Some(KernelError::NotFound));
        let _ = fs::remove_dir_all(host.root());
    }
}
