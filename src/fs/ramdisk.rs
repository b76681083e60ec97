//! In-memory storage backend.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::Storage;
use crate::error::{KernelError, KernelResult};

/// Handle into a [`RamDisk`]: the name of the open entry.
#[derive(Debug, PartialEq, Eq)]
pub struct RamHandle(String);

/// Files kept in a map from name to contents.
#[derive(Debug, Default, Clone)]
pub struct RamDisk {
    files: BTreeMap<String, Vec<u8>>,
}

impl RamDisk {
    /// An empty disk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of `name`, if present.
    pub fn contents(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    fn data(&self, handle: &RamHandle) -> &[u8] {
        self.files.get(&handle.0).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Storage for RamDisk {
    type Handle = RamHandle;

    fn create(&mut self, name: &str) -> KernelResult<()> {
        if self.files.contains_key(name) {
            return Err(KernelError::Conflict);
        }
        self.files.insert(name.to_string(), Vec::new());
        Ok(())
    }

    fn open(&mut self, name: &str) -> KernelResult<RamHandle> {
        if !self.files.contains_key(name) {
            return Err(KernelError::NotFound);
        }
        Ok(RamHandle(name.to_string()))
    }

    fn close(&mut self, _handle: RamHandle) {}

    fn read_at(&mut self, handle: &RamHandle, offset: usize, buf: &mut [u8]) -> usize {
        let data = self.data(handle);
        if offset >= data.len() {
            return 0;
        }
        let n = buf.len().min(data.len() - offset);
        buf[..n].copy_from_slice(&data[offset..offset + n]);
        n
    }

    fn write_at(&mut self, handle: &RamHandle, offset: usize, bytes: &[u8]) -> usize {
        let Some(data) = self.files.get_mut(&handle.0) else {
            return 0;
        };
        let end = offset + bytes.len();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[offset..end].copy_from_slice(bytes);
        bytes.len()
    }

    fn length(&mut self, handle: &RamHandle) -> usize {
        self.data(handle).len()
    }

    fn delete(&mut self, name: &str) -> KernelResult<()> {
        self.files
            .remove(name)
            .map(|_| ())
            .ok_or(KernelError::NotFound)
    }

    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }
}
