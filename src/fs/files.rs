//! File Facade
//!
//! The operations behind the file syscalls. Storage and descriptor table sit
//! under a single lock, so name checks, slot allocation and close are atomic
//! with respect to each other.

use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use spin::Mutex;

use super::table::{Access, DescriptorTable, Fd, OpenFile};
use super::Storage;
use crate::drivers::Console;
use crate::error::{KernelError, KernelResult};

struct Inner<S: Storage> {
    storage: S,
    table: DescriptorTable<S::Handle>,
}

/// Descriptor table plus the storage it opens files from.
pub struct FileSystem<S: Storage> {
    inner: Mutex<Inner<S>>,
}

fn check_name(name: &str) -> KernelResult<()> {
    if name.is_empty() {
        return Err(KernelError::InvalidArgument);
    }
    Ok(())
}

fn check_access(fd: Fd, wanted: Access) -> KernelResult<()> {
    if fd.access().contains(wanted) {
        Ok(())
    } else {
        Err(KernelError::InvalidArgument)
    }
}

impl<S: Storage> FileSystem<S> {
    /// Wrap `storage` with an empty descriptor table.
    pub fn new(storage: S) -> Self {
        Self {
            inner: Mutex::new(Inner {
                storage,
                table: DescriptorTable::new(),
            }),
        }
    }

    /// Create an empty file. Fails if `name` exists, open or not.
    pub fn create(&self, name: &str) -> KernelResult<()> {
        check_name(name)?;
        let mut inner = self.inner.lock();
        inner.storage.create(name)?;
        log::debug!("[FS] created {:?}", name);
        Ok(())
    }

    /// Open `name` into the lowest free descriptor.
    pub fn open(&self, name: &str) -> KernelResult<Fd> {
        check_name(name)?;
        let mut inner = self.inner.lock();

        if inner.table.find_by_name(name).is_some() {
            return Err(KernelError::Conflict);
        }
        if inner.table.find_free().is_none() {
            return Err(KernelError::ResourceExhausted);
        }

        let handle = inner.storage.open(name)?;
        match inner.table.insert(OpenFile::new(name.to_string(), handle)) {
            Ok(fd) => {
                log::debug!("[FS] opened {:?} as {:?}", name, fd);
                Ok(fd)
            }
            Err(file) => {
                inner.storage.close(file.handle);
                Err(KernelError::ResourceExhausted)
            }
        }
    }

    /// Release `fd`. Console ids and empty slots are `InvalidArgument`.
    pub fn close(&self, fd: Fd) -> KernelResult<()> {
        let mut inner = self.inner.lock();
        let file = inner.table.remove(fd)?;
        log::debug!("[FS] closed {:?} ({:?})", fd, file.name);
        inner.storage.close(file.handle);
        Ok(())
    }

    /// Read up to `max` bytes from `fd` at its cursor.
    ///
    /// Descriptor 0 reads a line from `console` instead and never touches
    /// the table.
    pub fn read_at<C: Console>(
        &self,
        console: &Mutex<C>,
        fd: Fd,
        max: usize,
    ) -> KernelResult<Vec<u8>> {
        let mut out = Vec::new();
        self.read_into(console, fd, max, |bytes| {
            out.extend_from_slice(bytes);
            Ok(())
        })?;
        Ok(out)
    }

    /// Read up to `max` bytes from `fd` and hand them to `deliver`.
    ///
    /// The cursor only moves once `deliver` succeeds, so a failed delivery
    /// leaves the file data unconsumed. Console input, once taken from the
    /// device, is gone either way.
    ///
    /// # Returns
    /// The number of bytes delivered.
    pub fn read_into<C, F>(
        &self,
        console: &Mutex<C>,
        fd: Fd,
        max: usize,
        deliver: F,
    ) -> KernelResult<usize>
    where
        C: Console,
        F: FnOnce(&[u8]) -> KernelResult<()>,
    {
        check_access(fd, Access::READ)?;
        if fd == Fd::CONSOLE_INPUT {
            let line = console.lock().read_line(max);
            deliver(&line)?;
            return Ok(line.len());
        }

        let mut inner = self.inner.lock();
        let Inner { storage, table } = &mut *inner;
        let file = table.lookup_mut(fd)?;

        let available = storage.length(&file.handle).saturating_sub(file.cursor);
        let mut buf = vec![0u8; max.min(available)];
        let n = storage.read_at(&file.handle, file.cursor, &mut buf);
        buf.truncate(n);
        deliver(&buf)?;
        file.cursor += n;
        Ok(n)
    }

    /// Write `bytes` to `fd` at its cursor.
    ///
    /// Descriptor 1 goes to `console` and always reports the full length.
    pub fn write_at<C: Console>(
        &self,
        console: &Mutex<C>,
        fd: Fd,
        bytes: &[u8],
    ) -> KernelResult<usize> {
        check_access(fd, Access::WRITE)?;
        if fd == Fd::CONSOLE_OUTPUT {
            console.lock().put_bytes(bytes);
            return Ok(bytes.len());
        }

        let mut inner = self.inner.lock();
        let Inner { storage, table } = &mut *inner;
        let file = table.lookup_mut(fd)?;

        let n = storage.write_at(&file.handle, file.cursor, bytes);
        file.cursor += n;
        Ok(n)
    }

    /// Move the cursor of `fd`. `-1` means end of file; positions past the
    /// end clamp to it.
    pub fn seek(&self, fd: Fd, position: i32) -> KernelResult<usize> {
        if position < -1 {
            return Err(KernelError::InvalidArgument);
        }
        let mut inner = self.inner.lock();
        let Inner { storage, table } = &mut *inner;
        let file = table.lookup_mut(fd)?;

        let length = storage.length(&file.handle);
        file.cursor = match usize::try_from(position) {
            Ok(pos) if pos <= length => pos,
            _ => length,
        };
        Ok(file.cursor)
    }

    /// Delete `name`. Refused while any descriptor has it open.
    pub fn remove(&self, name: &str) -> KernelResult<()> {
        check_name(name)?;
        let mut inner = self.inner.lock();
        if inner.table.find_by_name(name).is_some() {
            return Err(KernelError::Conflict);
        }
        inner.storage.delete(name)?;
        log::debug!("[FS] removed {:?}", name);
        Ok(())
    }

    /// Close every open descriptor.
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock();
        let Inner { storage, table } = &mut *inner;
        for file in table.drain() {
            log::debug!("[FS] releasing {:?} at shutdown", file.name);
            storage.close(file.handle);
        }
    }

    /// Number of occupied descriptor slots.
    pub fn open_count(&self) -> usize {
        self.inner.lock().table.len()
    }

    /// Whether any descriptor currently holds `name`.
    pub fn is_open(&self, name: &str) -> bool {
        self.inner.lock().table.find_by_name(name).is_some()
    }

    /// Inspect the backend while holding the table lock. Mutation goes
    /// through the descriptor operations only.
    pub fn with_storage<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.lock().storage)
    }
}

impl<S: Storage> Drop for FileSystem<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
