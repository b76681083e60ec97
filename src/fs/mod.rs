//! File Subsystem
//!
//! A flat namespace of byte ranges behind a fixed-capacity descriptor table.
//!
//! # Layers
//! - [`Storage`]: the backend that actually holds bytes
//! - [`DescriptorTable`]: slot arena mapping small ids to open handles
//! - [`FileSystem`]: the syscall-facing facade; all table traffic goes
//!   through one lock

mod files;
mod ramdisk;
mod table;

#[cfg(feature = "std")]
mod host;

pub use files::FileSystem;
pub use ramdisk::{RamDisk, RamHandle};
pub use table::{Access, DescriptorTable, Fd, OpenFile, MAX_OPEN_FILES};

#[cfg(feature = "std")]
pub use host::HostStorage;

use crate::error::KernelResult;

/// Named byte-range storage.
///
/// Handles are owned values: `open` hands one out, `close` consumes it.
pub trait Storage {
    type Handle;

    /// Create an empty entry. `Conflict` if `name` already exists.
    fn create(&mut self, name: &str) -> KernelResult<()>;

    /// `NotFound` if `name` does not exist.
    fn open(&mut self, name: &str) -> KernelResult<Self::Handle>;

    fn close(&mut self, handle: Self::Handle);

    /// Read into `buf` starting at `offset`. Returns the byte count, 0 at or
    /// past the end.
    fn read_at(&mut self, handle: &Self::Handle, offset: usize, buf: &mut [u8]) -> usize;

    /// Write `bytes` at `offset`, growing the entry if needed. Returns the
    /// byte count.
    fn write_at(&mut self, handle: &Self::Handle, offset: usize, bytes: &[u8]) -> usize;

    fn length(&mut self, handle: &Self::Handle) -> usize;

    /// `NotFound` if `name` does not exist.
    fn delete(&mut self, name: &str) -> KernelResult<()>;

    /// Whether `name` is present. Does not open it.
    fn exists(&self, name: &str) -> bool;
}
