//! User Memory Marshalling
//!
//! Moves bytes across the user/kernel boundary one byte at a time through the
//! [`Machine`] interface.
//!
//! # Rules
//! - Data is always copied into kernel-owned memory before use, so user code
//!   cannot change it mid-syscall
//! - A failed read aborts the copy; nothing partial is returned
//! - Kernel buffers always carry a trailing zero byte

use alloc::vec::Vec;

use crate::config::CopyOutPolicy;
use crate::error::{KernelError, KernelResult};
use crate::machine::{Machine, UserAddr};

/// Zero-terminated bytes copied out of, or destined for, user memory.
#[derive(Clone, PartialEq, Eq)]
pub struct KernelBuffer {
    data: Vec<u8>,
}

impl KernelBuffer {
    /// Wrap `bytes` and append the terminator.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut data = Vec::with_capacity(bytes.len() + 1);
        data.extend_from_slice(bytes);
        data.push(0);
        Self { data }
    }

    /// Contents without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.data.len() - 1]
    }

    /// Contents including the terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.data
    }

    /// Byte count including the terminator.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if there is nothing before the terminator.
    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    }

    /// Contents as a file name.
    pub fn to_str(&self) -> KernelResult<&str> {
        core::str::from_utf8(self.as_bytes()).map_err(|_| KernelError::InvalidArgument)
    }
}

impl core::fmt::Debug for KernelBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "KernelBuffer({} bytes)", self.len())
    }
}

fn copy_in_until<M: Machine + ?Sized>(
    machine: &mut M,
    addr: UserAddr,
    max: Option<usize>,
) -> Option<KernelBuffer> {
    let mut data = Vec::new();
    loop {
        if max.is_some_and(|max| data.len() >= max) {
            break;
        }
        let Some(at) = addr.checked_add(data.len()) else {
            log::warn!("[MARSHAL] copy-in from {} wrapped the address space", addr);
            return None;
        };
        match machine.read_byte(at) {
            Some(0) => break,
            Some(byte) => data.push(byte),
            None => {
                log::warn!("[MARSHAL] copy-in faulted at {}", at);
                return None;
            }
        }
    }
    data.push(0);
    Some(KernelBuffer { data })
}

/// Copy a zero-terminated string from user memory starting at `addr`.
///
/// Returns `None` if any byte read faults.
pub fn copy_in<M: Machine + ?Sized>(machine: &mut M, addr: UserAddr) -> Option<KernelBuffer> {
    copy_in_until(machine, addr, None)
}

/// Like [`copy_in`], but stops after `max` bytes even if no zero byte was
/// seen.
pub fn copy_in_bounded<M: Machine + ?Sized>(
    machine: &mut M,
    addr: UserAddr,
    max: usize,
) -> Option<KernelBuffer> {
    copy_in_until(machine, addr, Some(max))
}

/// Write `buffer`, terminator included, to user memory at `addr`.
///
/// `None` writes nothing. Returns the number of bytes stored.
pub fn copy_out<M: Machine + ?Sized>(
    machine: &mut M,
    addr: UserAddr,
    buffer: Option<&KernelBuffer>,
    policy: CopyOutPolicy,
) -> KernelResult<usize> {
    copy_out_bounded(machine, addr, buffer, usize::MAX, policy)
}

/// Like [`copy_out`], writing at most `limit` bytes of the terminated buffer.
pub fn copy_out_bounded<M: Machine + ?Sized>(
    machine: &mut M,
    addr: UserAddr,
    buffer: Option<&KernelBuffer>,
    limit: usize,
    policy: CopyOutPolicy,
) -> KernelResult<usize> {
    let Some(buffer) = buffer else {
        return Ok(0);
    };

    let mut stored = 0;
    for (offset, &byte) in buffer.as_bytes_with_nul().iter().take(limit).enumerate() {
        let written = match addr.checked_add(offset) {
            Some(at) => machine.write_byte(at, byte),
            None => false,
        };
        if written {
            stored += 1;
            continue;
        }
        match policy {
            CopyOutPolicy::FailFast => {
                log::warn!("[MARSHAL] copy-out to {} faulted at offset {}", addr, offset);
                return Err(KernelError::AddressFault);
            }
            CopyOutPolicy::BestEffort => {
                log::warn!("[MARSHAL] copy-out to {} skipped offset {}", addr, offset);
            }
        }
    }
    Ok(stored)
}
