//! Descriptor Table
//!
//! A fixed-size arena of open-file slots addressed by small integer ids.
//!
//! # Design
//! - Ids 0 and 1 are the console channels; they are never stored here
//! - Allocatable ids are `2..MAX_OPEN_FILES`, lowest free id first
//! - A slot is either empty or owns exactly one backend handle

use alloc::string::String;
use core::fmt;

use bitflags::bitflags;

use crate::error::{KernelError, KernelResult};

/// Number of descriptor ids, console channels included.
pub const MAX_OPEN_FILES: usize = 10;

bitflags! {
    /// Directions a descriptor can be used in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Access: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

/// A descriptor id known to be inside `0..MAX_OPEN_FILES`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fd(u8);

impl Fd {
    /// Keyboard input channel.
    pub const CONSOLE_INPUT: Self = Self(0);

    /// Display output channel.
    pub const CONSOLE_OUTPUT: Self = Self(1);

    /// First id backed by a table slot.
    pub const FIRST_FILE: Self = Self(2);

    /// Returns `None` if `raw` is negative or past the table.
    #[inline]
    pub const fn new(raw: i32) -> Option<Self> {
        if raw >= 0 && (raw as usize) < MAX_OPEN_FILES {
            Some(Self(raw as u8))
        } else {
            None
        }
    }

    /// Position in the table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The id as user code sees it.
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self.0 as i32
    }

    /// True for descriptors 0 and 1.
    #[inline]
    pub const fn is_console(self) -> bool {
        self.0 < Self::FIRST_FILE.0
    }

    /// What this id may be used for.
    pub const fn access(self) -> Access {
        match self.0 {
            0 => Access::READ,
            1 => Access::WRITE,
            _ => Access::READ.union(Access::WRITE),
        }
    }
}

impl fmt::Debug for Fd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fd({})", self.0)
    }
}

/// An open file: backend handle plus the per-descriptor cursor.
#[derive(Debug)]
pub struct OpenFile<H> {
    pub name: String,
    pub handle: H,
    pub cursor: usize,
}

impl<H> OpenFile<H> {
    /// A freshly opened file with its cursor at 0.
    pub fn new(name: String, handle: H) -> Self {
        Self {
            name,
            handle,
            cursor: 0,
        }
    }
}

/// Fixed array of open files indexed by [`Fd`]. Slots 0 and 1 stay empty.
#[derive(Debug)]
pub struct DescriptorTable<H> {
    slots: [Option<OpenFile<H>>; MAX_OPEN_FILES],
}

impl<H> DescriptorTable<H> {
    /// A table with every slot free.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    fn file_slot(fd: Fd) -> KernelResult<usize> {
        if fd.is_console() {
            Err(KernelError::InvalidArgument)
        } else {
            Ok(fd.index())
        }
    }

    /// The entry behind `fd`. Console ids and empty slots are
    /// `InvalidArgument`.
    pub fn lookup(&self, fd: Fd) -> KernelResult<&OpenFile<H>> {
        self.slots[Self::file_slot(fd)?]
            .as_ref()
            .ok_or(KernelError::InvalidArgument)
    }

    /// Mutable form of [`lookup`](Self::lookup).
    pub fn lookup_mut(&mut self, fd: Fd) -> KernelResult<&mut OpenFile<H>> {
        self.slots[Self::file_slot(fd)?]
            .as_mut()
            .ok_or(KernelError::InvalidArgument)
    }

    /// Lowest empty file slot.
    pub fn find_free(&self) -> Option<Fd> {
        (Fd::FIRST_FILE.index()..MAX_OPEN_FILES)
            .find(|&i| self.slots[i].is_none())
            .map(|i| Fd(i as u8))
    }

    /// The slot holding `name`, if it is open.
    pub fn find_by_name(&self, name: &str) -> Option<Fd> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|f| f.name == name))
            .map(|i| Fd(i as u8))
    }

    /// Store `file` in the lowest free slot.
    ///
    /// On a full table the entry is handed back so the caller can release
    /// its handle.
    pub fn insert(&mut self, file: OpenFile<H>) -> Result<Fd, OpenFile<H>> {
        match self.find_free() {
            Some(fd) => {
                self.slots[fd.index()] = Some(file);
                Ok(fd)
            }
            None => Err(file),
        }
    }

    /// Empty the slot behind `fd` and return what it held.
    pub fn remove(&mut self, fd: Fd) -> KernelResult<OpenFile<H>> {
        self.slots[Self::file_slot(fd)?]
            .take()
            .ok_or(KernelError::InvalidArgument)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True if no file is open.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty every slot, yielding the entries.
    pub fn drain(&mut self) -> impl Iterator<Item = OpenFile<H>> + '_ {
        self.slots.iter_mut().filter_map(Option::take)
    }
}

impl<H> Default for DescriptorTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
