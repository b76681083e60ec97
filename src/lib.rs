//! trapgate - syscall boundary layer for a teaching kernel
//!
//! Receives traps from a simulated user-mode CPU, decodes the syscall in its
//! registers, copies data across the user/kernel boundary and services the
//! request against the console and a small descriptor-table file system.
//!
//! # Components
//! - [`syscall`]: trap dispatcher, handlers and user memory marshalling
//! - [`fs`]: descriptor table and file facade over a [`fs::Storage`] backend
//! - [`codec`]: decimal text <-> `i32`
//! - [`drivers`]: console adapter
//! - [`machine`]: the register/memory interface the kernel is driven through
//!
//! # Usage
//! The embedding simulator owns the CPU loop. On every trap it calls
//! [`Kernel::dispatch`] with its [`machine::Machine`] and the trap kind, and
//! stops when [`TrapOutcome::Halted`] comes back.
//!
//! The crate is `no_std` + `alloc`. The default `std` feature adds
//! [`fs::HostStorage`] and [`drivers::StdConsole`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod codec;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fs;
mod kernel;
pub mod machine;
pub mod rng;
pub mod syscall;

pub use config::{CopyOutPolicy, KernelConfig};
pub use error::{KernelError, KernelResult};
pub use kernel::Kernel;
pub use machine::TrapKind;
pub use syscall::TrapOutcome;
