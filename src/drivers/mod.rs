//! Device adapters used by the syscall layer
//!
//! Drivers never panic on bad input; failures surface as end of input or are
//! logged and dropped.

pub mod console;

pub use console::{BufferConsole, Console};

#[cfg(feature = "std")]
pub use console::StdConsole;
