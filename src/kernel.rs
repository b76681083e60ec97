//! Kernel context.
//!
//! Everything a syscall handler may touch, passed by reference instead of
//! living in globals. Methods take `&self`; each shared resource has its own
//! lock so traps from different user threads can be serviced concurrently.

use spin::Mutex;

use crate::config::KernelConfig;
use crate::drivers::Console;
use crate::fs::{FileSystem, Storage};
use crate::machine::{Machine, TrapKind};
use crate::rng::TinyRng;
use crate::syscall::{self, TrapOutcome};

/// One kernel instance: console, file system and `RandomNum` source.
///
/// The console sits behind a spinning lock. A console whose `get_char`
/// blocks on the host (such as
/// [`StdConsole`](crate::drivers::StdConsole)) keeps that lock for the whole
/// wait, and other threads touching the console spin until input arrives.
/// Embedders that service console traps from several threads should give
/// such a console its own blocking lock internally.
pub struct Kernel<C: Console, S: Storage> {
    console: Mutex<C>,
    fs: FileSystem<S>,
    rng: Mutex<TinyRng>,
    config: KernelConfig,
}

impl<C: Console, S: Storage> Kernel<C, S> {
    /// Build a kernel over `console` and `storage`.
    ///
    /// # Arguments
    /// * `console` - device behind descriptors 0 and 1 and the console calls
    /// * `storage` - backend the descriptor table opens files from
    /// * `config` - seed and copy-out policy
    pub fn new(console: C, storage: S, config: KernelConfig) -> Self {
        log::debug!("[KERNEL] starting with {:?}", config);
        Self {
            console: Mutex::new(console),
            fs: FileSystem::new(storage),
            rng: Mutex::new(TinyRng::new(config.random_seed)),
            config,
        }
    }

    /// Entry point for every trap raised by `machine`.
    pub fn dispatch<M: Machine + ?Sized>(&self, machine: &mut M, kind: TrapKind) -> TrapOutcome {
        syscall::dispatch(self, machine, kind)
    }

    /// The console device and its lock.
    pub fn console(&self) -> &Mutex<C> {
        &self.console
    }

    /// The file facade.
    pub fn fs(&self) -> &FileSystem<S> {
        &self.fs
    }

    /// Settings this kernel was built with.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Next `RandomNum` value.
    pub fn random(&self) -> i32 {
        self.rng.lock().next_positive_i32()
    }

    /// Release every open descriptor. Halting the machine does not do this.
    pub fn shutdown(&self) {
        log::debug!("[KERNEL] shutting down, {} files open", self.fs.open_count());
        self.fs.shutdown();
    }
}
