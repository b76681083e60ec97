#![allow(dead_code)]

use trapgate::drivers::BufferConsole;
use trapgate::fs::RamDisk;
use trapgate::machine::{FlatMachine, Machine};
use trapgate::{Kernel, KernelConfig, TrapKind, TrapOutcome};

pub const MEMORY_SIZE: usize = 4096;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A kernel wired to an in-memory console and disk, plus a flat machine.
pub struct Harness {
    pub kernel: Kernel<BufferConsole, RamDisk>,
    pub machine: FlatMachine,
}

impl Harness {
    pub fn new(input: &[u8]) -> Self {
        Self::with_config(input, KernelConfig::default())
    }

    pub fn with_config(input: &[u8], config: KernelConfig) -> Self {
        init_logging();
        Self {
            kernel: Kernel::new(BufferConsole::with_input(input), RamDisk::new(), config),
            machine: FlatMachine::new(MEMORY_SIZE),
        }
    }

    /// Place a zero-terminated string in user memory.
    pub fn put_str(&mut self, addr: usize, s: &str) -> i32 {
        self.machine.load(addr, s.as_bytes());
        self.machine.load(addr + s.len(), &[0]);
        addr as i32
    }

    /// Raise a syscall trap and return the result register.
    pub fn call(&mut self, opcode: i32, args: &[i32]) -> i32 {
        self.machine.set_syscall(opcode, args);
        let outcome = self.kernel.dispatch(&mut self.machine, TrapKind::Syscall);
        assert_eq!(outcome, TrapOutcome::Resumed, "opcode {} halted", opcode);
        self.machine.result()
    }

    pub fn trap(&mut self, kind: TrapKind) -> TrapOutcome {
        self.kernel.dispatch(&mut self.machine, kind)
    }

    pub fn output(&self) -> Vec<u8> {
        self.kernel.console().lock().output().to_vec()
    }

    pub fn pc(&self) -> i32 {
        self.machine.read_register(34)
    }
}
