//! Simulated Machine Boundary
//!
//! The kernel never emulates instructions itself. It sees the user program
//! through the [`Machine`] trait: a register file, byte-addressed user memory
//! and a halt switch.
//!
//! # Register Convention
//! - r2: syscall code on entry, result on exit
//! - r4..r7: arguments 1 to 4
//! - r34 / r35 / r36: PC, next PC, previous PC

mod address;
mod flat;

pub use address::UserAddr;
pub use flat::FlatMachine;

/// Register numbers used by the trap layer.
pub mod regs {
    /// Syscall code on entry.
    pub const SYSCALL_CODE: usize = 2;
    /// Syscall result on exit.
    pub const RESULT: usize = 2;
    /// Argument registers, in order.
    pub const ARGS: [usize; 4] = [4, 5, 6, 7];
    /// Program counter.
    pub const PC: usize = 34;
    /// Next program counter (branch delay slot).
    pub const NEXT_PC: usize = 35;
    /// Previous program counter (debugging only).
    pub const PREV_PC: usize = 36;
    /// Size of the register file.
    pub const COUNT: usize = 40;
}

/// Every instruction is 4 bytes wide.
pub const INSTRUCTION_WIDTH: i32 = 4;

/// The user-mode CPU as seen from the kernel.
pub trait Machine {
    /// Value of register `reg`.
    fn read_register(&self, reg: usize) -> i32;

    /// Overwrite register `reg`.
    fn write_register(&mut self, reg: usize, value: i32);

    /// Read one byte of user memory. `None` means the address did not
    /// translate.
    fn read_byte(&mut self, addr: UserAddr) -> Option<u8>;

    /// Write one byte of user memory. Returns `false` if the address did not
    /// translate or is read-only.
    fn write_byte(&mut self, addr: UserAddr, value: u8) -> bool;

    /// Stop the machine. No further user instructions run.
    fn halt(&mut self);
}

/// Trap cause reported by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapKind {
    NoException,
    Syscall,
    PageFault,
    ReadOnly,
    BusError,
    AddressError,
    Overflow,
    IllegalInstruction,
    NumExceptionTypes,
    Unknown(u32),
}

impl From<u32> for TrapKind {
    fn from(code: u32) -> Self {
        match code {
            0 => TrapKind::NoException,
            1 => TrapKind::Syscall,
            2 => TrapKind::PageFault,
            3 => TrapKind::ReadOnly,
            4 => TrapKind::BusError,
            5 => TrapKind::AddressError,
            6 => TrapKind::Overflow,
            7 => TrapKind::IllegalInstruction,
            8 => TrapKind::NumExceptionTypes,
            other => TrapKind::Unknown(other),
        }
    }
}

impl TrapKind {
    /// Only syscalls are serviced; every other trap halts the machine.
    #[inline]
    pub const fn is_recoverable(self) -> bool {
        matches!(self, TrapKind::Syscall)
    }
}
