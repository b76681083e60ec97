//! Flat register file and memory.
//!
//! No translation: user address `a` is byte `a` of the backing vector, and
//! anything past its end faults. An optional read-only prefix models text
//! pages so write faults can be exercised.

use alloc::vec;
use alloc::vec::Vec;

use super::{regs, Machine, UserAddr};

/// Register file plus a single flat, zero-based memory range. Addresses
/// past the end fault.
#[derive(Debug, Clone)]
pub struct FlatMachine {
    registers: [i32; regs::COUNT],
    memory: Vec<u8>,
    read_only_below: usize,
    halted: bool,
}

impl FlatMachine {
    /// A machine with `memory_size` bytes of zeroed, writable memory.
    pub fn new(memory_size: usize) -> Self {
        Self {
            registers: [0; regs::COUNT],
            memory: vec![0; memory_size],
            read_only_below: 0,
            halted: false,
        }
    }

    /// Make addresses below `boundary` reject writes.
    pub fn with_read_only_prefix(mut self, boundary: usize) -> Self {
        self.read_only_below = boundary;
        self
    }

    /// Load a syscall: opcode into r2 and up to four arguments into r4..r7.
    pub fn set_syscall(&mut self, opcode: i32, args: &[i32]) {
        self.registers[regs::SYSCALL_CODE] = opcode;
        for (reg, value) in regs::ARGS.iter().zip(args.iter()) {
            self.registers[*reg] = *value;
        }
    }

    /// Copy `bytes` into memory at `addr`, bypassing the read-only prefix.
    /// Panics if the range is out of bounds; this is a loader, not a user
    /// access path.
    pub fn load(&mut self, addr: usize, bytes: &[u8]) {
        self.memory[addr..addr + bytes.len()].copy_from_slice(bytes);
    }

    /// Raw memory view.
    pub fn memory(&self, addr: usize, len: usize) -> &[u8] {
        &self.memory[addr..addr + len]
    }

    /// Memory starting at `addr` up to (not including) the first zero byte.
    pub fn c_str(&self, addr: usize) -> &[u8] {
        let tail = &self.memory[addr..];
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        &tail[..end]
    }

    /// Current value of the result register.
    pub fn result(&self) -> i32 {
        self.registers[regs::RESULT]
    }

    /// Whether `halt` has been called.
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

impl Machine for FlatMachine {
    fn read_register(&self, reg: usize) -> i32 {
        self.registers[reg]
    }

    fn write_register(&mut self, reg: usize, value: i32) {
        self.registers[reg] = value;
    }

    fn read_byte(&mut self, addr: UserAddr) -> Option<u8> {
        self.memory.get(addr.as_usize()).copied()
    }

    fn write_byte(&mut self, addr: UserAddr, value: u8) -> bool {
        let index = addr.as_usize();
        if index < self.read_only_below {
            return false;
        }
        match self.memory.get_mut(index) {
            Some(byte) => {
                *byte = value;
                true
            }
            None => false,
        }
    }

    fn halt(&mut self) {
        self.halted = true;
    }
}
