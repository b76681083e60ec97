//! Trap Entry and System Call Interface
//!
//! Every transfer from user mode lands in [`dispatch`].
//!
//! # Trap Handling
//! - Syscall traps are decoded, serviced, and the PC is moved past the
//!   trapping instruction
//! - `Halt` stops the machine and leaves the PC alone
//! - Every other trap kind is unrecoverable and halts the machine
//!
//! Halting does not release open descriptors; call
//! [`Kernel::shutdown`](crate::Kernel::shutdown) for that.

mod handler;
pub mod marshal;
pub mod number;

pub use handler::{handle, Syscall};
pub use marshal::{copy_in, copy_in_bounded, copy_out, copy_out_bounded, KernelBuffer};

use crate::drivers::Console;
use crate::fs::Storage;
use crate::kernel::Kernel;
use crate::machine::{regs, Machine, TrapKind, INSTRUCTION_WIDTH};

/// What the machine should do after a trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Resume the user program at the (possibly advanced) PC.
    Resumed,
    /// The machine was halted; nothing more runs.
    Halted,
}

/// Move past the trapping instruction.
pub fn advance_pc<M: Machine + ?Sized>(machine: &mut M) {
    let pc = machine.read_register(regs::PC);
    machine.write_register(regs::PREV_PC, pc);
    let pc = pc.wrapping_add(INSTRUCTION_WIDTH);
    machine.write_register(regs::PC, pc);
    machine.write_register(regs::NEXT_PC, pc.wrapping_add(INSTRUCTION_WIDTH));
}

fn halt<M: Machine + ?Sized>(machine: &mut M) -> TrapOutcome {
    machine.halt();
    TrapOutcome::Halted
}

/// Service one trap.
pub fn dispatch<M, C, S>(kernel: &Kernel<C, S>, machine: &mut M, kind: TrapKind) -> TrapOutcome
where
    M: Machine + ?Sized,
    C: Console,
    S: Storage,
{
    let opcode = machine.read_register(regs::SYSCALL_CODE);
    log::debug!("[TRAP] received {:?}, code {}", kind, opcode);

    if !kind.is_recoverable() {
        log::error!(
            "[TRAP] unrecoverable {:?} at pc {:#x}, halting",
            kind,
            machine.read_register(regs::PC)
        );
        return halt(machine);
    }

    let args = regs::ARGS.map(|reg| machine.read_register(reg));
    let Some(call) = Syscall::decode(opcode, args) else {
        log::warn!("[SYSCALL] unexpected system call {}", opcode);
        machine.write_register(regs::RESULT, -1);
        advance_pc(machine);
        return TrapOutcome::Resumed;
    };

    if call == Syscall::Halt {
        log::info!("[SYSCALL] shutdown initiated by user program");
        return halt(machine);
    }

    match handler::handle(kernel, machine, call) {
        Ok(Some(value)) => machine.write_register(regs::RESULT, value),
        Ok(None) => {}
        Err(err) if err.is_recoverable() => {
            log::warn!("[SYSCALL] {:?} failed: {}", call, err);
            machine.write_register(regs::RESULT, call.failure_sentinel());
        }
        Err(err) => {
            log::error!("[SYSCALL] {:?}: {}, halting", call, err);
            return halt(machine);
        }
    }

    advance_pc(machine);
    TrapOutcome::Resumed
}
