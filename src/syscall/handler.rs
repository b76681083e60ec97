//! System Call Handlers
//!
//! Decodes a raw register snapshot into a typed [`Syscall`] and runs the
//! matching handler.
//!
//! # Conventions
//! - Handlers never write registers or move the PC; the dispatcher does
//! - `Ok(Some(v))` puts `v` in the result register, `Ok(None)` leaves it
//! - Recoverable errors become the call's failure sentinel

use crate::codec;
use crate::drivers::Console;
use crate::error::{KernelError, KernelResult};
use crate::fs::{Fd, Storage};
use crate::kernel::Kernel;
use crate::machine::{Machine, UserAddr};

use super::marshal::{self, KernelBuffer};
use super::number;

/// A decoded syscall request with its typed arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syscall {
    Halt,
    Add { a: i32, b: i32 },
    ReadNum,
    PrintNum { value: i32 },
    ReadChar,
    PrintChar { ch: u8 },
    RandomNum,
    ReadString { buf: UserAddr, max: i32 },
    PrintString { buf: UserAddr },
    Create { name: UserAddr },
    Open { name: UserAddr },
    Close { fd: i32 },
    Read { buf: UserAddr, len: i32, fd: i32 },
    Write { buf: UserAddr, len: i32, fd: i32 },
    Seek { position: i32, fd: i32 },
    Remove { name: UserAddr },
}

impl Syscall {
    /// Build a request from the opcode and the four argument registers.
    /// Returns `None` for opcodes this kernel does not service.
    pub fn decode(opcode: i32, args: [i32; 4]) -> Option<Self> {
        let [a0, a1, a2, _] = args;
        let call = match opcode {
            number::HALT => Self::Halt,
            number::ADD => Self::Add { a: a0, b: a1 },
            number::READ_NUM => Self::ReadNum,
            number::PRINT_NUM => Self::PrintNum { value: a0 },
            number::READ_CHAR => Self::ReadChar,
            number::PRINT_CHAR => Self::PrintChar { ch: a0 as u8 },
            number::RANDOM_NUM => Self::RandomNum,
            number::READ_STRING => Self::ReadString {
                buf: UserAddr::from_word(a0),
                max: a1,
            },
            number::PRINT_STRING => Self::PrintString {
                buf: UserAddr::from_word(a0),
            },
            number::CREATE => Self::Create {
                name: UserAddr::from_word(a0),
            },
            number::OPEN => Self::Open {
                name: UserAddr::from_word(a0),
            },
            number::CLOSE => Self::Close { fd: a0 },
            number::READ => Self::Read {
                buf: UserAddr::from_word(a0),
                len: a1,
                fd: a2,
            },
            number::WRITE => Self::Write {
                buf: UserAddr::from_word(a0),
                len: a1,
                fd: a2,
            },
            number::SEEK => Self::Seek {
                position: a0,
                fd: a1,
            },
            number::REMOVE => Self::Remove {
                name: UserAddr::from_word(a0),
            },
            _ => return None,
        };
        Some(call)
    }

    /// Value placed in the result register when the call fails.
    pub const fn failure_sentinel(&self) -> i32 {
        match self {
            Self::Read { .. } => 0,
            _ => -1,
        }
    }
}

fn fd_arg(raw: i32) -> KernelResult<Fd> {
    Fd::new(raw).ok_or(KernelError::InvalidArgument)
}

fn len_arg(raw: i32) -> KernelResult<usize> {
    match usize::try_from(raw) {
        Ok(len) if len > 0 => Ok(len),
        _ => Err(KernelError::InvalidArgument),
    }
}

/// Result register holds a 32-bit word.
fn word(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

fn name_arg<M: Machine + ?Sized>(machine: &mut M, addr: UserAddr) -> KernelResult<KernelBuffer> {
    marshal::copy_in(machine, addr).ok_or(KernelError::AddressFault)
}

/// Run one decoded syscall. `Halt` is the dispatcher's business and is
/// rejected here as `Fatal`.
pub fn handle<M, C, S>(
    kernel: &Kernel<C, S>,
    machine: &mut M,
    call: Syscall,
) -> KernelResult<Option<i32>>
where
    M: Machine + ?Sized,
    C: Console,
    S: Storage,
{
    let policy = kernel.config().copy_out;

    match call {
        Syscall::Halt => Err(KernelError::Fatal),

        Syscall::Add { a, b } => {
            let sum = a.wrapping_add(b);
            log::debug!("[SYSCALL] add({}, {}) = {}", a, b, sum);
            Ok(Some(sum))
        }

        Syscall::ReadNum => {
            let token = codec::read_token(&mut *kernel.console().lock());
            Ok(Some(codec::parse_int(&token)))
        }

        Syscall::PrintNum { value } => {
            kernel.console().lock().put_bytes(&codec::format_int(value));
            Ok(None)
        }

        Syscall::ReadChar => {
            let ch = kernel.console().lock().get_char();
            Ok(Some(ch.map_or(-1, i32::from)))
        }

        Syscall::PrintChar { ch } => {
            kernel.console().lock().put_char(ch);
            Ok(None)
        }

        Syscall::RandomNum => Ok(Some(kernel.random())),

        Syscall::ReadString { buf, max } => {
            let max = usize::try_from(max).unwrap_or(0);
            let line = kernel.console().lock().read_line(max);
            let line = KernelBuffer::from_bytes(&line);
            marshal::copy_out(machine, buf, Some(&line), policy)?;
            Ok(None)
        }

        Syscall::PrintString { buf } => {
            let text = marshal::copy_in(machine, buf).ok_or(KernelError::AddressFault)?;
            kernel.console().lock().put_bytes(text.as_bytes());
            Ok(None)
        }

        Syscall::Create { name } => {
            let name = name_arg(machine, name)?;
            kernel.fs().create(name.to_str()?)?;
            Ok(Some(0))
        }

        Syscall::Open { name } => {
            let name = name_arg(machine, name)?;
            let fd = kernel.fs().open(name.to_str()?)?;
            Ok(Some(fd.as_i32()))
        }

        Syscall::Close { fd } => {
            kernel.fs().close(fd_arg(fd)?)?;
            Ok(Some(0))
        }

        Syscall::Read { buf, len, fd } => {
            let len = len_arg(len)?;
            let fd = fd_arg(fd)?;
            let n = kernel.fs().read_into(kernel.console(), fd, len, |data| {
                let out = KernelBuffer::from_bytes(data);
                marshal::copy_out_bounded(machine, buf, Some(&out), len, policy).map(|_| ())
            })?;
            Ok(Some(word(n)))
        }

        Syscall::Write { buf, len, fd } => {
            let len = len_arg(len)?;
            let fd = fd_arg(fd)?;
            let data = marshal::copy_in_bounded(machine, buf, len).ok_or(KernelError::AddressFault)?;
            let written = kernel.fs().write_at(kernel.console(), fd, data.as_bytes())?;
            Ok(Some(word(written)))
        }

        Syscall::Seek { position, fd } => {
            let pos = kernel.fs().seek(fd_arg(fd)?, position)?;
            Ok(Some(word(pos)))
        }

        Syscall::Remove { name } => {
            let name = name_arg(machine, name)?;
            kernel.fs().remove(name.to_str()?)?;
            Ok(Some(0))
        }
    }
}
