//! Kernel Error Taxonomy
//!
//! Every failure a syscall handler can report. The first five variants are
//! recoverable and reach user code as a sentinel in the result register;
//! `Fatal` halts the machine.

/// Errors produced by the syscall layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// Malformed or empty name, out-of-range id, non-positive length.
    InvalidArgument,
    /// The descriptor table has no free slot.
    ResourceExhausted,
    /// The open/remove target does not exist.
    NotFound,
    /// The name already exists or is already open.
    Conflict,
    /// A user memory copy failed.
    AddressFault,
    /// Unsupported trap kind or unreachable state.
    Fatal,
}

impl KernelError {
    /// Whether the error can be reported back to user code.
    #[inline]
    pub const fn is_recoverable(self) -> bool {
        !matches!(self, Self::Fatal)
    }
}

impl core::fmt::Display for KernelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::ResourceExhausted => write!(f, "descriptor table full"),
            Self::NotFound => write!(f, "no such file"),
            Self::Conflict => write!(f, "file exists or is open"),
            Self::AddressFault => write!(f, "bad user address"),
            Self::Fatal => write!(f, "fatal kernel condition"),
        }
    }
}

/// Result alias used throughout the crate.
pub type KernelResult<T> = Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn only_fatal_is_unrecoverable() {
        assert!(KernelError::Conflict.is_recoverable());
        assert!(KernelError::AddressFault.is_recoverable());
        assert!(!KernelError::Fatal.is_recoverable());
    }

    #[test]
    fn display_is_lowercase_prose() {
        assert_eq!(KernelError::NotFound.to_string(), "no such file");
    }
}
