//! User Virtual Address Type
//!
//! Registers hold signed 32-bit words; a pointer argument is reinterpreted as
//! an unsigned user address. The newtype keeps raw register values from being
//! used as addresses without that conversion.

use core::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct UserAddr(u32);

impl UserAddr {
    /// Wrap a raw user address.
    #[inline]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Reinterpret a register word as an address.
    #[inline]
    pub const fn from_word(word: i32) -> Self {
        Self(word as u32)
    }

    /// Raw address value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Address `offset` bytes further on, or `None` on wrap-around.
    #[inline]
    pub fn checked_add(self, offset: usize) -> Option<Self> {
        let offset = u32::try_from(offset).ok()?;
        self.0.checked_add(offset).map(Self)
    }
}

impl fmt::Debug for UserAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserAddr({:#010x})", self.0)
    }
}

impl fmt::Display for UserAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_word_is_high_address() {
        assert_eq!(UserAddr::from_word(-1).as_u32(), u32::MAX);
    }

    #[test]
    fn checked_add_stops_at_wrap() {
        assert_eq!(UserAddr::new(10).checked_add(5), Some(UserAddr::new(15)));
        assert_eq!(UserAddr::new(u32::MAX).checked_add(1), None);
    }
}
