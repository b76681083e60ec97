//! Console Adapter
//!
//! Blocking, one-character-at-a-time access to the terminal. The kernel maps
//! descriptor 0 to [`Console::get_char`] and descriptor 1 to
//! [`Console::put_char`].

use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// A blocking character source and sink.
pub trait Console {
    /// Block until a character is available. `None` at end of input.
    fn get_char(&mut self) -> Option<u8>;

    /// Block until `byte` has been emitted.
    fn put_char(&mut self, byte: u8);

    /// Emit every byte of `bytes` in order.
    fn put_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put_char(byte);
        }
    }

    /// Read up to `max` characters, stopping early at newline or end of
    /// input. The newline is consumed but not returned.
    fn read_line(&mut self, max: usize) -> Vec<u8> {
        let mut line = Vec::new();
        while line.len() < max {
            match self.get_char() {
                Some(b'\n') | None => break,
                Some(byte) => line.push(byte),
            }
        }
        line
    }
}

/// In-memory console: scripted input, captured output.
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferConsole {
    /// A console with no input queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// A console whose input stream is `input`, followed by end of input.
    pub fn with_input(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    /// Append more bytes to the pending input.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Drain the captured output.
    pub fn take_output(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.output)
    }
}

impl Console for BufferConsole {
    fn get_char(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn put_char(&mut self, byte: u8) {
        self.output.push(byte);
    }
}

#[cfg(feature = "std")]
pub use self::host::StdConsole;

#[cfg(feature = "std")]
mod host {
    use std::io::{self, Read, Write};

    use super::Console;

    /// Console over the host process's stdin and stdout.
    ///
    /// `get_char` blocks on stdin. Inside a [`Kernel`](crate::Kernel) that
    /// wait happens under the console's spin lock, so other threads that
    /// reach the console busy-wait until input arrives.
    #[derive(Debug, Default)]
    pub struct StdConsole;

    impl Console for StdConsole {
        fn get_char(&mut self) -> Option<u8> {
            let mut byte = [0u8; 1];
            match io::stdin().lock().read(&mut byte) {
                Ok(1) => Some(byte[0]),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("[CONSOLE] stdin read failed: {}", e);
                    None
                }
            }
        }

        fn put_char(&mut self, byte: u8) {
            let mut out = io::stdout().lock();
            if let Err(e) = out.write_all(&[byte]).and_then(|_| out.flush()) {
                log::warn!("[CONSOLE] stdout write failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_drains_then_reports_end() {
        let mut console = BufferConsole::with_input(b"ab");
        assert_eq!(console.get_char(), Some(b'a'));
        assert_eq!(console.get_char(), Some(b'b'));
        assert_eq!(console.get_char(), None);
        console.push_input(b"c");
        assert_eq!(console.get_char(), Some(b'c'));
    }

    #[test]
    fn read_line_stops_at_newline_or_limit() {
        let mut console = BufferConsole::with_input(b"  d\n0123456789X");
        assert_eq!(console.read_line(10), b"  d");
        assert_eq!(console.read_line(10), b"0123456789");
        assert_eq!(console.read_line(10), b"X");
        assert!(console.read_line(10).is_empty());
        assert!(BufferConsole::with_input(b"abc").read_line(0).is_empty());
    }

    #[test]
    fn put_bytes_keeps_order() {
        let mut console = BufferConsole::new();
        console.put_bytes(b"hi\n");
        assert_eq!(console.take_output(), b"hi\n");
        assert!(console.output().is_empty());
    }
}
