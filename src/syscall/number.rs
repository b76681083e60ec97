//! Syscall numbers
//!
//! Shared with the user-side stubs. Gaps are process-management calls this
//! kernel does not service.

pub const HALT: i32 = 0;
pub const CREATE: i32 = 4;
pub const REMOVE: i32 = 5;
pub const OPEN: i32 = 6;
pub const READ: i32 = 7;
pub const WRITE: i32 = 8;
pub const SEEK: i32 = 9;
pub const CLOSE: i32 = 10;
pub const ADD: i32 = 42;
pub const READ_NUM: i32 = 43;
pub const PRINT_NUM: i32 = 44;
pub const READ_CHAR: i32 = 45;
pub const PRINT_CHAR: i32 = 46;
pub const RANDOM_NUM: i32 = 47;
pub const READ_STRING: i32 = 48;
pub const PRINT_STRING: i32 = 49;
