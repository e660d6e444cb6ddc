//! Exit codes following sysexits.h conventions

/// Successful termination
pub const OK: i32 = 0;
/// Command line usage error
pub const USAGE: i32 = 64;
/// Input data was incorrect in some way
pub const DATAERR: i32 = 65;
/// Internal software error
pub const SOFTWARE: i32 = 70;
/// Input/output error
pub const IOERR: i32 = 74;
