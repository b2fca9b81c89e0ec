//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error (unparsable command, wrong argument count)
pub const USAGE: i32 = 64;

/// Data format error (store file unreadable as TOML)
pub const DATAERR: i32 = 65;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Permission denied
pub const NOPERM: i32 = 77;

/// Configuration error
pub const CONFIG: i32 = 78;
