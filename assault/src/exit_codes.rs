#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// Invalid CLI/config (bad flags, non-positive counts, invalid URL, invalid durations).
    InvalidInput = 30,

    /// Internal/runtime error (IO errors, failed workers, a report that cannot be computed).
    RuntimeError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
