//! Binary verdicts and their message codes.

use std::fmt;

/// Message code the device sends when the check passed.
pub const TEST_PASSED: i32 = 100;
/// Message code the device sends when the check failed.
pub const TEST_FAILED: i32 = 101;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// The binary outcome of a struct-integrity check.
pub enum Verdict {
    /// All fields matched their expected values
    Passed,
    /// At least one field differed from its expected value
    Failed,
}

impl Verdict {
    #[must_use]
    /// The code under which this verdict travels over the verdict channel.
    pub const fn code(self) -> i32 {
        match self {
            Self::Passed => TEST_PASSED,
            Self::Failed => TEST_FAILED,
        }
    }

    #[must_use]
    /// Decodes a verdict channel code, returning [`None`] for any code that
    /// is neither [`TEST_PASSED`] nor [`TEST_FAILED`].
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            TEST_PASSED => Some(Self::Passed),
            TEST_FAILED => Some(Self::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Verdict, TEST_FAILED, TEST_PASSED};

    #[test]
    fn codes_are_stable() {
        assert_eq!(Verdict::Passed.code(), 100);
        assert_eq!(Verdict::Failed.code(), 101);

        assert_eq!(Verdict::from_code(TEST_PASSED), Some(Verdict::Passed));
        assert_eq!(Verdict::from_code(TEST_FAILED), Some(Verdict::Failed));
        assert_eq!(Verdict::from_code(0), None);
    }
}
