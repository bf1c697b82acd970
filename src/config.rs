//! Configuration of a harness run.

use std::time::Duration;

use crate::{checker::DEFAULT_NAME, simple::Simple};

/// The `I` value the harness writes and expects by default.
pub const DEFAULT_I: i32 = 0x1234_5678;
/// The `L` value the harness writes and expects by default.
pub const DEFAULT_L: i64 = 0x7654_3210_fedc_ba98;

/// Name of the global the harness binds the struct-under-test to.
pub const GLOBAL_NAME: &str = "simple";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Configuration of one harness run.
pub struct HarnessConfig {
    /// Name under which the check reports its verdict
    pub name: String,
    /// The struct the host writes into the device global
    pub written: Simple,
    /// The `I` value the device expects to read
    pub expected_i: i32,
    /// The `L` value the device expects to read
    pub expected_l: i64,
    /// How long the device waits for the host to acknowledge its verdict,
    /// [`None`] waits indefinitely
    pub ack_timeout: Option<Duration>,
    /// How long the host waits for the device's verdict, [`None`] waits
    /// indefinitely
    pub message_timeout: Option<Duration>,
}

impl HarnessConfig {
    #[must_use]
    /// A configuration which writes `simple` and expects to read it back
    /// unchanged.
    pub fn matching(simple: Simple) -> Self {
        Self {
            written: simple,
            expected_i: simple.i,
            expected_l: simple.l,
            ..Self::default()
        }
    }

    #[must_use]
    /// Overrides the values the device expects, leaving the written struct
    /// unchanged.
    pub fn with_expected(mut self, expected_i: i32, expected_l: i64) -> Self {
        self.expected_i = expected_i;
        self.expected_l = expected_l;
        self
    }

    #[must_use]
    /// Overrides the name the check reports under.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_NAME),
            written: Simple::new(DEFAULT_I, DEFAULT_L),
            expected_i: DEFAULT_I,
            expected_l: DEFAULT_L,
            ack_timeout: None,
            message_timeout: Some(Duration::from_secs(10)),
        }
    }
}
