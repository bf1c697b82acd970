//! Conformance check that a struct with a 32-bit and a 64-bit integer field
//! crosses the host/device boundary of a compute runtime unchanged.
//!
//! The host writes a [`Simple`] into device global state, the device-side
//! [`StructIntegrityChecker`] compares its fields against the values the host
//! intended to write, emits fixed-width diagnostics to a [`DiagnosticSink`],
//! and reports a binary [`Verdict`] through a [`Reporter`] which blocks until
//! the host has acknowledged it.
//!
//! ```
//! use struct_field_conformance::{
//!     RecordingSink, Simple, StructIntegrityChecker, Verdict, verdict_channel,
//! };
//!
//! let (reporter, receiver) = verdict_channel(None);
//! let simple = Simple::new(0x7FFF_FFFF, 0x7FFF_FFFF_FFFF_FFFF);
//!
//! std::thread::scope(|scope| {
//!     let device = scope.spawn(move || {
//!         let mut checker = StructIntegrityChecker::new(RecordingSink::new(), reporter);
//!         checker.check_and_report(&simple, 0x7FFF_FFFF, 0x7FFF_FFFF_FFFF_FFFF)
//!     });
//!
//!     assert_eq!(receiver.recv_verdict(None), Ok(Verdict::Passed));
//!     assert_eq!(device.join().unwrap(), Ok(Verdict::Passed));
//! });
//! ```

#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(unused_crate_dependencies))] // proptest is only used by tests/

pub mod checker;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod global;
pub mod harness;
pub mod reporter;
pub mod simple;
pub mod verdict;

pub use checker::{Comparison, Field, StructIntegrityChecker};
pub use config::HarnessConfig;
pub use diagnostic::{split_halves, DiagnosticSink, LogSink, RecordingSink};
pub use error::{Error, ReportError, Result};
pub use global::GlobalSlot;
pub use harness::{TestResult, UnitTest};
pub use reporter::{verdict_channel, ChannelReporter, Reporter, VerdictMessage, VerdictReceiver};
pub use simple::Simple;
pub use verdict::{Verdict, TEST_FAILED, TEST_PASSED};
