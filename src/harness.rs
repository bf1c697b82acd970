//! Host-side driver for a single struct-field conformance run.
//!
//! The host binds the struct-under-test into a [`GlobalSlot`], dispatches the
//! check onto a separate device thread of execution, and waits for the
//! device's verdict message, which it acknowledges.

use std::{fmt, thread};

use crate::{
    checker::StructIntegrityChecker,
    config::{HarnessConfig, GLOBAL_NAME},
    diagnostic::DiagnosticSink,
    error::{Error, Result},
    global::GlobalSlot,
    reporter::verdict_channel,
    verdict::Verdict,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
/// Lifecycle state of a [`UnitTest`].
pub enum TestResult {
    #[default]
    /// The test has not produced a verdict
    Unknown,
    /// The test is currently running
    Running,
    /// The device reported [`Verdict::Passed`]
    Passed,
    /// The device reported [`Verdict::Failed`]
    Failed,
}

impl From<Verdict> for TestResult {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Passed => Self::Passed,
            Verdict::Failed => Self::Failed,
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(match self {
            Self::Unknown => "UNKNOWN",
            Self::Running => "RUNNING",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        })
    }
}

/// One struct-field conformance test, from the host's point of view.
pub struct UnitTest<D: DiagnosticSink + Send> {
    config: HarnessConfig,
    sink: D,
    result: TestResult,
}

impl<D: DiagnosticSink + Send> UnitTest<D> {
    #[must_use]
    /// Creates a test which has not run yet.
    pub const fn new(config: HarnessConfig, sink: D) -> Self {
        Self {
            config,
            sink,
            result: TestResult::Unknown,
        }
    }

    #[must_use]
    /// The configuration of every run of this test.
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    #[must_use]
    /// The result of the most recent run.
    pub const fn result(&self) -> TestResult {
        self.result
    }

    #[must_use]
    /// The diagnostic sink the device-side check emits to.
    pub const fn sink(&self) -> &D {
        &self.sink
    }

    #[must_use]
    /// Consumes the test, returning its diagnostic sink.
    pub fn into_sink(self) -> D {
        self.sink
    }

    /// Runs the test once and returns its result.
    ///
    /// The result is also stored and can later be read with
    /// [`Self::result`]. If the run fails before the device has sent its
    /// verdict, the result is [`TestResult::Unknown`]. If the host received
    /// a verdict but the device then failed, for instance because its
    /// acknowledgement timed out, the result is [`TestResult::Failed`].
    ///
    /// # Errors
    /// Returns an [`Error`] if the global could not be bound or loaded, if
    /// the verdict could not be exchanged, or if the device-side check
    /// panicked.
    pub fn run(&mut self) -> Result<TestResult> {
        self.result = TestResult::Running;
        log::info!("{}: running", self.config.name);

        let global = GlobalSlot::new(GLOBAL_NAME);

        if let Err(err) = global.bind(&self.config.written) {
            self.result = TestResult::Unknown;
            return Err(err);
        }

        let (reporter, receiver) = verdict_channel(self.config.ack_timeout);

        let HarnessConfig {
            ref name,
            expected_i,
            expected_l,
            message_timeout,
            ..
        } = self.config;
        let global = &global;
        let sink = &mut self.sink;

        let (received, device) = thread::scope(move |scope| {
            let device = scope.spawn(move || -> Result<Verdict> {
                let simple = global.load()?;

                let mut checker = StructIntegrityChecker::with_name(name.as_str(), sink, reporter);

                Ok(checker.check_and_report(&simple, expected_i, expected_l)?)
            });

            let received = receiver.recv_verdict(message_timeout);
            // a device that has not sent yet must not block on a vanished host
            drop(receiver);

            (received, device.join())
        });

        self.result = match &received {
            Ok(verdict) => {
                log::info!("{}: host received {verdict}", self.config.name);
                TestResult::from(*verdict)
            },
            Err(_) => TestResult::Unknown,
        };

        let device = device.unwrap_or(Err(Error::DevicePanicked));

        if received.is_ok() && device.is_err() {
            self.result = TestResult::Failed;
        }

        device?;
        received?;

        Ok(self.result)
    }
}

impl<D: DiagnosticSink + Send> fmt::Debug for UnitTest<D> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct(stringify!(UnitTest))
            .field("config", &self.config)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}
