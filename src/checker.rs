//! Field-by-field comparison of a [`Simple`] against the values the host
//! intended to write.

use std::fmt;

use crate::{
    diagnostic::DiagnosticSink,
    error::ReportError,
    reporter::Reporter,
    simple::Simple,
    verdict::Verdict,
};

/// Name under which the checker reports when none is configured.
pub const DEFAULT_NAME: &str = "struct_field_simple";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// A field of the struct-under-test.
pub enum Field {
    /// The 32-bit field
    I,
    /// The 64-bit field
    L,
}

impl fmt::Display for Field {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(match self {
            Self::I => "I",
            Self::L => "L",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Per-field result of comparing a struct against its expected values.
pub struct Comparison {
    mismatched: Vec<Field>,
}

impl Comparison {
    #[must_use]
    /// The fields that differed from their expected values, in field order.
    pub fn mismatched(&self) -> &[Field] {
        &self.mismatched
    }

    #[must_use]
    /// [`Verdict::Passed`] iff no field differed.
    pub fn verdict(&self) -> Verdict {
        if self.mismatched.is_empty() {
            Verdict::Passed
        } else {
            Verdict::Failed
        }
    }
}

/// Checks that a [`Simple`] crossed the host/device boundary intact.
pub struct StructIntegrityChecker<D: DiagnosticSink, R: Reporter> {
    name: String,
    sink: D,
    reporter: R,
}

impl<D: DiagnosticSink, R: Reporter> StructIntegrityChecker<D, R> {
    #[must_use]
    /// Creates a checker reporting under [`DEFAULT_NAME`].
    pub fn new(sink: D, reporter: R) -> Self {
        Self::with_name(DEFAULT_NAME, sink, reporter)
    }

    #[must_use]
    /// Creates a checker whose summary diagnostic is `"<name> PASSED"` or
    /// `"<name> FAILED"`.
    pub fn with_name(name: impl Into<String>, sink: D, reporter: R) -> Self {
        Self {
            name: name.into(),
            sink,
            reporter,
        }
    }

    #[must_use]
    /// The name the checker reports under.
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    /// The diagnostic sink the checker emits to.
    pub const fn sink(&self) -> &D {
        &self.sink
    }

    #[must_use]
    /// The reporter verdicts are delivered through.
    pub const fn reporter(&self) -> &R {
        &self.reporter
    }

    #[must_use]
    /// Consumes the checker, returning its sink and reporter.
    pub fn into_parts(self) -> (D, R) {
        (self.sink, self.reporter)
    }

    #[must_use]
    /// Compares the fields of `simple` with the expected values, without any
    /// side effects.
    pub fn compare(&self, simple: &Simple, expected_i: i32, expected_l: i64) -> Comparison {
        let mut mismatched = Vec::new();

        if simple.i != expected_i {
            mismatched.push(Field::I);
        }
        if simple.l != expected_l {
            mismatched.push(Field::L);
        }

        Comparison { mismatched }
    }

    /// Compares the fields of `simple` with the expected values and emits the
    /// compared values to the diagnostic sink.
    ///
    /// The comparison is exact on the fields' signed types, only the emitted
    /// diagnostics are reinterpreted as unsigned.
    pub fn check(&mut self, simple: &Simple, expected_i: i32, expected_l: i64) -> Verdict {
        self.sink.log_i32("argI", expected_i);
        self.sink.log_i32("simple.I", simple.i);
        self.sink.log_i64("argL", expected_l);
        self.sink.log_i64("simple.L", simple.l);

        let comparison = self.compare(simple, expected_i, expected_l);

        for field in comparison.mismatched() {
            log::warn!(
                "{}: field {field} of {simple} does not match the expected value",
                self.name
            );
        }

        let verdict = comparison.verdict();

        self.sink.emit(&format!("{} {verdict}", self.name), 0);
        log::info!("{} {verdict}", self.name);

        verdict
    }

    /// Runs [`Self::check`] and reports the verdict, blocking until the
    /// reporter has delivered it.
    ///
    /// # Errors
    /// Returns a [`ReportError`] iff the verdict could not be delivered.
    pub fn check_and_report(
        &mut self,
        simple: &Simple,
        expected_i: i32,
        expected_l: i64,
    ) -> Result<Verdict, ReportError> {
        let verdict = self.check(simple, expected_i, expected_l);

        self.reporter.report(verdict)?;

        Ok(verdict)
    }
}

impl<D: DiagnosticSink, R: Reporter> fmt::Debug for StructIntegrityChecker<D, R> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct(stringify!(StructIntegrityChecker))
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use mockall::{predicate::eq, Sequence};

    use super::{Field, StructIntegrityChecker};
    use crate::{
        diagnostic::RecordingSink,
        reporter::MockReporter,
        ReportError, Simple, Verdict,
    };

    fn checker(reporter: MockReporter) -> StructIntegrityChecker<RecordingSink, MockReporter> {
        StructIntegrityChecker::new(RecordingSink::new(), reporter)
    }

    #[test]
    fn matching_fields_pass() {
        let mut checker = checker(MockReporter::new());
        let simple = Simple::new(0x1234_5678, 0x7654_3210_fedc_ba98);

        assert_eq!(
            checker.check(&simple, 0x1234_5678, 0x7654_3210_fedc_ba98),
            Verdict::Passed
        );
        assert_eq!(
            checker.sink().value("struct_field_simple PASSED"),
            Some(0)
        );
    }

    #[test]
    fn per_field_mismatches_are_listed() {
        let checker = checker(MockReporter::new());
        let simple = Simple::new(1, 2);

        assert!(checker.compare(&simple, 1, 2).mismatched().is_empty());
        assert_eq!(checker.compare(&simple, 0, 2).mismatched(), [Field::I]);
        assert_eq!(checker.compare(&simple, 1, 0).mismatched(), [Field::L]);
        assert_eq!(
            checker.compare(&simple, 0, 0).mismatched(),
            [Field::I, Field::L]
        );
        assert_eq!(checker.compare(&simple, 0, 0).verdict(), Verdict::Failed);
    }

    #[test]
    fn diagnostics_show_unsigned_halves() {
        let mut checker = checker(MockReporter::new());
        let simple = Simple::new(-1, -1);

        assert_eq!(checker.check(&simple, -1, i64::MAX), Verdict::Failed);

        let sink = checker.sink();
        assert_eq!(sink.value("argI"), Some(0xFFFF_FFFF));
        assert_eq!(sink.value("simple.I"), Some(0xFFFF_FFFF));
        assert_eq!(sink.value("argL.lo"), Some(0xFFFF_FFFF));
        assert_eq!(sink.value("argL.hi"), Some(0x7FFF_FFFF));
        assert_eq!(sink.value("simple.L.lo"), Some(0xFFFF_FFFF));
        assert_eq!(sink.value("simple.L.hi"), Some(0xFFFF_FFFF));
        assert_eq!(sink.value("struct_field_simple FAILED"), Some(0));
    }

    #[test]
    fn diagnostics_are_emitted_in_a_fixed_order() {
        let mut checker = checker(MockReporter::new());
        let simple = Simple::new(0x0102_0304, 0x1111_2222_3333_4444);

        assert_eq!(
            checker.check(&simple, -2, 0x5555_6666_7777_8888),
            Verdict::Failed
        );

        assert_eq!(
            checker.sink().entries(),
            [
                (String::from("argI"), 0xFFFF_FFFE),
                (String::from("simple.I"), 0x0102_0304),
                (String::from("argL.lo"), 0x7777_8888),
                (String::from("argL.hi"), 0x5555_6666),
                (String::from("simple.L.lo"), 0x3333_4444),
                (String::from("simple.L.hi"), 0x1111_2222),
                (String::from("struct_field_simple FAILED"), 0),
            ]
        );
    }

    #[test]
    fn every_check_reports_its_own_verdict() {
        let mut reporter = MockReporter::new();
        let mut sequence = Sequence::new();

        for verdict in [Verdict::Passed, Verdict::Passed, Verdict::Failed] {
            reporter
                .expect_report()
                .with(eq(verdict))
                .times(1)
                .in_sequence(&mut sequence)
                .returning(|_| Ok(()));
        }

        let mut checker = checker(reporter);
        let simple = Simple::new(3, 4);

        assert_eq!(checker.check_and_report(&simple, 3, 4), Ok(Verdict::Passed));
        assert_eq!(checker.check_and_report(&simple, 3, 4), Ok(Verdict::Passed));
        assert_eq!(checker.check_and_report(&simple, 3, 5), Ok(Verdict::Failed));
    }

    #[test]
    fn transport_failures_are_propagated() {
        let mut reporter = MockReporter::new();
        reporter
            .expect_report()
            .returning(|_| Err(ReportError::HostDisconnected));

        let mut checker = checker(reporter);

        assert_eq!(
            checker.check_and_report(&Simple::default(), 0, 0),
            Err(ReportError::HostDisconnected)
        );
    }
}
