//! Fixed-width diagnostic logging.
//!
//! The device-side debug channel only carries `(label, u32)` pairs, so wider
//! values are split into unsigned 32-bit halves before they are emitted.

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
/// Splits a 64-bit value into its `(low, high)` unsigned 32-bit halves.
pub const fn split_halves(value: i64) -> (u32, u32) {
    let bits = value as u64;

    (bits as u32, (bits >> 32) as u32)
}

/// A sink for fixed-width diagnostic values.
///
/// Only [`DiagnosticSink::emit`] needs to be implemented, the provided
/// methods decide how signed and wide values are decomposed into `u32`
/// payloads.
pub trait DiagnosticSink {
    /// Emits one `(label, value)` pair.
    fn emit(&mut self, label: &str, value: u32);

    #[allow(clippy::cast_sign_loss)]
    /// Emits the bit pattern of a signed 32-bit value.
    fn log_i32(&mut self, label: &str, value: i32) {
        self.emit(label, value as u32);
    }

    /// Emits a signed 64-bit value as its `<label>.lo` and `<label>.hi`
    /// unsigned halves.
    fn log_i64(&mut self, label: &str, value: i64) {
        let (lo, hi) = split_halves(value);

        self.emit(&format!("{label}.lo"), lo);
        self.emit(&format!("{label}.hi"), hi);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, label: &str, value: u32) {
        (**self).emit(label, value);
    }
}

#[derive(Copy, Clone, Debug, Default)]
/// Forwards diagnostics to the [`log`] facade at debug level.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, label: &str, value: u32) {
        log::debug!(target: "rsDebug", "{label} {value} {value:#010x}");
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Records diagnostics in emission order.
pub struct RecordingSink {
    entries: Vec<(String, u32)>,
}

impl RecordingSink {
    #[must_use]
    /// Creates an empty recording.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    /// All recorded pairs, in emission order.
    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    #[must_use]
    /// Returns the most recently recorded value with the given `label`.
    pub fn value(&self, label: &str) -> Option<u32> {
        self.entries
            .iter()
            .rev()
            .find(|(recorded, _)| recorded == label)
            .map(|(_, value)| *value)
    }

    /// Forgets all recorded pairs.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&mut self, label: &str, value: u32) {
        self.entries.push((String::from(label), value));
    }
}

#[cfg(test)]
mod tests {
    use super::{split_halves, DiagnosticSink, RecordingSink};

    #[test]
    fn max_value_halves() {
        assert_eq!(split_halves(i64::MAX), (0xFFFF_FFFF, 0x7FFF_FFFF));
    }

    #[test]
    fn all_bits_set_halves() {
        assert_eq!(split_halves(-1), (0xFFFF_FFFF, 0xFFFF_FFFF));
    }

    #[test]
    fn min_value_halves() {
        assert_eq!(split_halves(i64::MIN), (0, 0x8000_0000));
    }

    #[test]
    fn wide_values_are_emitted_low_then_high() {
        let mut sink = RecordingSink::new();

        sink.log_i64("argL", 0x7654_3210_fedc_ba98);
        sink.log_i32("argI", -2);

        assert_eq!(
            sink.entries(),
            [
                (String::from("argL.lo"), 0xfedc_ba98),
                (String::from("argL.hi"), 0x7654_3210),
                (String::from("argI"), 0xFFFF_FFFE),
            ]
        );
    }

    fn emit_answer(mut sink: impl DiagnosticSink) {
        sink.emit("label", 42);
    }

    #[test]
    fn forwarding_through_mutable_references() {
        let mut sink = RecordingSink::new();

        emit_answer(&mut sink);

        assert_eq!(sink.value("label"), Some(42));
        assert_eq!(sink.value("missing"), None);

        sink.clear();
        assert!(sink.entries().is_empty());
    }
}
