//! Error types of the verdict channel and the harness.

use std::time::Duration;

/// Failures of the verdict channel between the device-side checker and the
/// host-side harness.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum ReportError {
    /// The host dropped its receiving end before the verdict was sent.
    #[error("the host side of the verdict channel has disconnected")]
    HostDisconnected,
    /// The host dropped the verdict message without acknowledging it.
    #[error("the host dropped the verdict without acknowledging it")]
    AckDropped,
    /// The host did not acknowledge the verdict in time.
    #[error("the host did not acknowledge the verdict within {0:?}")]
    AckTimeout(Duration),
}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
/// Crate-wide error type.
///
/// A mismatch between the expected and the transferred field values is *not*
/// an error, it is reported as a [`Verdict::Failed`](crate::Verdict::Failed).
pub enum Error {
    /// A byte image of the wrong length was handed to the unmarshaller.
    #[error("struct byte image has {found} bytes but {expected} are required")]
    SizeMismatch {
        /// Size of the struct's byte image
        expected: usize,
        /// Length of the offending slice
        found: usize,
    },
    /// A global was read before the host bound a value to it.
    #[error("global `{name}` was read before the host bound a value to it")]
    Unbound {
        /// Name of the global
        name: String,
    },
    /// A writer panicked while holding the global's lock.
    #[error("global `{name}` was poisoned by a panicking writer")]
    Poisoned {
        /// Name of the global
        name: String,
    },
    /// The host received a message code that is neither pass nor fail.
    #[error("received unknown message code {0} from the device")]
    UnknownMessage(i32),
    /// The host gave up waiting for the device's verdict.
    #[error("no verdict arrived from the device within {0:?}")]
    MessageTimeout(Duration),
    /// The device dropped the verdict channel without sending a verdict.
    #[error("the device closed the verdict channel without sending a verdict")]
    DeviceDisconnected,
    /// The device-side thread of execution panicked.
    #[error("the device-side check panicked")]
    DevicePanicked,
    /// The verdict could not be delivered.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Result alias defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
