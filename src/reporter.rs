//! The verdict channel between the device-side checker and the host.

use std::{fmt, sync::mpsc, time::Duration};

use crate::{
    error::{Error, ReportError, Result},
    verdict::Verdict,
};

#[cfg_attr(test, mockall::automock)]
/// Delivers a [`Verdict`] to whoever invoked the check.
pub trait Reporter {
    /// Reports the `verdict`, blocking until the receiving side has
    /// acknowledged it.
    ///
    /// # Errors
    /// Returns a [`ReportError`] iff the verdict could not be delivered.
    fn report(&mut self, verdict: Verdict) -> Result<(), ReportError>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, verdict: Verdict) -> Result<(), ReportError> {
        (**self).report(verdict)
    }
}

/// A message sent from the device to the host, which must be acknowledged
/// to unblock the sender.
pub struct VerdictMessage {
    code: i32,
    ack: oneshot::Sender<()>,
}

impl VerdictMessage {
    #[must_use]
    /// The raw message code.
    pub const fn code(&self) -> i32 {
        self.code
    }

    #[must_use]
    /// The message decoded as a verdict, [`None`] for unknown codes.
    pub const fn verdict(&self) -> Option<Verdict> {
        Verdict::from_code(self.code)
    }

    /// Acknowledges receipt, unblocking the device-side sender.
    pub fn acknowledge(self) {
        // the sender may have already given up waiting
        let _ = self.ack.send(());
    }
}

impl fmt::Debug for VerdictMessage {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct(stringify!(VerdictMessage))
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
/// The device end of a verdict channel.
pub struct ChannelReporter {
    sender: mpsc::Sender<VerdictMessage>,
    ack_timeout: Option<Duration>,
}

impl ChannelReporter {
    /// Sends a raw message `code` to the host and blocks until the host
    /// acknowledges it.
    ///
    /// # Errors
    /// Returns [`ReportError::HostDisconnected`] if the host has dropped its
    /// [`VerdictReceiver`], [`ReportError::AckDropped`] if the host dropped
    /// the message without acknowledging it, and [`ReportError::AckTimeout`]
    /// if the acknowledgement did not arrive within the configured timeout.
    pub fn send_blocking(&mut self, code: i32) -> Result<(), ReportError> {
        let (ack, acknowledged) = oneshot::channel();

        self.sender
            .send(VerdictMessage { code, ack })
            .map_err(|_| ReportError::HostDisconnected)?;

        log::trace!("sent message {code} to the host, waiting for acknowledgement");

        match self.ack_timeout {
            None => acknowledged.recv().map_err(|_| ReportError::AckDropped),
            Some(timeout) => acknowledged.recv_timeout(timeout).map_err(|err| match err {
                oneshot::RecvTimeoutError::Timeout => ReportError::AckTimeout(timeout),
                oneshot::RecvTimeoutError::Disconnected => ReportError::AckDropped,
            }),
        }
    }
}

impl Reporter for ChannelReporter {
    fn report(&mut self, verdict: Verdict) -> Result<(), ReportError> {
        self.send_blocking(verdict.code())
    }
}

#[derive(Debug)]
/// The host end of a verdict channel.
pub struct VerdictReceiver {
    receiver: mpsc::Receiver<VerdictMessage>,
}

impl VerdictReceiver {
    /// Receives the next message from the device without acknowledging it.
    ///
    /// # Errors
    /// Returns [`Error::DeviceDisconnected`] if every [`ChannelReporter`] has
    /// been dropped, and [`Error::MessageTimeout`] if no message arrived
    /// within `timeout`.
    pub fn recv(&self, timeout: Option<Duration>) -> Result<VerdictMessage> {
        match timeout {
            None => self.receiver.recv().map_err(|_| Error::DeviceDisconnected),
            Some(timeout) => self.receiver.recv_timeout(timeout).map_err(|err| match err {
                mpsc::RecvTimeoutError::Timeout => Error::MessageTimeout(timeout),
                mpsc::RecvTimeoutError::Disconnected => Error::DeviceDisconnected,
            }),
        }
    }

    /// Receives and acknowledges the next message, decoding it as a
    /// [`Verdict`].
    ///
    /// Messages with unknown codes are still acknowledged so that the device
    /// does not stay blocked.
    ///
    /// # Errors
    /// Returns the errors of [`Self::recv`], and [`Error::UnknownMessage`] if
    /// the code is not a verdict code.
    pub fn recv_verdict(&self, timeout: Option<Duration>) -> Result<Verdict> {
        let message = self.recv(timeout)?;

        let code = message.code();
        let verdict = message.verdict();
        message.acknowledge();

        log::trace!("acknowledged message {code} from the device");

        verdict.ok_or(Error::UnknownMessage(code))
    }
}

#[must_use]
/// Creates a connected verdict channel.
///
/// With `ack_timeout` set to [`None`], the [`ChannelReporter`] waits
/// indefinitely for every acknowledgement.
pub fn verdict_channel(ack_timeout: Option<Duration>) -> (ChannelReporter, VerdictReceiver) {
    let (sender, receiver) = mpsc::channel();

    (
        ChannelReporter {
            sender,
            ack_timeout,
        },
        VerdictReceiver { receiver },
    )
}
