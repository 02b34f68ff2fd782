//! Error types for projlib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer, protocol-layer, and
//! connector-layer errors are all captured here.
//!
//! The connector wraps lower-level failures so that callers can tell the
//! two interesting cases apart: the link could not be opened at all
//! ([`Error::Connection`]), or something went wrong once it was open
//! ([`Error::Communication`]).

use crate::helpers::hex;

/// The error type for all projlib operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port, TCP socket).
    #[error("transport error: {0}")]
    Transport(String),

    /// Timed out waiting for a response from the projector.
    ///
    /// This typically indicates the projector is unplugged, the serial
    /// parameters are wrong, or the network control option is disabled
    /// in the projector's menu.
    #[error("timeout waiting for response")]
    Timeout,

    /// No connection to the projector has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the projector was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response frame failed validation (wrong length, bad checksum,
    /// mismatched item code). Carries the raw bytes for diagnostics.
    #[error("invalid response {}: {reason}", hex(.bytes))]
    InvalidResponse {
        /// What was wrong with the frame.
        reason: String,
        /// The raw response bytes as received.
        bytes: Vec<u8>,
    },

    /// The projector answered with an error code instead of a result.
    #[error("projector error {code:04X}: {message}")]
    DeviceError {
        /// Raw 16-bit error code from the response payload.
        code: u16,
        /// Human-readable description of the error code.
        message: &'static str,
    },

    /// The requested setting does not exist on the active projector model.
    ///
    /// Raised before any I/O takes place.
    #[error("{setting} is not available for projector model {model}")]
    UnsupportedForModel {
        /// The setting that was requested.
        setting: &'static str,
        /// The active model name.
        model: &'static str,
    },

    /// A symbolic value has no entry in the capability table for the
    /// active model category.
    #[error("unknown {table} value {name:?} for category {category}")]
    UnknownName {
        /// Name of the capability table that was consulted.
        table: &'static str,
        /// Model category used for the lookup.
        category: u8,
        /// The name that failed to resolve.
        name: String,
    },

    /// A binary code returned by the projector has no entry in the
    /// capability table for the active model category.
    #[error("unknown {table} code {} for category {category}", hex(.code))]
    UnknownCode {
        /// Name of the capability table that was consulted.
        table: &'static str,
        /// Model category used for the lookup.
        category: u8,
        /// The code that failed to resolve.
        code: Vec<u8>,
    },

    /// A power transition was requested while the projector is not in the
    /// required state.
    #[error("projector not ready for command {0}")]
    NotReady(&'static str),

    /// The transport could not be opened.
    #[error("connection failed: {0}")]
    Connection(#[source] Box<Error>),

    /// A write, read, or response validation failed during a session.
    #[error("{context} failed: {source}")]
    Communication {
        /// The operation that was in progress (e.g. "get setting CONTRAST").
        context: String,
        /// The underlying cause.
        #[source]
        source: Box<Error>,
    },

    /// An invalid parameter was passed to a projector command.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The caller's cancellation token fired while waiting.
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Wrap an error raised while a session was open.
    pub fn communication(context: impl Into<String>, source: Error) -> Self {
        Error::Communication {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Return the raw response bytes attached to this error, if any.
    ///
    /// Looks through [`Error::Communication`] and [`Error::Connection`]
    /// wrappers down to the innermost [`Error::InvalidResponse`].
    pub fn response_bytes(&self) -> Option<&[u8]> {
        match self {
            Error::InvalidResponse { bytes, .. } => Some(bytes),
            Error::Communication { source, .. } => source.response_bytes(),
            Error::Connection(source) => source.response_bytes(),
            _ => None,
        }
    }

    /// Returns `true` for errors that are resolved locally without talking
    /// to the projector.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedForModel { .. }
                | Error::UnknownName { .. }
                | Error::InvalidParameter(_)
        )
    }
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_transport() {
        let e = Error::Transport("port busy".into());
        assert_eq!(e.to_string(), "transport error: port busy");
    }

    #[test]
    fn error_display_timeout() {
        let e = Error::Timeout;
        assert_eq!(e.to_string(), "timeout waiting for response");
    }

    #[test]
    fn error_display_invalid_response() {
        let e = Error::InvalidResponse {
            reason: "bad checksum".into(),
            bytes: vec![0xA9, 0x00, 0x10],
        };
        assert_eq!(e.to_string(), "invalid response A90010: bad checksum");
    }

    #[test]
    fn error_display_device_error() {
        let e = Error::DeviceError {
            code: 0x0101,
            message: "Invalid item",
        };
        assert_eq!(e.to_string(), "projector error 0101: Invalid item");
    }

    #[test]
    fn error_display_unsupported_for_model() {
        let e = Error::UnsupportedForModel {
            setting: "film mode",
            model: "VPL-HW10",
        };
        assert_eq!(
            e.to_string(),
            "film mode is not available for projector model VPL-HW10"
        );
    }

    #[test]
    fn error_display_unknown_name() {
        let e = Error::UnknownName {
            table: "aspect",
            category: 6,
            name: "Stretch".into(),
        };
        assert_eq!(
            e.to_string(),
            "unknown aspect value \"Stretch\" for category 6"
        );
    }

    #[test]
    fn error_display_unknown_code() {
        let e = Error::UnknownCode {
            table: "input",
            category: 1,
            code: vec![0x00, 0x7F],
        };
        assert_eq!(e.to_string(), "unknown input code 007F for category 1");
    }

    #[test]
    fn error_display_not_ready() {
        let e = Error::NotReady("power off");
        assert_eq!(e.to_string(), "projector not ready for command power off");
    }

    #[test]
    fn error_display_connection() {
        let e = Error::Connection(Box::new(Error::Timeout));
        assert_eq!(e.to_string(), "connection failed: timeout waiting for response");
    }

    #[test]
    fn error_display_communication() {
        let e = Error::communication("get setting CONTRAST", Error::NotConnected);
        assert_eq!(e.to_string(), "get setting CONTRAST failed: not connected");
    }

    #[test]
    fn error_source_chain() {
        use std::error::Error as _;

        let e = Error::communication("get setting HUE", Error::Timeout);
        let source = e.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("timeout waiting for response"));
    }

    #[test]
    fn response_bytes_through_wrappers() {
        let inner = Error::InvalidResponse {
            reason: "item mismatch".into(),
            bytes: vec![1, 2, 3],
        };
        let e = Error::communication("get setting CONTRAST", inner);
        assert_eq!(e.response_bytes(), Some(&[1u8, 2, 3][..]));
        assert_eq!(Error::Timeout.response_bytes(), None);
    }

    #[test]
    fn local_errors() {
        assert!(Error::InvalidParameter("x".into()).is_local());
        assert!(!Error::Timeout.is_local());
        assert!(!Error::NotReady("power on").is_local());
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
