use std::fmt;
use std::io;

use socksframe_codec::FrameError;

// Exit code constants aligned with rsfulmen/DDR-0002 semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::BadVersion(_)
        | FrameError::BadFormat { .. }
        | FrameError::BadAddrType(_)
        | FrameError::AddressFormat { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_frames_are_data_invalid() {
        for err in [
            FrameError::BadVersion(4),
            FrameError::BadFormat {
                expected: 10,
                actual: 5,
            },
            FrameError::BadAddrType(2),
        ] {
            assert_eq!(frame_error("decode failed", err).code, DATA_INVALID);
        }
    }

    #[test]
    fn io_errors_keep_their_kind() {
        let err = frame_error(
            "read failed",
            FrameError::Io(io::Error::from(io::ErrorKind::PermissionDenied)),
        );
        assert_eq!(err.code, PERMISSION_DENIED);
        assert!(err.message.starts_with("read failed: "));

        let err = frame_error(
            "read failed",
            FrameError::Io(io::Error::from(io::ErrorKind::TimedOut)),
        );
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn short_buffer_is_internal() {
        let err = frame_error(
            "encode failed",
            FrameError::ShortBuffer {
                needed: 10,
                available: 4,
            },
        );
        assert_eq!(err.code, INTERNAL);
        assert_eq!(err.to_string(), "encode failed: short buffer (4 bytes, need 10)");
    }
}
