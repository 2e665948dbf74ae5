use std::fs::File;
use std::io::{self, Read};

use socksframe_codec::{Frame, FrameReader};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_frame, FrameKind, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = match (&args.hex, &args.file) {
        (Some(text), _) => decode_hex(text)?,
        (None, Some(path)) => {
            let file = File::open(path).map_err(|err| {
                io_error(&format!("failed opening {}", path.display()), err)
            })?;
            read_one(file)?
        }
        (None, None) => read_one(io::stdin().lock())?,
    };

    tracing::debug!(code = frame.code, atyp = %frame.address_type(), "decoded frame");

    let kind = if args.reply {
        FrameKind::Reply
    } else {
        FrameKind::Request
    };
    print_frame(&frame, kind, format);
    Ok(SUCCESS)
}

/// Decode a hex string that must contain exactly one frame.
fn decode_hex(text: &str) -> CliResult<Frame> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let compact = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    let bytes = hex::decode(compact)
        .map_err(|err| CliError::new(DATA_INVALID, format!("invalid hex input: {err}")))?;
    Frame::decode(&bytes).map_err(|err| frame_error("decode failed", err))
}

/// Read the first frame from a byte stream.
fn read_one<R: Read>(source: R) -> CliResult<Frame> {
    FrameReader::new(source)
        .read_frame()
        .map_err(|err| frame_error("decode failed", err))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::exit::FAILURE;

    #[test]
    fn hex_with_uppercase_prefix() {
        let frame = decode_hex("0X0501000100000000ABCD").unwrap();
        assert_eq!(frame.address.to_string(), "0.0.0.0");
        assert_eq!(frame.port, 0xABCD);
    }

    #[test]
    fn hex_with_spaces_and_prefix() {
        let frame = decode_hex("0x05 01 00 01 7f 00 00 01 00 50").unwrap();
        assert_eq!(frame.address.to_string(), "127.0.0.1");
        assert_eq!(frame.port, 80);
    }

    #[test]
    fn hex_with_trailing_bytes_is_rejected() {
        let err = decode_hex("05010001 7f000001 0050 00").unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn invalid_hex_is_data_invalid() {
        let err = decode_hex("zz").unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("invalid hex"));
    }

    #[test]
    fn stream_input_ignores_following_bytes() {
        let mut bytes = hex::decode("05010003076578616d706c6501bb").unwrap();
        bytes.extend_from_slice(b"payload");
        let frame = read_one(Cursor::new(bytes)).unwrap();
        assert_eq!(frame.address.to_string(), "example");
        assert_eq!(frame.port, 443);
    }

    #[test]
    fn empty_stream_fails() {
        let err = read_one(Cursor::new(Vec::new())).unwrap_err();
        assert_eq!(err.code, FAILURE);
    }
}
