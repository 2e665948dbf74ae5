use socksframe_codec::{AddressType, Frame, ReplyStatus, RequestCommand};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_frame, FrameKind, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let (code, kind) = resolve_code(&args)?;
    let address_type = AddressType::from(args.address_type);

    let frame = Frame::from_parts(code, address_type, &args.address, args.port)
        .map_err(|err| frame_error("encode failed", err))?;
    tracing::debug!(code, atyp = %address_type, len = frame.wire_size(), "encoded frame");

    print_frame(&frame, kind, format);
    Ok(SUCCESS)
}

fn resolve_code(args: &EncodeArgs) -> CliResult<(u8, FrameKind)> {
    if let Some(command) = args.command {
        return Ok((RequestCommand::from(command).into(), FrameKind::Request));
    }
    if let Some(status) = &args.status {
        return Ok((parse_status(status)?.code(), FrameKind::Reply));
    }
    match args.code {
        Some(code) => Ok((code, FrameKind::Request)),
        None => Err(CliError::new(
            USAGE,
            "one of --command, --status or --code is required",
        )),
    }
}

/// Accepts a status name in any case, with `-` or `_` separators, or its number.
fn parse_status(input: &str) -> CliResult<ReplyStatus> {
    let normalized = input.trim().to_ascii_uppercase().replace('_', "-");
    if let Ok(code) = normalized.parse::<u8>() {
        return ReplyStatus::from_code(code).ok_or_else(|| {
            CliError::new(DATA_INVALID, format!("unknown reply status code: {code}"))
        });
    }
    ReplyStatus::ALL
        .into_iter()
        .find(|status| status.name() == normalized)
        .ok_or_else(|| CliError::new(DATA_INVALID, format!("unknown reply status: {input}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::AddressTypeArg;

    fn args(address_type: AddressTypeArg, address: &str) -> EncodeArgs {
        EncodeArgs {
            address_type,
            address: address.to_string(),
            port: 1080,
            command: None,
            status: None,
            code: Some(0),
        }
    }

    #[test]
    fn status_names_and_numbers() {
        assert_eq!(
            parse_status("connection-refused").unwrap(),
            ReplyStatus::ConnectionRefused
        );
        assert_eq!(parse_status("TTL_EXPIRED").unwrap(), ReplyStatus::TtlExpired);
        assert_eq!(parse_status("0").unwrap(), ReplyStatus::Succeeded);
        assert_eq!(parse_status("8").unwrap(), ReplyStatus::AddressUnsupported);
        assert_eq!(parse_status("9").unwrap_err().code, DATA_INVALID);
        assert_eq!(parse_status("nope").unwrap_err().code, DATA_INVALID);
    }

    #[test]
    fn status_takes_reply_kind() {
        let mut a = args(AddressTypeArg::Ipv6, "::1");
        a.code = None;
        a.status = Some("succeeded".to_string());
        assert_eq!(resolve_code(&a).unwrap(), (0, FrameKind::Reply));
    }

    #[test]
    fn invalid_address_is_data_invalid() {
        let err = run(args(AddressTypeArg::Ipv4, "not-an-ip"), OutputFormat::Json).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("invalid IPv4 address"));
    }

    #[test]
    fn oversized_domain_is_data_invalid() {
        let name = "x".repeat(256);
        let err = run(args(AddressTypeArg::Domain, &name), OutputFormat::Json).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }
}
