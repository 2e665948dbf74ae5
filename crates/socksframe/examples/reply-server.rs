//! Minimal reply server. Reads request frames and answers each one.
//!
//! Method negotiation is skipped; the client sends request frames directly.
//!
//! Run with:
//!   cargo run --example reply-server
//!
//! In another terminal:
//!   printf '\x05\x01\x00\x03\x0bexample.com\x00\x50' | nc 127.0.0.1 10800

use std::net::TcpListener;

use socksframe::codec::{FrameError, RequestCommand};
use socksframe::status::ReplyStatus;
use socksframe::{Frame, FrameReader, FrameWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:10800")?;
    eprintln!("Listening on {}", listener.local_addr()?);

    // Accept one client and answer requests until disconnect.
    let (stream, peer) = listener.accept()?;
    eprintln!("Client connected: {peer}");

    let bound = stream.local_addr()?;
    let mut reader = FrameReader::new(stream.try_clone()?);
    let mut writer = FrameWriter::new(stream);

    loop {
        let request = match reader.read_frame() {
            Ok(frame) => frame,
            Err(FrameError::ConnectionClosed) => {
                eprintln!("Client disconnected");
                break;
            }
            Err(e) => {
                eprintln!("Rejecting malformed request: {e}");
                let reply = Frame::reply(ReplyStatus::GeneralFailure, bound.ip(), bound.port());
                writer.write_frame(&reply)?;
                break;
            }
        };

        eprintln!(
            "Request {:?} for {}:{}",
            request.request_command(),
            request.address,
            request.port
        );

        let status = match request.request_command() {
            Some(RequestCommand::Connect) => ReplyStatus::Succeeded,
            _ => ReplyStatus::CommandUnsupported,
        };
        let reply = Frame::reply(status, bound.ip(), bound.port());
        if let Some(err) = reply.resolve_status() {
            eprintln!("Replying with failure: {err}");
        }
        writer.write_frame(&reply)?;
    }

    Ok(())
}
