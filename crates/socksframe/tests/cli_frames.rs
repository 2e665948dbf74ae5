#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn socksframe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_socksframe"))
        .args(["--log-level", "error", "--format", "json"])
        .args(args)
        .output()
        .expect("socksframe should run")
}

fn socksframe_with_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_socksframe"))
        .args(["--log-level", "error"])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("socksframe should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input)
        .expect("stdin should accept input");
    child.wait_with_output().expect("socksframe should exit")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be json")
}

#[test]
fn decode_ipv4_request() {
    let output = socksframe(&["decode", "05 01 00 01 7f 00 00 01 00 50"]);
    assert!(output.status.success());

    let json = json_stdout(&output);
    assert_eq!(json["kind"], "request");
    assert_eq!(json["code"], 1);
    assert_eq!(json["code_name"], "CONNECT");
    assert_eq!(json["address_type"], "IPv4");
    assert_eq!(json["address"], "127.0.0.1");
    assert_eq!(json["port"], 80);
}

#[test]
fn decode_domain_request_from_stdin() {
    let mut wire = vec![0x05, 0x01, 0x00, 0x03, 0x0B];
    wire.extend_from_slice(b"example.com");
    wire.extend_from_slice(&[0x00, 0x50]);

    let output = socksframe_with_stdin(&["--format", "json", "decode"], &wire);
    assert!(output.status.success());

    let json = json_stdout(&output);
    assert_eq!(json["address_type"], "domain");
    assert_eq!(json["address"], "example.com");
    assert_eq!(json["wire_size"], 18);
}

#[test]
fn decode_bad_version_exits_data_invalid() {
    let output = socksframe(&["decode", "04010001 7f000001 0050"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad version"), "stderr: {stderr}");
}

#[test]
fn decode_short_input_exits_data_invalid() {
    let output = socksframe(&["decode", "0501000100"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad format"), "stderr: {stderr}");
}

#[test]
fn decode_reply_explains_status() {
    let output = socksframe(&["decode", "--reply", "05050001 00000000 0000"]);
    assert!(output.status.success());

    let json = json_stdout(&output);
    assert_eq!(json["kind"], "reply");
    assert_eq!(json["code_name"], "CONNECTION-REFUSED");
    assert_eq!(json["description"], "Connection refused");
}

#[test]
fn encode_ipv6_reply() {
    let output = socksframe(&[
        "encode",
        "--address-type",
        "ipv6",
        "--address",
        "::1",
        "--port",
        "1080",
        "--status",
        "succeeded",
    ]);
    assert!(output.status.success());

    let json = json_stdout(&output);
    assert_eq!(json["wire_size"], 22);
    assert_eq!(
        json["hex"],
        "05000004000000000000000000000000000000010438"
    );
    assert!(json["description"].is_null());
}

#[test]
fn encode_raw_writes_frame_bytes() {
    let output = Command::new(env!("CARGO_BIN_EXE_socksframe"))
        .args(["--log-level", "error", "--format", "raw"])
        .args(["encode", "-t", "domain", "-a", "example.com", "-p", "80", "-c", "connect"])
        .output()
        .expect("socksframe should run");
    assert!(output.status.success());

    let mut expected = vec![0x05, 0x01, 0x00, 0x03, 0x0B];
    expected.extend_from_slice(b"example.com");
    expected.extend_from_slice(&[0x00, 0x50]);
    assert_eq!(output.stdout, expected);
}

#[test]
fn encode_invalid_ipv4_fails() {
    let output = socksframe(&[
        "encode", "-t", "ipv4", "-a", "300.1.1.1", "-p", "80", "-c", "connect",
    ]);
    assert_eq!(output.status.code(), Some(60));
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_status_code_exits_data_invalid_everywhere() {
    let encode = socksframe(&[
        "encode", "-t", "ipv4", "-a", "0.0.0.0", "-p", "0", "--status", "9",
    ]);
    let status = socksframe(&["status", "9"]);
    assert_eq!(encode.status.code(), Some(60));
    assert_eq!(status.status.code(), Some(60));
}

#[test]
fn encode_then_decode_via_pipe() {
    let encoded = Command::new(env!("CARGO_BIN_EXE_socksframe"))
        .args(["--log-level", "error", "--format", "raw"])
        .args(["encode", "-t", "ipv4", "-a", "10.0.0.1", "-p", "8080", "-c", "bind"])
        .output()
        .expect("socksframe should run");
    assert!(encoded.status.success());

    let decoded = socksframe_with_stdin(&["--format", "json", "decode"], &encoded.stdout);
    assert!(decoded.status.success());
    let json = json_stdout(&decoded);
    assert_eq!(json["code_name"], "BIND");
    assert_eq!(json["address"], "10.0.0.1");
    assert_eq!(json["port"], 8080);
}

#[test]
fn status_lookup() {
    let output = socksframe(&["status", "3"]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["name"], "NETWORK-UNREACHABLE");
    assert_eq!(json["description"], "Network unreachable");

    let output = socksframe(&["status", "0"]);
    let json = json_stdout(&output);
    assert!(json["description"].is_null());
    assert_eq!(json["success"], true);

    let output = socksframe(&["status", "9"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn status_all_lists_catalog() {
    let output = socksframe(&["status", "--all"]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    let rows = json.as_array().expect("status --all should be an array");
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[8]["description"], "Address type not supported");
}
