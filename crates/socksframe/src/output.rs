use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use socksframe_codec::{Frame, ReplyStatus, RequestCommand};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Which reading of the CMD/REP byte to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Request,
    Reply,
}

#[derive(Serialize)]
pub struct FrameOutput {
    kind: FrameKind,
    code: u8,
    code_name: Option<&'static str>,
    description: Option<&'static str>,
    address_type: String,
    address: String,
    port: u16,
    wire_size: usize,
    hex: String,
}

impl FrameOutput {
    pub fn new(frame: &Frame, kind: FrameKind) -> Self {
        let (code_name, description) = match kind {
            FrameKind::Request => (frame.request_command().map(RequestCommand::name), None),
            FrameKind::Reply => (
                frame.reply_status().map(ReplyStatus::name),
                frame.status_description(),
            ),
        };
        Self {
            kind,
            code: frame.code,
            code_name,
            description,
            address_type: frame.address_type().to_string(),
            address: frame.address.to_string(),
            port: frame.port,
            wire_size: frame.wire_size(),
            hex: hex::encode(frame.to_bytes()),
        }
    }

    fn code_label(&self) -> String {
        match self.code_name {
            Some(name) => format!("{} ({name})", self.code),
            None => format!("{} (unknown)", self.code),
        }
    }
}

pub fn print_frame(frame: &Frame, kind: FrameKind, format: OutputFormat) {
    let out = FrameOutput::new(frame, kind);
    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec!["kind".to_string(), format!("{:?}", out.kind).to_lowercase()])
                .add_row(vec!["code".to_string(), out.code_label()])
                .add_row(vec!["address_type".to_string(), out.address_type.clone()])
                .add_row(vec!["address".to_string(), out.address.clone()])
                .add_row(vec!["port".to_string(), out.port.to_string()])
                .add_row(vec!["wire_size".to_string(), out.wire_size.to_string()])
                .add_row(vec!["hex".to_string(), out.hex.clone()]);
            if kind == FrameKind::Reply {
                table.add_row(vec![
                    "description".to_string(),
                    out.description.unwrap_or("no error").to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let mut line = format!(
                "code={} atyp={} address={} port={} size={}",
                out.code_label(),
                out.address_type,
                out.address,
                out.port,
                out.wire_size
            );
            if kind == FrameKind::Reply {
                line.push_str(&format!(" status={:?}", out.description.unwrap_or("no error")));
            }
            println!("{line}");
        }
        OutputFormat::Raw => print_raw(&frame.to_bytes()),
    }
}

#[derive(Serialize)]
pub struct StatusOutput {
    code: u8,
    name: Option<&'static str>,
    description: Option<&'static str>,
    success: bool,
}

impl StatusOutput {
    pub fn new(code: u8) -> Self {
        let status = ReplyStatus::from_code(code);
        Self {
            code,
            name: status.map(ReplyStatus::name),
            description: socksframe_codec::lookup(code),
            success: status.is_some_and(ReplyStatus::is_success),
        }
    }

    fn text(&self) -> &'static str {
        match (self.description, self.success) {
            (Some(text), _) => text,
            (None, true) => "no error",
            (None, false) => "unknown status",
        }
    }
}

pub fn print_statuses(statuses: &[StatusOutput], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let [single] = statuses {
                print_json(single);
            } else {
                print_json(&statuses);
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CODE", "NAME", "DESCRIPTION"]);
            for status in statuses {
                table.add_row(vec![
                    status.code.to_string(),
                    status.name.unwrap_or("-").to_string(),
                    status.text().to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for status in statuses {
                println!(
                    "{} {}: {}",
                    status.code,
                    status.name.unwrap_or("-"),
                    status.text()
                );
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use std::net::Ipv6Addr;

    use super::*;

    #[test]
    fn reply_output_includes_description() {
        let frame = Frame::reply(ReplyStatus::ConnectionRefused, Ipv6Addr::LOCALHOST, 1080);
        let out = FrameOutput::new(&frame, FrameKind::Reply);
        let json = serde_json::to_value(&out).unwrap();

        assert_eq!(json["kind"], "reply");
        assert_eq!(json["code_name"], "CONNECTION-REFUSED");
        assert_eq!(json["description"], "Connection refused");
        assert_eq!(json["address"], "::1");
        assert_eq!(json["wire_size"], 22);
        assert!(json["hex"].as_str().unwrap().ends_with("0438"));
    }

    #[test]
    fn request_output_names_command() {
        let frame = Frame::new(3, std::net::Ipv4Addr::LOCALHOST, 80);
        let out = FrameOutput::new(&frame, FrameKind::Request);
        assert_eq!(out.code_name, Some("UDP-ASSOCIATE"));
        assert_eq!(out.description, None);
        assert_eq!(out.code_label(), "3 (UDP-ASSOCIATE)");
    }

    #[test]
    fn status_text_separates_success_from_unknown() {
        assert_eq!(StatusOutput::new(0).text(), "no error");
        assert_eq!(StatusOutput::new(9).text(), "unknown status");
        assert_eq!(StatusOutput::new(3).text(), "Network unreachable");
    }
}
