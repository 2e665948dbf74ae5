use clap::{ArgGroup, Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use socksframe_codec::{AddressType, RequestCommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod status;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode one frame from hex, a file, or stdin.
    Decode(DecodeArgs),
    /// Encode one frame from its fields.
    Encode(EncodeArgs),
    /// Explain reply status codes.
    Status(StatusArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Status(args) => status::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame bytes as hex (whitespace ignored). Reads stdin when omitted.
    #[arg(conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read the frame from a file of raw bytes; bytes after the frame are ignored.
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
    /// Interpret the code byte as a reply status.
    #[arg(long)]
    pub reply: bool,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("code_source")
        .required(true)
        .args(["command", "status", "code"])
))]
pub struct EncodeArgs {
    /// Address type.
    #[arg(long, short = 't', value_name = "TYPE")]
    pub address_type: AddressTypeArg,
    /// Address text: dotted-decimal, colon-hex, or a domain name.
    #[arg(long, short = 'a')]
    pub address: String,
    /// Port number.
    #[arg(long, short = 'p')]
    pub port: u16,
    /// Request command.
    #[arg(long, short = 'c')]
    pub command: Option<CommandArg>,
    /// Reply status, by name (e.g. connection-refused) or number.
    #[arg(long, short = 's')]
    pub status: Option<String>,
    /// Raw CMD/REP byte.
    #[arg(long)]
    pub code: Option<u8>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("which").required(true).args(["code", "all"])))]
pub struct StatusArgs {
    /// Reply status code to explain.
    pub code: Option<u8>,
    /// List every catalogued status.
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum AddressTypeArg {
    Ipv4,
    Domain,
    Ipv6,
}

impl From<AddressTypeArg> for AddressType {
    fn from(arg: AddressTypeArg) -> Self {
        match arg {
            AddressTypeArg::Ipv4 => AddressType::Ipv4,
            AddressTypeArg::Domain => AddressType::Domain,
            AddressTypeArg::Ipv6 => AddressType::Ipv6,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CommandArg {
    Connect,
    Bind,
    UdpAssociate,
}

impl From<CommandArg> for RequestCommand {
    fn from(arg: CommandArg) -> Self {
        match arg {
            CommandArg::Connect => RequestCommand::Connect,
            CommandArg::Bind => RequestCommand::Bind,
            CommandArg::UdpAssociate => RequestCommand::UdpAssociate,
        }
    }
}
