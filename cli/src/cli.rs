use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(
    name = "authorship",
    version,
    about = "Fingerprint files and check identifiers for the authorship registry",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Fingerprint one or more files
    Fingerprint(FingerprintCmd),

    /// Decode and validate a text identifier
    Decode(DecodeCmd),

    /// Turn a 32-byte hex storage key back into a text identifier
    EncodeKey(EncodeKeyCmd),

    /// Check whether a claimed timestamp would be accepted
    Window(WindowCmd),
}

#[derive(Debug, clap::Args)]
pub struct FingerprintCmd {
    /// Files to fingerprint
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct DecodeCmd {
    /// Base-58 identifier, e.g. Qm...
    pub identifier: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct EncodeKeyCmd {
    /// 64 hex characters, with or without a 0x prefix
    pub key: String,
}

#[derive(Debug, clap::Args)]
pub struct WindowCmd {
    /// Claimed unix time in seconds
    #[arg(long)]
    pub claimed: u64,

    /// Reference time in seconds (defaults to the local clock)
    #[arg(long)]
    pub now: Option<u64>,

    /// Seconds a claim may lie in the past
    #[arg(long, default_value_t = 300)]
    pub early: u64,

    /// Seconds a claim may lie in the future
    #[arg(long, default_value_t = 30)]
    pub late: u64,
}
