use crate::cli::{Cli, DecodeCmd, EncodeKeyCmd, FingerprintCmd, Subcommand, WindowCmd};
use anyhow::{bail, Context, Result};
use authorship_fingerprint::{Fingerprint, StorageKey};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};
use tracing_subscriber::EnvFilter;

/// Fingerprint of a single file, as printed by `authorship fingerprint`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FileFingerprint {
    pub path: PathBuf,
    pub identifier: String,
    pub storage_key: String,
}

impl FileFingerprint {
    fn to_line(&self) -> String {
        format!("{}  {}  {}", self.identifier, self.storage_key, self.path.display())
    }
}

/// Layout of a decoded identifier.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct DecodedIdentifier {
    pub identifier: String,
    pub hash_function: u8,
    pub digest_length: u8,
    pub storage_key: String,
}

impl DecodedIdentifier {
    fn new(fingerprint: &Fingerprint) -> Self {
        let bytes = fingerprint.to_bytes();
        DecodedIdentifier {
            identifier: fingerprint.to_text(),
            hash_function: bytes[0],
            digest_length: bytes[1],
            storage_key: hex_key(fingerprint),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum WindowVerdict {
    Accepted,
    TooEarly { by: u64 },
    TooLate { by: u64 },
}

/// Same inclusive window the registry applies: `[now - early, now + late]`.
pub fn check_window(claimed: u64, now: u64, early: u64, late: u64) -> WindowVerdict {
    let earliest = now.saturating_sub(early);
    let latest = now.saturating_add(late);
    if claimed < earliest {
        WindowVerdict::TooEarly { by: earliest - claimed }
    } else if claimed > latest {
        WindowVerdict::TooLate { by: claimed - latest }
    } else {
        WindowVerdict::Accepted
    }
}

fn hex_key(fingerprint: &Fingerprint) -> String {
    format!("0x{}", hex::encode(fingerprint.storage_key()))
}

pub fn parse_key(input: &str) -> Result<StorageKey> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).with_context(|| format!("invalid hex key {input:?}"))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("storage key must be 32 bytes, got {len}"))
}

pub fn fingerprint_file(path: &Path) -> Result<FileFingerprint> {
    let content = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let fingerprint = Fingerprint::compute(&content);
    tracing::debug!(path = %path.display(), bytes = content.len(), %fingerprint, "fingerprinted file");
    Ok(FileFingerprint {
        path: path.to_path_buf(),
        identifier: fingerprint.to_text(),
        storage_key: hex_key(&fingerprint),
    })
}

fn fingerprint(cmd: &FingerprintCmd) -> Result<()> {
    let results = cmd
        .files
        .par_iter()
        .map(|path| fingerprint_file(path))
        .collect::<Result<Vec<_>>>()?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}", result.to_line());
        }
    }
    Ok(())
}

fn decode(cmd: &DecodeCmd) -> Result<()> {
    let fingerprint: Fingerprint = cmd
        .identifier
        .trim()
        .parse()
        .with_context(|| format!("malformed identifier {:?}", cmd.identifier))?;
    let decoded = DecodedIdentifier::new(&fingerprint);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
    } else {
        println!("identifier:    {}", decoded.identifier);
        println!("hash function: {:#04x} (sha2-256)", decoded.hash_function);
        println!("digest length: {}", decoded.digest_length);
        println!("storage key:   {}", decoded.storage_key);
    }
    Ok(())
}

fn encode_key(cmd: &EncodeKeyCmd) -> Result<()> {
    let key = parse_key(&cmd.key)?;
    println!("{}", Fingerprint::from_storage_key(key));
    Ok(())
}

fn window(cmd: &WindowCmd) -> Result<()> {
    let now = match cmd.now {
        Some(now) => now,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock is before the unix epoch")?
            .as_secs(),
    };
    tracing::debug!(claimed = cmd.claimed, now, early = cmd.early, late = cmd.late, "checking window");

    match check_window(cmd.claimed, now, cmd.early, cmd.late) {
        WindowVerdict::Accepted => {
            println!("accepted: {} is within [{}, {}]", cmd.claimed, now.saturating_sub(cmd.early), now.saturating_add(cmd.late));
            Ok(())
        }
        WindowVerdict::TooEarly { by } => {
            bail!("rejected: {} is {by} seconds too far in the past", cmd.claimed)
        }
        WindowVerdict::TooLate { by } => {
            bail!("rejected: {} is {by} seconds too far in the future", cmd.claimed)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse and run command line arguments
pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.subcommand {
        Subcommand::Fingerprint(cmd) => fingerprint(cmd),
        Subcommand::Decode(cmd) => decode(cmd),
        Subcommand::EncodeKey(cmd) => encode_key(cmd),
        Subcommand::Window(cmd) => window(cmd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_TEXT: &str = "QmRN6wdp1S2A5EtjW9A3M1vKSBuQQGcgvuhoMUoEz4iiT5";
    const HELLO_KEY: &str = "0x2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn window_boundaries() {
        assert_eq!(check_window(700, 1000, 300, 30), WindowVerdict::Accepted);
        assert_eq!(check_window(699, 1000, 300, 30), WindowVerdict::TooEarly { by: 1 });
        assert_eq!(check_window(1030, 1000, 300, 30), WindowVerdict::Accepted);
        assert_eq!(check_window(1031, 1000, 300, 30), WindowVerdict::TooLate { by: 1 });
        assert_eq!(check_window(0, 10, 300, 30), WindowVerdict::Accepted);
    }

    #[test]
    fn parse_key_accepts_optional_prefix() {
        let with_prefix = parse_key(HELLO_KEY).unwrap();
        let without = parse_key(&HELLO_KEY[2..]).unwrap();
        assert_eq!(with_prefix, without);
        assert_eq!(Fingerprint::from_storage_key(with_prefix).to_text(), HELLO_TEXT);
    }

    #[test]
    fn parse_key_rejects_bad_input() {
        assert!(parse_key("0x1234").is_err());
        assert!(parse_key("zz").is_err());
        assert!(parse_key(&format!("{HELLO_KEY}00")).is_err());
    }

    #[test]
    fn fingerprints_file_contents() {
        let path = std::env::temp_dir().join(format!("authorship-cli-test-{}", std::process::id()));
        fs::write(&path, b"hello").unwrap();

        let result = fingerprint_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(result.identifier, HELLO_TEXT);
        assert_eq!(result.storage_key, HELLO_KEY);
        assert!(result.to_line().starts_with(HELLO_TEXT));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("authorship-cli-test-does-not-exist");
        let err = fingerprint_file(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn decoded_layout() {
        let fingerprint: Fingerprint = HELLO_TEXT.parse().unwrap();
        let decoded = DecodedIdentifier::new(&fingerprint);
        assert_eq!(decoded.hash_function, 0x12);
        assert_eq!(decoded.digest_length, 32);
        assert_eq!(decoded.storage_key, HELLO_KEY);

        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["identifier"], HELLO_TEXT);
    }
}
