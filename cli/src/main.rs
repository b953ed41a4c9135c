//! Authorship command line tool
//!
//! Off-chain companion to the registry: fingerprints files the same way the
//! runtime keys claims, and validates identifiers before they are submitted.

mod cli;
mod command;

fn main() -> anyhow::Result<()> {
    command::run()
}
