//! # CLI Interface
//!
//! Defines the command-line argument structure for `pix-node` using
//! `clap` derive. Subcommands: `serve`, `encode`, `decode`, `validate-key`
//! and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pix_protocol::amount::Amount;
use pix_protocol::config::{DEFAULT_API_PORT, DEFAULT_METRICS_PORT, DEFAULT_QR_SIZE};
use pix_protocol::key::PixKeyType;

/// PIX payload service.
///
/// Builds PIX "copy and paste" payloads and their QR codes, decodes and
/// verifies existing payloads, and serves the same operations over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "pix-node",
    about = "PIX payload service",
    version,
    propagate_version = true
)]
pub struct PixNodeCli {
    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "PIX_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `pix-node` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API and metrics endpoint.
    Serve(ServeArgs),
    /// Build a payload and print it with a terminal QR code.
    Encode(EncodeArgs),
    /// Decode a payload and verify its checksum.
    Decode(DecodeArgs),
    /// Check a recipient key against its category.
    ValidateKey(ValidateKeyArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind both listeners on.
    #[arg(long, env = "PIX_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port for the REST API.
    #[arg(long, env = "PIX_PORT", default_value_t = DEFAULT_API_PORT)]
    pub port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "PIX_METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Minimum width and height, in pixels, of SVG QR codes.
    #[arg(long, env = "PIX_QR_SIZE", default_value_t = DEFAULT_QR_SIZE)]
    pub qr_size: u32,
}

/// Arguments for the `encode` subcommand.
///
/// Values given as flags override the ones read from `--profile`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Profile row (JSON) to read PIX settings from.
    #[arg(long, short = 'p')]
    pub profile: Option<PathBuf>,

    /// Recipient key category: cpf, cnpj, email, phone or random.
    #[arg(long, short = 't')]
    pub key_type: Option<PixKeyType>,

    /// Recipient key.
    #[arg(long, short = 'k')]
    pub key: Option<String>,

    /// Beneficiary name. Truncated to 25 characters.
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Beneficiary city. Truncated to 15 characters.
    #[arg(long, short = 'c')]
    pub city: Option<String>,

    /// Amount in reais, e.g. `10.50` or `10,50`. Omit for an open amount.
    #[arg(long, short = 'a')]
    pub amount: Option<Amount>,

    /// Refuse to build a payload without an amount.
    #[arg(long)]
    pub require_amount: bool,

    /// Do not print the terminal QR code.
    #[arg(long)]
    pub no_qr: bool,

    /// Also print a WhatsApp share link.
    #[arg(long)]
    pub share: bool,
}

/// Arguments for the `decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// The payload string.
    pub payload: String,
}

/// Arguments for the `validate-key` subcommand.
#[derive(Args, Debug)]
pub struct ValidateKeyArgs {
    /// Recipient key category.
    #[arg(long, short = 't', default_value = "cpf")]
    pub key_type: PixKeyType,

    /// The key to check.
    pub key: String,
}
