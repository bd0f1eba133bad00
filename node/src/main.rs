// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # PIX Payload Service
//!
//! Entry point for the `pix-node` binary. Parses CLI arguments, initializes
//! logging and metrics, and either serves the HTTP API or runs a one-shot
//! command.
//!
//! The binary supports five subcommands:
//!
//! - `serve`        start the API and metrics servers
//! - `encode`       build a payload from flags or a profile file
//! - `decode`       verify and print the fields of a payload
//! - `validate-key` check a recipient key against its category
//! - `version`      print build version information

mod api;
mod cli;
mod logging;
mod metrics;
mod qr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use pix_protocol::key::{digits_only, validate_key};
use pix_protocol::payload::{decode_payload, encode, AmountPolicy};
use pix_protocol::profile::{PixSettings, ProfilePixRecord};
use pix_protocol::share::{share_message, whatsapp_url};

use cli::{Commands, PixNodeCli};
use logging::LogFormat;
use metrics::PixMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = PixNodeCli::parse();
    let format = LogFormat::from_str_lossy(&cli.log_format);

    match cli.command {
        Commands::Serve(args) => {
            logging::init_logging(logging::SERVE_FILTER, format);
            serve(args).await
        }
        Commands::Encode(args) => {
            logging::init_logging(logging::COMMAND_FILTER, format);
            encode_command(args)
        }
        Commands::Decode(args) => {
            logging::init_logging(logging::COMMAND_FILTER, format);
            decode_command(args)
        }
        Commands::ValidateKey(args) => {
            logging::init_logging(logging::COMMAND_FILTER, format);
            validate_key_command(args)
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the API server and the metrics endpoint.
async fn serve(args: cli::ServeArgs) -> Result<()> {
    tracing::info!(
        bind = %args.bind,
        port = args.port,
        metrics_port = args.metrics_port,
        qr_size = args.qr_size,
        "starting pix-node"
    );

    // --- Metrics ---
    let pix_metrics = Arc::new(PixMetrics::new());

    // --- Application state ---
    let app_state = api::AppState {
        version: format!(
            "{} (protocol {})",
            env!("CARGO_PKG_VERSION"),
            pix_protocol::config::PROTOCOL_VERSION,
        ),
        started_at: chrono::Utc::now(),
        qr_size: args.qr_size,
        metrics: Arc::clone(&pix_metrics),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("{}:{}", args.bind, args.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind API listener on {}", api_addr))?;
    tracing::info!("API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&pix_metrics));
    let metrics_addr = format!("{}:{}", args.bind, args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("pix-node stopped");
    Ok(())
}

/// Reads PIX settings from a profile file, or starts from empty settings.
fn load_settings(args: &cli::EncodeArgs) -> Result<PixSettings> {
    let record = match &args.profile {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read profile {}", path.display()))?;
            serde_json::from_str::<ProfilePixRecord>(&raw)
                .with_context(|| format!("failed to parse profile {}", path.display()))?
        }
        None => ProfilePixRecord::default(),
    };
    let settings = PixSettings::from_profile(&record).context("invalid PIX settings in profile")?;
    tracing::debug!(?settings, "settings resolved");
    Ok(settings)
}

/// Builds a payload and prints it, its QR code and optionally a share link.
fn encode_command(args: cli::EncodeArgs) -> Result<()> {
    let mut settings = load_settings(&args)?;
    if let Some(kind) = args.key_type {
        settings.key_type = kind;
    }
    if let Some(key) = &args.key {
        settings.key = key.clone();
    }
    if let Some(name) = &args.name {
        settings.beneficiary_name = name.clone();
    }
    if let Some(city) = &args.city {
        settings.city = city.clone();
    }
    if args.profile.is_some() && !settings.enabled {
        tracing::warn!("PIX is disabled on this profile");
    }

    let target = settings.to_target(args.amount);
    let policy = if args.require_amount {
        AmountPolicy::Required
    } else {
        AmountPolicy::Open
    };
    let payload = encode(&target, policy).context("cannot build payload")?;

    println!("{}", payload);
    if !args.no_qr {
        let code = qr::render_terminal(&payload).context("cannot render QR code")?;
        println!("{}", code);
    }
    if args.share {
        let message = share_message(&target.beneficiary_name, target.encoded_amount(), &payload);
        println!("{}", whatsapp_url(&message));
    }
    Ok(())
}

/// Verifies a payload and prints its fields as JSON.
fn decode_command(args: cli::DecodeArgs) -> Result<()> {
    let decoded = decode_payload(&args.payload).context("invalid payload")?;
    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(())
}

/// Checks a key and exits non-zero when it does not match its category.
fn validate_key_command(args: cli::ValidateKeyArgs) -> Result<()> {
    match validate_key(&args.key, args.key_type) {
        Ok(()) => {
            println!("valid {} key: {}", args.key_type, digits_only(&args.key));
            Ok(())
        }
        Err(e) => bail!("invalid {} key: {}", args.key_type, e),
    }
}

/// Prints version information to stdout.
fn print_version() {
    println!("pix-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol {}", pix_protocol::config::PROTOCOL_VERSION);
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
