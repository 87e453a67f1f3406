//! arksign - sign and verify ark-v2 signed URLs from the command line.
//!
//! # Usage
//!
//! ```text
//! ARK_ACCESS_ID=key ARK_ACCESS_SECRET=secret \
//!     arksign sign http://cdn.example.com/video/playlist.m3u8 -c client_ip=10.0.0.1
//!
//! ARK_ACCESS_SECRET=secret arksign verify "<signed url>" -c client_ip=10.0.0.1
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ARK_ACCESS_ID` | *(empty)* | Access ID written to signed URLs |
//! | `ARK_ACCESS_SECRET` | *(required)* | Shared signing secret |
//! | `ARK_DEFAULT_AGE` | `900` | Lifetime in seconds when `--expires` is omitted |
//! | `ARK_SKIP_URL_ENCODING` | `false` | Emit query values without percent-encoding |
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//!
//! `verify` exits with 2 when the URL expired, 3 when the path is outside the
//! signed prefix and 4 on a signature mismatch.

mod args;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{CliArgs, Command};

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `log_level`.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    init_tracing(&args.log_level)?;

    match args.command {
        Command::Sign {
            url,
            expires,
            conditions,
            skip_url_encoding,
        } => {
            let config = commands::build_config(&args.credentials, skip_url_encoding)?;
            debug!(?config, "loaded signer configuration");
            println!("{}", commands::sign(config, &url, expires, &conditions)?);
        }
        Command::Verify {
            url,
            now,
            conditions,
            json,
        } => {
            let config = commands::build_config(&args.credentials, false)?;
            debug!(?config, "loaded signer configuration");
            match commands::verify(config, &url, now, &conditions)? {
                Ok(verified) => println!("{}", commands::render_verified(&verified, json)?),
                Err(e) => {
                    eprintln!("invalid: {e}");
                    std::process::exit(commands::exit_code(&e));
                }
            }
        }
    }

    Ok(())
}
