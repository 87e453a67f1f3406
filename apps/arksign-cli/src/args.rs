//! Command-line arguments.

use clap::{Args, Parser, Subcommand};

/// Sign and verify ark-v2 signed URLs.
#[derive(Debug, Parser)]
#[command(about, version)]
pub struct CliArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Log level filter, used when `RUST_LOG` is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the `ARK_*` environment configuration.
#[derive(Debug, Args)]
pub struct CredentialArgs {
    /// Access ID written to signed URLs (overrides `ARK_ACCESS_ID`)
    #[arg(long, global = true)]
    pub access_id: Option<String>,

    /// Shared secret (overrides `ARK_ACCESS_SECRET`)
    #[arg(long, global = true)]
    pub access_secret: Option<String>,

    /// Default lifetime in seconds (overrides `ARK_DEFAULT_AGE`)
    #[arg(long, global = true)]
    pub default_age: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign a URL and print the signed URL
    Sign {
        /// The resource URL to sign
        url: String,

        /// Expiry in unix seconds (defaults to now plus the default age)
        #[arg(long)]
        expires: Option<i64>,

        /// Condition to bind, as `key=value` (repeatable)
        #[arg(long = "condition", short = 'c', value_parser = parse_condition)]
        conditions: Vec<(String, String)>,

        /// Write query values without percent-encoding
        #[arg(long)]
        skip_url_encoding: bool,
    },

    /// Verify a signed URL
    Verify {
        /// The signed URL to verify
        url: String,

        /// Verification time in unix seconds (defaults to now)
        #[arg(long)]
        now: Option<i64>,

        /// Out-of-band condition value, as `key=value` (repeatable)
        #[arg(long = "condition", short = 'c', value_parser = parse_condition)]
        conditions: Vec<(String, String)>,

        /// Print the verification result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_condition(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("condition name is empty in `{raw}`"));
    }
    Ok((key.to_owned(), value.to_owned()))
}
