//! Command-line arguments.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser};
use grantprobe_core::ProbeConfig;
use grantprobe_core::input::ProbeSource;

/// Check whether email addresses are associated with AWS accounts
#[derive(Parser, Debug)]
#[command(
    name = "grantprobe",
    version,
    about = "AWS account email validator",
    long_about = "Checks whether email addresses are associated with AWS accounts by adding \
                  each one as an ACL grantee on a disposable S3 bucket.\n\n\
                  The bucket is created if it does not exist and is never deleted."
)]
pub struct Cli {
    /// S3 bucket name
    #[arg(long)]
    pub bucket: String,

    #[command(flatten)]
    pub input: InputArgs,

    /// AWS region for the session (overrides the SDK region chain)
    #[arg(long)]
    pub region: Option<String>,

    /// Custom endpoint for S3 and STS
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Use path-style S3 addressing
    #[arg(long)]
    pub force_path_style: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Exactly one email source.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Email to verify and grant permission
    #[arg(long)]
    pub email: Option<String>,

    /// File containing list of emails (one per line)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Where the emails come from.
    pub fn source(&self) -> anyhow::Result<ProbeSource> {
        match (&self.input.email, &self.input.file) {
            (Some(email), None) => Ok(ProbeSource::Single(email.clone())),
            (None, Some(path)) => Ok(ProbeSource::File(path.clone())),
            (Some(_), Some(_)) => bail!("--email and --file cannot be used together"),
            (None, None) => bail!("one of --email or --file is required"),
        }
    }

    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, mut config: ProbeConfig) -> ProbeConfig {
        if let Some(region) = &self.region {
            config.region = Some(region.clone());
        }
        if let Some(url) = &self.endpoint_url {
            config.endpoint_url = Some(url.clone());
        }
        if self.force_path_style {
            config.force_path_style = true;
        }
        if self.no_color {
            config.color = false;
        }
        config
    }
}
