//! grantprobe - check whether email addresses belong to AWS accounts.
//!
//! Each email is added as a `READ_ACP` grantee on a disposable S3 bucket.
//! S3 accepts the grant only when the email resolves to an account.
//!
//! # Usage
//!
//! ```text
//! grantprobe --bucket my-probe-bucket --email user@example.com
//! grantprobe --bucket my-probe-bucket --file emails.txt
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DEFAULT_REGION` | *(SDK chain)* | Region override |
//! | `AWS_ENDPOINT_URL` | *(unset)* | Custom S3/STS endpoint |
//! | `S3_FORCE_PATH_STYLE` | `false` | Path-style S3 addressing |
//! | `NO_COLOR` | *(unset)* | Disable colored output |
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use grantprobe_aws::AwsStorage;
use grantprobe_core::input::load_targets;
use grantprobe_core::report::{Palette, Reporter};
use grantprobe_core::{BucketName, ProbeConfig, Runner};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
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

async fn run<O, E>(cli: &Cli, config: &ProbeConfig, reporter: &mut Reporter<O, E>) -> Result<()>
where
    O: std::io::Write,
    E: std::io::Write,
{
    let targets = load_targets(&cli.source()?)?;

    let storage = AwsStorage::from_config(config).await;
    Runner::new(&storage, reporter)
        .run(BucketName::new(cli.bucket.clone()), &targets)
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.apply(ProbeConfig::from_env());

    if let Err(e) = init_tracing(&config.log_level) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    info!(bucket = %cli.bucket, region = ?config.region, version = VERSION, "starting grantprobe");

    let mut reporter = Reporter::stdio(Palette::for_color(config.color));
    match run(&cli, &config, &mut reporter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Stderr may be gone; the exit code still reports the failure.
            let _ = reporter.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
