use clap::Parser;
use tracing::{error, info};
use warden_probe::{run_target, ProbeConfig, DEFAULT_BASE_URL, REPORT_FILE};

#[derive(Parser)]
#[command(name = "warden", about = "OWASP Top 10 security smoke tests for an HTTP service")]
struct Cli {
    /// Base URL of the service under test
    #[arg(env = "WARDEN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Bearer token sent with requests
    #[arg(env = "WARDEN_TOKEN")]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ProbeConfig::new(cli.base_url);
    if let Some(token) = cli.token {
        config = config.with_token(token);
    }

    // A client that can't be built is logged and leaves an empty report
    let report = run_target(config).await;

    println!("{}", report);

    // Findings and a failed save are both reported, never turned into an exit code
    if let Err(e) = report.write_to(REPORT_FILE) {
        error!("{}", e);
    }

    info!(
        "{}/{} checks passed ({:.1}%)",
        report.passed(),
        report.total(),
        report.pass_rate()
    );

    Ok(())
}
