use dhcpscout_cli::{output, Cli, Commands};
use dhcpscout_core::Result;
use dhcpscout_discovery::query_async;
use dhcpscout_iface::{resolve_mac_detailed, HostInfo, SystemHost};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.log_level());

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_privilege_error() {
                eprintln!("{}", output::PRIVILEGE_HINT);
            }
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the `-v` count
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    match cli.command() {
        Commands::Discover => {
            let config = cli.query_config(&SystemHost);
            debug!(?config, "Starting discovery");

            let timeout = config.timeout;
            let servers = query_async(config).await?;
            print!("{}", output::format_servers(&servers, timeout));
        }
        Commands::Interfaces => {
            for iface in SystemHost.interfaces() {
                println!("{}", output::format_interface(&iface));
            }
        }
        Commands::Mac => {
            let resolved = resolve_mac_detailed(&SystemHost, cli.interface.as_deref())?;
            println!("{}", output::format_resolved(&resolved));
        }
    }
    Ok(())
}
