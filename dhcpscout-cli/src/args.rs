//! CLI argument parsing

use clap::{Parser, Subcommand};
use dhcpscout_core::{QueryConfig, DEFAULT_MAX_RESPONSES};
use dhcpscout_iface::{default_hostname, HostInfo};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "dhcpscout")]
#[command(version, about = "Discover DHCP servers on the local network", long_about = None)]
pub struct Cli {
    /// Network interface to send on and take the MAC from
    #[arg(short = 'I', long, global = true)]
    pub interface: Option<String>,

    /// How long to wait for replies, in seconds (fractions allowed)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        default_value = "3",
        value_parser = parse_timeout,
        global = true
    )]
    pub timeout: Duration,

    /// Stop after this many replies
    #[arg(
        short = 'n',
        long,
        value_name = "COUNT",
        default_value_t = DEFAULT_MAX_RESPONSES,
        global = true
    )]
    pub max_responses: usize,

    /// Client MAC address to put in the request (aa:bb:cc:dd:ee:ff)
    #[arg(short = 'm', long, value_name = "MAC", global = true)]
    pub mac: Option<String>,

    /// Hostname to advertise (defaults to this machine's name)
    #[arg(short = 'H', long, value_name = "NAME", global = true, conflicts_with = "no_hostname")]
    pub hostname: Option<String>,

    /// Do not advertise a hostname
    #[arg(long, global = true)]
    pub no_hostname: bool,

    /// Verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Broadcast a DHCPDISCOVER and list the servers that answer (default)
    Discover,

    /// List local network interfaces
    Interfaces,

    /// Show the client MAC address a query would use
    Mac,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Subcommand to run; `discover` when none is given
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Discover)
    }

    /// Default log filter for the `-v` count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Build the query the flags describe
    ///
    /// Without `--hostname` or `--no-hostname` the host's own name is
    /// advertised.
    pub fn query_config<H: HostInfo>(&self, host: &H) -> QueryConfig {
        let hostname = if self.no_hostname {
            None
        } else {
            self.hostname.clone().or_else(|| default_hostname(host))
        };

        QueryConfig {
            timeout: self.timeout,
            max_responses: self.max_responses,
            client_mac: self.mac.clone(),
            hostname,
            interface_name: self.interface.clone(),
        }
    }
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;

    Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("'{}' is not a non-negative, finite number of seconds", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhcpscout_core::DEFAULT_TIMEOUT;
    use dhcpscout_iface::StaticHost;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dhcpscout").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.command(), Commands::Discover);
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT);
        assert_eq!(cli.max_responses, DEFAULT_MAX_RESPONSES);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(parse(&["discover"]).command(), Commands::Discover);
        assert_eq!(parse(&["interfaces"]).command(), Commands::Interfaces);
        assert_eq!(parse(&["mac", "-I", "wlan0"]).command(), Commands::Mac);
        assert_eq!(parse(&["mac", "-I", "wlan0"]).interface.as_deref(), Some("wlan0"));
    }

    #[test]
    fn test_query_flags() {
        let cli = parse(&[
            "-I", "eth1", "-t", "1.5", "-n", "2", "-m", "02:00:00:00:00:01", "-H", "scout",
        ]);
        let config = cli.query_config(&StaticHost::default());

        assert_eq!(config.interface_name.as_deref(), Some("eth1"));
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.max_responses, 2);
        assert_eq!(config.client_mac.as_deref(), Some("02:00:00:00:00:01"));
        assert_eq!(config.hostname.as_deref(), Some("scout"));
    }

    #[test]
    fn test_hostname_defaults_to_host() {
        let host = StaticHost::default().with_hostname("lab-pc.example.net");

        let config = parse(&[]).query_config(&host);
        assert_eq!(config.hostname.as_deref(), Some("lab-pc"));

        let config = parse(&["--no-hostname"]).query_config(&host);
        assert_eq!(config.hostname, None);

        let config = parse(&["--hostname", "other"]).query_config(&host);
        assert_eq!(config.hostname.as_deref(), Some("other"));
    }

    #[test]
    fn test_hostname_flags_conflict() {
        let result = Cli::try_parse_from(["dhcpscout", "-H", "scout", "--no-hostname"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(parse_timeout("0"), Ok(Duration::ZERO));
        assert_eq!(parse_timeout("0.25"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_timeout(" 10 "), Ok(Duration::from_secs(10)));
        assert!(parse_timeout("-1").is_err());
        assert!(parse_timeout("NaN").is_err());
        assert!(parse_timeout("inf").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["-v"]).log_level(), "info");
        assert_eq!(parse(&["-vv"]).log_level(), "debug");
        assert_eq!(parse(&["-vvvv", "interfaces"]).log_level(), "trace");
    }
}
