//! Query configuration

use crate::{Error, MacAddr, Result};
use std::time::Duration;

/// Default time to wait for replies
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Default cap on collected replies
pub const DEFAULT_MAX_RESPONSES: usize = 5;

/// Input to a single discovery query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// How long to collect replies; the query never blocks past this bound
    pub timeout: Duration,
    /// Upper bound on the number of replies collected
    pub max_responses: usize,
    /// MAC address override, as text (`aa:bb:cc:dd:ee:ff`)
    pub client_mac: Option<String>,
    /// Hostname advertised in option 12
    pub hostname: Option<String>,
    /// Interface whose MAC (and, where supported, send path) is used
    pub interface_name: Option<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_responses: DEFAULT_MAX_RESPONSES,
            client_mac: None,
            hostname: None,
            interface_name: None,
        }
    }
}

impl QueryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_responses(mut self, max_responses: usize) -> Self {
        self.max_responses = max_responses;
        self
    }

    pub fn with_client_mac<S: Into<String>>(mut self, mac: S) -> Self {
        self.client_mac = Some(mac.into());
        self
    }

    pub fn with_hostname<S: Into<String>>(mut self, hostname: S) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_interface<S: Into<String>>(mut self, name: S) -> Self {
        self.interface_name = Some(name.into());
        self
    }

    /// Check the configuration and parse the MAC override
    ///
    /// # Returns
    /// The parsed MAC override, if one was given
    pub fn validate(&self) -> Result<Option<MacAddr>> {
        if self.max_responses == 0 {
            return Err(Error::invalid_parameter(
                "max_responses",
                "must be at least 1",
            ));
        }

        self.client_mac
            .as_deref()
            .map(str::parse::<MacAddr>)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_responses, 5);
        assert!(config.client_mac.is_none());
        assert!(config.hostname.is_none());
        assert!(config.interface_name.is_none());
    }

    #[test]
    fn test_builder() {
        let config = QueryConfig::new()
            .with_timeout(Duration::from_millis(1500))
            .with_max_responses(2)
            .with_client_mac("02:00:00:00:00:01")
            .with_hostname("scout")
            .with_interface("eth1");

        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.max_responses, 2);
        assert_eq!(config.client_mac.as_deref(), Some("02:00:00:00:00:01"));
        assert_eq!(config.hostname.as_deref(), Some("scout"));
        assert_eq!(config.interface_name.as_deref(), Some("eth1"));
    }

    #[test]
    fn test_validate_parses_mac() {
        let config = QueryConfig::new().with_client_mac("02:00:00:00:00:01");
        let mac = config.validate().unwrap();
        assert_eq!(mac, Some(MacAddr::new([2, 0, 0, 0, 0, 1])));

        assert_eq!(QueryConfig::new().validate().unwrap(), None);
    }

    #[test]
    fn test_validate_rejects_bad_mac() {
        let config = QueryConfig::new().with_client_mac("zz:zz:zz:zz:zz:zz");
        assert!(matches!(config.validate(), Err(Error::InvalidMac(_))));
    }

    #[test]
    fn test_validate_rejects_zero_responses() {
        let config = QueryConfig::new().with_max_responses(0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { .. })
        ));
    }
}
