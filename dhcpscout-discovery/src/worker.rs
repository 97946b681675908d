//! Running queries off the async runtime
//!
//! A query blocks for up to its timeout, so async callers hand it to
//! tokio's blocking pool and await the result.

use crate::discover::Discoverer;
use crate::transport::Transport;
use dhcpscout_core::{Error, QueryConfig, Result, ServerInfo};
use dhcpscout_iface::HostInfo;
use std::sync::Arc;
use tracing::debug;

impl<H, T> Discoverer<H, T>
where
    H: HostInfo + Send + Sync + 'static,
    T: Transport + Send + Sync + 'static,
{
    /// Run [`Discoverer::query`] on a blocking worker thread
    ///
    /// # Errors
    /// Whatever the query returns, or `ExecutionFailed` if the worker
    /// panicked or was cancelled.
    pub async fn query_on_worker(self: Arc<Self>, config: QueryConfig) -> Result<Vec<ServerInfo>> {
        debug!("Dispatching discovery query to blocking worker");
        tokio::task::spawn_blocking(move || self.query(&config))
            .await
            .map_err(|e| Error::ExecutionFailed(format!("Discovery worker failed: {}", e)))?
    }
}

/// Run one query on the real system without blocking the runtime
pub async fn query_async(config: QueryConfig) -> Result<Vec<ServerInfo>> {
    Arc::new(Discoverer::system()).query_on_worker(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::tests::{ReplyBuilder, ScriptedTransport};
    use crate::transport::RawReply;
    use dhcpscout_core::MacAddr;
    use dhcpscout_iface::{LinkInterface, StaticHost};
    use std::net::Ipv4Addr;

    fn host() -> StaticHost {
        StaticHost::new(vec![LinkInterface::new(
            "eth0",
            Some(MacAddr::new([0x02, 0, 0, 0, 0, 0x07])),
        )])
    }

    #[tokio::test]
    async fn test_query_on_worker() {
        let transport = ScriptedTransport::new(|xid| {
            Ok(vec![RawReply::new(
                ReplyBuilder::new(xid, [10, 1, 0, 100])
                    .option(53, &[5])
                    .option(54, &[10, 1, 0, 1])
                    .build(),
                Ipv4Addr::new(10, 1, 0, 1),
            )])
        });
        let discoverer = Arc::new(Discoverer::new(host(), transport));

        let servers = discoverer
            .clone()
            .query_on_worker(QueryConfig::new())
            .await
            .unwrap();

        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].id, "10.1.0.1");
        assert_eq!(servers[0].offered_address, "10.1.0.100");
        assert_eq!(discoverer.transport().send_count(), 1);
    }

    #[tokio::test]
    async fn test_query_on_worker_error() {
        let transport = ScriptedTransport::new(|_| Ok(Vec::new()));
        let discoverer = Arc::new(Discoverer::new(host(), transport));

        let result = discoverer
            .query_on_worker(QueryConfig::new().with_client_mac("01:02:03"))
            .await;
        assert!(matches!(result, Err(Error::InvalidMac(_))));
    }

    #[tokio::test]
    async fn test_worker_panic_is_execution_failure() {
        let transport = ScriptedTransport::new(|_| -> Result<Vec<RawReply>> {
            panic!("transport exploded")
        });
        let discoverer = Arc::new(Discoverer::new(host(), transport));

        match discoverer.query_on_worker(QueryConfig::new()).await {
            Err(Error::ExecutionFailed(msg)) => assert!(msg.contains("Discovery worker failed")),
            other => panic!("Expected ExecutionFailed, got {:?}", other),
        }
    }
}
