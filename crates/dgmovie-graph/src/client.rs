//! Dgraph connection client.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Deserialize;
use tonic::transport::Endpoint;
use tracing::{debug, info};

use crate::api::{DgraphRpc, Operation, Payload, Version};
use crate::error::{DgraphError, DgraphResult};
use crate::release::ReleaseGuard;
use crate::txn::Txn;

/// Configuration for connecting to a Dgraph alpha.
#[derive(Debug, Clone, Deserialize)]
pub struct DgraphConfig {
    /// gRPC endpoint, e.g. `http://localhost:9080`. Empty means not configured.
    pub addr: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for DgraphConfig {
    fn default() -> Self {
        Self {
            addr: String::new(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl DgraphConfig {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ..Self::default()
        }
    }
}

/// Normalize a configured address into a gRPC URI.
///
/// Bare `host:port` addresses get an `http://` scheme. An empty address is
/// rejected.
pub fn normalize_addr(addr: &str) -> DgraphResult<String> {
    let addr = addr.trim();
    if addr.is_empty() {
        return Err(DgraphError::invalid_endpoint(
            addr,
            "no address configured (set --addr or DGRAPH_ADDR)",
        ));
    }
    if addr.contains("://") {
        Ok(addr.to_string())
    } else {
        Ok(format!("http://{addr}"))
    }
}

fn endpoint(config: &DgraphConfig) -> DgraphResult<Endpoint> {
    let uri = normalize_addr(&config.addr)?;
    let endpoint = Endpoint::from_shared(uri.clone())
        .map_err(|e| DgraphError::invalid_endpoint(uri, e.to_string()))?;
    Ok(endpoint
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs)))
}

/// Client for Dgraph operations.
///
/// Clones share one channel. Once the connection's [`ReleaseGuard`] has run,
/// every clone fails with [`DgraphError::Closed`].
#[derive(Debug, Clone)]
pub struct DgraphClient {
    rpc: Arc<Mutex<Option<DgraphRpc>>>,
    addr: String,
}

impl DgraphClient {
    /// Connect to Dgraph and return the client with its release guard.
    ///
    /// The channel is dialled eagerly and a version check is issued, so an
    /// unreachable server fails here rather than on the first mutation.
    pub async fn connect(config: &DgraphConfig) -> DgraphResult<(Self, ReleaseGuard)> {
        let endpoint = endpoint(config)?;
        let addr = endpoint.uri().to_string();
        info!(addr = %addr, "Connecting to Dgraph");

        let channel = endpoint
            .connect()
            .await
            .map_err(|source| DgraphError::Connection {
                addr: addr.clone(),
                source,
            })?;

        let client = Self::from_rpc(DgraphRpc::new(channel), addr);
        let guard = client.release_guard();

        let version = client.check_version().await?;
        info!(addr = %client.addr, version = %version.tag, "Connected to Dgraph");

        Ok((client, guard))
    }

    /// Build a client over a channel that dials on first use.
    pub fn connect_lazy(config: &DgraphConfig) -> DgraphResult<(Self, ReleaseGuard)> {
        let endpoint = endpoint(config)?;
        let addr = endpoint.uri().to_string();
        let client = Self::from_rpc(DgraphRpc::new(endpoint.connect_lazy()), addr);
        let guard = client.release_guard();
        Ok((client, guard))
    }

    fn from_rpc(rpc: DgraphRpc, addr: String) -> Self {
        Self {
            rpc: Arc::new(Mutex::new(Some(rpc))),
            addr,
        }
    }

    fn release_guard(&self) -> ReleaseGuard {
        let slot = Arc::clone(&self.rpc);
        let addr = self.addr.clone();
        ReleaseGuard::new(move || {
            let rpc = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            match rpc {
                Some(_) => {
                    debug!(addr = %addr, "Dgraph channel closed");
                    Ok(())
                }
                None => Err(DgraphError::Closed),
            }
        })
    }

    /// A handle on the channel for one call.
    pub(crate) fn rpc(&self) -> DgraphResult<DgraphRpc> {
        self.rpc
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(DgraphError::Closed)
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn is_closed(&self) -> bool {
        self.rpc.lock().unwrap_or_else(PoisonError::into_inner).is_none()
    }

    /// Ask the server for its version.
    pub async fn check_version(&self) -> DgraphResult<Version> {
        Ok(self.rpc()?.check_version().await?)
    }

    /// Run a schema or drop operation.
    pub async fn alter(&self, operation: Operation) -> DgraphResult<Payload> {
        Ok(self.rpc()?.alter(operation).await?)
    }

    /// Apply a schema definition.
    pub async fn set_schema(&self, schema: &str) -> DgraphResult<()> {
        self.alter(Operation {
            schema: schema.to_string(),
            ..Operation::default()
        })
        .await?;
        Ok(())
    }

    /// Drop all data and schema.
    pub async fn drop_all(&self) -> DgraphResult<()> {
        info!(addr = %self.addr, "Dropping all Dgraph data");
        self.alter(Operation {
            drop_all: true,
            ..Operation::default()
        })
        .await?;
        Ok(())
    }

    /// Start a read-write transaction.
    pub fn new_txn(&self) -> Txn {
        Txn::new(self.clone(), false)
    }

    /// Start a read-only transaction.
    pub fn new_read_only_txn(&self) -> Txn {
        Txn::new(self.clone(), true)
    }
}
