//! Dgraph transactions.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::api::{Mutation, Request, Response, TxnContext};
use crate::client::DgraphClient;
use crate::error::{DgraphError, DgraphResult};

/// A single Dgraph transaction.
///
/// Queries and mutations share the start timestamp handed out by the first
/// response. A transaction is finished after `commit`, `discard`, a
/// `commit_now` mutation, or a failed mutation.
#[derive(Debug)]
pub struct Txn {
    client: DgraphClient,
    context: TxnContext,
    read_only: bool,
    best_effort: bool,
    mutated: bool,
    finished: bool,
}

impl Txn {
    pub(crate) fn new(client: DgraphClient, read_only: bool) -> Self {
        Self {
            client,
            context: TxnContext::default(),
            read_only,
            best_effort: false,
            mutated: false,
            finished: false,
        }
    }

    /// Allow a read-only transaction to read possibly stale data.
    pub fn best_effort(mut self) -> DgraphResult<Self> {
        if !self.read_only {
            return Err(DgraphError::ReadOnly("be best-effort unless read-only"));
        }
        self.best_effort = true;
        Ok(self)
    }

    pub fn start_ts(&self) -> u64 {
        self.context.start_ts
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run a query without variables.
    pub async fn query(&mut self, query: &str) -> DgraphResult<Response> {
        self.query_with_vars(query, HashMap::new()).await
    }

    /// Run a query with `$name` → value bindings.
    pub async fn query_with_vars(
        &mut self,
        query: &str,
        vars: HashMap<String, String>,
    ) -> DgraphResult<Response> {
        self.ensure_open()?;
        let request = Request {
            query: query.to_string(),
            vars,
            read_only: self.read_only,
            best_effort: self.best_effort,
            ..self.base_request()
        };
        self.do_request(request).await
    }

    /// Run one mutation. A `commit_now` mutation finishes the transaction.
    pub async fn mutate(&mut self, mutation: Mutation) -> DgraphResult<Response> {
        self.ensure_open()?;
        if self.read_only {
            return Err(DgraphError::ReadOnly("mutate"));
        }
        let request = Request {
            commit_now: mutation.commit_now,
            mutations: vec![mutation],
            ..self.base_request()
        };
        self.mutated = true;
        self.do_request(request).await
    }

    /// Commit the transaction.
    pub async fn commit(&mut self) -> DgraphResult<()> {
        self.ensure_open()?;
        if self.read_only {
            return Err(DgraphError::ReadOnly("commit"));
        }
        self.finished = true;
        if !self.mutated {
            return Ok(());
        }

        let response = self.client.rpc()?.commit_or_abort(self.context.clone()).await?;
        if response.aborted {
            return Err(DgraphError::Aborted);
        }
        debug!(start_ts = self.context.start_ts, commit_ts = response.commit_ts, "Transaction committed");
        Ok(())
    }

    /// Abort the transaction. A no-op once finished or if nothing was written.
    pub async fn discard(&mut self) -> DgraphResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if !self.mutated {
            return Ok(());
        }

        let context = TxnContext {
            aborted: true,
            ..self.context.clone()
        };
        self.client.rpc()?.commit_or_abort(context).await?;
        debug!(start_ts = self.context.start_ts, "Transaction discarded");
        Ok(())
    }

    /// Request carrying the transaction's start timestamp and hash.
    fn base_request(&self) -> Request {
        Request {
            start_ts: self.context.start_ts,
            hash: self.context.hash.clone(),
            ..Request::default()
        }
    }

    fn ensure_open(&self) -> DgraphResult<()> {
        if self.finished {
            Err(DgraphError::Finished)
        } else {
            Ok(())
        }
    }

    async fn do_request(&mut self, request: Request) -> DgraphResult<Response> {
        let commit_now = request.commit_now;
        let has_mutations = !request.mutations.is_empty();

        let response = match self.client.rpc()?.query(request).await {
            Ok(response) => response,
            Err(status) => {
                if has_mutations {
                    if let Err(e) = self.discard().await {
                        warn!(error = %e, "Failed to discard transaction after error");
                    }
                }
                return Err(status.into());
            }
        };

        if commit_now {
            self.finished = true;
        }
        if let Some(context) = &response.txn {
            self.merge_context(context)?;
        }
        Ok(response)
    }

    fn merge_context(&mut self, src: &TxnContext) -> DgraphResult<()> {
        if self.context.start_ts == 0 {
            self.context.start_ts = src.start_ts;
        } else if src.start_ts != 0 && src.start_ts != self.context.start_ts {
            return Err(DgraphError::StartTsMismatch {
                expected: self.context.start_ts,
                actual: src.start_ts,
            });
        }
        self.context.hash = src.hash.clone();
        merge_unique(&mut self.context.keys, &src.keys);
        merge_unique(&mut self.context.preds, &src.preds);
        Ok(())
    }
}

fn merge_unique(into: &mut Vec<String>, from: &[String]) {
    for item in from {
        if !into.contains(item) {
            into.push(item.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DgraphConfig;
    use crate::release::ReleaseGuard;

    fn lazy_client() -> (DgraphClient, ReleaseGuard) {
        DgraphClient::connect_lazy(&DgraphConfig::new("localhost:9080")).unwrap()
    }

    #[tokio::test]
    async fn test_read_only_rejects_writes() {
        let (client, _guard) = lazy_client();
        let mut txn = client.new_read_only_txn();
        assert!(matches!(
            txn.mutate(Mutation::default()).await,
            Err(DgraphError::ReadOnly("mutate"))
        ));
        assert!(matches!(txn.commit().await, Err(DgraphError::ReadOnly("commit"))));
        assert!(!txn.is_finished());
    }

    #[tokio::test]
    async fn test_best_effort_needs_read_only() {
        let (client, _guard) = lazy_client();
        assert!(client.new_txn().best_effort().is_err());
        assert!(client.new_read_only_txn().best_effort().is_ok());
    }

    #[tokio::test]
    async fn test_finished_txn_rejects_calls() {
        let (client, _guard) = lazy_client();
        let mut txn = client.new_txn();
        // Nothing written, so neither call touches the network.
        txn.discard().await.unwrap();
        assert!(txn.is_finished());
        assert!(matches!(txn.query("{ q(func: uid(0x1)) { uid } }").await, Err(DgraphError::Finished)));
        assert!(matches!(txn.mutate(Mutation::default()).await, Err(DgraphError::Finished)));
        assert!(matches!(txn.commit().await, Err(DgraphError::Finished)));
        txn.discard().await.unwrap();
    }

    #[tokio::test]
    async fn test_commit_without_writes_is_local() {
        let (client, _guard) = lazy_client();
        let mut txn = client.new_txn();
        txn.commit().await.unwrap();
        assert!(txn.is_finished());
    }

    #[tokio::test]
    async fn test_merge_context() {
        let (client, _guard) = lazy_client();
        let mut txn = client.new_txn();
        txn.merge_context(&TxnContext {
            start_ts: 7,
            keys: vec!["a".to_string()],
            preds: vec!["1-name".to_string()],
            ..TxnContext::default()
        })
        .unwrap();
        txn.merge_context(&TxnContext {
            start_ts: 7,
            keys: vec!["a".to_string(), "b".to_string()],
            ..TxnContext::default()
        })
        .unwrap();
        assert_eq!(txn.start_ts(), 7);
        assert_eq!(txn.context.keys, vec!["a", "b"]);
        assert_eq!(txn.context.preds, vec!["1-name"]);

        let mismatch = txn.merge_context(&TxnContext {
            start_ts: 9,
            ..TxnContext::default()
        });
        assert!(matches!(mismatch, Err(DgraphError::StartTsMismatch { expected: 7, actual: 9 })));
    }

    #[tokio::test]
    async fn test_follow_up_request_carries_hash() {
        let (client, _guard) = lazy_client();
        let mut txn = client.new_txn();
        assert!(txn.base_request().hash.is_empty());

        txn.merge_context(&TxnContext {
            start_ts: 7,
            hash: "3f2a".to_string(),
            ..TxnContext::default()
        })
        .unwrap();

        let request = txn.base_request();
        assert_eq!(request.start_ts, 7);
        assert_eq!(request.hash, "3f2a");
    }
}
