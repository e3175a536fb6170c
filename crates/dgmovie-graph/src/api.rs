//! Messages and unary stub for the `api.Dgraph` gRPC service.
//!
//! Only the fields dgmovie sends or reads are declared. Unknown fields in
//! server responses are skipped by prost.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

use crate::error::DgraphResult;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Request {
    #[prost(uint64, tag = "1")]
    pub start_ts: u64,
    #[prost(string, tag = "4")]
    pub query: String,
    #[prost(map = "string, string", tag = "5")]
    pub vars: HashMap<String, String>,
    #[prost(bool, tag = "6")]
    pub read_only: bool,
    #[prost(bool, tag = "7")]
    pub best_effort: bool,
    #[prost(message, repeated, tag = "12")]
    pub mutations: Vec<Mutation>,
    #[prost(bool, tag = "13")]
    pub commit_now: bool,
    /// Transaction hash from the previous response; checked against `start_ts`.
    #[prost(string, tag = "15")]
    pub hash: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Response {
    #[prost(bytes = "vec", tag = "1")]
    pub json: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub txn: Option<TxnContext>,
    #[prost(message, optional, tag = "3")]
    pub latency: Option<Latency>,
    /// Blank-node label to allocated uid.
    #[prost(map = "string, string", tag = "12")]
    pub uids: HashMap<String, String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Mutation {
    #[prost(bytes = "vec", tag = "1")]
    pub set_json: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub delete_json: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub set_nquads: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub del_nquads: Vec<u8>,
    #[prost(string, tag = "9")]
    pub cond: String,
    #[prost(bool, tag = "14")]
    pub commit_now: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Operation {
    #[prost(string, tag = "1")]
    pub schema: String,
    #[prost(string, tag = "2")]
    pub drop_attr: String,
    #[prost(bool, tag = "3")]
    pub drop_all: bool,
    #[prost(bool, tag = "6")]
    pub run_in_background: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Payload {
    #[prost(bytes = "vec", tag = "1")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TxnContext {
    #[prost(uint64, tag = "1")]
    pub start_ts: u64,
    #[prost(uint64, tag = "2")]
    pub commit_ts: u64,
    #[prost(bool, tag = "3")]
    pub aborted: bool,
    #[prost(string, repeated, tag = "4")]
    pub keys: Vec<String>,
    #[prost(string, repeated, tag = "5")]
    pub preds: Vec<String>,
    #[prost(string, tag = "6")]
    pub hash: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Latency {
    #[prost(uint64, tag = "1")]
    pub parsing_ns: u64,
    #[prost(uint64, tag = "2")]
    pub processing_ns: u64,
    #[prost(uint64, tag = "3")]
    pub encoding_ns: u64,
    #[prost(uint64, tag = "4")]
    pub assign_timestamp_ns: u64,
    #[prost(uint64, tag = "5")]
    pub total_ns: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Check {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Version {
    #[prost(string, tag = "1")]
    pub tag: String,
}

impl Mutation {
    /// A mutation that sets the JSON encoding of `value`.
    pub fn set_json<T: Serialize + ?Sized>(value: &T) -> DgraphResult<Self> {
        Ok(Self {
            set_json: serde_json::to_vec(value)?,
            ..Self::default()
        })
    }
}

impl Response {
    /// Deserialize the JSON payload.
    pub fn json_as<T: DeserializeOwned>(&self) -> DgraphResult<T> {
        Ok(serde_json::from_slice(&self.json)?)
    }
}

const QUERY_PATH: &str = "/api.Dgraph/Query";
const ALTER_PATH: &str = "/api.Dgraph/Alter";
const COMMIT_OR_ABORT_PATH: &str = "/api.Dgraph/CommitOrAbort";
const CHECK_VERSION_PATH: &str = "/api.Dgraph/CheckVersion";

/// Unary stub for the `api.Dgraph` service.
#[derive(Debug, Clone)]
pub struct DgraphRpc {
    inner: tonic::client::Grpc<Channel>,
}

impl DgraphRpc {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn query(&mut self, request: Request) -> Result<Response, tonic::Status> {
        self.unary(request, QUERY_PATH).await
    }

    pub async fn alter(&mut self, operation: Operation) -> Result<Payload, tonic::Status> {
        self.unary(operation, ALTER_PATH).await
    }

    pub async fn commit_or_abort(&mut self, context: TxnContext) -> Result<TxnContext, tonic::Status> {
        self.unary(context, COMMIT_OR_ABORT_PATH).await
    }

    pub async fn check_version(&mut self) -> Result<Version, tonic::Status> {
        self.unary(Check {}, CHECK_VERSION_PATH).await
    }

    async fn unary<Req, Resp>(&mut self, message: Req, path: &'static str) -> Result<Resp, tonic::Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {e}")))?;
        let codec = tonic_prost::ProstCodec::default();
        let response = self
            .inner
            .unary(tonic::Request::new(message), PathAndQuery::from_static(path), codec)
            .await?;
        Ok(response.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_mutation_set_json() {
        let mutation = Mutation::set_json(&serde_json::json!({ "name@en": "Drama" })).unwrap();
        assert_eq!(mutation.set_json, br#"{"name@en":"Drama"}"#.to_vec());
        assert!(!mutation.commit_now);
    }

    #[test]
    fn test_request_wire_fields() {
        let request = Request {
            query: "{ q(func: uid(0x1)) { uid } }".to_string(),
            vars: HashMap::from([("$id".to_string(), "0x1".to_string())]),
            read_only: true,
            ..Request::default()
        };
        let decoded = Request::decode(request.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.vars.get("$id").map(String::as_str), Some("0x1"));
        assert!(decoded.read_only);
        assert!(decoded.mutations.is_empty());
    }

    #[test]
    fn test_request_keeps_hash() {
        let request = Request {
            start_ts: 7,
            hash: "h".to_string(),
            ..Request::default()
        };
        let bytes = request.encode_to_vec();
        assert_eq!(bytes, vec![8, 7, 122, 1, b'h']);
        let decoded = Request::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded.hash, "h");
        assert_eq!(decoded.encode_to_vec(), bytes);
    }

    #[test]
    fn test_response_uids_and_json() {
        let response = Response {
            json: br#"{"me":[]}"#.to_vec(),
            uids: HashMap::from([("movie".to_string(), "0x2711".to_string())]),
            txn: Some(TxnContext {
                start_ts: 12,
                ..TxnContext::default()
            }),
            ..Response::default()
        };
        let decoded = Response::decode(response.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.uids["movie"], "0x2711");
        assert_eq!(decoded.txn.as_ref().map(|t| t.start_ts), Some(12));
        let root: serde_json::Value = decoded.json_as().unwrap();
        assert_eq!(root, serde_json::json!({ "me": [] }));
    }
}
