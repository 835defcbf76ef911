//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use message_relayer::config::{Cli, ConfigResolver};
use message_relayer::lifecycle::{Collaborators, EngineError, RelayEngine, ServiceConfig};
use message_relayer::reporting::{ReportingError, ReportingSink};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

/// Anvil's first dev account.
pub const DEV_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Anvil's dev mnemonic and its account at index 1.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";
pub const DEV_ADDRESS_INDEX_1: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

pub const ADDRESS_MANAGER: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Build a resolver from command-line arguments and an explicit environment.
pub fn resolver(args: &[&str], env: &[(&str, &str)]) -> ConfigResolver {
    let argv = std::iter::once("message-relayer").chain(args.iter().copied());
    let (_, layer) = Cli::try_parse_with_options_from(argv).unwrap();
    ConfigResolver::new(layer, env.iter().copied().collect())
}

/// Minimal environment that passes validation and identity derivation.
pub fn base_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("L1_NODE_WEB3_URL", "http://localhost:9545"),
        ("L2_NODE_WEB3_URL", "http://localhost:8545"),
        ("ADDRESS_MANAGER_ADDRESS", ADDRESS_MANAGER),
        ("L1_WALLET_KEY", DEV_PRIVATE_KEY),
    ]
}

/// Everything a fake sink saw.
#[derive(Debug, Default)]
pub struct SinkLog {
    pub opened: Vec<String>,
    pub credentials: Option<(String, String)>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug)]
pub struct FakeSink {
    log: Arc<Mutex<SinkLog>>,
    fail_init: bool,
}

#[async_trait]
impl ReportingSink for FakeSink {
    async fn init(&mut self, client_email: &str, private_key: &str) -> Result<(), ReportingError> {
        self.log.lock().unwrap().credentials = Some((client_email.to_string(), private_key.to_string()));
        if self.fail_init {
            return Err(ReportingError::Api {
                status: 403,
                body: "The caller does not have permission".into(),
            });
        }
        Ok(())
    }

    async fn append_row(&self, row: &[String]) -> Result<(), ReportingError> {
        self.log.lock().unwrap().rows.push(row.to_vec());
        Ok(())
    }
}

pub struct FakeEngine {
    starts: Arc<AtomicU32>,
    error: Option<String>,
}

#[async_trait]
impl RelayEngine for FakeEngine {
    async fn start(&mut self) -> Result<(), EngineError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        match self.error.take() {
            Some(message) => Err(message.into()),
            None => Ok(()),
        }
    }
}

/// Collaborators that record what the bootstrap handed them.
#[derive(Default)]
pub struct FakeCollaborators {
    pub sink_log: Arc<Mutex<SinkLog>>,
    pub engines_built: AtomicU32,
    pub starts: Arc<AtomicU32>,
    pub launched: Mutex<Option<ServiceConfig>>,
    pub fail_sink_init: bool,
    pub engine_error: Option<String>,
}

impl FakeCollaborators {
    pub fn engine_starts(&self) -> u32 {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn sinks_opened(&self) -> usize {
        self.sink_log.lock().unwrap().opened.len()
    }
}

impl Collaborators for FakeCollaborators {
    type Sink = FakeSink;
    type Engine = FakeEngine;

    fn open_sink(&self, sheet_id: &str) -> FakeSink {
        self.sink_log.lock().unwrap().opened.push(sheet_id.to_string());
        FakeSink {
            log: self.sink_log.clone(),
            fail_init: self.fail_sink_init,
        }
    }

    fn build_engine(&self, config: ServiceConfig) -> FakeEngine {
        self.engines_built.fetch_add(1, Ordering::SeqCst);
        *self.launched.lock().unwrap() = Some(config);
        FakeEngine {
            starts: self.starts.clone(),
            error: self.engine_error.clone(),
        }
    }
}

/// Start a mock JSON-RPC node that answers `eth_chainId`, `eth_getBalance`
/// and `eth_blockNumber`.
pub async fn start_mock_rpc(chain_id: u64) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(serve_rpc(socket, chain_id));
        }
    });

    format!("http://{}", addr).parse().unwrap()
}

async fn serve_rpc(mut socket: TcpStream, chain_id: u64) {
    let Some(body) = read_request_body(&mut socket).await else {
        return;
    };

    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let id = request["id"].clone();
    let reply = match request["method"].as_str() {
        Some("eth_chainId") => json!({ "jsonrpc": "2.0", "id": id, "result": format!("0x{:x}", chain_id) }),
        Some("eth_getBalance") => json!({ "jsonrpc": "2.0", "id": id, "result": "0x0" }),
        Some("eth_blockNumber") => json!({ "jsonrpc": "2.0", "id": id, "result": "0x10" }),
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": "method not found" }
        }),
    };

    let payload = reply.to_string();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        payload.len(),
        payload
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let start = end + 4;
            if buf.len() >= start + len {
                return Some(buf[start..start + len].to_vec());
            }
        }
    }
}
