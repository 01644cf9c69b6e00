//! Gateway client over a Unix stream socket.
//!
//! One long-lived connection per backend, opened at process start and closed
//! at process end. Calls are strictly sequential per connection: write one
//! request line, read one response line, with a bounded per-call timeout.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;

use crate::error::{RefdeskError, Result};
use crate::gateway::messages::{GatewayRequest, GatewayResponse, GatewayResult};
use crate::gateway::{Gateway, GatewayKind};

/// Configuration for a gateway connection.
#[derive(Debug, Clone)]
pub struct GatewayClientConfig {
    /// Path to the backend Unix socket.
    pub socket_path: PathBuf,
    /// Per-call timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl GatewayClientConfig {
    /// Create config with the given socket path and default timeout.
    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: path.into(),
            request_timeout_ms: 30000,
        }
    }
}

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

/// Gateway channel over a Unix socket.
pub struct SocketGateway {
    kind: GatewayKind,
    config: GatewayClientConfig,
    conn: Mutex<Option<Connection>>,
    next_id: AtomicU64,
}

impl SocketGateway {
    /// Connect to a backend socket.
    pub async fn connect(kind: GatewayKind, config: GatewayClientConfig) -> Result<Self> {
        let stream = UnixStream::connect(&config.socket_path).await.map_err(|e| {
            RefdeskError::Transport(format!(
                "Failed to connect to {} gateway at {}: {}",
                kind,
                config.socket_path.display(),
                e
            ))
        })?;

        let (reader, writer) = stream.into_split();

        Ok(Self {
            kind,
            config,
            conn: Mutex::new(Some(Connection {
                reader: BufReader::new(reader),
                writer,
            })),
            next_id: AtomicU64::new(1),
        })
    }

    /// Connect with a socket path and default timeout.
    pub async fn connect_to(kind: GatewayKind, path: impl AsRef<Path>) -> Result<Self> {
        Self::connect(kind, GatewayClientConfig::with_socket(path.as_ref())).await
    }

    /// Close the connection. Safe to call more than once.
    pub async fn shutdown(&self) {
        let mut guard = self.conn.lock().await;
        if let Some(mut conn) = guard.take() {
            let _ = conn.writer.shutdown().await;
            log::info!("{} gateway connection closed", self.kind);
        }
    }

    async fn exchange(&self, conn: &mut Connection, line: &str) -> Result<GatewayResponse> {
        conn.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| RefdeskError::Transport(format!("{} gateway write failed: {}", self.kind, e)))?;
        conn.writer
            .write_all(b"\n")
            .await
            .map_err(|e| RefdeskError::Transport(format!("{} gateway write failed: {}", self.kind, e)))?;
        conn.writer
            .flush()
            .await
            .map_err(|e| RefdeskError::Transport(format!("{} gateway flush failed: {}", self.kind, e)))?;

        let mut buf = String::new();
        loop {
            buf.clear();
            let n = conn
                .reader
                .read_line(&mut buf)
                .await
                .map_err(|e| RefdeskError::Transport(format!("{} gateway read failed: {}", self.kind, e)))?;

            if n == 0 {
                return Err(RefdeskError::Transport(format!(
                    "{} gateway closed the connection",
                    self.kind
                )));
            }

            let trimmed = buf.trim();
            if trimmed.is_empty() {
                continue;
            }

            return serde_json::from_str(trimmed).map_err(|e| {
                RefdeskError::Transport(format!("{} gateway sent invalid response: {}", self.kind, e))
            });
        }
    }
}

#[async_trait]
impl Gateway for SocketGateway {
    async fn call(&self, method: &str, params: Value) -> Result<GatewayResult> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = GatewayRequest::new(id, method, params);
        let line = serde_json::to_string(&request)?;

        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(|| {
            RefdeskError::Transport(format!("{} gateway not connected", self.kind))
        })?;

        let timeout = Duration::from_millis(self.config.request_timeout_ms);
        let response = tokio::time::timeout(timeout, self.exchange(conn, &line))
            .await
            .map_err(|_| {
                RefdeskError::Transport(format!(
                    "{} gateway call '{}' timed out after {}ms",
                    self.kind, method, self.config.request_timeout_ms
                ))
            })??;

        if response.id != id {
            return Err(RefdeskError::Transport(format!(
                "{} gateway response id mismatch: expected {}, got {}",
                self.kind, id, response.id
            )));
        }

        if let Some(error) = response.error {
            return Err(RefdeskError::Gateway {
                tool: method.to_string(),
                code: error.code,
                message: error.message,
            });
        }

        Ok(response.result.unwrap_or_default())
    }

    fn kind(&self) -> GatewayKind {
        self.kind
    }
}

impl std::fmt::Debug for SocketGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketGateway")
            .field("kind", &self.kind)
            .field("socket_path", &self.config.socket_path)
            .finish()
    }
}
