//! Backend gateway layer - request/response channels to the directory and
//! catalog services.
//!
//! This module provides:
//! - Wire message types (JSON lines)
//! - The Gateway trait boundary used by the dispatcher
//! - SocketGateway implementation over Unix sockets

pub mod client;
pub mod messages;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use client::{GatewayClientConfig, SocketGateway};
pub use messages::{ContentItem, ErrorCode, GatewayError, GatewayRequest, GatewayResponse, GatewayResult};

/// Which backend service owns an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayKind {
    /// People directory service
    Directory,
    /// Publications catalog service
    Catalog,
}

impl std::fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayKind::Directory => write!(f, "directory"),
            GatewayKind::Catalog => write!(f, "catalog"),
        }
    }
}

/// A backend service boundary exposing named operations over a
/// request/response channel.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Invoke a named operation with JSON arguments.
    async fn call(&self, method: &str, params: Value) -> Result<GatewayResult>;

    /// Which backend this channel reaches.
    fn kind(&self) -> GatewayKind;
}

/// Connect both backend channels for a session. If the catalog connect
/// fails after the directory channel is open, the directory channel is shut
/// down before the error is returned, so a partial bootstrap never leaks a
/// live connection.
pub async fn connect_pair(
    directory: GatewayClientConfig,
    catalog: GatewayClientConfig,
) -> Result<(Arc<SocketGateway>, Arc<SocketGateway>)> {
    let directory_gw = Arc::new(SocketGateway::connect(GatewayKind::Directory, directory).await?);

    match SocketGateway::connect(GatewayKind::Catalog, catalog).await {
        Ok(catalog_gw) => Ok((directory_gw, Arc::new(catalog_gw))),
        Err(e) => {
            directory_gw.shutdown().await;
            Err(e)
        }
    }
}
