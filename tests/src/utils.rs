use std::net::Ipv4Addr;

use apiscan_common::ProbeError;
use apiscan_common::network::target::ProbeTarget;
use apiscan_core::Transport;
use async_trait::async_trait;

/// Refuses every connection.
pub struct RefusingTransport;

#[async_trait]
impl Transport for RefusingTransport {
    async fn get(&self, target: &ProbeTarget) -> Result<u16, ProbeError> {
        tokio::task::yield_now().await;
        Err(ProbeError::transport(target.locator(), "connect: connection refused"))
    }
}

/// Answers 200 for exactly one address and path, refuses everything else.
pub struct SingleApiTransport {
    pub address: Ipv4Addr,
    pub path: &'static str,
}

#[async_trait]
impl Transport for SingleApiTransport {
    async fn get(&self, target: &ProbeTarget) -> Result<u16, ProbeError> {
        if target.address == self.address && target.path.as_str() == self.path {
            Ok(200)
        } else {
            Err(ProbeError::transport(target.locator(), "connect: connection refused"))
        }
    }
}

/// Panics on one path and answers 404 on the rest.
pub struct PanickingTransport {
    pub path: &'static str,
}

#[async_trait]
impl Transport for PanickingTransport {
    async fn get(&self, target: &ProbeTarget) -> Result<u16, ProbeError> {
        if target.path.as_str() == self.path {
            panic!("handler for {} blew up", self.path);
        }
        Ok(404)
    }
}
