use std::net::{IpAddr, SocketAddr};

use anyhow::{Result, anyhow};
use axum::{
    extract::ConnectInfo,
    http::{Extensions, HeaderMap},
};
use tracing::{debug, instrument};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RemoteAddr {
    pub ip: IpAddr,
    pub port: Option<u16>,
}

impl RemoteAddr {
    /// Prefer the configured forwarding header, fall back to the socket peer.
    /// The result is cached in `extensions`.
    #[instrument("parse-remote", skip_all)]
    pub fn parse(
        extensions: &mut Extensions,
        headers: &HeaderMap,
        header_name: Option<&str>,
    ) -> Result<Self> {
        if let Some(cached) = extensions.get::<RemoteAddr>() {
            return Ok(*cached);
        }

        let parsed = match header_name.and_then(|name| headers.get(name).map(|v| (name, v))) {
            Some((name, value)) => {
                let text = value
                    .to_str()
                    .map_err(|_| anyhow!("non-ascii remote header {}: {:?}", name, value))?;
                Self::from_text(text)
                    .ok_or_else(|| anyhow!("can't extract addr from header value: {:?}", text))?
            }
            None => match extensions.get::<ConnectInfo<SocketAddr>>() {
                Some(ConnectInfo(addr)) => {
                    debug!(%addr, "remote connect info found");
                    Self {
                        ip: addr.ip(),
                        port: Some(addr.port()),
                    }
                }
                None => return Err(anyhow!("no remote header or connect info can be used")),
            },
        };

        extensions.insert(parsed);
        Ok(parsed)
    }

    fn from_text(text: &str) -> Option<Self> {
        if let Ok(addr) = text.parse::<SocketAddr>() {
            return Some(Self {
                ip: addr.ip(),
                port: Some(addr.port()),
            });
        }
        text.parse::<IpAddr>().ok().map(|ip| Self { ip, port: None })
    }
}
