mod api;
mod scaffold;

use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span};

use crate::{
    api::state::HostState,
    scaffold::{quit_sig, security_headers::SecurityHeaders, tracing_output},
};

#[derive(Parser, Deserialize)]
struct Opts {
    #[clap(
        long = "bind",
        default_value = "127.0.0.1:5000",
        help = "api bind addr"
    )]
    bind: SocketAddr,

    #[clap(long = "remote-header", help = "remote header(eg. X-Forward-Ip)")]
    remote_header: Option<String>,

    #[clap(long = "log-dir", default_value = "logs", help = "log output dir")]
    log_dir: String,

    #[clap(
        long = "log-filter",
        default_value = "debug",
        help = "log global filter"
    )]
    log_filter: String,

    #[clap(long = "site-dir", help = "static site served for unmatched paths")]
    site_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Opts {
        bind,
        remote_header,
        log_dir,
        log_filter,
        site_dir,
    } = Opts::parse();

    let _tracing_file_guard =
        tracing_output::setup(&log_dir, &log_filter).context("setup tracing")?;

    let security = SecurityHeaders::new().context("prepare security headers")?;
    if let Some(site_dir) = site_dir.as_deref() {
        info!(site_dir = %site_dir.display(), "serve static site");
    }
    let router = api::router(HostState::new(remote_header), security, site_dir.as_deref());

    // bind tcp socket
    let tcp_listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("can't bind tcp socket at {}", bind))?;
    let tcp_bind = tcp_listener.local_addr().context("get tcp bound addr")?;
    info!("bound at {}", tcp_bind);

    // enter task loop
    info!("host start up");
    axum::serve(
        tcp_listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(quit_sig::wait().instrument(info_span!("wait-quit-sig")))
    .await
    .context("run http")?;

    info!("host shutdown");
    Ok(())
}
