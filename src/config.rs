use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPSTREAM_URL: &str = "https://api.esv.org/v3/passage/text/";

/// Resolved runtime configuration. Immutable after startup; the credential is
/// the only process-wide secret and is passed explicitly into the upstream
/// client rather than read from ambient state.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub credential: String,
    pub bind_address: SocketAddr,
    pub upstream_url: String,
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            api_key,
            port,
            bind,
            upstream_url,
        } = args;

        let credential = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .context("Missing ESV_API_KEY env var")?;

        let host = bind.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let bind_address = SocketAddr::new(host, port.unwrap_or(DEFAULT_PORT));

        let upstream_url =
            upstream_url.unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        anyhow::ensure!(
            upstream_url.starts_with("http://") || upstream_url.starts_with("https://"),
            "upstream URL {upstream_url:?} is not an http(s) endpoint"
        );

        Ok(Self {
            credential,
            bind_address,
            upstream_url,
        })
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "esv-relay", about = "ESV passage relay server", version)]
pub struct CliArgs {
    #[arg(
        long,
        env = "ESV_API_KEY",
        value_name = "KEY",
        hide_env_values = true,
        help = "Credential injected into upstream requests (required)"
    )]
    pub api_key: Option<String>,

    #[arg(
        long,
        env = "PORT",
        value_name = "PORT",
        help = "TCP port to listen on"
    )]
    pub port: Option<u16>,

    #[arg(
        long,
        env = "ESV_RELAY_BIND",
        value_name = "ADDR",
        help = "Address to bind the listener to"
    )]
    pub bind: Option<IpAddr>,

    #[arg(
        long,
        env = "ESV_API_URL",
        value_name = "URL",
        help = "Upstream passage-text endpoint"
    )]
    pub upstream_url: Option<String>,
}
