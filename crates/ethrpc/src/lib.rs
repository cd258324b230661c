//! Construction of JSON-RPC providers. Every managed account gets its own
//! provider because the outbound connection may be routed through an
//! account-specific HTTP or SOCKS proxy and because the account's signer
//! is registered on the provider as the transaction wallet.

use {
    alloy::{
        network::EthereumWallet,
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
        signers::local::PrivateKeySigner,
        transports::http::Http,
    },
    anyhow::{Context, Result},
    std::time::Duration,
    url::Url,
};

pub type AlloyProvider = DynProvider;

/// Timeout for a single HTTP request. Confirmation waits span many
/// requests and are bounded separately by the caller.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a provider for read-only queries that are not tied to any
/// account, like fetching the chain id at startup.
pub fn unsigned_provider(node: &Url) -> Result<AlloyProvider> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to create HTTP client")?;
    let transport = Http::with_client(client, node.clone());
    let rpc = ClientBuilder::default().transport(transport, false);
    Ok(ProviderBuilder::new().connect_client(rpc).erased())
}

/// Creates a provider talking to `node`, signing with `signer`, optionally
/// routing all traffic through `proxy`.
pub fn provider(
    node: &Url,
    signer: PrivateKeySigner,
    proxy: Option<&Url>,
) -> Result<AlloyProvider> {
    let mut http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
    if let Some(proxy) = proxy {
        http = http.proxy(
            reqwest::Proxy::all(proxy.as_str())
                .with_context(|| format!("unusable proxy descriptor {proxy}"))?,
        );
    }
    let client = http.build().context("failed to create HTTP client")?;
    let transport = Http::with_client(client, node.clone());
    let rpc = ClientBuilder::default().transport(transport, false);
    Ok(ProviderBuilder::new()
        .wallet(EthereumWallet::new(signer))
        .connect_client(rpc)
        .erased())
}
