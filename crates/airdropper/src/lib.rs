pub mod accounts;
pub mod arguments;
pub mod balances;
pub mod chain;
pub mod deploy;
pub mod identity;
pub mod menu;
pub mod registry;
pub mod transfer;

use alloy::primitives::U256;

pub async fn main(args: arguments::Arguments) -> anyhow::Result<()> {
    let accounts = accounts::load(&args.accounts_file, &args.proxies_file)?;
    let proxied = accounts
        .iter()
        .filter(|account| account.proxy.is_some())
        .count();
    tracing::info!(accounts = accounts.len(), proxied, "loaded credentials");

    let chain = chain::RpcChain::new(
        args.node_url.clone(),
        args.deployment_gas_limit,
        args.confirmation_timeout,
    );
    balances::log_chain_id(&chain).await;
    balances::log_native_balances(&chain, &accounts).await;
    menu::run(&chain, &accounts, U256::from(args.total_supply)).await
}
