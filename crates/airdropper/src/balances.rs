//! Read-only balance reporting around the two phases.

use {
    crate::{accounts::Account, chain::Chain, registry::{DeploymentRecord, Registry}},
    alloy::primitives::utils::{format_ether, format_units},
    anyhow::Result,
};

/// Announces which chain the configured node serves. A node that cannot
/// even answer this is still allowed to start up; every later operation
/// reports its own connection failures.
pub async fn log_chain_id(chain: &dyn Chain) {
    match chain.chain_id().await {
        Ok(chain_id) => tracing::info!(chain_id, "connected to chain"),
        Err(err) => tracing::warn!(%err, "unable to fetch chain id"),
    }
}

pub async fn log_native_balances(chain: &dyn Chain, accounts: &[Account]) {
    for (i, account) in accounts.iter().enumerate() {
        match native_balance(chain, account).await {
            Ok(balance) => {
                tracing::info!(wallet = i + 1, account = %account.address(), %balance, "ETH balance")
            }
            Err(err) => {
                tracing::warn!(account = %account.address(), %err, "unable to fetch ETH balance")
            }
        }
    }
}

pub async fn log_token_balances(chain: &dyn Chain, registry: &Registry) {
    for (i, record) in registry.records().iter().enumerate() {
        match token_balance(chain, record).await {
            Ok(balance) => tracing::info!(
                wallet = i + 1,
                account = %record.account.address(),
                token = %record.symbol,
                %balance,
                "token balance"
            ),
            Err(err) => tracing::warn!(
                account = %record.account.address(),
                token = %record.symbol,
                %err,
                "unable to fetch token balance"
            ),
        }
    }
}

async fn native_balance(chain: &dyn Chain, account: &Account) -> Result<String> {
    let client = chain.connect(account).await?;
    Ok(format_ether(client.native_balance().await?))
}

async fn token_balance(chain: &dyn Chain, record: &DeploymentRecord) -> Result<String> {
    let client = chain.connect(&record.account).await?;
    let balance = client.token_balance(record.token).await?;
    Ok(format_units(balance, number::units::TOKEN_DECIMALS as u8)?)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::chain::MockChain, anyhow::anyhow};

    #[tokio::test]
    async fn queries_the_chain_id_once_at_startup() {
        let mut chain = MockChain::new();
        chain.expect_chain_id().times(1).returning(|| Ok(5124));
        log_chain_id(&chain).await;
    }

    #[tokio::test]
    async fn unreachable_node_does_not_abort_startup() {
        let mut chain = MockChain::new();
        chain
            .expect_chain_id()
            .returning(|| Err(anyhow!("connection refused")));
        log_chain_id(&chain).await;
    }
}
