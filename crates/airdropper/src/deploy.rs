use {
    crate::{
        accounts::Account,
        chain::{Chain, DeployError, TokenParams},
        registry::{DeploymentRecord, Registry},
    },
    alloy::primitives::U256,
    rand::Rng,
};

const NAME_PREFIXES: [&str; 6] = ["Seismic", "Airdrop", "Crypto", "Luna", "Nova", "Stellar"];
const NAME_SUFFIXES: [&str; 6] = ["Coin", "Token", "Cash", "Pay", "Bit", "X"];

/// Draws a display name from the fixed component pools. Uniqueness across
/// accounts is not required.
fn random_token_name(rng: &mut impl Rng) -> String {
    let prefix = NAME_PREFIXES[rng.gen_range(0..NAME_PREFIXES.len())];
    let suffix = NAME_SUFFIXES[rng.gen_range(0..NAME_SUFFIXES.len())];
    format!("{prefix}{suffix}")
}

fn random_token_symbol(rng: &mut impl Rng) -> String {
    (0..3).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect()
}

/// Deploys one freshly named token per account, sequentially, and
/// returns the registry of what stuck. A failing account is logged and
/// skipped; the batch never aborts early. The returned registry is built
/// from scratch, so rerunning the phase discards all earlier deployments.
pub async fn deploy_all(chain: &dyn Chain, accounts: &[Account], supply: U256) -> Registry {
    let mut registry = Registry::default();
    for (i, account) in accounts.iter().enumerate() {
        let mut rng = rand::thread_rng();
        let params = TokenParams {
            name: random_token_name(&mut rng),
            symbol: random_token_symbol(&mut rng),
            supply,
        };
        tracing::info!(
            account = %account.address(),
            progress = %format_args!("{}/{}", i + 1, accounts.len()),
            token = %params.name,
            symbol = %params.symbol,
            "deploying token"
        );
        match deploy_one(chain, account, &params).await {
            Ok(record) => {
                tracing::info!(
                    account = %account.address(),
                    token = %record.token,
                    "token deployed"
                );
                registry.push(record);
            }
            Err(err) => {
                tracing::error!(account = %account.address(), %err, "skipping account");
            }
        }
    }
    registry
}

async fn deploy_one(
    chain: &dyn Chain,
    account: &Account,
    params: &TokenParams,
) -> Result<DeploymentRecord, DeployError> {
    let client = chain
        .connect(account)
        .await
        .map_err(DeployError::Submission)?;
    let balance = client
        .native_balance()
        .await
        .map_err(DeployError::Submission)?;
    if balance.is_zero() {
        return Err(DeployError::InsufficientFunds);
    }
    let token = client.deploy_token(params).await?;
    Ok(DeploymentRecord {
        account: account.clone(),
        token,
        name: params.name.clone(),
        symbol: params.symbol.clone(),
    })
}
