use {
    crate::accounts::Account,
    alloy::{
        primitives::{Address, U256},
        providers::{PendingTransactionBuilder, Provider},
        rpc::types::TransactionReceipt,
    },
    anyhow::{Result, anyhow},
    contracts::BatchToken,
    std::time::Duration,
    url::Url,
};

/// Everything that can go wrong while deploying one account's token. None
/// of these abort the batch; the deployment loop reports them per account
/// and moves on.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("account holds no ETH to pay for gas")]
    InsufficientFunds,
    #[error(transparent)]
    Artifact(#[from] contracts::artifact::VerificationError),
    #[error("failed to submit deployment: {0:#}")]
    Submission(#[source] anyhow::Error),
    #[error("deployment was not confirmed within the configured timeout")]
    ConfirmationTimeout,
    #[error("deployment transaction reverted")]
    Reverted,
}

/// Per-transfer failures. Recorded in the transfer report; never abort
/// the remaining transfers.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("failed to submit transfer: {0:#}")]
    Submission(#[source] anyhow::Error),
    #[error("transfer was not confirmed within the configured timeout")]
    ConfirmationTimeout,
    #[error("transfer transaction reverted")]
    Reverted,
}

/// Constructor arguments for one token deployment.
#[derive(Clone, Debug)]
pub struct TokenParams {
    pub name: String,
    pub symbol: String,
    /// In display units. The contract scales by its decimals itself and
    /// credits the deployer with the whole supply.
    pub supply: U256,
}

/// The connection factory the orchestrators run against.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    /// The id of the chain the node serves. Queried once at startup, not
    /// tied to any account.
    async fn chain_id(&self) -> Result<u64>;

    /// Opens a connection acting as the given account, honoring its
    /// proxy. Fails if the proxy descriptor is unusable.
    async fn connect(&self, account: &Account) -> Result<Box<dyn AccountClient>>;
}

/// Chain operations available to one connected account.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AccountClient: Send + Sync {
    fn address(&self) -> Address;

    async fn native_balance(&self) -> Result<U256>;

    /// Deploys the fixed token contract and blocks until it is included,
    /// returning the contract address.
    async fn deploy_token(&self, params: &TokenParams) -> Result<Address, DeployError>;

    /// Sends `amount` base units of `token` to `to` and blocks until the
    /// transaction is included.
    async fn transfer_token(
        &self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TransferError>;

    async fn token_balance(&self, token: Address) -> Result<U256>;
}

/// The real implementation on top of a JSON-RPC node.
pub struct RpcChain {
    node_url: Url,
    deployment_gas_limit: u64,
    confirmation_timeout: Duration,
}

impl RpcChain {
    pub fn new(node_url: Url, deployment_gas_limit: u64, confirmation_timeout: Duration) -> Self {
        Self {
            node_url,
            deployment_gas_limit,
            confirmation_timeout,
        }
    }
}

#[async_trait::async_trait]
impl Chain for RpcChain {
    async fn chain_id(&self) -> Result<u64> {
        let provider = ethrpc::unsigned_provider(&self.node_url)?;
        Ok(provider.get_chain_id().await?)
    }

    async fn connect(&self, account: &Account) -> Result<Box<dyn AccountClient>> {
        let provider = ethrpc::provider(
            &self.node_url,
            account.signer.clone(),
            account.proxy.as_ref(),
        )?;
        Ok(Box::new(RpcAccountClient {
            address: account.address(),
            provider,
            deployment_gas_limit: self.deployment_gas_limit,
            confirmation_timeout: self.confirmation_timeout,
        }))
    }
}

struct RpcAccountClient {
    address: Address,
    provider: ethrpc::AlloyProvider,
    deployment_gas_limit: u64,
    confirmation_timeout: Duration,
}

enum ConfirmError {
    Timeout,
    Rpc(anyhow::Error),
}

impl RpcAccountClient {
    /// Waits for the receipt of a submitted transaction, bounded by the
    /// configured confirmation timeout. An in-flight transaction is never
    /// rolled back; on timeout it confirms or expires on the chain's own
    /// terms.
    async fn wait_for_receipt(
        &self,
        pending: PendingTransactionBuilder<alloy::network::Ethereum>,
    ) -> Result<TransactionReceipt, ConfirmError> {
        tokio::time::timeout(self.confirmation_timeout, pending.get_receipt())
            .await
            .map_err(|_| ConfirmError::Timeout)?
            .map_err(|err| ConfirmError::Rpc(anyhow!(err)))
    }
}

#[async_trait::async_trait]
impl AccountClient for RpcAccountClient {
    fn address(&self) -> Address {
        self.address
    }

    async fn native_balance(&self) -> Result<U256> {
        Ok(self.provider.get_balance(self.address).await?)
    }

    async fn deploy_token(&self, params: &TokenParams) -> Result<Address, DeployError> {
        contracts::artifact::verify()?;
        let pending = BatchToken::Instance::deploy_builder(
            self.provider.clone(),
            params.name.clone(),
            params.symbol.clone(),
            params.supply,
        )
        .gas(self.deployment_gas_limit)
        .send()
        .await
        .map_err(|err| DeployError::Submission(anyhow!(err)))?;
        tracing::debug!(tx = %pending.tx_hash(), "deployment submitted, awaiting inclusion");
        let receipt = self.wait_for_receipt(pending).await.map_err(|err| match err {
            ConfirmError::Timeout => DeployError::ConfirmationTimeout,
            ConfirmError::Rpc(err) => DeployError::Submission(err),
        })?;
        if !receipt.status() {
            return Err(DeployError::Reverted);
        }
        receipt
            .contract_address
            .ok_or_else(|| DeployError::Submission(anyhow!("confirmed receipt carries no contract address")))
    }

    async fn transfer_token(
        &self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TransferError> {
        let token = BatchToken::Instance::new(token, self.provider.clone());
        let pending = token
            .transfer(to, amount)
            .send()
            .await
            .map_err(|err| TransferError::Submission(anyhow!(err)))?;
        tracing::debug!(tx = %pending.tx_hash(), "transfer submitted, awaiting inclusion");
        let receipt = self.wait_for_receipt(pending).await.map_err(|err| match err {
            ConfirmError::Timeout => TransferError::ConfirmationTimeout,
            ConfirmError::Rpc(err) => TransferError::Submission(err),
        })?;
        if !receipt.status() {
            return Err(TransferError::Reverted);
        }
        Ok(())
    }

    async fn token_balance(&self, token: Address) -> Result<U256> {
        let token = BatchToken::Instance::new(token, self.provider.clone());
        Ok(token.balanceOf(self.address).call().await?)
    }
}
