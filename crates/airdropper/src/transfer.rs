use {
    crate::{
        chain::{AccountClient, Chain},
        identity,
        registry::{DeploymentRecord, Registry},
    },
    alloy::primitives::{Address, U256},
    number::units::AmountError,
    std::{fmt, num::NonZeroUsize},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferStatus {
    /// Submitted, receipt not yet seen.
    Pending,
    Success,
    Failure,
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

/// Outcome of a single airdrop transfer. Ephemeral; only lives for the
/// report of one transfer phase.
#[derive(Clone, Debug)]
pub struct TransferRecord {
    pub index: usize,
    /// The zero address when the transfer was never submitted, e.g.
    /// because the account's connection could not be opened.
    pub recipient: Address,
    pub amount: U256,
    pub status: TransferStatus,
}

/// All transfers performed for one deployed token, in submission order.
#[derive(Debug)]
pub struct AccountReport {
    pub account: Address,
    pub token: Address,
    pub symbol: String,
    /// The per-transfer amount as the user entered it, for display.
    pub amount: String,
    pub transfers: Vec<TransferRecord>,
}

impl AccountReport {
    /// Returns (succeeded, failed).
    pub fn counts(&self) -> (usize, usize) {
        let succeeded = self
            .transfers
            .iter()
            .filter(|transfer| transfer.status == TransferStatus::Success)
            .count();
        (succeeded, self.transfers.len() - succeeded)
    }
}

impl fmt::Display for AccountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "account {} token {} ({})", self.account, self.token, self.symbol)?;
        writeln!(f, "{:<4} {:<44} {:<18} status", "#", "recipient", "amount")?;
        for transfer in &self.transfers {
            writeln!(
                f,
                "{:<4} {:<44} {:<18} {}",
                transfer.index,
                transfer.recipient.to_string(),
                format!("{} {}", self.amount, self.symbol),
                transfer.status,
            )?;
        }
        let (succeeded, failed) = self.counts();
        writeln!(f, "{succeeded} succeeded, {failed} failed")
    }
}

/// Sends `transfers_per_account` airdrop transfers from every deployed
/// token to freshly generated recipients, sequentially, and reports every
/// single outcome. Individual failures are recorded and never stop the
/// remaining transfers.
///
/// The amount is scaled to base units exactly once, before anything
/// touches the network, so an unrepresentable amount rejects the whole
/// phase up front.
pub async fn transfer_all(
    chain: &dyn Chain,
    registry: &Registry,
    transfers_per_account: NonZeroUsize,
    amount: &str,
) -> Result<Vec<AccountReport>, AmountError> {
    let base_units = number::units::token_base_units(amount)?;
    let mut reports = Vec::with_capacity(registry.len());
    for (i, record) in registry.records().iter().enumerate() {
        tracing::info!(
            account = %record.account.address(),
            token = %record.symbol,
            progress = %format_args!("{}/{}", i + 1, registry.len()),
            "transferring tokens"
        );
        let transfers = match chain.connect(&record.account).await {
            Ok(client) => {
                run_transfers(
                    client.as_ref(),
                    record,
                    transfers_per_account.get(),
                    base_units,
                )
                .await
            }
            Err(err) => {
                tracing::error!(
                    account = %record.account.address(),
                    %err,
                    "chain unreachable for account, all of its transfers failed"
                );
                // No transaction was ever submitted, so no recipient is
                // generated either.
                (0..transfers_per_account.get())
                    .map(|j| TransferRecord {
                        index: j + 1,
                        recipient: Address::ZERO,
                        amount: base_units,
                        status: TransferStatus::Failure,
                    })
                    .collect()
            }
        };
        reports.push(AccountReport {
            account: record.account.address(),
            token: record.token,
            symbol: record.symbol.clone(),
            amount: amount.trim().to_string(),
            transfers,
        });
    }
    Ok(reports)
}

async fn run_transfers(
    client: &dyn AccountClient,
    record: &DeploymentRecord,
    count: usize,
    base_units: U256,
) -> Vec<TransferRecord> {
    let mut transfers = Vec::with_capacity(count);
    for j in 0..count {
        let recipient = identity::generate_identity();
        let mut transfer = TransferRecord {
            index: j + 1,
            recipient,
            amount: base_units,
            status: TransferStatus::Pending,
        };
        transfer.status = match client.transfer_token(record.token, recipient, base_units).await {
            Ok(()) => TransferStatus::Success,
            Err(err) => {
                tracing::warn!(recipient = %recipient, %err, "transfer failed");
                TransferStatus::Failure
            }
        };
        transfers.push(transfer);
    }
    transfers
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            accounts::Account,
            chain::{MockAccountClient, MockChain, TransferError},
        },
        anyhow::anyhow,
        std::{
            collections::HashSet,
            sync::{
                Arc,
                atomic::{AtomicUsize, Ordering},
            },
        },
    };

    fn registry_with_one_record() -> Registry {
        let mut registry = Registry::default();
        registry.push(DeploymentRecord {
            account: Account::test(1),
            token: Address::repeat_byte(0x42),
            name: "NovaCoin".to_string(),
            symbol: "NVC".to_string(),
        });
        registry
    }

    fn per_account(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[tokio::test]
    async fn one_failed_transfer_does_not_stop_the_rest() {
        let registry = registry_with_one_record();
        let mut chain = MockChain::new();
        chain.expect_connect().returning(|_| {
            let calls = Arc::new(AtomicUsize::new(0));
            let mut client = MockAccountClient::new();
            client
                .expect_transfer_token()
                .times(3)
                .returning(move |_, _, _| {
                    // The chain rejects the second transfer.
                    match calls.fetch_add(1, Ordering::SeqCst) {
                        1 => Err(TransferError::Reverted),
                        _ => Ok(()),
                    }
                });
            Ok(Box::new(client))
        });

        let reports = transfer_all(&chain, &registry, per_account(3), "10").await.unwrap();

        assert_eq!(reports.len(), 1);
        let statuses: Vec<_> = reports[0]
            .transfers
            .iter()
            .map(|transfer| transfer.status)
            .collect();
        assert_eq!(
            statuses,
            [
                TransferStatus::Success,
                TransferStatus::Failure,
                TransferStatus::Success
            ]
        );
        assert_eq!(reports[0].counts(), (2, 1));
    }

    #[tokio::test]
    async fn reports_exactly_n_entries_even_when_the_chain_is_unreachable() {
        let registry = registry_with_one_record();
        let mut chain = MockChain::new();
        chain
            .expect_connect()
            .returning(|_| Err(anyhow!("proxy refused the connection")));

        let reports = transfer_all(&chain, &registry, per_account(3), "10").await.unwrap();

        assert_eq!(reports[0].transfers.len(), 3);
        assert!(
            reports[0]
                .transfers
                .iter()
                .all(|transfer| transfer.status == TransferStatus::Failure)
        );
        // Nothing was submitted, so the report must not invent recipients.
        assert!(
            reports[0]
                .transfers
                .iter()
                .all(|transfer| transfer.recipient == Address::ZERO)
        );
    }

    #[tokio::test]
    async fn over_precise_amount_is_rejected_before_any_network_call() {
        let registry = registry_with_one_record();
        // Connecting to this mock would panic: no expectations are set.
        let chain = MockChain::new();

        let result = transfer_all(&chain, &registry, per_account(1), "0.0000000000000000001").await;
        assert!(matches!(result, Err(AmountError::TooPrecise)));
    }

    #[tokio::test]
    async fn recipients_are_fresh_for_every_transfer() {
        let mut registry = registry_with_one_record();
        registry.push(DeploymentRecord {
            account: Account::test(2),
            token: Address::repeat_byte(0x43),
            name: "LunaPay".to_string(),
            symbol: "LPY".to_string(),
        });
        let mut chain = MockChain::new();
        chain.expect_connect().returning(|_| {
            let mut client = MockAccountClient::new();
            client.expect_transfer_token().returning(|_, _, _| Ok(()));
            Ok(Box::new(client))
        });

        let reports = transfer_all(&chain, &registry, per_account(5), "0.5").await.unwrap();

        let recipients: HashSet<Address> = reports
            .iter()
            .flat_map(|report| report.transfers.iter().map(|transfer| transfer.recipient))
            .collect();
        assert_eq!(recipients.len(), 10);
    }

    #[tokio::test]
    async fn empty_registry_produces_an_empty_report() {
        let chain = MockChain::new();
        let reports = transfer_all(&chain, &Registry::default(), per_account(3), "1")
            .await
            .unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn report_renders_one_line_per_transfer() {
        let report = AccountReport {
            account: Address::repeat_byte(0x01),
            token: Address::repeat_byte(0x42),
            symbol: "NVC".to_string(),
            amount: "10".to_string(),
            transfers: vec![
                TransferRecord {
                    index: 1,
                    recipient: Address::repeat_byte(0x02),
                    amount: U256::from(10u64),
                    status: TransferStatus::Success,
                },
                TransferRecord {
                    index: 2,
                    recipient: Address::repeat_byte(0x03),
                    amount: U256::from(10u64),
                    status: TransferStatus::Failure,
                },
            ],
        };
        let rendered = report.to_string();
        assert_eq!(rendered.matches("10 NVC").count(), 2);
        assert!(rendered.contains("success"));
        assert!(rendered.contains("failure"));
        assert!(rendered.contains("1 succeeded, 1 failed"));
    }
}
