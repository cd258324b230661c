//! The interactive run controller. Thin by design: it owns the registry,
//! dispatches into the orchestrators and validates the interactive input.

use {
    crate::{accounts::Account, balances, chain::Chain, deploy, registry::Registry, transfer},
    alloy::primitives::U256,
    anyhow::Result,
    std::num::NonZeroUsize,
    tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin},
};

pub async fn run(chain: &dyn Chain, accounts: &[Account], total_supply: U256) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // Owned here and replaced wholesale by every deployment phase; the
    // orchestrators never share it behind module state.
    let mut registry = Registry::default();
    loop {
        print_menu();
        // EOF on stdin means exit.
        let Some(choice) = prompt(&mut lines, "Select an option (1-3): ").await? else {
            break;
        };
        match choice.trim() {
            "1" => {
                registry = deploy::deploy_all(chain, accounts, total_supply).await;
                tracing::info!(deployed = registry.len(), "deployment phase finished");
                balances::log_token_balances(chain, &registry).await;
            }
            "2" => {
                if registry.is_empty() {
                    tracing::error!("no tokens deployed yet, run the deployment phase first");
                    continue;
                }
                balances::log_token_balances(chain, &registry).await;
                let Some(count) = prompt(&mut lines, "Transfers per account: ").await? else {
                    break;
                };
                let count: NonZeroUsize = match count.trim().parse() {
                    Ok(count) => count,
                    Err(err) => {
                        tracing::error!(%err, "transfer count must be a positive integer");
                        continue;
                    }
                };
                let Some(amount) = prompt(&mut lines, "Amount per transfer: ").await? else {
                    break;
                };
                match transfer::transfer_all(chain, &registry, count, &amount).await {
                    Ok(reports) => {
                        for report in &reports {
                            println!("{report}");
                        }
                        tracing::info!("transfer phase finished");
                        balances::log_token_balances(chain, &registry).await;
                    }
                    Err(err) => tracing::error!(%err, "rejected transfer amount"),
                }
            }
            "3" => break,
            other => tracing::error!(choice = other, "invalid option, pick 1-3"),
        }
    }
    Ok(())
}

fn print_menu() {
    println!();
    println!("1. deploy a new token per account");
    println!("2. transfer tokens to random addresses");
    println!("3. exit");
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, text: &str) -> Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?)
}
