use {clap::Parser, std::path::PathBuf, std::time::Duration, url::Url};

#[derive(Parser)]
pub struct Arguments {
    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "https://node-2.seismicdev.net/rpc")]
    pub node_url: Url,

    /// File with one private key per line. Blank lines and lines starting
    /// with '#' are ignored.
    #[clap(long, env, default_value = "accounts.txt")]
    pub accounts_file: PathBuf,

    /// File with one proxy URL per line, paired with accounts by position.
    /// Missing file means all accounts connect directly.
    #[clap(long, env, default_value = "proxy.txt")]
    pub proxies_file: PathBuf,

    /// Total supply of every deployed token, in display units.
    #[clap(long, env, default_value = "100000000")]
    pub total_supply: u64,

    /// Gas allowance for a deployment transaction.
    #[clap(long, env, default_value = "3000000")]
    pub deployment_gas_limit: u64,

    /// Maximum time in seconds to wait for a submitted transaction to be
    /// included before it is reported as timed out.
    #[clap(
        long,
        env,
        default_value = "120",
        value_parser = duration_from_seconds,
    )]
    pub confirmation_timeout: Duration,
}

pub fn duration_from_seconds(s: &str) -> Result<Duration, std::num::ParseIntError> {
    Ok(Duration::from_secs(s.parse()?))
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "node_url: {}", self.node_url)?;
        writeln!(f, "accounts_file: {}", self.accounts_file.display())?;
        writeln!(f, "proxies_file: {}", self.proxies_file.display())?;
        writeln!(f, "total_supply: {}", self.total_supply)?;
        writeln!(f, "deployment_gas_limit: {}", self.deployment_gas_limit)?;
        writeln!(f, "confirmation_timeout: {:?}", self.confirmation_timeout)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let args = Arguments::parse_from(["airdropper"]);
        assert_eq!(args.total_supply, 100_000_000);
        assert_eq!(args.confirmation_timeout, Duration::from_secs(120));
    }

    #[test]
    fn rejects_malformed_timeout() {
        assert!(Arguments::try_parse_from(["airdropper", "--confirmation-timeout", "soon"]).is_err());
    }
}
