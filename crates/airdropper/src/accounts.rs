use {
    alloy::{primitives::Address, signers::local::PrivateKeySigner},
    anyhow::{Context, Result, ensure},
    std::path::Path,
    url::Url,
};

/// One managed identity: the signing key together with the proxy its
/// outbound traffic is routed through. Pairing is resolved once at load
/// time so no positional index juggling survives past this module.
#[derive(Clone, Debug)]
pub struct Account {
    pub signer: PrivateKeySigner,
    pub proxy: Option<Url>,
}

impl Account {
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Deterministic account for tests, without any proxy.
    #[cfg(test)]
    pub fn test(id: u8) -> Self {
        Self {
            signer: PrivateKeySigner::from_slice(&[id; 32]).unwrap(),
            proxy: None,
        }
    }
}

/// Reads the account and proxy files and pairs them up: account `i` uses
/// proxy `i`, accounts beyond the end of the proxy list connect directly
/// and surplus proxies are ignored.
///
/// A missing or entirely invalid account file is a fatal startup error. A
/// missing proxy file merely degrades to direct connections.
pub fn load(accounts_file: &Path, proxies_file: &Path) -> Result<Vec<Account>> {
    let keys = std::fs::read_to_string(accounts_file)
        .with_context(|| format!("unable to read account file {}", accounts_file.display()))?;
    let signers = parse_keys(&keys)?;
    let proxies = match std::fs::read_to_string(proxies_file) {
        Ok(content) => parse_proxies(&content),
        Err(err) => {
            tracing::warn!(%err, "no usable proxy file, connecting all accounts directly");
            Vec::new()
        }
    };
    Ok(pair(signers, proxies))
}

fn pair(signers: Vec<PrivateKeySigner>, proxies: Vec<Url>) -> Vec<Account> {
    signers
        .into_iter()
        .enumerate()
        .map(|(i, signer)| Account {
            signer,
            proxy: proxies.get(i).cloned(),
        })
        .collect()
}

fn parse_keys(content: &str) -> Result<Vec<PrivateKeySigner>> {
    let mut signers = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<PrivateKeySigner>() {
            Ok(signer) => signers.push(signer),
            Err(err) => tracing::warn!(line = i + 1, %err, "skipping unparsable private key"),
        }
    }
    ensure!(
        !signers.is_empty(),
        "account file contains no valid private keys"
    );
    Ok(signers)
}

fn parse_proxies(content: &str) -> Vec<Url> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match line.parse() {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!(%err, line, "skipping unparsable proxy");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_1: &str = "0x0101010101010101010101010101010101010101010101010101010101010101";
    const KEY_2: &str = "0x0202020202020202020202020202020202020202020202020202020202020202";

    #[test]
    fn parses_keys_ignoring_noise() {
        let content = format!("# comment\n\n  {KEY_1}  \nnot-a-key\n{KEY_2}\n");
        let signers = parse_keys(&content).unwrap();
        assert_eq!(signers.len(), 2);
        let address = |key: &str| key.parse::<PrivateKeySigner>().unwrap().address();
        assert_eq!(signers[0].address(), address(KEY_1));
        assert_eq!(signers[1].address(), address(KEY_2));
    }

    #[test]
    fn no_valid_keys_is_an_error() {
        assert!(parse_keys("").is_err());
        assert!(parse_keys("# only a comment\nnot-a-key\n").is_err());
    }

    #[test]
    fn parses_proxies_ignoring_noise() {
        let proxies = parse_proxies(
            "http://10.0.0.1:8080\n# down for maintenance\n\nsocks5://10.0.0.2:1080\n",
        );
        assert_eq!(proxies.len(), 2);
        assert_eq!(proxies[0].as_str(), "http://10.0.0.1:8080/");
        assert_eq!(proxies[1].scheme(), "socks5");
    }

    #[test]
    fn pairs_accounts_with_proxies_by_position() {
        let signers = vec![KEY_1.parse().unwrap(), KEY_2.parse().unwrap()];
        let proxy: Url = "http://10.0.0.1:8080".parse().unwrap();

        // Fewer proxies than accounts: the tail connects directly.
        let accounts = pair(signers.clone(), vec![proxy.clone()]);
        assert_eq!(accounts[0].proxy.as_ref(), Some(&proxy));
        assert_eq!(accounts[1].proxy, None);

        // More proxies than accounts: the surplus is ignored.
        let extra: Url = "http://10.0.0.2:8080".parse().unwrap();
        let accounts = pair(signers, vec![proxy.clone(), extra.clone(), extra]);
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].proxy.as_ref(), Some(&proxy));
    }
}
