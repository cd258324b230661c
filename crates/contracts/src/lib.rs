//! Bindings for the fixed token contract that gets deployed once per
//! account. The contract is treated as a versioned build artifact: the
//! solc output (ABI + creation bytecode) is checked in under `artifacts/`
//! and pinned by its content hash, so orchestration code never touches
//! Solidity source.

pub mod artifact;

// Generate the main bindings in a private module. That allows us to
// re-export all items in our own module while also adding some items
// ourselves.
#[allow(non_snake_case)]
mod BatchTokenPrivate {
    alloy::sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        BatchToken,
        "./artifacts/BatchToken.json",
    );
}

#[allow(non_snake_case)]
pub mod BatchToken {
    use alloy::providers::DynProvider;

    pub use super::BatchTokenPrivate::*;

    pub type Instance = BatchToken::BatchTokenInstance<DynProvider>;
}

#[cfg(test)]
mod tests {
    #[test]
    fn artifact_abi_covers_the_token_interface() {
        let artifact: serde_json::Value =
            serde_json::from_str(crate::artifact::JSON).unwrap();
        let names: Vec<&str> = artifact["abi"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|entry| entry["name"].as_str())
            .collect();
        for function in [
            "transfer",
            "approve",
            "transferFrom",
            "balanceOf",
            "name",
            "symbol",
            "decimals",
            "totalSupply",
        ] {
            assert!(names.contains(&function), "missing {function}");
        }
    }
}
