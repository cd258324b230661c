use {crate::accounts::Account, alloy::primitives::Address};

/// One successful token deployment. At most one live record exists per
/// account per run; a new deployment phase produces a whole new registry.
#[derive(Clone, Debug)]
pub struct DeploymentRecord {
    pub account: Account,
    pub token: Address,
    pub name: String,
    pub symbol: String,
}

/// In-memory, ordered collection of this run's deployments. Owned by the
/// run controller and passed explicitly into the orchestrators; record
/// order is a subsequence of the account order that produced it.
#[derive(Default, Debug)]
pub struct Registry(Vec<DeploymentRecord>);

impl Registry {
    pub fn push(&mut self, record: DeploymentRecord) {
        self.0.push(record);
    }

    pub fn records(&self) -> &[DeploymentRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
