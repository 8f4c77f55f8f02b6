use alloy_primitives::Address;

use crate::{
    consts::{BATCH_VERSION, DEFAULT_BATCH_NAME, TX_BUILDER_VERSION},
    transaction_data::{BatchMeta, BatchTransaction, TransactionBatch},
};

/// Assembles encoded calls into a [`TransactionBatch`].
///
/// Purely structural: calls are kept in push order and nothing about their semantics
/// is checked. Ordering such as "approve before deposit" is the caller's job.
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    chain_id: u64,
    name: String,
    description: String,
    safe: Option<Address>,
    owner: Option<Address>,
    created_at: Option<i64>,
    transactions: Vec<BatchTransaction>,
}

impl BatchBuilder {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            name: DEFAULT_BATCH_NAME.to_string(),
            description: String::new(),
            safe: None,
            owner: None,
            created_at: None,
            transactions: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The Safe that will execute the batch.
    pub fn safe(mut self, safe: Address) -> Self {
        self.safe = Some(safe);
        self
    }

    pub fn owner(mut self, owner: Address) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Pins the creation time (unix milliseconds). Defaults to now.
    pub fn created_at(mut self, timestamp_ms: i64) -> Self {
        self.created_at = Some(timestamp_ms);
        self
    }

    pub fn push(mut self, tx: BatchTransaction) -> Self {
        self.transactions.push(tx);
        self
    }

    pub fn extend(mut self, txs: impl IntoIterator<Item = BatchTransaction>) -> Self {
        self.transactions.extend(txs);
        self
    }

    pub fn build(self) -> TransactionBatch {
        let created_at =
            self.created_at.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

        TransactionBatch {
            version: BATCH_VERSION.to_string(),
            chain_id: self.chain_id.to_string(),
            created_at,
            meta: BatchMeta {
                name: self.name,
                description: self.description,
                tx_builder_version: TX_BUILDER_VERSION.to_string(),
                created_from_safe_address: self
                    .safe
                    .map(|safe| safe.to_checksum(None))
                    .unwrap_or_default(),
                created_from_owner_address: self
                    .owner
                    .map(|owner| owner.to_checksum(None))
                    .unwrap_or_default(),
            },
            transactions: self.transactions,
        }
    }
}
