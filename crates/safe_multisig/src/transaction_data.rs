use alloy_primitives::{Address, Bytes, U256};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use std::str::FromStr;

/// A Safe Transaction Builder batch file.
///
/// The layout is the de facto community format: the Safe UI imports it as-is and executes
/// `transactions` atomically, in array order, as a single multisig transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBatch {
    pub version: String,
    pub chain_id: String,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
    pub meta: BatchMeta,
    pub transactions: Vec<BatchTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMeta {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tx_builder_version: String,
    #[serde(default)]
    pub created_from_safe_address: String,
    #[serde(default)]
    pub created_from_owner_address: String,
}

/// One call inside a batch.
///
/// `to` is kept as a string so hand-edited files still load and can be reported on by
/// [`TransactionBatch::validate_structure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTransaction {
    pub to: String,
    #[serde(default = "default_value")]
    pub value: String,
    #[serde(default)]
    pub data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_method: Option<ContractMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_inputs_values: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMethod {
    pub inputs: Vec<ContractInput>,
    pub name: String,
    #[serde(default)]
    pub payable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInput {
    #[serde(rename = "internalType")]
    pub internal_type: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("Batch contains no transactions")]
    Empty,
    #[error("Transaction {0} has an empty `to` field")]
    MissingTo(usize),
    #[error("Transaction {0} has an invalid `to` address: {1}")]
    InvalidTo(usize, String),
    #[error("Transaction {0} has no call data")]
    MissingData(usize),
    #[error("Transaction {0} has an invalid value: {1}")]
    InvalidValue(usize, String),
    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),
}

fn default_value() -> String {
    "0".to_string()
}

impl BatchTransaction {
    pub fn new(to: Address, value: U256, data: Bytes) -> Self {
        Self {
            to: to.to_checksum(None),
            value: value.to_string(),
            data: Some(data),
            contract_method: None,
            contract_inputs_values: None,
        }
    }

    /// Attaches the human-readable method fragment shown by the Transaction Builder.
    pub fn with_method(mut self, method: ContractMethod, values: IndexMap<String, String>) -> Self {
        self.contract_method = Some(method);
        self.contract_inputs_values = Some(values);
        self
    }

    pub fn to_address(&self) -> Option<Address> {
        Address::from_str(self.to.trim()).ok()
    }
}

impl TransactionBatch {
    pub fn chain_id(&self) -> Result<u64, BatchError> {
        self.chain_id.parse().map_err(|_| BatchError::InvalidChainId(self.chain_id.clone()))
    }

    /// Checks the shape every consumer relies on: at least one transaction, and each
    /// one with a parseable `to`, non-empty call data and a decimal `value`.
    ///
    /// Call semantics are not checked.
    pub fn validate_structure(&self) -> Result<(), BatchError> {
        self.chain_id()?;

        if self.transactions.is_empty() {
            return Err(BatchError::Empty);
        }

        for (i, tx) in self.transactions.iter().enumerate() {
            if tx.to.trim().is_empty() {
                return Err(BatchError::MissingTo(i));
            }
            if tx.to_address().is_none() {
                return Err(BatchError::InvalidTo(i, tx.to.clone()));
            }
            match &tx.data {
                Some(data) if !data.is_empty() => {}
                _ => return Err(BatchError::MissingData(i)),
            }
            if U256::from_str_radix(tx.value.trim(), 10).is_err() {
                return Err(BatchError::InvalidValue(i, tx.value.clone()));
            }
        }

        Ok(())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, bytes};

    const TX_BUILDER_FILE: &str = r#"{
        "version": "1.0",
        "chainId": "1",
        "createdAt": 1718000000000,
        "meta": {
            "name": "Transactions Batch",
            "description": "",
            "txBuilderVersion": "1.16.5",
            "createdFromSafeAddress": "0x10A19e7eE7d7F8a52822f6817de8ea18204F2e4f",
            "createdFromOwnerAddress": "",
            "checksum": "0x0000000000000000000000000000000000000000000000000000000000000000"
        },
        "transactions": [
            {
                "to": "0xba100000625a3754423978a60c9317c58a424e3D",
                "value": "0",
                "data": null,
                "contractMethod": {
                    "inputs": [
                        { "internalType": "address", "name": "to", "type": "address" },
                        { "internalType": "uint256", "name": "amount", "type": "uint256" }
                    ],
                    "name": "transfer",
                    "payable": false
                },
                "contractInputsValues": {
                    "to": "0x7c68c42De679ffB0f16216154C996C354cF1161B",
                    "amount": "1000"
                }
            }
        ]
    }"#;

    #[test]
    fn parses_transaction_builder_export() {
        let batch: TransactionBatch = serde_json::from_str(TX_BUILDER_FILE).unwrap();
        assert_eq!(batch.chain_id().unwrap(), 1);
        assert_eq!(batch.transactions.len(), 1);

        let tx = &batch.transactions[0];
        assert_eq!(tx.contract_method.as_ref().unwrap().name, "transfer");
        assert_eq!(tx.contract_inputs_values.as_ref().unwrap()["amount"], "1000");
        assert!(tx.data.is_none());

        // exports without encoded data are not executable as-is
        assert_eq!(batch.validate_structure(), Err(BatchError::MissingData(0)));
    }

    #[test]
    fn serializes_camel_case_fields() {
        let tx = BatchTransaction::new(
            address!("ba100000625a3754423978a60c9317c58a424e3D"),
            U256::ZERO,
            bytes!("a9059cbb"),
        );
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["to"], "0xba100000625a3754423978a60c9317c58a424e3D");
        assert_eq!(json["value"], "0");
        assert_eq!(json["data"], "0xa9059cbb");
        assert!(json.get("contractMethod").is_none());
    }

    #[test]
    fn value_defaults_to_zero_when_missing() {
        let tx: BatchTransaction = serde_json::from_str(
            r#"{ "to": "0xba100000625a3754423978a60c9317c58a424e3D", "data": "0x01" }"#,
        )
        .unwrap();
        assert_eq!(tx.value, "0");
    }

    #[test]
    fn structure_rejects_hand_edited_mistakes() {
        let mut batch: TransactionBatch = serde_json::from_str(TX_BUILDER_FILE).unwrap();
        batch.transactions[0].data = Some(bytes!("a9059cbb"));
        assert_eq!(batch.validate_structure(), Ok(()));

        batch.transactions[0].value = "1.5".to_string();
        assert!(matches!(batch.validate_structure(), Err(BatchError::InvalidValue(0, _))));

        batch.transactions[0].value = "0".to_string();
        batch.transactions[0].to = "0xnot-an-address".to_string();
        assert!(matches!(batch.validate_structure(), Err(BatchError::InvalidTo(0, _))));

        batch.transactions[0].to = " ".to_string();
        assert_eq!(batch.validate_structure(), Err(BatchError::MissingTo(0)));

        batch.transactions.clear();
        assert_eq!(batch.validate_structure(), Err(BatchError::Empty));

        batch.chain_id = "mainnet".to_string();
        assert!(matches!(batch.validate_structure(), Err(BatchError::InvalidChainId(_))));
    }
}
