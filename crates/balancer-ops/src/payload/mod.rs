//! Payload generation: validated user input in, Safe batch out.
//!
//! Every action is a variant of [`PayloadInput`]. Builders are looked up by [`ActionKind`]
//! in [`actions::BUILDERS`] and return [`EncodedCall`]s in execution order, which
//! [`build_batch`] hands to the batch assembler together with the reviewer summary.

use alloy_primitives::{Address, Bytes, U256};
use clap::ValueEnum;
use safe_multisig::{BatchBuilder, BatchTransaction, TransactionBatch};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::{debug, warn};

use std::str::FromStr;

use crate::{
    address_book::{consts::categories, AddressBook},
    common::Network,
    formatter,
};
use encoder::{AbiTable, EncodeError, EncodedFunction};
use validation::{parse_optional_address, ValidationError};

pub mod actions;
pub mod amount;
pub mod encoder;
pub mod schedule;
pub mod validation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    AddReward,
    SetDistributor,
    Payment,
    EmergencyAction,
    InjectorSchedule,
    SetSwapFee,
}

impl ActionKind {
    /// Multisig key in the address book that executes this kind of payload.
    pub fn default_safe(&self) -> &'static str {
        use crate::address_book::consts::multisigs;

        match self {
            ActionKind::AddReward | ActionKind::SetDistributor => multisigs::LM,
            ActionKind::Payment => multisigs::DAO,
            ActionKind::EmergencyAction => multisigs::EMERGENCY,
            ActionKind::InjectorSchedule => multisigs::MAXI_OMNI,
            ActionKind::SetSwapFee => multisigs::FEES,
        }
    }

    pub fn default_batch_name(&self) -> &'static str {
        match self {
            ActionKind::AddReward => "Add Reward Token",
            ActionKind::SetDistributor => "Set Reward Distributor",
            ActionKind::Payment => "Token Payment",
            ActionKind::EmergencyAction => "Emergency Pool Actions",
            ActionKind::InjectorSchedule => "Injector Schedule",
            ActionKind::SetSwapFee => "Set Swap Fee",
        }
    }
}

#[derive(
    ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum EmergencyActionKind {
    #[value(name = "pause")]
    #[strum(serialize = "pause")]
    #[serde(rename = "pause")]
    Pause,
    #[value(name = "enableRecoveryMode", alias = "recovery-mode")]
    #[strum(serialize = "enableRecoveryMode")]
    #[serde(rename = "enableRecoveryMode")]
    EnableRecoveryMode,
}

#[derive(
    ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PoolVersion {
    #[default]
    V2,
    V3,
}

/// Gauge, reward token and distributor, as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardInput {
    pub gauge: String,
    pub token: String,
    pub distributor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub token: String,
    pub decimals: u8,
    pub amount: String,
    pub recipient: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyInput {
    pub pool: String,
    pub actions: Vec<EmergencyActionKind>,
    #[serde(default)]
    pub pool_version: PoolVersion,
}

/// One gauge entry of an injector schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub gauge: String,
    pub amount_per_period: String,
    pub max_periods: String,
    /// Unix seconds, `0` to start on the next period.
    #[serde(default)]
    pub do_not_start_before: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectorInput {
    /// Injector address, or its key under `maxiKeepers/gaugeRewardsInjectors`.
    pub injector: String,
    pub decimals: u8,
    #[serde(default)]
    pub recipients: Vec<ScheduleEntry>,
    #[serde(default)]
    pub remove: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapFeeInput {
    pub pool: String,
    /// Percent, so `0.3` is a 0.3% fee.
    pub fee_percentage: String,
    #[serde(default)]
    pub pool_version: PoolVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum PayloadInput {
    AddReward(RewardInput),
    SetDistributor(RewardInput),
    Payment(PaymentInput),
    EmergencyAction(EmergencyInput),
    InjectorSchedule(InjectorInput),
    SetSwapFee(SwapFeeInput),
}

impl PayloadInput {
    pub fn kind(&self) -> ActionKind {
        match self {
            PayloadInput::AddReward(_) => ActionKind::AddReward,
            PayloadInput::SetDistributor(_) => ActionKind::SetDistributor,
            PayloadInput::Payment(_) => ActionKind::Payment,
            PayloadInput::EmergencyAction(_) => ActionKind::EmergencyAction,
            PayloadInput::InjectorSchedule(_) => ActionKind::InjectorSchedule,
            PayloadInput::SetSwapFee(_) => ActionKind::SetSwapFee,
        }
    }
}

/// One on-chain call of a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCall {
    pub to: Address,
    pub value: U256,
    pub function: EncodedFunction,
}

impl EncodedCall {
    pub fn data(&self) -> &Bytes {
        &self.function.data
    }

    pub fn into_batch_transaction(self) -> BatchTransaction {
        let method = self.function.contract_method();
        let values = self.function.inputs_values();
        BatchTransaction::new(self.to, self.value, self.function.data).with_method(method, values)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Encoding(#[from] EncodeError),
    #[error("Builder for {expected} was given a {got} payload")]
    Mismatch { expected: ActionKind, got: ActionKind },
    #[error("No builder registered for {0}")]
    Unsupported(ActionKind),
}

/// What every builder needs besides its input.
#[derive(Debug, Clone)]
pub struct BuildContext<'a> {
    pub book: &'a AddressBook,
    pub network: Network,
    pub abi: AbiTable,
}

impl<'a> BuildContext<'a> {
    pub fn new(book: &'a AddressBook, network: Network) -> Result<Self, PayloadError> {
        Ok(Self { book, network, abi: AbiTable::balancer()? })
    }

    /// Address book lookup that keeps the silent-miss contract: a missing entry becomes the
    /// zero address so the batch still assembles, and the miss is logged.
    pub fn resolve_or_placeholder(&self, category: &str, subcategory: Option<&str>) -> Address {
        let resolved = self.book.resolve(self.network.as_str(), category, subcategory);
        self.placeholder_unless_valid(&resolved, category, subcategory.unwrap_or_default())
    }

    pub fn resolve_nested_or_placeholder(
        &self,
        category: &str,
        subcategory: &str,
        key: &str,
    ) -> Address {
        let resolved = self.book.resolve_nested(self.network.as_str(), category, subcategory, key);
        self.placeholder_unless_valid(&resolved, category, &format!("{subcategory}/{key}"))
    }

    fn placeholder_unless_valid(&self, resolved: &str, category: &str, path: &str) -> Address {
        match Address::from_str(resolved) {
            Ok(address) => {
                debug!(network = %self.network, category, path, %address, "resolved address");
                address
            }
            Err(_) => {
                warn!(
                    network = %self.network,
                    category,
                    path,
                    "address book has no usable entry, using the zero address as a placeholder"
                );
                Address::ZERO
            }
        }
    }

    pub fn multisig(&self, name: &str) -> Address {
        self.resolve_or_placeholder(categories::MULTISIGS, Some(name))
    }

    pub fn encode(
        &self,
        to: Address,
        function: &str,
        args: &[String],
    ) -> Result<EncodedCall, PayloadError> {
        let function = self.abi.encode(function, args)?;
        Ok(EncodedCall { to, value: U256::ZERO, function })
    }
}

/// Batch metadata that does not come from the payload itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Overrides the default multisig of the action.
    pub safe: Option<String>,
    /// Signer proposing the batch, recorded as `createdFromOwnerAddress`.
    pub owner: Option<String>,
    pub name: Option<String>,
    /// Unix milliseconds, now when unset.
    pub created_at: Option<i64>,
}

/// Validates and encodes `input`, then assembles the batch with its summary as description.
pub fn build_batch(
    input: &PayloadInput,
    ctx: &BuildContext<'_>,
    options: &BatchOptions,
) -> Result<TransactionBatch, PayloadError> {
    let kind = input.kind();
    let calls = actions::build_calls(input, ctx)?;

    let safe = match parse_optional_address("safe", options.safe.as_deref())? {
        Some(safe) => safe,
        None => ctx.multisig(kind.default_safe()),
    };

    let mut builder = BatchBuilder::new(ctx.network.chain_id())
        .name(options.name.clone().unwrap_or_else(|| kind.default_batch_name().to_string()))
        .description(formatter::describe(input))
        .safe(safe)
        .extend(calls.into_iter().map(EncodedCall::into_batch_transaction));

    if let Some(owner) = parse_optional_address("owner", options.owner.as_deref())? {
        builder = builder.owner(owner);
    }
    if let Some(created_at) = options.created_at {
        builder = builder.created_at(created_at);
    }

    let batch = builder.build();
    debug!(action = %kind, transactions = batch.transactions.len(), "batch assembled");

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_book::tests::sample_book;

    #[test]
    fn payload_input_json() {
        let input: PayloadInput = serde_json::from_str(
            r#"{
                "action": "emergency-action",
                "pool": "0x1",
                "actions": ["pause", "enableRecoveryMode"],
                "poolVersion": "v3"
            }"#,
        )
        .unwrap();

        assert_eq!(input.kind(), ActionKind::EmergencyAction);
        assert_eq!(
            input,
            PayloadInput::EmergencyAction(EmergencyInput {
                pool: "0x1".to_string(),
                actions: vec![EmergencyActionKind::Pause, EmergencyActionKind::EnableRecoveryMode],
                pool_version: PoolVersion::V3,
            })
        );

        let json = serde_json::to_value(PayloadInput::SetSwapFee(SwapFeeInput::default())).unwrap();
        assert_eq!(json["action"], "set-swap-fee");
        assert_eq!(json["poolVersion"], "v2");
    }

    #[test]
    fn missing_entries_become_placeholders() {
        let book = sample_book();
        let ctx = BuildContext::new(&book, Network::Arbitrum).unwrap();

        assert_ne!(ctx.multisig("lm"), Address::ZERO);
        assert_eq!(ctx.multisig("dao"), Address::ZERO);
        assert_eq!(ctx.resolve_or_placeholder("not-a-category", None), Address::ZERO);
    }

    #[test]
    fn safe_override_and_default() {
        let book = sample_book();
        let ctx = BuildContext::new(&book, Network::Mainnet).unwrap();
        let input = PayloadInput::Payment(PaymentInput {
            token: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string(),
            decimals: 6,
            amount: "1".to_string(),
            recipient: "0x7c68c42De679ffB0f16216154C996C354cF1161B".to_string(),
        });

        let batch = build_batch(&input, &ctx, &BatchOptions::default()).unwrap();
        assert_eq!(batch.meta.created_from_safe_address, ctx.multisig("dao").to_checksum(None));
        assert_eq!(batch.meta.name, "Token Payment");
        assert_eq!(batch.chain_id, "1");

        let options = BatchOptions {
            safe: Some("0x9ff471F9f98F42E5151C7855fD1b5aa906b1AF7e".to_string()),
            owner: Some("0x4444444444444444444444444444444444444444".to_string()),
            name: Some("USDC grant".to_string()),
            created_at: Some(1_700_000_000_000),
        };
        let batch = build_batch(&input, &ctx, &options).unwrap();
        assert_eq!(
            batch.meta.created_from_safe_address,
            "0x9ff471F9f98F42E5151C7855fD1b5aa906b1AF7e"
        );
        assert_eq!(batch.meta.name, "USDC grant");
        assert_eq!(
            batch.meta.created_from_owner_address,
            "0x4444444444444444444444444444444444444444"
        );
        assert_eq!(batch.created_at, 1_700_000_000_000);

        let options = BatchOptions { safe: Some("not-a-safe".to_string()), ..Default::default() };
        assert!(matches!(
            build_batch(&input, &ctx, &options),
            Err(PayloadError::Validation(ValidationError::InvalidAddress { field: "safe", .. }))
        ));
    }
}
