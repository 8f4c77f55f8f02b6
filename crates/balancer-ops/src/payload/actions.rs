//! One builder per action, dispatched through [`BUILDERS`].
//!
//! Builders validate every field before encoding anything, so a payload either comes out
//! whole or not at all.

use alloy_primitives::{hex, Address, U256};
use indexmap::IndexMap;
use tracing::info;

use std::{collections::HashSet, str::FromStr};

use super::{
    amount::percentage_to_fixed18,
    validation::{parse_address, parse_amount, parse_uint, required, uint_max, ValidationError},
    ActionKind, BuildContext, EmergencyActionKind, EncodedCall, PayloadError, PayloadInput,
    PoolVersion,
};
use crate::{
    address_book::consts::{categories, contracts, keepers},
    contracts::functions,
};

pub type BuildFn = fn(&PayloadInput, &BuildContext<'_>) -> Result<Vec<EncodedCall>, PayloadError>;

pub const BUILDERS: &[(ActionKind, BuildFn)] = &[
    (ActionKind::AddReward, add_reward as BuildFn),
    (ActionKind::SetDistributor, set_distributor as BuildFn),
    (ActionKind::Payment, payment as BuildFn),
    (ActionKind::EmergencyAction, emergency_action as BuildFn),
    (ActionKind::InjectorSchedule, injector_schedule as BuildFn),
    (ActionKind::SetSwapFee, set_swap_fee as BuildFn),
];

pub fn builder_for(kind: ActionKind) -> Option<BuildFn> {
    BUILDERS.iter().find(|(k, _)| *k == kind).map(|(_, build)| *build)
}

/// Calls of `input` in execution order.
pub fn build_calls(
    input: &PayloadInput,
    ctx: &BuildContext<'_>,
) -> Result<Vec<EncodedCall>, PayloadError> {
    let kind = input.kind();
    let build = builder_for(kind).ok_or(PayloadError::Unsupported(kind))?;

    let calls = build(input, ctx)?;
    info!(action = %kind, network = %ctx.network, calls = calls.len(), "payload encoded");

    Ok(calls)
}

fn mismatch(expected: ActionKind, input: &PayloadInput) -> PayloadError {
    PayloadError::Mismatch { expected, got: input.kind() }
}

fn checksummed(address: Address) -> String {
    address.to_checksum(None)
}

fn address_array(addresses: &[Address]) -> String {
    format!("[{}]", addresses.iter().map(|a| checksummed(*a)).collect::<Vec<_>>().join(", "))
}

/// `performAction(gauge, add_reward(token, distributor))` through the Authorizer Adaptor
/// Entrypoint, which is the admin of every gauge.
fn add_reward(
    input: &PayloadInput,
    ctx: &BuildContext<'_>,
) -> Result<Vec<EncodedCall>, PayloadError> {
    let PayloadInput::AddReward(reward) = input else {
        return Err(mismatch(ActionKind::AddReward, input));
    };

    let gauge = parse_address("gauge", &reward.gauge)?;
    let token = parse_address("token", &reward.token)?;
    let distributor = parse_address("distributor", &reward.distributor)?;

    let inner =
        ctx.abi.encode(functions::ADD_REWARD, &[checksummed(token), checksummed(distributor)])?;
    let entrypoint = ctx.resolve_or_placeholder(
        categories::AUTHORIZER_ADAPTOR_ENTRYPOINT,
        Some(contracts::AUTHORIZER_ADAPTOR_ENTRYPOINT),
    );

    Ok(vec![ctx.encode(
        entrypoint,
        functions::PERFORM_ACTION,
        &[checksummed(gauge), hex::encode_prefixed(&inner.data)],
    )?])
}

/// The current distributor calls the gauge directly.
fn set_distributor(
    input: &PayloadInput,
    ctx: &BuildContext<'_>,
) -> Result<Vec<EncodedCall>, PayloadError> {
    let PayloadInput::SetDistributor(reward) = input else {
        return Err(mismatch(ActionKind::SetDistributor, input));
    };

    let gauge = parse_address("gauge", &reward.gauge)?;
    let token = parse_address("token", &reward.token)?;
    let distributor = parse_address("distributor", &reward.distributor)?;

    Ok(vec![ctx.encode(
        gauge,
        functions::SET_REWARD_DISTRIBUTOR,
        &[checksummed(token), checksummed(distributor)],
    )?])
}

fn payment(input: &PayloadInput, ctx: &BuildContext<'_>) -> Result<Vec<EncodedCall>, PayloadError> {
    let PayloadInput::Payment(payment) = input else {
        return Err(mismatch(ActionKind::Payment, input));
    };

    let token = parse_address("token", &payment.token)?;
    let recipient = parse_address("recipient", &payment.recipient)?;
    let amount = parse_amount("amount", &payment.amount, payment.decimals)?;

    Ok(vec![ctx.encode(token, functions::TRANSFER, &[checksummed(recipient), amount.to_string()])?])
}

/// v2 pools are paused on the pool itself, v3 pools through the vault.
fn emergency_action(
    input: &PayloadInput,
    ctx: &BuildContext<'_>,
) -> Result<Vec<EncodedCall>, PayloadError> {
    let PayloadInput::EmergencyAction(emergency) = input else {
        return Err(mismatch(ActionKind::EmergencyAction, input));
    };

    let pool = parse_address("pool", &emergency.pool)?;

    if emergency.actions.is_empty() {
        return Err(ValidationError::NoActions.into());
    }
    let mut seen = HashSet::new();
    for action in &emergency.actions {
        if !seen.insert(action) {
            return Err(ValidationError::DuplicateAction(action.to_string()).into());
        }
    }

    let pool_arg = checksummed(pool);
    match emergency.pool_version {
        PoolVersion::V2 => emergency
            .actions
            .iter()
            .map(|action| {
                let function = match action {
                    EmergencyActionKind::Pause => functions::PAUSE,
                    EmergencyActionKind::EnableRecoveryMode => functions::ENABLE_RECOVERY_MODE,
                };
                ctx.encode(pool, function, &[])
            })
            .collect(),
        PoolVersion::V3 => {
            let vault = ctx.resolve_or_placeholder(categories::V3_VAULT, Some(contracts::VAULT));
            emergency
                .actions
                .iter()
                .map(|action| {
                    let function = match action {
                        EmergencyActionKind::Pause => functions::PAUSE_POOL,
                        EmergencyActionKind::EnableRecoveryMode => functions::ENABLE_RECOVERY_MODE,
                    };
                    ctx.encode(vault, function, &[pool_arg.clone()])
                })
                .collect()
        }
    }
}

/// Removals first so a gauge can be re-added with a new schedule in the same batch. Gauges
/// sharing amount, periods and start time go into one `addRecipients` call.
fn injector_schedule(
    input: &PayloadInput,
    ctx: &BuildContext<'_>,
) -> Result<Vec<EncodedCall>, PayloadError> {
    let PayloadInput::InjectorSchedule(schedule) = input else {
        return Err(mismatch(ActionKind::InjectorSchedule, input));
    };

    let injector_ref = required("injector", &schedule.injector)?;
    if schedule.recipients.is_empty() && schedule.remove.is_empty() {
        return Err(ValidationError::EmptySchedule.into());
    }

    let remove = schedule
        .remove
        .iter()
        .map(|gauge| parse_address("remove", gauge))
        .collect::<Result<Vec<_>, _>>()?;

    let max_periods = uint_max(8);
    let max_start = uint_max(56);
    let mut groups: IndexMap<(U256, U256, U256), Vec<Address>> = IndexMap::new();
    let mut seen = HashSet::new();

    for entry in &schedule.recipients {
        let gauge = parse_address("gauge", &entry.gauge)?;
        if !seen.insert(gauge) {
            return Err(ValidationError::DuplicateRecipient(gauge).into());
        }

        let amount = parse_amount("amountPerPeriod", &entry.amount_per_period, schedule.decimals)?;
        let periods = parse_uint("maxPeriods", &entry.max_periods, U256::from(1), max_periods)?;
        let start = match entry.do_not_start_before.trim() {
            "" => U256::ZERO,
            start => parse_uint("doNotStartBeforeTimestamp", start, U256::ZERO, max_start)?,
        };

        groups.entry((amount, periods, start)).or_default().push(gauge);
    }

    let injector = match Address::from_str(injector_ref) {
        Ok(injector) => injector,
        Err(_) => ctx.resolve_nested_or_placeholder(
            categories::MAXI_KEEPERS,
            keepers::GAUGE_REWARDS_INJECTORS,
            injector_ref,
        ),
    };

    let mut calls = Vec::with_capacity(groups.len() + 1);
    if !remove.is_empty() {
        calls.push(ctx.encode(injector, functions::REMOVE_RECIPIENTS, &[address_array(&remove)])?);
    }
    for ((amount, periods, start), gauges) in &groups {
        calls.push(ctx.encode(
            injector,
            functions::ADD_RECIPIENTS,
            &[address_array(gauges), amount.to_string(), periods.to_string(), start.to_string()],
        )?);
    }

    Ok(calls)
}

fn set_swap_fee(
    input: &PayloadInput,
    ctx: &BuildContext<'_>,
) -> Result<Vec<EncodedCall>, PayloadError> {
    let PayloadInput::SetSwapFee(swap_fee) = input else {
        return Err(mismatch(ActionKind::SetSwapFee, input));
    };

    let pool = parse_address("pool", &swap_fee.pool)?;
    let fee_percentage = required("feePercentage", &swap_fee.fee_percentage)?;
    let fee = percentage_to_fixed18(fee_percentage).map_err(|source| {
        ValidationError::InvalidAmount { field: "feePercentage", source }
    })?;

    let one = U256::from(10u64).pow(U256::from(18));
    if fee.is_zero() || fee > one {
        return Err(ValidationError::OutOfRange {
            field: "feePercentage",
            value: fee.to_string(),
            min: U256::from(1),
            max: one,
        }
        .into());
    }

    let call = match swap_fee.pool_version {
        PoolVersion::V2 => {
            ctx.encode(pool, functions::SET_SWAP_FEE_PERCENTAGE, &[fee.to_string()])?
        }
        PoolVersion::V3 => {
            let vault = ctx.resolve_or_placeholder(categories::V3_VAULT, Some(contracts::VAULT));
            ctx.encode(
                vault,
                functions::SET_STATIC_SWAP_FEE_PERCENTAGE,
                &[checksummed(pool), fee.to_string()],
            )?
        }
    };

    Ok(vec![call])
}
