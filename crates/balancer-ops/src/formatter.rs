//! Plain-language summaries of payloads for reviewers.
//!
//! Nothing here fails. Missing or malformed fields are described generically so a summary
//! can always be shown next to whatever the builders produced.

use alloy_primitives::Address;

use std::str::FromStr;

use crate::payload::{
    amount::{format_base_units, to_base_units},
    schedule::{rate_per_second, total_distribution},
    EmergencyActionKind, PayloadInput, ScheduleEntry,
};

/// `0x1234...abcd` for anything that parses as an address, the trimmed input otherwise.
pub fn short_address(value: &str) -> String {
    match Address::from_str(value.trim()) {
        Ok(address) => {
            let checksummed = address.to_checksum(None);
            format!("{}...{}", &checksummed[..6], &checksummed[checksummed.len() - 4..])
        }
        Err(_) => value.trim().to_string(),
    }
}

fn describe_address(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        short_address(value)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn describe(input: &PayloadInput) -> String {
    match input {
        PayloadInput::AddReward(reward) => {
            if [&reward.gauge, &reward.token, &reward.distributor]
                .iter()
                .all(|f| f.trim().is_empty())
            {
                return generic(input);
            }
            format!(
                "Add reward token {} to gauge {}, distributed by {}",
                describe_address(&reward.token, "(unspecified)"),
                describe_address(&reward.gauge, "(unspecified)"),
                describe_address(&reward.distributor, "an unspecified distributor"),
            )
        }
        PayloadInput::SetDistributor(reward) => {
            if [&reward.gauge, &reward.token, &reward.distributor]
                .iter()
                .all(|f| f.trim().is_empty())
            {
                return generic(input);
            }
            format!(
                "Set the distributor of reward token {} on gauge {} to {}",
                describe_address(&reward.token, "(unspecified)"),
                describe_address(&reward.gauge, "(unspecified)"),
                describe_address(&reward.distributor, "an unspecified address"),
            )
        }
        PayloadInput::Payment(payment) => {
            if payment.amount.trim().is_empty() && payment.recipient.trim().is_empty() {
                return generic(input);
            }
            let amount = match to_base_units(&payment.amount, payment.decimals) {
                Ok(base) => format!("{} ({} base units)", payment.amount.trim(), base),
                Err(_) => "an unspecified amount".to_string(),
            };
            format!(
                "Transfer {} of token {} to {}",
                amount,
                describe_address(&payment.token, "(unspecified)"),
                describe_address(&payment.recipient, "an unspecified recipient"),
            )
        }
        PayloadInput::EmergencyAction(emergency) => {
            let pool = describe_address(&emergency.pool, "an unspecified pool");
            if emergency.actions.is_empty() {
                return format!("Emergency actions on {} pool {}", emergency.pool_version, pool);
            }
            let actions = emergency
                .actions
                .iter()
                .map(|action| match action {
                    EmergencyActionKind::Pause => "pause",
                    EmergencyActionKind::EnableRecoveryMode => "enable recovery mode",
                })
                .collect::<Vec<_>>()
                .join(", then ");
            let mut sentence = format!("{actions} on {} pool {pool}", emergency.pool_version);
            if let Some(first) = sentence.get_mut(..1) {
                first.make_ascii_uppercase();
            }
            sentence
        }
        PayloadInput::InjectorSchedule(schedule) => {
            if schedule.recipients.is_empty() && schedule.remove.is_empty() {
                return generic(input);
            }
            let mut parts = Vec::new();
            if !schedule.remove.is_empty() {
                parts.push(format!("remove {}", plural(schedule.remove.len(), "gauge")));
            }
            parts.extend(
                schedule.recipients.iter().map(|entry| describe_entry(entry, schedule.decimals)),
            );
            format!(
                "Configure injector {}: {}",
                describe_address(&schedule.injector, "(unspecified)"),
                parts.join("; ")
            )
        }
        PayloadInput::SetSwapFee(swap_fee) => {
            if swap_fee.pool.trim().is_empty() && swap_fee.fee_percentage.trim().is_empty() {
                return generic(input);
            }
            let fee = match swap_fee.fee_percentage.trim() {
                "" => "an unspecified fee".to_string(),
                fee => format!("{fee}%"),
            };
            format!(
                "Set the swap fee of {} pool {} to {}",
                swap_fee.pool_version,
                describe_address(&swap_fee.pool, "(unspecified)"),
                fee
            )
        }
    }
}

fn describe_entry(entry: &ScheduleEntry, decimals: u8) -> String {
    let gauge = describe_address(&entry.gauge, "an unspecified gauge");
    let periods = entry.max_periods.trim().parse::<u64>().ok();
    let amount = to_base_units(&entry.amount_per_period, decimals).ok();

    let mut text = match (amount, periods) {
        (Some(amount), Some(periods)) => {
            let total = total_distribution(amount, periods)
                .map(|total| format_base_units(total, decimals))
                .unwrap_or_else(|| "overflowing".to_string());
            format!(
                "add gauge {gauge} with {} per week for {} ({total} total, {} per second)",
                format_base_units(amount, decimals),
                plural(periods as usize, "period"),
                format_base_units(rate_per_second(amount), decimals),
            )
        }
        _ => format!("add gauge {gauge} with an unspecified schedule"),
    };

    match entry.do_not_start_before.trim().parse::<u64>() {
        Ok(start) if start > 0 => {
            text.push_str(&format!(", not before {}", format_timestamp(start)))
        }
        _ => {}
    }

    text
}

fn format_timestamp(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|s| chrono::DateTime::from_timestamp(s, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

fn generic(input: &PayloadInput) -> String {
    format!("Generic payload for {}", input.kind())
}
