//! End-to-end payload scenarios: input strings in, batch JSON out, call data decoded back.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{address, hex, Address, U256};
use quickcheck_macros::quickcheck;
use safe_multisig::TransactionBatch;
use strum::IntoEnumIterator;

use crate::{
    address_book::{
        consts::{categories, multisigs},
        tests::sample_book,
        AddressBook,
    },
    common::Network,
    contracts::functions,
    payload::{
        actions::builder_for, build_batch, encoder::AbiTable, ActionKind, BatchOptions,
        BuildContext, EmergencyActionKind, EmergencyInput, InjectorInput, PayloadInput,
        PaymentInput, PoolVersion, RewardInput, ScheduleEntry, SwapFeeInput,
    },
};

const GAUGE: &str = "0x1111111111111111111111111111111111111111";
const TOKEN: &str = "0xba100000625a3754423978a60c9317c58a424e3D";
const DIST: &str = "0x4444444444444444444444444444444444444444";
const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
const POOL: &str = "0x5555555555555555555555555555555555555555";

const ENTRYPOINT: Address = address!("f5decdb1f3d1ee384908fbe16d2f0348ae43a9ea");

fn batch_for(book: &AddressBook, network: Network, input: &PayloadInput) -> TransactionBatch {
    let ctx = BuildContext::new(book, network).unwrap();
    build_batch(input, &ctx, &BatchOptions::default()).unwrap()
}

fn add_reward() -> PayloadInput {
    PayloadInput::AddReward(RewardInput {
        gauge: GAUGE.into(),
        token: TOKEN.into(),
        distributor: DIST.into(),
    })
}

/// One input per action kind.
fn every_action() -> Vec<PayloadInput> {
    vec![
        add_reward(),
        PayloadInput::SetDistributor(RewardInput {
            gauge: GAUGE.into(),
            token: TOKEN.into(),
            distributor: DIST.into(),
        }),
        PayloadInput::Payment(PaymentInput {
            token: USDC.into(),
            decimals: 6,
            amount: "100.5".into(),
            recipient: DIST.into(),
        }),
        PayloadInput::EmergencyAction(EmergencyInput {
            pool: POOL.into(),
            actions: vec![EmergencyActionKind::Pause, EmergencyActionKind::EnableRecoveryMode],
            pool_version: PoolVersion::V2,
        }),
        PayloadInput::InjectorSchedule(InjectorInput {
            injector: "usdc".into(),
            decimals: 6,
            recipients: vec![ScheduleEntry {
                gauge: GAUGE.into(),
                amount_per_period: "1000".into(),
                max_periods: "4".into(),
                do_not_start_before: "0".into(),
            }],
            remove: vec![POOL.into()],
        }),
        PayloadInput::SetSwapFee(SwapFeeInput {
            pool: POOL.into(),
            fee_percentage: "0.3".into(),
            pool_version: PoolVersion::V3,
        }),
    ]
}

#[test]
fn add_reward_targets_entrypoint() {
    let book = sample_book();
    let batch = batch_for(&book, Network::Mainnet, &add_reward());
    let abi = AbiTable::balancer().unwrap();

    assert_eq!(batch.chain_id, "1");
    assert_eq!(batch.transactions.len(), 1);
    assert_eq!(batch.transactions[0].to_address(), Some(ENTRYPOINT));
    assert_eq!(
        batch.meta.created_from_safe_address,
        book.resolve("mainnet", categories::MULTISIGS, Some(multisigs::LM))
    );

    let outer = abi.decode(batch.transactions[0].data.as_ref().unwrap()).unwrap();
    assert!(outer.name() == functions::PERFORM_ACTION);
    assert_eq!(outer.value("target"), Some(&DynSolValue::Address(GAUGE.parse().unwrap())));

    let Some(DynSolValue::Bytes(inner)) = outer.value("data") else {
        panic!("performAction without data");
    };
    let inner = abi.decode(inner).unwrap();
    assert!(inner.matches(functions::ADD_REWARD, &[TOKEN.into(), DIST.into()]));
}

#[test]
fn payment_amount_is_exact() {
    let book = sample_book();
    let input = &every_action()[2];
    let batch = batch_for(&book, Network::Mainnet, input);
    let abi = AbiTable::balancer().unwrap();

    let transfer = abi.decode(batch.transactions[0].data.as_ref().unwrap()).unwrap();
    assert_eq!(transfer.value("amount"), Some(&DynSolValue::Uint(U256::from(100_500_000u64), 256)));
    assert_eq!(transfer.args()[1], "100500000");

    let values = batch.transactions[0].contract_inputs_values.as_ref().unwrap();
    assert_eq!(values["amount"], "100500000");
}

#[test]
fn missing_entry_still_assembles() {
    let book = sample_book();

    assert_eq!(book.resolve("gnosis", categories::AUTHORIZER_ADAPTOR_ENTRYPOINT, None), "");
    assert_eq!(book.resolve("arbitrum", categories::MULTISIGS, Some(multisigs::DAO)), "");

    let batch = batch_for(&book, Network::Gnosis, &add_reward());
    assert_eq!(batch.chain_id, "100");
    assert_eq!(batch.transactions[0].to_address(), Some(Address::ZERO));
    assert!(!batch.transactions[0].to.is_empty());
    assert!(batch.validate_structure().is_ok());
}

#[test]
fn emergency_keeps_selected_order() {
    let book = sample_book();
    let batch = batch_for(&book, Network::Mainnet, &every_action()[3]);
    let abi = AbiTable::balancer().unwrap();
    let pool: Address = POOL.parse().unwrap();

    assert_eq!(batch.transactions.len(), 2);
    assert!(batch.transactions.iter().all(|tx| tx.to_address() == Some(pool)));

    let names: Vec<String> = batch
        .transactions
        .iter()
        .map(|tx| abi.decode(tx.data.as_ref().unwrap()).unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec![functions::PAUSE, functions::ENABLE_RECOVERY_MODE]);
}

#[test]
fn every_batch_is_structurally_valid() {
    let book = sample_book();

    for input in every_action() {
        let batch = batch_for(&book, Network::Mainnet, &input);
        assert!(batch.validate_structure().is_ok(), "{:?}", input.kind());

        let json = serde_json::to_value(&batch).unwrap();
        for tx in json["transactions"].as_array().unwrap() {
            assert!(!tx["to"].as_str().unwrap().is_empty());
            assert!(tx["data"].as_str().unwrap().starts_with("0x"));
            assert_eq!(tx["value"], "0");
        }
        assert_eq!(json["meta"]["txBuilderVersion"], "1.18.0");
        assert!(!json["meta"]["description"].as_str().unwrap().is_empty());
    }
}

#[test]
fn every_action_round_trips() {
    let book = sample_book();
    let abi = AbiTable::balancer().unwrap();

    for input in every_action() {
        let batch = batch_for(&book, Network::Mainnet, &input);
        for tx in &batch.transactions {
            let decoded = abi.decode(tx.data.as_ref().unwrap()).unwrap();
            let method = tx.contract_method.as_ref().unwrap();
            let args: Vec<String> =
                tx.contract_inputs_values.as_ref().unwrap().values().cloned().collect();

            assert_eq!(decoded.name(), method.name);
            assert!(decoded.matches(&method.name, &args), "{} did not round trip", method.name);
        }
    }
}

#[test]
fn every_action_kind_is_covered() {
    let covered: Vec<ActionKind> = every_action().iter().map(PayloadInput::kind).collect();
    for kind in ActionKind::iter() {
        assert!(builder_for(kind).is_some());
        assert!(covered.contains(&kind), "{kind} has no scenario");
    }
}

#[test]
fn batch_survives_a_json_round_trip() {
    let book = sample_book();
    let ctx = BuildContext::new(&book, Network::Mainnet).unwrap();
    let options = BatchOptions { created_at: Some(1_718_000_000_000), ..Default::default() };
    let batch = build_batch(&every_action()[4], &ctx, &options).unwrap();

    let parsed: TransactionBatch = serde_json::from_str(&batch.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, batch);
    assert_eq!(parsed.created_at, 1_718_000_000_000);
}

#[quickcheck]
fn payment_encoding_is_idempotent(whole: u32, cents: u8) -> bool {
    let book = sample_book();
    let ctx = BuildContext::new(&book, Network::Mainnet).unwrap();
    let input = PayloadInput::Payment(PaymentInput {
        token: USDC.into(),
        decimals: 6,
        amount: format!("{whole}.{:02}", cents % 100),
        recipient: DIST.into(),
    });
    let options = BatchOptions { created_at: Some(0), ..Default::default() };

    let first = build_batch(&input, &ctx, &options).unwrap();
    let second = build_batch(&input, &ctx, &options).unwrap();

    let expected = U256::from(whole) * U256::from(1_000_000u64)
        + U256::from(cents % 100) * U256::from(10_000u64);
    let data = first.transactions[0].data.as_ref().unwrap();

    first == second
        && data[36..68] == expected.to_be_bytes::<32>()
        && hex::encode(data).len() == 136
}
