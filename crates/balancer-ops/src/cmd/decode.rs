use alloy_dyn_abi::DynSolValue;
use alloy_primitives::Address;
use clap::Parser;
use colored::Colorize;
use ops_cli_runner::CliContext;
use safe_multisig::{BatchTransaction, TransactionBatch};
use tracing::warn;

use std::path::PathBuf;

use crate::{
    address_book::AddressBook,
    cmd::utils::load_address_book,
    common::{AddressBookCliArgs, DirsCliArgs, Network},
    contracts::functions,
    payload::encoder::{AbiTable, DecodedCall},
    utils::{load_from_json_file, print_warning_message},
};

#[derive(Debug, Parser)]
#[clap(about = "Decode the transactions of a batch file and label known addresses.")]
pub struct DecodeCommand {
    #[arg(value_name = "FILE", help = "The batch JSON file.")]
    file: PathBuf,

    #[arg(long, value_enum, help = "Network for address labels. Defaults to the batch chain id.")]
    network: Option<Network>,

    #[arg(long, help = "Do not load the address book, print raw addresses only.")]
    offline: bool,

    #[clap(flatten)]
    book: AddressBookCliArgs,

    #[clap(flatten)]
    dirs: DirsCliArgs,
}

impl DecodeCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { file, network, offline, book, dirs } = self;

        let batch: TransactionBatch = load_from_json_file(&file).map_err(|e| eyre::eyre!(e))?;
        if let Err(e) = batch.validate_structure() {
            print_warning_message(&format!("Batch is malformed: {e}"));
        }

        let network = match network {
            Some(network) => network,
            None => Network::from_chain_id(batch.chain_id()?)?,
        };

        let book = if offline {
            AddressBook::default()
        } else {
            match load_address_book(&book, &dirs).await {
                Ok(book) => book,
                Err(e) => {
                    warn!(error = %e, "decoding without address labels");
                    print_warning_message(&format!("Address book unavailable, no labels: {e}"));
                    AddressBook::default()
                }
            }
        };

        let abi = AbiTable::balancer()?;

        println!("{}", format!("{} on {network}", batch.meta.name).bright_cyan());
        if !batch.meta.description.is_empty() {
            println!("{}", batch.meta.description);
        }
        if !batch.meta.created_from_safe_address.is_empty() {
            println!("Safe: {}", label(&book, network, &batch.meta.created_from_safe_address));
        }
        println!();

        for (i, tx) in batch.transactions.iter().enumerate() {
            for line in describe_transaction(&abi, &book, network, i, tx) {
                println!("{line}");
            }
        }

        Ok(())
    }
}

fn label(book: &AddressBook, network: Network, address: &str) -> String {
    match address.trim().parse::<Address>() {
        Ok(parsed) => match book.reverse_lookup(network.as_str(), parsed) {
            Some(path) => format!("{} ({path})", parsed.to_checksum(None)),
            None => parsed.to_checksum(None),
        },
        Err(_) => format!("{address:?}"),
    }
}

fn collect_addresses(values: &[DynSolValue], out: &mut Vec<Address>) {
    for value in values {
        match value {
            DynSolValue::Address(address) if !out.contains(address) => out.push(*address),
            DynSolValue::Array(inner)
            | DynSolValue::FixedArray(inner)
            | DynSolValue::Tuple(inner) => collect_addresses(inner, out),
            _ => {}
        }
    }
}

/// One transaction as text: target, decoded call, the wrapped call of `performAction`,
/// labels of known addresses, and a warning when the Transaction Builder fields disagree
/// with the call data.
pub(crate) fn describe_transaction(
    abi: &AbiTable,
    book: &AddressBook,
    network: Network,
    index: usize,
    tx: &BatchTransaction,
) -> Vec<String> {
    let mut lines =
        vec![format!("#{index} to {} value {}", label(book, network, &tx.to), tx.value)];

    let Some(data) = tx.data.as_ref().filter(|data| !data.is_empty()) else {
        lines.push("   (no call data)".to_string());
        return lines;
    };

    let call = match abi.decode(data) {
        Ok(call) => call,
        Err(e) => {
            lines.push(format!("   undecodable: {e}"));
            return lines;
        }
    };
    lines.push(format!("   {}", call.display()));

    let mut addresses = Vec::new();
    collect_addresses(&call.values, &mut addresses);

    if call.name() == functions::PERFORM_ACTION {
        if let Some(DynSolValue::Bytes(inner)) = call.value("data") {
            match abi.decode(inner) {
                Ok(inner) => {
                    lines.push(format!("     -> {}", inner.display()));
                    collect_addresses(&inner.values, &mut addresses);
                }
                Err(e) => lines.push(format!("     -> undecodable: {e}")),
            }
        }
    }

    for address in addresses {
        if let Some(path) = book.reverse_lookup(network.as_str(), address) {
            lines.push(format!("   {} = {path}", address.to_checksum(None)));
        }
    }

    if !builder_fields_match(tx, &call) {
        lines.push(
            "   ⚠️  contractMethod/contractInputsValues do not match the call data".to_string(),
        );
    }

    lines
}

fn builder_fields_match(tx: &BatchTransaction, call: &DecodedCall) -> bool {
    match (&tx.contract_method, &tx.contract_inputs_values) {
        (Some(method), Some(values)) => {
            let args: Vec<String> = values.values().cloned().collect();
            method.name == call.name() && call.matches(call.name(), &args)
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        address_book::tests::sample_book,
        payload::{build_batch, BatchOptions, BuildContext, PayloadInput, RewardInput},
    };

    const GAUGE: &str = "0x1111111111111111111111111111111111111111";
    const TOKEN: &str = "0xba100000625a3754423978a60c9317c58a424e3D";

    fn add_reward_batch(book: &AddressBook) -> TransactionBatch {
        let ctx = BuildContext::new(book, Network::Mainnet).unwrap();
        let input = PayloadInput::AddReward(RewardInput {
            gauge: GAUGE.into(),
            token: TOKEN.into(),
            distributor: "0xc38c5f97B34E175FFd35407fc91a937300E33860".into(),
        });
        build_batch(&input, &ctx, &BatchOptions::default()).unwrap()
    }

    #[test]
    fn decodes_wrapped_calls_with_labels() {
        let book = sample_book();
        let batch = add_reward_batch(&book);
        let abi = AbiTable::balancer().unwrap();

        let lines = describe_transaction(&abi, &book, Network::Mainnet, 0, &batch.transactions[0]);

        assert!(lines[0].starts_with("#0 to 0x"));
        assert!(lines[0]
            .contains("(20221124-authorizer-adaptor-entrypoint.AuthorizerAdaptorEntrypoint)"));
        assert!(lines[1].starts_with(&format!("   performAction({GAUGE}, 0x")));
        assert!(lines.iter().any(|l| l.starts_with(&format!("     -> add_reward({TOKEN}, "))));
        assert!(lines.iter().any(|l| l.ends_with("= multisigs.lm")));
        assert!(!lines.iter().any(|l| l.contains("do not match")));
    }

    #[test]
    fn flags_hand_edited_builder_fields() {
        let book = sample_book();
        let mut batch = add_reward_batch(&book);
        let abi = AbiTable::balancer().unwrap();

        if let Some(values) = batch.transactions[0].contract_inputs_values.as_mut() {
            values.insert("target".into(), "0x2222222222222222222222222222222222222222".into());
        }

        let lines = describe_transaction(&abi, &book, Network::Mainnet, 0, &batch.transactions[0]);
        assert!(lines.iter().any(|l| l.contains("do not match")));
    }

    #[test]
    fn unknown_data_is_reported() {
        let book = AddressBook::default();
        let abi = AbiTable::balancer().unwrap();
        let tx: BatchTransaction = serde_json::from_str(
            r#"{ "to": "0x1111111111111111111111111111111111111111", "data": "0xdeadbeef" }"#,
        )
        .unwrap();

        let lines = describe_transaction(&abi, &book, Network::Mainnet, 3, &tx);
        assert_eq!(lines[0], "#3 to 0x1111111111111111111111111111111111111111 value 0");
        assert!(lines[1].starts_with("   undecodable: Unknown selector"));
    }
}
