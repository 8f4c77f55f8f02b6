use dialoguer::{theme::ColorfulTheme, Confirm};
use safe_multisig::{SimulationClient, SimulationOutcome, TransactionBatch};
use tracing::{debug, info, warn};

use std::path::{Path, PathBuf};

use crate::{
    address_book::AddressBook,
    common::{AddressBookCliArgs, DirsCliArgs, Network},
    payload::ActionKind,
    utils::{
        print_error_message, print_loading_until_async, print_success_message,
        print_warning_message, write_to_json_file,
    },
};

/// Loads the address book a command should use.
///
/// An explicit `--address-book` file wins, then the cached copy in the data dir. The book is
/// downloaded when `--refresh-address-book` is set or no cached copy exists yet.
pub async fn load_address_book(
    args: &AddressBookCliArgs,
    dirs: &DirsCliArgs,
) -> eyre::Result<AddressBook> {
    if let Some(path) = &args.address_book {
        return Ok(AddressBook::load(path)?);
    }

    let cached = dirs.address_book_path();
    if cached.exists() && !args.refresh_address_book {
        return Ok(AddressBook::load(&cached)?);
    }

    let book = print_loading_until_async(
        "Downloading address book",
        AddressBook::refresh(&args.address_book_url, &cached),
    )
    .await?;

    Ok(book)
}

/// `<batch-dir>/<network>-<action>-<created_at>.json`
pub fn default_output_path(
    dirs: &DirsCliArgs,
    network: Network,
    kind: ActionKind,
    created_at: i64,
) -> PathBuf {
    dirs.batch_dir().join(format!("{network}-{kind}-{created_at}.json"))
}

/// Asks before replacing an existing file unless `force` is set.
pub fn confirm_overwrite(path: &Path, force: bool) -> eyre::Result<bool> {
    if force || !path.exists() {
        return Ok(true);
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} already exists. Overwrite it?", path.display()))
        .default(false)
        .interact()
        .map_err(|e: dialoguer::Error| match e {
            dialoguer::Error::IO(e) => match e.kind() {
                std::io::ErrorKind::Interrupted => eyre::eyre!("Cancelled by user"),
                _ => e.into(),
            },
        })?;

    Ok(confirmed)
}

/// Writes the batch unless the user declines to overwrite. Returns whether it was written.
pub fn write_batch(batch: &TransactionBatch, path: &Path, force: bool) -> eyre::Result<bool> {
    if !confirm_overwrite(path, force)? {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    write_to_json_file(path, batch, false).map_err(|e| eyre::eyre!(e))?;
    debug!(path = ?path, "batch written");

    Ok(true)
}

/// Runs the simulation and prints its verdict. Never fails: simulation is advisory.
///
/// The service trace, when there is one, is logged at `info` so `-v` shows it.
pub async fn report_simulation(client: &SimulationClient, batch: &TransactionBatch) {
    let result = print_loading_until_async("Simulating batch", client.simulate(batch)).await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, "simulation failed to run");
            print_error_message(&format!("❌ Simulation failed to run: {e}"));
            return;
        }
    };

    match &outcome {
        SimulationOutcome::Passed { .. } => print_success_message("✅ Simulation passed"),
        SimulationOutcome::Reverted { error, .. } => {
            print_warning_message(&format!("⚠️  Simulation predicts revert: {error}"))
        }
    }
    if let Some(url) = outcome.url() {
        eprintln!("{url}");
    }
    if let Some(trace) = outcome.trace() {
        info!(%trace, "simulation trace");
    }
}

/// Points out transactions whose target is the zero-address placeholder of a missing
/// address book entry.
pub fn warn_on_placeholders(batch: &TransactionBatch) {
    for (i, tx) in batch.transactions.iter().enumerate() {
        if tx.to_address().is_some_and(|to| to.is_zero()) {
            print_warning_message(&format!(
                "Transaction {i} targets the zero address: the address book has no entry for it. \
                 Fix the address before signing."
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Address, Bytes, U256};
    use safe_multisig::{BatchBuilder, BatchTransaction};

    #[test]
    fn output_path_naming() {
        let dirs = DirsCliArgs::with_data_dir("/tmp/ops");
        assert_eq!(
            default_output_path(&dirs, Network::Arbitrum, ActionKind::AddReward, 1_700_000_000_000),
            PathBuf::from("/tmp/ops/batches/arbitrum-add-reward-1700000000000.json")
        );
    }

    #[test]
    fn writes_batches_with_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("batch.json");
        let batch = BatchBuilder::new(1)
            .push(BatchTransaction::new(
                address!("1111111111111111111111111111111111111111"),
                U256::ZERO,
                Bytes::from_static(&[0x84, 0x56, 0xcb, 0x59]),
            ))
            .build();

        assert!(write_batch(&batch, &path, false).unwrap());
        assert!(write_batch(&batch, &path, true).unwrap());

        let loaded: TransactionBatch = crate::utils::load_from_json_file(&path).unwrap();
        assert_eq!(loaded, batch);

        let placeholder = BatchBuilder::new(1)
            .push(BatchTransaction::new(Address::ZERO, U256::ZERO, Bytes::from_static(&[1])))
            .build();
        warn_on_placeholders(&placeholder);
    }

    #[tokio::test]
    async fn reports_simulation_with_trace() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{ "success": false, "error": "BAL#401", "trace": { "calls": [] } }"#)
            .create_async()
            .await;

        let client = SimulationClient::new(url::Url::parse(&server.url()).unwrap(), None);
        let batch = BatchBuilder::new(1)
            .push(BatchTransaction::new(Address::ZERO, U256::ZERO, Bytes::from_static(&[1])))
            .build();

        report_simulation(&client, &batch).await;
        mock.assert_async().await;
    }
}
