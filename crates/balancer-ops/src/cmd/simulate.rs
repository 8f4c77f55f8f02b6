use clap::Parser;
use ops_cli_runner::CliContext;
use safe_multisig::TransactionBatch;

use std::path::PathBuf;

use crate::{
    cmd::utils::{report_simulation, warn_on_placeholders},
    common::SimulationCliArgs,
    utils::{load_from_json_file, print_warning_message},
};

#[derive(Debug, Parser)]
#[clap(about = "Submit an existing batch file to the simulation service.")]
pub struct SimulateCommand {
    #[arg(value_name = "FILE", help = "The batch JSON file.")]
    file: PathBuf,

    #[clap(flatten)]
    simulation: SimulationCliArgs,
}

impl SimulateCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { file, simulation } = self;

        let client = simulation.client()?;
        let batch: TransactionBatch = load_from_json_file(&file).map_err(|e| eyre::eyre!(e))?;

        // Hand-edited files are reported on, not rejected.
        if let Err(e) = batch.validate_structure() {
            print_warning_message(&format!("Batch is malformed: {e}"));
        }
        warn_on_placeholders(&batch);

        report_simulation(&client, &batch).await;

        Ok(())
    }
}
