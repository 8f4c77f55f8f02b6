use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use ops_cli_runner::CliContext;
use safe_multisig::TransactionBatch;
use tracing::info;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use add_reward::AddRewardCommand;
use emergency::EmergencyCommand;
use injector_schedule::InjectorScheduleCommand;
use payment::PaymentCommand;
use set_distributor::SetDistributorCommand;
use set_swap_fee::SetSwapFeeCommand;

use crate::{
    cmd::utils::{
        default_output_path, load_address_book, report_simulation, warn_on_placeholders,
        write_batch,
    },
    common::{AddressBookCliArgs, DirsCliArgs, Network, SimulationCliArgs},
    formatter,
    payload::{build_batch, BatchOptions, BuildContext, PayloadInput},
    utils::{print_success_message, print_warning_message},
};

mod add_reward;
mod emergency;
mod injector_schedule;
mod payment;
mod set_distributor;
mod set_swap_fee;

#[derive(Debug, Subcommand)]
pub enum PayloadCommands {
    #[command(name = "add-reward")]
    AddReward(AddRewardCommand),

    #[command(name = "set-distributor")]
    SetDistributor(SetDistributorCommand),

    #[command(name = "payment")]
    Payment(PaymentCommand),

    #[command(name = "emergency")]
    Emergency(EmergencyCommand),

    #[command(name = "injector-schedule")]
    InjectorSchedule(InjectorScheduleCommand),

    #[command(name = "set-swap-fee")]
    SetSwapFee(SetSwapFeeCommand),
}

impl PayloadCommands {
    pub async fn execute(self, ctx: CliContext) -> eyre::Result<()> {
        match self {
            PayloadCommands::AddReward(add_reward) => add_reward.execute(ctx).await,
            PayloadCommands::SetDistributor(set_distributor) => set_distributor.execute(ctx).await,
            PayloadCommands::Payment(payment) => payment.execute(ctx).await,
            PayloadCommands::Emergency(emergency) => emergency.execute(ctx).await,
            PayloadCommands::InjectorSchedule(injector_schedule) => {
                injector_schedule.execute(ctx).await
            }
            PayloadCommands::SetSwapFee(set_swap_fee) => set_swap_fee.execute(ctx).await,
        }
    }
}

/// Options shared by every payload command.
#[derive(Debug, Parser, Clone)]
pub struct PayloadCliArgs {
    #[arg(
        long,
        value_enum,
        default_value_t = Network::Mainnet,
        help = "The network the batch executes on."
    )]
    network: Network,

    #[arg(
        long,
        value_name = "ADDRESS",
        help = "Safe that executes the batch. Defaults to the multisig responsible for the action."
    )]
    safe: Option<String>,

    #[arg(long, value_name = "ADDRESS", help = "Signer proposing the batch.")]
    owner: Option<String>,

    #[arg(long, value_name = "NAME", help = "Name shown in the Transaction Builder.")]
    name: Option<String>,

    #[arg(
        long,
        short,
        value_name = "FILE",
        help = "Where to write the batch. \
                Defaults to <data-dir>/batches/<network>-<action>-<timestamp>.json"
    )]
    output: Option<PathBuf>,

    #[arg(long, help = "Overwrite the output file without asking.")]
    force: bool,

    #[arg(long, help = "Also print the batch JSON to stdout.")]
    print: bool,

    #[arg(long, help = "Submit the batch to the simulation service after writing it.")]
    simulate: bool,

    #[clap(flatten)]
    dirs: DirsCliArgs,

    #[clap(flatten)]
    book: AddressBookCliArgs,

    #[clap(flatten)]
    simulation: SimulationCliArgs,
}

impl PayloadCliArgs {
    /// Builds, writes and optionally simulates the batch for `input`.
    pub async fn generate(self, input: PayloadInput) -> eyre::Result<TransactionBatch> {
        self.generate_to(input, &mut io::stdout()).await
    }

    /// [`Self::generate`] with command output sent to `out`.
    ///
    /// With `--print` the batch JSON is the only thing written to `out` and the summary joins
    /// the status messages on stderr. Simulation runs after the batch is on disk and its outcome
    /// never fails the command.
    pub async fn generate_to<W: Write>(
        self,
        input: PayloadInput,
        out: &mut W,
    ) -> eyre::Result<TransactionBatch> {
        let simulator = if self.simulate { Some(self.simulation.client()?) } else { None };

        let book = load_address_book(&self.book, &self.dirs).await?;
        let ctx = BuildContext::new(&book, self.network)?;
        let created_at = Utc::now().timestamp_millis();
        let options = BatchOptions {
            safe: self.safe.clone(),
            owner: self.owner.clone(),
            name: self.name.clone(),
            created_at: Some(created_at),
        };

        let summary = formatter::describe(&input).bright_cyan();
        if self.print {
            eprintln!("{summary}");
        } else {
            writeln!(out, "{summary}")?;
        }

        let batch = build_batch(&input, &ctx, &options)?;
        info!(
            action = %input.kind(),
            network = %self.network,
            transactions = batch.transactions.len(),
            "payload generated"
        );

        if let Err(e) = batch.validate_structure() {
            print_warning_message(&format!("Generated batch is malformed: {e}"));
        }
        warn_on_placeholders(&batch);

        let path = self.output.clone().unwrap_or_else(|| {
            default_output_path(&self.dirs, self.network, input.kind(), created_at)
        });
        if write_batch(&batch, &path, self.force)? {
            print_success_message(&format!("✅ Batch written to {}", path.display()));
        } else {
            print_warning_message("Batch not written");
        }

        if self.print {
            writeln!(out, "{}", batch.to_json_pretty()?)?;
        }

        if let Some(client) = simulator {
            report_simulation(&client, &batch).await;
        }

        Ok(batch)
    }
}
