use clap::Parser;
use ops_cli_runner::CliContext;

use super::PayloadCliArgs;
use crate::payload::{EmergencyActionKind, EmergencyInput, PayloadInput, PoolVersion};

#[derive(Debug, Parser)]
#[clap(about = "Pause a pool and/or put it in recovery mode.")]
pub struct EmergencyCommand {
    #[arg(long, value_name = "ADDRESS", help = "The affected pool.")]
    pool: String,

    #[arg(
        long = "action",
        value_enum,
        required = true,
        help = "Action to take. Repeat to take several, they execute in the given order."
    )]
    actions: Vec<EmergencyActionKind>,

    #[arg(
        long,
        value_enum,
        default_value_t = PoolVersion::V2,
        help = "Balancer version of the pool."
    )]
    pool_version: PoolVersion,

    #[clap(flatten)]
    args: PayloadCliArgs,
}

impl EmergencyCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { pool, actions, pool_version, args } = self;

        args.generate(PayloadInput::EmergencyAction(EmergencyInput { pool, actions, pool_version }))
            .await?;

        Ok(())
    }
}
