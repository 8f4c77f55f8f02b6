use clap::Parser;
use ops_cli_runner::CliContext;

use super::PayloadCliArgs;
use crate::payload::{PayloadInput, PoolVersion, SwapFeeInput};

#[derive(Debug, Parser)]
#[clap(about = "Set the static swap fee of a pool.")]
pub struct SetSwapFeeCommand {
    #[arg(long, value_name = "ADDRESS", help = "The pool.")]
    pool: String,

    #[arg(long = "fee", value_name = "PERCENT", help = "New swap fee in percent, e.g. 0.3")]
    fee_percentage: String,

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

impl SetSwapFeeCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { pool, fee_percentage, pool_version, args } = self;

        args.generate(PayloadInput::SetSwapFee(SwapFeeInput { pool, fee_percentage, pool_version }))
            .await?;

        Ok(())
    }
}
