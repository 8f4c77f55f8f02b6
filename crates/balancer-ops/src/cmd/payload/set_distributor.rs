use clap::Parser;
use ops_cli_runner::CliContext;

use super::PayloadCliArgs;
use crate::payload::{PayloadInput, RewardInput};

#[derive(Debug, Parser)]
#[clap(about = "Change the distributor of a reward token on a gauge.")]
pub struct SetDistributorCommand {
    #[arg(long, value_name = "ADDRESS", help = "The gauge holding the reward.")]
    gauge: String,

    #[arg(long, value_name = "ADDRESS", help = "The reward token.")]
    token: String,

    #[arg(long, value_name = "ADDRESS", help = "The new distributor.")]
    distributor: String,

    #[clap(flatten)]
    args: PayloadCliArgs,
}

impl SetDistributorCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { gauge, token, distributor, args } = self;

        args.generate(PayloadInput::SetDistributor(RewardInput { gauge, token, distributor }))
            .await?;

        Ok(())
    }
}
