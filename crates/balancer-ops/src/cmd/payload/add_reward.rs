use clap::Parser;
use ops_cli_runner::CliContext;

use super::PayloadCliArgs;
use crate::payload::{PayloadInput, RewardInput};

#[derive(Debug, Parser)]
#[clap(about = "Add a reward token to a gauge through the Authorizer Adaptor Entrypoint.")]
pub struct AddRewardCommand {
    #[arg(long, value_name = "ADDRESS", help = "The gauge to add the reward to.")]
    gauge: String,

    #[arg(long, value_name = "ADDRESS", help = "The reward token.")]
    token: String,

    #[arg(long, value_name = "ADDRESS", help = "The account allowed to deposit the reward.")]
    distributor: String,

    #[clap(flatten)]
    args: PayloadCliArgs,
}

impl AddRewardCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { gauge, token, distributor, args } = self;

        args.generate(PayloadInput::AddReward(RewardInput { gauge, token, distributor })).await?;

        Ok(())
    }
}
