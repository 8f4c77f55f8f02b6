use clap::Parser;
use ops_cli_runner::CliContext;

use super::PayloadCliArgs;
use crate::payload::{PayloadInput, PaymentInput};

#[derive(Debug, Parser)]
#[clap(about = "Transfer tokens from the Safe.")]
pub struct PaymentCommand {
    #[arg(long, value_name = "ADDRESS", help = "The token to pay with.")]
    token: String,

    #[arg(long, default_value = "18", help = "Decimals of the token, e.g. 6 for USDC.")]
    decimals: u8,

    #[arg(long, value_name = "AMOUNT", help = "Amount in whole tokens, e.g. 100.5")]
    amount: String,

    #[arg(long, value_name = "ADDRESS", help = "The recipient.")]
    recipient: String,

    #[clap(flatten)]
    args: PayloadCliArgs,
}

impl PaymentCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { token, decimals, amount, recipient, args } = self;

        args.generate(PayloadInput::Payment(PaymentInput { token, decimals, amount, recipient }))
            .await?;

        Ok(())
    }
}
