use clap::Parser;
use ops_cli_runner::CliContext;
use serde::Deserialize;

use std::path::PathBuf;

use super::PayloadCliArgs;
use crate::{
    payload::{InjectorInput, PayloadInput, ScheduleEntry},
    utils::load_from_json_file,
};

/// Schedule file for `--schedule`:
/// `{ "recipients": [{ "gauge", "amountPerPeriod", "maxPeriods", "doNotStartBefore"? }],
///   "remove": [] }`
#[derive(Debug, Default, Deserialize)]
struct ScheduleFile {
    #[serde(default)]
    recipients: Vec<ScheduleEntry>,
    #[serde(default)]
    remove: Vec<String>,
}

#[derive(Debug, Parser)]
#[clap(about = "Add or remove gauges on a reward injector.")]
pub struct InjectorScheduleCommand {
    #[arg(
        long,
        value_name = "ADDRESS_OR_KEY",
        help = "Injector address, or its key under maxiKeepers/gaugeRewardsInjectors (e.g. usdc)."
    )]
    injector: String,

    #[arg(long, default_value = "18", help = "Decimals of the token the injector pays out.")]
    decimals: u8,

    #[arg(long, value_name = "FILE", help = "JSON file with the recipients to add and remove.")]
    schedule: Option<PathBuf>,

    #[arg(long, value_name = "GAUGE", help = "Gauge to remove. May be repeated.")]
    remove: Vec<String>,

    #[clap(flatten)]
    args: PayloadCliArgs,
}

impl InjectorScheduleCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { injector, decimals, schedule, remove, args } = self;

        let mut file: ScheduleFile = match &schedule {
            Some(path) => load_from_json_file(path).map_err(|e| eyre::eyre!(e))?,
            None => ScheduleFile::default(),
        };
        file.remove.extend(remove);

        args.generate(PayloadInput::InjectorSchedule(InjectorInput {
            injector,
            decimals,
            recipients: file.recipients,
            remove: file.remove,
        }))
        .await?;

        Ok(())
    }
}
