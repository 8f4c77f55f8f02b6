use clap::Parser;
use colored::Colorize;
use ops_cli_runner::CliContext;

use crate::{
    cmd::utils::load_address_book,
    common::{AddressBookCliArgs, DirsCliArgs, Network},
};

#[derive(Debug, Parser)]
#[clap(about = "List the addresses of a network, optionally only one category.")]
pub struct ListCommand {
    #[arg(value_name = "NETWORK", value_enum, help = "The network to list.")]
    network: Network,

    #[arg(value_name = "CATEGORY", help = "Only list this category.")]
    category: Option<String>,

    #[clap(flatten)]
    book: AddressBookCliArgs,

    #[clap(flatten)]
    dirs: DirsCliArgs,
}

impl ListCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { network, category, book, dirs } = self;
        let book = load_address_book(&book, &dirs).await?;

        if !book.networks().contains(&network.as_str()) {
            eyre::bail!(
                "Network {network} is not in the address book. Available: {}",
                book.networks().join(", ")
            );
        }

        let entries = match &category {
            Some(category) => match book.category(network.as_str(), category) {
                Some(entry) => entry.flatten(category),
                None => eyre::bail!("No category {category} on {network}"),
            },
            None => book.flatten(network.as_str()),
        };

        println!("{}", format!("{} addresses on {network}", entries.len()).bright_cyan());
        let width = entries.iter().map(|(path, _)| path.len()).max().unwrap_or_default();
        for (path, address) in entries {
            println!("{path:<width$}  {address}");
        }

        Ok(())
    }
}
