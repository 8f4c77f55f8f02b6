use clap::Parser;
use colored::Colorize;
use ops_cli_runner::CliContext;

use crate::{
    cmd::utils::load_address_book,
    common::{AddressBookCliArgs, DirsCliArgs, Network},
    utils::print_warning_message,
};

#[derive(Debug, Parser)]
#[clap(about = "Resolve one address from the address book.")]
pub struct GetCommand {
    #[arg(value_name = "NETWORK", value_enum, help = "The network to look up.")]
    network: Network,

    #[arg(value_name = "CATEGORY", help = "Category such as `multisigs` or a deployment id.")]
    category: String,

    #[arg(value_name = "SUBCATEGORY", help = "Key inside the category.")]
    subcategory: Option<String>,

    #[arg(value_name = "KEY", help = "Key inside the subcategory.")]
    key: Option<String>,

    #[clap(flatten)]
    book: AddressBookCliArgs,

    #[clap(flatten)]
    dirs: DirsCliArgs,
}

impl GetCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { network, category, subcategory, key, book, dirs } = self;
        let book = load_address_book(&book, &dirs).await?;

        let address = match (subcategory.as_deref(), key.as_deref()) {
            (Some(subcategory), Some(key)) => {
                book.resolve_nested(network.as_str(), &category, subcategory, key)
            }
            (subcategory, _) => book.resolve(network.as_str(), &category, subcategory),
        };

        let path = [Some(category.as_str()), subcategory.as_deref(), key.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("/");

        if address.is_empty() {
            print_warning_message(&format!("No address at {network}/{path}"));
        } else {
            println!("{} {}", format!("{network}/{path}:").bright_cyan(), address);
        }

        Ok(())
    }
}
