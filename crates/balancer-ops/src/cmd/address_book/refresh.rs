use clap::Parser;
use ops_cli_runner::CliContext;
use url::Url;

use crate::{
    address_book::{consts::DEFAULT_ADDRESS_BOOK_URL, AddressBook},
    common::DirsCliArgs,
    utils::{print_loading_until_async, print_success_message},
};

#[derive(Debug, Parser)]
#[clap(about = "Download the address book and replace the cached copy.")]
pub struct RefreshCommand {
    #[arg(
        long,
        value_name = "URL",
        env = "BALANCER_OPS_ADDRESS_BOOK_URL",
        default_value = DEFAULT_ADDRESS_BOOK_URL,
        help = "Where to download the address book from."
    )]
    url: Url,

    #[clap(flatten)]
    dirs: DirsCliArgs,
}

impl RefreshCommand {
    pub async fn execute(self, _ctx: CliContext) -> eyre::Result<()> {
        let Self { url, dirs } = self;
        let path = dirs.address_book_path();

        let book =
            print_loading_until_async("Downloading address book", AddressBook::refresh(&url, &path))
                .await?;

        print_success_message(&format!(
            "✅ Address book with {} networks saved to {}",
            book.networks().len(),
            path.display()
        ));

        Ok(())
    }
}
