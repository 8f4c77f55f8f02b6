use clap::Subcommand;
use get::GetCommand;
use list::ListCommand;
use ops_cli_runner::CliContext;
use refresh::RefreshCommand;

mod get;
mod list;
mod refresh;

#[derive(Debug, Subcommand)]
pub enum AddressBookCommands {
    #[command(name = "refresh")]
    Refresh(RefreshCommand),

    #[command(name = "get")]
    Get(GetCommand),

    #[command(name = "list")]
    List(ListCommand),
}

impl AddressBookCommands {
    pub async fn execute(self, ctx: CliContext) -> eyre::Result<()> {
        match self {
            AddressBookCommands::Refresh(refresh) => refresh.execute(ctx).await,
            AddressBookCommands::Get(get) => get.execute(ctx).await,
            AddressBookCommands::List(list) => list.execute(ctx).await,
        }
    }
}
