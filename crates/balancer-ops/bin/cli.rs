use balancer_ops::{
    cmd::{
        address_book::AddressBookCommands, decode::DecodeCommand, payload::PayloadCommands,
        simulate::SimulateCommand,
    },
    utils::init_tracing,
};
use clap::{
    builder::{styling::AnsiColor, Styles},
    ArgAction, Parser, Subcommand,
};
use ops_cli_runner::CliRunner;
use ops_version::{version_with_platform, SHORT_VERSION};
use tracing::info;

/// The verbosity level.
pub type Verbosity = u8;

#[derive(Debug, Parser)]
#[command(
    name = "balancer-ops",
    about = "Build Safe transaction batches for Balancer DAO operations.",
    author = "Balancer Maxis",
    version = SHORT_VERSION.as_str(),
    term_width = 80,
    styles = get_color_style()
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    /// Verbosity level of the log messages.
    ///
    /// Pass multiple times to increase the verbosity (e.g. -v, -vv, -vvv).
    /// Without it only warnings are logged. `RUST_LOG` overrides this flag.
    #[arg(
        help_heading = "Display options",
        global = true,
        short,
        long,
        verbatim_doc_comment,
        action = ArgAction::Count
    )]
    verbosity: Verbosity,
}

impl Cli {
    pub fn run(self) -> eyre::Result<()> {
        init_tracing(self.verbosity, self.debug);
        info!(version = %version_with_platform(), "starting");

        let runner = CliRunner::try_default()?;
        match self.command {
            Commands::AddressBook(address_book) => {
                runner.run_command_until_exit(|ctx| address_book.execute(ctx))
            }
            Commands::Payload(payload) => runner.run_command_until_exit(|ctx| payload.execute(ctx)),
            Commands::Simulate(simulate) => {
                runner.run_command_until_exit(|ctx| simulate.execute(ctx))
            }
            Commands::Decode(decode) => runner.run_command_until_exit(|ctx| decode.execute(ctx)),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect and update the cached Balancer address book.
    #[command(name = "address-book", subcommand)]
    AddressBook(AddressBookCommands),

    /// Generate a Safe transaction batch.
    #[command(name = "payload", subcommand)]
    Payload(PayloadCommands),

    #[command(name = "simulate")]
    Simulate(SimulateCommand),

    #[command(name = "decode")]
    Decode(DecodeCommand),
}

fn get_color_style() -> Styles {
    Styles::styled()
        .usage(AnsiColor::Green.on_default().bold().underline())
        .header(AnsiColor::Yellow.on_default().bold().underline())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}
