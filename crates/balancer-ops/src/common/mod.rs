use clap::{value_parser, Parser, ValueEnum};
use safe_multisig::SimulationClient;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use url::Url;

use std::path::PathBuf;

use crate::address_book::{consts::ADDRESS_BOOK_FILE, consts::DEFAULT_ADDRESS_BOOK_URL};
use consts::{DEFAULT_BATCH_DIR, DEFAULT_ROOT_DIR};

pub mod consts;

/// Chains with Balancer deployments, named by their address book key.
#[derive(
    ValueEnum,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[value(alias = "ethereum")]
    Mainnet,
    Arbitrum,
    Polygon,
    Gnosis,
    Optimism,
    #[value(alias = "avax")]
    Avalanche,
    Base,
    Zkevm,
    Fraxtal,
    Mode,
    Sepolia,
}

impl Network {
    /// Key of this network in the address book.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Arbitrum => "arbitrum",
            Network::Polygon => "polygon",
            Network::Gnosis => "gnosis",
            Network::Optimism => "optimism",
            Network::Avalanche => "avalanche",
            Network::Base => "base",
            Network::Zkevm => "zkevm",
            Network::Fraxtal => "fraxtal",
            Network::Mode => "mode",
            Network::Sepolia => "sepolia",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Arbitrum => 42161,
            Network::Polygon => 137,
            Network::Gnosis => 100,
            Network::Optimism => 10,
            Network::Avalanche => 43114,
            Network::Base => 8453,
            Network::Zkevm => 1101,
            Network::Fraxtal => 252,
            Network::Mode => 34443,
            Network::Sepolia => 11155111,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> eyre::Result<Self> {
        match chain_id {
            1 => Ok(Network::Mainnet),
            42161 => Ok(Network::Arbitrum),
            137 => Ok(Network::Polygon),
            100 => Ok(Network::Gnosis),
            10 => Ok(Network::Optimism),
            43114 => Ok(Network::Avalanche),
            8453 => Ok(Network::Base),
            1101 => Ok(Network::Zkevm),
            252 => Ok(Network::Fraxtal),
            34443 => Ok(Network::Mode),
            11155111 => Ok(Network::Sepolia),
            _ => Err(eyre::eyre!("Chain ID not supported")),
        }
    }
}

#[derive(Debug, Parser, Clone)]
pub struct DirsCliArgs {
    #[arg(
        long,
        required = false,
        value_parser = value_parser!(PathBuf),
        help = "Used to specify a custom root data directory for the address book and \
                generated batches. Defaults to home_dir/.balancer-ops if the home dir is \
                available, otherwise it defaults to `.`"
    )]
    data_dir: Option<PathBuf>,
}

impl DirsCliArgs {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: Some(data_dir.into()) }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|home| home.join(DEFAULT_ROOT_DIR))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    pub fn address_book_path(&self) -> PathBuf {
        self.data_dir().join(ADDRESS_BOOK_FILE)
    }

    pub fn batch_dir(&self) -> PathBuf {
        self.data_dir().join(DEFAULT_BATCH_DIR)
    }
}

#[derive(Debug, Parser, Clone)]
pub struct AddressBookCliArgs {
    #[arg(
        long,
        value_name = "URL",
        env = "BALANCER_OPS_ADDRESS_BOOK_URL",
        default_value = DEFAULT_ADDRESS_BOOK_URL,
        help = "Where to download the address book from."
    )]
    pub address_book_url: Url,

    #[arg(
        long,
        value_name = "FILE",
        help = "Read the address book from this file instead of the cached copy in the data dir."
    )]
    pub address_book: Option<PathBuf>,

    #[arg(long, help = "Download a fresh address book before running the command.")]
    pub refresh_address_book: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct SimulationCliArgs {
    #[arg(
        long,
        value_name = "URL",
        env = "BALANCER_OPS_SIMULATION_URL",
        help = "Endpoint of the transaction simulation service."
    )]
    pub simulation_url: Option<Url>,

    #[arg(
        long,
        value_name = "KEY",
        env = "BALANCER_OPS_SIMULATION_KEY",
        hide_env_values = true,
        help = "API key sent to the simulation service."
    )]
    pub simulation_key: Option<String>,
}

impl SimulationCliArgs {
    pub fn client(&self) -> eyre::Result<SimulationClient> {
        match &self.simulation_url {
            Some(url) => Ok(SimulationClient::new(url.clone(), self.simulation_key.clone())),
            None => Err(eyre::eyre!(
                "Simulation URL is required! Pass --simulation-url or set \
                 BALANCER_OPS_SIMULATION_URL."
            )),
        }
    }
}
