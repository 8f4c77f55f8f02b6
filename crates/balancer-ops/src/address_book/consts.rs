/// Address book maintained by the Balancer Maxis.
pub const DEFAULT_ADDRESS_BOOK_URL: &str =
    "https://raw.githubusercontent.com/BalancerMaxis/bal_addresses/main/outputs/addressbook.json";

pub const ADDRESS_BOOK_FILE: &str = "addressbook.json";

pub mod categories {
    pub const MULTISIGS: &str = "multisigs";

    /// Entrypoint that forwards calls to contracts whose admin is the Authorizer Adaptor.
    pub const AUTHORIZER_ADAPTOR_ENTRYPOINT: &str = "20221124-authorizer-adaptor-entrypoint";

    pub const V2_VAULT: &str = "20210418-vault";

    pub const V3_VAULT: &str = "20241204-v3-vault";

    /// Automation contracts run by the Maxis, grouped by kind.
    pub const MAXI_KEEPERS: &str = "maxiKeepers";
}

pub mod keepers {
    /// `maxiKeepers/gaugeRewardsInjectors/<token>`
    pub const GAUGE_REWARDS_INJECTORS: &str = "gaugeRewardsInjectors";
}

pub mod contracts {
    pub const AUTHORIZER_ADAPTOR_ENTRYPOINT: &str = "AuthorizerAdaptorEntrypoint";

    pub const VAULT: &str = "Vault";
}

pub mod multisigs {
    /// Treasury.
    pub const DAO: &str = "dao";

    /// Liquidity mining: gauges and rewards.
    pub const LM: &str = "lm";

    pub const EMERGENCY: &str = "emergency";

    pub const FEES: &str = "fees";

    /// Maxi operations, owner of the gauge injectors.
    pub const MAXI_OMNI: &str = "maxi_omni";
}
