//! Human-readable ABI fragments of the contracts the payload builders call.

/// Forwards a call to a contract whose admin is the Authorizer Adaptor.
pub const AUTHORIZER_ADAPTOR_ENTRYPOINT: &[&str] =
    &["function performAction(address target, bytes data) payable returns (bytes)"];

/// Liquidity gauges (mainnet) and child chain gauges (L2s) share these.
pub const GAUGE: &[&str] = &[
    "function add_reward(address _reward_token, address _distributor)",
    "function set_reward_distributor(address _reward_token, address _distributor)",
];

pub const ERC20: &[&str] = &[
    "function transfer(address to, uint256 amount) returns (bool)",
    "function approve(address spender, uint256 amount) returns (bool)",
];

pub const POOL_V2: &[&str] = &[
    "function pause()",
    "function enableRecoveryMode()",
    "function setSwapFeePercentage(uint256 swapFeePercentage)",
];

pub const VAULT_V3: &[&str] = &[
    "function pausePool(address pool)",
    "function enableRecoveryMode(address pool)",
    "function setStaticSwapFeePercentage(address pool, uint256 swapFeePercentage)",
];

/// ChildChainGaugeInjectorV2
pub const GAUGE_INJECTOR: &[&str] = &[
    concat!(
        "function addRecipients(address[] gaugeAddresses, uint256 amountPerPeriod, ",
        "uint8 maxPeriods, uint56 doNotStartBeforeTimestamp)"
    ),
    "function removeRecipients(address[] recipients)",
];

pub mod functions {
    pub const PERFORM_ACTION: &str = "performAction";
    pub const ADD_REWARD: &str = "add_reward";
    pub const SET_REWARD_DISTRIBUTOR: &str = "set_reward_distributor";
    pub const TRANSFER: &str = "transfer";
    pub const PAUSE: &str = "pause";
    pub const PAUSE_POOL: &str = "pausePool";
    pub const ENABLE_RECOVERY_MODE: &str = "enableRecoveryMode";
    pub const SET_SWAP_FEE_PERCENTAGE: &str = "setSwapFeePercentage";
    pub const SET_STATIC_SWAP_FEE_PERCENTAGE: &str = "setStaticSwapFeePercentage";
    pub const ADD_RECIPIENTS: &str = "addRecipients";
    pub const REMOVE_RECIPIENTS: &str = "removeRecipients";
}

/// Every fragment above, in declaration order.
pub fn all() -> impl Iterator<Item = &'static str> {
    [AUTHORIZER_ADAPTOR_ENTRYPOINT, GAUGE, ERC20, POOL_V2, VAULT_V3, GAUGE_INJECTOR]
        .into_iter()
        .flatten()
        .copied()
}
