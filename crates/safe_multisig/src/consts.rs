/// Batch file format version understood by the Safe Transaction Builder.
pub const BATCH_VERSION: &str = "1.0";

/// Transaction Builder release the generated files are modelled on.
pub const TX_BUILDER_VERSION: &str = "1.18.0";

pub const DEFAULT_BATCH_NAME: &str = "Transactions Batch";

/// Header carrying the simulation service API key.
pub const SIMULATION_KEY_HEADER: &str = "X-Access-Key";
