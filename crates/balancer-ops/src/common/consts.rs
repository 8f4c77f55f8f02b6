/// Names for the default directories.
pub const DEFAULT_ROOT_DIR: &str = ".balancer-ops";
pub const DEFAULT_BATCH_DIR: &str = "batches";
