//! Safe Transaction Builder batches: the file format, assembly, and simulation.

pub use batch::BatchBuilder;
pub use simulation::{SimulationClient, SimulationError, SimulationOutcome};
pub use transaction_data::{
    BatchError, BatchMeta, BatchTransaction, ContractInput, ContractMethod, TransactionBatch,
};

pub mod batch;
pub mod consts;
pub mod simulation;
pub mod transaction_data;
