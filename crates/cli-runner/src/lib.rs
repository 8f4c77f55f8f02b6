//! Entrypoint for running commands.

use std::{future::Future, io};

use tokio::runtime::{Handle, Runtime};
use tracing::{debug, trace};

/// Executes CLI commands on a dedicated tokio runtime.
///
/// Every command runs to completion or until the process receives ctrl-c,
/// whichever happens first. In-flight requests are simply dropped on ctrl-c.
#[derive(Debug)]
pub struct CliRunner {
    tokio_runtime: Runtime,
}

impl CliRunner {
    /// Creates a runner backed by a new multi-threaded runtime.
    pub fn try_default() -> io::Result<Self> {
        Ok(Self { tokio_runtime: tokio_runtime()? })
    }

    /// Executes the given _async_ command on the tokio runtime until the command future resolves
    /// or until the process receives a `SIGINT` or `SIGTERM` signal.
    pub fn run_command_until_exit<F, E>(
        self,
        command: impl FnOnce(CliContext) -> F,
    ) -> Result<(), E>
    where
        F: Future<Output = Result<(), E>>,
        E: Send + Sync + From<io::Error> + 'static,
    {
        let context = CliContext { handle: self.tokio_runtime.handle().clone() };
        let result = self.tokio_runtime.block_on(run_until_ctrl_c(command(context)));

        debug!(target: "ops::cli", "Shutting down runtime");
        self.tokio_runtime.shutdown_background();

        result
    }
}

/// Additional context provided by the [`CliRunner`] when executing commands.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Handle to the runtime the command is executing on.
    pub handle: Handle,
}

/// Creates a new default tokio multi-thread [Runtime] with all features enabled.
pub fn tokio_runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread().enable_all().build()
}

/// Runs the future to completion or until a `ctrl-c` is received.
async fn run_until_ctrl_c<F, E>(fut: F) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
    E: Send + Sync + From<io::Error> + 'static,
{
    let ctrl_c = tokio::signal::ctrl_c();

    tokio::pin!(fut);
    tokio::select! {
        res = ctrl_c => {
            res?;
            trace!(target: "ops::cli", "Received ctrl-c");
        },
        res = &mut fut => res?,
    }

    Ok(())
}
