use colored::Colorize;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use std::{
    fs,
    future::Future,
    io::{BufReader, Write},
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise the level follows `-v` flags, starting at `warn`,
/// and `--debug` forces `debug`. Logs go to stderr, stdout only carries command output.
pub fn init_tracing(verbosity: u8, debug: bool) {
    let level = match (debug, verbosity) {
        (true, v) if v < 3 => "debug",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second initialisation (tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Status messages go to stderr, like the loading animation.
pub fn print_success_message(message: &str) {
    eprintln!("\n{}", message.bright_green());
}

pub fn print_error_message(message: &str) {
    eprintln!("\n{}", message.bright_red());
}

pub fn print_warning_message(message: &str) {
    eprintln!("\n{}", message.bright_yellow());
}

/// Async version that runs a loading animation on stderr until a future completes
pub async fn print_loading_until_async<F, T>(message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    let message = message.to_string();

    // Spawn the animation in a separate thread
    let animation = std::thread::spawn(move || {
        let spinner = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        let mut i = 0;
        let mut stderr = std::io::stderr();

        while running_clone.load(Ordering::Relaxed) {
            let _ = write!(stderr, "\r{} {} ", message, spinner[i]);
            let _ = stderr.flush();
            std::thread::sleep(Duration::from_millis(100));
            i = (i + 1) % spinner.len();
        }

        let _ = write!(stderr, "\r{}\r", " ".repeat(message.chars().count() + 2));
        let _ = stderr.flush();
    });

    let result = future.await;

    running.store(false, Ordering::Relaxed);
    let _ = animation.join();

    result
}

/// Write some object to a file as pretty-printed JSON.
///
/// With `create_new` the file must not already exist, otherwise it is truncated.
pub fn write_to_json_file<P: AsRef<Path>, S: Serialize>(
    path: P,
    contents: &S,
    create_new: bool,
) -> Result<(), String> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .truncate(!create_new)
        .create(!create_new)
        .create_new(create_new)
        .open(&path)
        .map_err(|e| format!("Failed to open {:?}: {:?}", path.as_ref(), e))?;
    serde_json::to_writer_pretty(&mut file, contents)
        .map_err(|e| format!("Failed to write JSON to {:?}: {:?}", path.as_ref(), e))?;
    writeln!(file).map_err(|e| format!("Failed to write to {:?}: {:?}", path.as_ref(), e))
}

/// Load an object from a JSON file.
pub fn load_from_json_file<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<T, String> {
    debug!(path = ?path.as_ref(), "loading JSON file");
    let file = fs::File::open(&path)
        .map_err(|e| format!("Failed to open {:?}: {:?}", path.as_ref(), e))?;
    let reader = BufReader::new(file);

    let data = serde_json::from_reader(reader)
        .map_err(|e| format!("Failed to read JSON from {:?}: {:?}", path.as_ref(), e))?;

    Ok(data)
}
