//! Logging setup.
//!
//! The game owns the terminal while it runs, so log records either go to a
//! file or are filtered out unless `RUST_LOG` asks for them.

use std::fs::File;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Initialize `env_logger`, writing to `log_file` when one is given.
pub fn init(log_file: Option<&Path>) -> std::io::Result<()> {
    let mut builder = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let mut builder = Builder::from_env(Env::default().default_filter_or("debug"));
            builder.target(Target::Pipe(Box::new(file)));
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("off")),
    };
    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
    Ok(())
}
