use std::fs::File;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

fn builder(verbose: bool) -> Builder {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    Builder::from_env(env)
}

/// Initializes the global logger on stderr.
///
/// When `verbose` is `true`, all debug messages are printed. Otherwise only
/// info level and above are shown.
pub fn init(verbose: bool) {
    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder(verbose).try_init();
}

/// Same as [`init`] but appends to `path`, for when stderr belongs to the
/// terminal UI.
pub fn init_to_file(verbose: bool, path: &Path) -> std::io::Result<()> {
    let file = File::options().create(true).append(true).open(path)?;
    let _ = builder(verbose)
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    Ok(())
}
