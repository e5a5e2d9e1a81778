use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the
/// verbosity count; calling this twice is harmless.
pub fn init(verbosity: u8) {
    let fallback = match verbosity {
        0 => "pokedex=warn",
        1 => "pokedex=info",
        2 => "pokedex=debug",
        _ => "pokedex=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
