use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr.
///
/// `RUST_LOG` takes precedence; otherwise the server logs at `level` and the
/// engine only reports warnings.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    let default_filter = format!("finproj_server={level},tower_http={level},finproj_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    Ok(())
}
