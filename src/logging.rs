use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,boletin_marcas=debug";

/// Initialize structured logging on stderr.
///
/// `RUST_LOG` overrides the default filter. Stdout is left for command output so
/// that `boletin-marcas latest` can be piped.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be installed (tests, embedding); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging();
        init_logging();
        tracing::info!("logging initialized twice without panicking");
    }
}
