//! Log setup for the command line.
//!
//! Events go to stderr so stdout carries only the result. `VALIDIR_LOG`
//! takes any `EnvFilter` directive and wins over `-v`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::LogFormat;

const ENV_VAR: &str = "VALIDIR_LOG";

pub fn init_logging(verbosity: u8, format: LogFormat) {
    let filter = build_env_filter(verbosity);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_VAR) {
        return filter;
    }
    EnvFilter::new(level_for(verbosity))
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(3), "trace");
        assert_eq!(level_for(9), "trace");
    }
}
