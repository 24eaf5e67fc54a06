use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "weather_web=info,weather_core=info,tower_http=info";

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: u8) {
    let fallback = match verbose {
        0 => DEFAULT_FILTER,
        1 => "weather_web=debug,weather_core=debug,tower_http=debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
