use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose events are worth seeing once `-vvv` is given.
const NOISY_DEPENDENCIES: [&str; 2] = ["reqwest", "lettre"];

/// Filter for a given number of `-v` flags. The default stays silent so an
/// unattended `check` run only prints the alert.
fn verbosity_filter(verbosity: u8) -> Targets {
    let level = match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let dependency_level = if verbosity >= 3 {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };

    NOISY_DEPENDENCIES.iter().fold(
        Targets::new().with_target(env!("CARGO_CRATE_NAME"), level),
        |targets, dependency| targets.with_target(*dependency, dependency_level),
    )
}

/// Installs the global subscriber. `RUST_LOG` narrows what the verbosity allows.
pub fn init_logging(verbosity: u8) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(verbosity_filter(verbosity))
        .with(env_filter)
        .init();
}
