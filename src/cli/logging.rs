use std::io::{stderr, IsTerminal};

use tracing_subscriber::filter::{Directive, EnvFilter, LevelFilter};

#[cfg(debug_assertions)]
const IS_DEBUG: bool = true;
#[cfg(not(debug_assertions))]
const IS_DEBUG: bool = false;

const QUIET_DIRECTIVES: &[&str] = &[
    "h2=info",
    "hyper=info",
    "hyper_util=info",
    "reqwest=info",
    "rustls=warn",
    "tower=info",
];

pub fn setup_tracing() {
    let tracing_filter = QUIET_DIRECTIVES
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
            |filter, directive| filter.add_directive(directive),
        );

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(tracing_filter)
        .without_time()
        .with_target(IS_DEBUG)
        .with_level(true)
        .with_ansi(stderr().is_terminal())
        .with_writer(stderr) // Rank output goes to stdout, keep logs out of it
        .init();
}
