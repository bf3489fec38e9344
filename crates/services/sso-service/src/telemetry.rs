//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use common::Environment;

/// Install the global subscriber for the given environment.
///
/// `RUST_LOG` overrides the per-environment default. Returns `false` when a
/// subscriber was already installed; any other install failure is reported
/// on stderr.
pub fn init(env: Environment) -> bool {
    if tracing::dispatcher::has_been_set() {
        return false;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if env.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("failed to install tracing subscriber: {}", e);
            false
        }
    }
}

fn default_directives(env: Environment) -> String {
    // Transport crates are noisy below info
    format!(
        "{},h2=info,hyper=info,tower=info,sqlx=warn",
        env.default_log_level()
    )
}
