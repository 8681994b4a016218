use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Workspace crates that log at the application level rather than the base level
const WORKSPACE_TARGETS: [&str; 5] = [
    "webstore",
    "domain_products",
    "domain_customers",
    "axum_helpers",
    "tower_http",
];

/// Install color-eyre for the binary's error reports.
///
/// Location sections are shown, environment sections are hidden. Later calls
/// are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter directives used when `RUST_LOG` is not set.
///
/// Third-party crates log at the base level; workspace crates and HTTP
/// request tracing log one level more verbose.
///
/// ```
/// use core_config::{tracing::default_directives, Environment};
///
/// let directives = default_directives(&Environment::Production);
/// assert!(directives.starts_with("warn,"));
/// assert!(directives.contains("domain_products=info"));
/// ```
pub fn default_directives(environment: &Environment) -> String {
    let (base, workspace) = if environment.is_production() {
        ("warn", "info")
    } else {
        ("info", "debug")
    };

    std::iter::once(base.to_string())
        .chain(
            WORKSPACE_TARGETS
                .iter()
                .map(|target| format!("{}={}", target, workspace)),
        )
        .collect::<Vec<_>>()
        .join(",")
}

/// `RUST_LOG` when it is set and parses, otherwise [`default_directives`]
fn build_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)))
}

/// Install the global subscriber.
///
/// - **Production**: JSON lines with flattened event fields, no targets.
/// - **Development**: pretty output with targets, and a close event per
///   `#[instrument]` span carrying its duration.
///
/// Both add `tracing_error::ErrorLayer` so eyre reports carry the span trace.
/// A second call leaves the first subscriber in place.
pub fn init_tracing(environment: &Environment) {
    let filter = build_filter(environment);
    let directives = filter.to_string();

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(?environment, filter = %directives, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
