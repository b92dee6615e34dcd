pub mod persistence;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "goal_balance=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `directive` overrides the default `goal_balance=info`; `RUST_LOG` is honoured on top.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

        let directive: Directive = directive
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| DEFAULT_DIRECTIVE.parse().expect("default directive is valid"));
        let filter = EnvFilter::from_default_env().add_directive(directive);

        let _ = fmt().with_env_filter(filter).try_init();
    });
}
