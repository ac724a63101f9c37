//! Log output for the service.
//!
//! Development logs are pretty-printed with source locations. Production logs
//! are flattened JSON lines carrying the request span. `RUST_LOG` overrides
//! the default filter in both modes.

use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Filter used when `RUST_LOG` is unset.
fn default_filter(env: Environment) -> &'static str {
    match env {
        Environment::Development => "debug,tower_http=debug,sqlx=warn",
        Environment::Production => "info,vcb_srs=info,tower_http=info,sqlx=warn",
    }
}

fn output_layer(env: Environment) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = tracing_subscriber::fmt::layer().with_target(true);
    match env {
        Environment::Development => layer.with_file(true).with_line_number(true).pretty().boxed(),
        Environment::Production => layer
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
    }
}

pub fn init_tracing(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(*env)));

    tracing_subscriber::registry()
        .with(output_layer(*env).with_filter(filter))
        .init();

    tracing::info!(environment = ?env, "Tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_keeps_sqlx_quiet() {
        for env in [Environment::Development, Environment::Production] {
            let filter = default_filter(env);
            assert!(filter.contains("sqlx=warn"), "{filter}");
            assert!(filter.parse::<EnvFilter>().is_ok(), "{filter}");
        }
        assert!(default_filter(Environment::Development).starts_with("debug"));
        assert!(default_filter(Environment::Production).starts_with("info"));
    }
}
