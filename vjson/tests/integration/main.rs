//! Integration tests for the public `vjson` API.

use std::sync::LazyLock;

use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::prelude::*;

mod documents;
mod extension;
mod parse;
mod write;

#[cfg(feature = "serde")]
mod serde_support;

static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    let filter = std::env::var("VJSON_LOG")
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(LevelFilter::TRACE));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_target(false)
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Installs a test-friendly tracing subscriber once per process.
///
/// `VJSON_LOG` takes the usual target filter syntax (`vjson=debug`); without it every
/// event is printed.
pub fn setup() {
    LazyLock::force(&SUBSCRIBER_INIT);
}
