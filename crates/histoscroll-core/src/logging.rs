#![forbid(unsafe_code)]

//! Logging facade.
//!
//! All crates in the workspace log through `tracing`. Events use these
//! targets and fields:
//!
//! | Event                   | Level   | Fields                       |
//! |-------------------------|---------|------------------------------|
//! | drag started / released | `debug` | `offset`, `velocity`, `to`   |
//! | settle phase change     | `debug` | `from`, `to`, `offset`       |
//! | offset re-clamped       | `debug` | `from`, `to`                 |
//! | viewport mounted/resize | `debug` | `viewport`, `scrollable`     |
//! | capture acquire/release | `trace` | `acquired` / `released`      |
//! | metrics recomputed      | `trace` | `items`, `step`, `peak`      |
//!
//! With the `tracing-json` feature, [`init_json`] installs a JSON
//! subscriber filtered by `RUST_LOG`.

pub use tracing::{debug, error, info, trace, warn};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "histoscroll=info,histoscroll_core=info";

/// Install a global JSON subscriber.
///
/// Fails if a global subscriber is already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
}
