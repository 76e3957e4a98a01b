//! Log output for the `item-batch` binary.
//!
//! Events go to stdout through `tracing_subscriber::fmt`, filtered by
//! `RUST_LOG` (default `info`). With `json` set every event is one JSON
//! line, which keeps the batch span fields (`batch_id`) machine readable.

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_timer(ChronoLocal::rfc_3339()),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_target(false)
                    .with_timer(ChronoLocal::rfc_3339()),
            )
            .try_init()?;
    }

    Ok(())
}
