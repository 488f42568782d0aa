//! Command queue sample binary

use commandqueue_core::{AppConfig, CoreConfig};
use commandqueue_sample::{init_logging, run, SampleConfig};

fn main() {
    let core = CoreConfig::load();
    init_logging(core.as_ref().map(|c| c.debug).unwrap_or(false));

    let core = core.unwrap_or_else(|e| {
        tracing::warn!("Using default core config: {}", e);
        CoreConfig::default()
    });
    let config = SampleConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Using default sample config: {}", e);
        SampleConfig::default()
    });

    tracing::info!("Main thread ID: {:?}", std::thread::current().id());

    let toasts = run(&config, &core);
    tracing::info!("Sample finished, {} toasts shown", toasts.len());
}
