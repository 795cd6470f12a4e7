//! analytics.js loader — installs the command-queue stub, injects the library
//! script, and issues `create` exactly once per page.

use std::sync::Arc;

use tracing::{info, warn};

use i13n_core::{Command, CommandQueue, GaConfig, Page, ScriptElement, Tracker};

/// Resolve the page's tracking callable, bootstrapping it on first use.
///
/// If a tracker is already installed under `config.global_name` it is returned
/// untouched, so repeated calls never inject a second script or re-`create`
/// with a different id. A missing tracking id is logged and otherwise ignored.
pub fn initialize(page: &dyn Page, config: &GaConfig) -> Arc<dyn Tracker> {
    if let Some(existing) = page.tracker(&config.global_name) {
        return existing;
    }
    bootstrap(page, config)
}

/// Unconditionally install a fresh stub, inject the script, and queue `create`.
/// Returns the stub so callers can inspect or drain what it buffered.
pub(crate) fn bootstrap(page: &dyn Page, config: &GaConfig) -> Arc<CommandQueue> {
    let tracking_id = config.tracking_id();
    if tracking_id.is_none() {
        warn!(global = %config.global_name, "Google analytics ID is undefined");
    }

    let stub = Arc::new(CommandQueue::new());
    page.install_tracker(&config.global_name, stub.clone());
    page.append_to_head(ScriptElement::async_js(config.script_src.as_str()));

    info!(
        global = %config.global_name,
        src = %config.script_src,
        loaded_at = stub.loaded_at(),
        "analytics.js stub installed"
    );

    stub.call(Command::create(tracking_id, &config.cookie_domain));
    stub
}
