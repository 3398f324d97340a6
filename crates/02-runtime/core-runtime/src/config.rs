use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Process-wide runtime settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Log every boundary entry at `trace` level.
    pub trace_boundary_calls: bool,
    /// Initial capacity of vectors created through `Vec_*$new`.
    pub vec_capacity_hint: usize,
}

static CONFIG: Lazy<RwLock<RuntimeConfig>> = Lazy::new(|| RwLock::new(RuntimeConfig::default()));

/// Replaces the active configuration. Existing allocations are unaffected.
pub fn configure(config: RuntimeConfig) {
    log::debug!("core runtime configured: {config:?}");
    *CONFIG.write() = config;
}

pub fn config() -> RuntimeConfig {
    CONFIG.read().clone()
}

pub(crate) fn tracing_enabled() -> bool {
    CONFIG.read().trace_boundary_calls
}

pub(crate) fn vec_capacity_hint() -> usize {
    CONFIG.read().vec_capacity_hint
}
