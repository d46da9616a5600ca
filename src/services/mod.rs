// MiniBrowser Services
// Non-persistent engines: network activity monitoring, suggestion
// aggregation, debounce timing, dark-mode injection, and settings.

pub mod dark_mode;
pub mod debounce;
pub mod network_monitor;
pub mod remote_suggest;
pub mod settings_engine;
pub mod suggestion_aggregator;
