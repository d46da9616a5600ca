// MiniBrowser managers
// Each manager encapsulates one slice of shell state.

pub mod bookmark_manager;
pub mod history_manager;
pub mod session_orchestrator;
