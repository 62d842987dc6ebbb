//! Backend layer: services behind the UI
//!
//! The backend is decoupled from rendering. It owns the lab API client (via
//! `lab-dashboard-core`'s gateway), the configuration and the clipboard.
//!
//!     config_service      DashboardConfig: file + environment, validated on load
//!     core_service        CoreService: gateway, controllers, export
//!     clipboard           Osc52Clipboard: clipboard through the terminal
//!
//! Data flow:
//!
//!     key press → Update layer → CoreService / controller (spawns a task)
//!         → gateway → lab API
//!         → result published on a broadcast channel
//!         → main loop calls `sync()` → Model updated → View re-renders

mod clipboard;
mod config_service;
mod core_service;

pub use config_service::{APP_DIR, ConfigService, DashboardConfig, LocalConfigService};
pub use core_service::CoreService;
