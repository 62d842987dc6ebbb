//! Message layer: what happened, in terms the Update layer understands
//!
//! The Event layer translates raw terminal input into messages; the main
//! loop adds a `Tick` on every iteration so background results are picked
//! up. The Update layer consumes them.
//!
//!     AppMessage          top-level (quit, focus, refresh, help, tick)
//!     ContentMessage      dashboard table and labs panel
//!     ModalMessage        keys inside the active dialog

mod app;
mod content;
mod modal;

pub use app::AppMessage;
pub use content::ContentMessage;
pub use modal::ModalMessage;
