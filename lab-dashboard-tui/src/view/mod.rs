//! View layer: read-only rendering of the model
//!
//!     layout          title bar, page, status bar, dialogs on top
//!     theme           colors and styles
//!     pages/
//!         dashboard   domain table
//!         labs        labs of the expanded domain and their details
//!     components/
//!         modal       creation form, delete confirmation, help, error
//!         statusbar   key hints and the current notice

mod components;
mod layout;
mod pages;
mod theme;

pub use layout::render;
