//! UI components module
//!
//! Reusable UI components: panels, separators, the status bar and the
//! loading spinner.

pub mod animation;
pub mod borders;
pub mod panels;
pub mod status_bar;

pub use animation::Spinner;
pub use panels::{Panel, PanelStyle};
pub use status_bar::StatusBar;
