//! devfolio: a personal portfolio presented as a code editor in the terminal.

pub mod logging;
pub mod ui;

pub use ui::{run_ui, UiOptions};
