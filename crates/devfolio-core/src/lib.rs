//! Core state for devfolio: portfolio content, the simulated terminal and the
//! editor navigation model that the UI renders.
//!
//! Everything here is UI-free. The terminal engine, the open-panel set and the
//! workbench that mediates between them can be driven and inspected from tests
//! without a screen.

pub mod attribution;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod explorer;
pub mod markup;
pub mod navigation;
pub mod panels;
pub mod terminal;
pub mod workbench;

pub use error::FolioError;
pub use navigation::{CyclePolicy, OpenPanelSet, PanelId};
pub use terminal::{NavigationSignal, SignalSink, TerminalEngine};
pub use workbench::Workbench;
