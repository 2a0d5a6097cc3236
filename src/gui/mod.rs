//! Settings form implemented with egui/eframe
//!
//! - **app**: eframe application owning the store and workflow
//! - **form**: the form layout and save button
//! - **components**: individual form sections and banners

pub mod app;
pub mod components;
pub mod constants;
pub mod form;

pub use app::{run_gui, SettingsApp};
