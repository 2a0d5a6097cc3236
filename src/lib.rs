#![forbid(unsafe_code)]

pub mod config;
pub mod constants;
pub mod gateway;
pub mod gui;
pub mod settings;
pub mod store;
pub mod validation;
pub mod workflow;
