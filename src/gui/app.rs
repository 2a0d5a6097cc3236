//! Settings window implemented with egui/eframe

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::info;

use super::constants::*;
use super::form;
use crate::config::AppConfig;
use crate::gateway::InMemoryGateway;
use crate::settings::AccountConfig;
use crate::store::SettingsStore;
use crate::workflow::SettingsWorkflow;

pub struct SettingsApp {
    store: SettingsStore,
    workflow: SettingsWorkflow,
}

impl SettingsApp {
    /// Create the app and start fetching the current settings
    pub fn new(cc: &CreationContext<'_>, workflow: SettingsWorkflow) -> Self {
        info!("Initializing email settings form");

        let mut store = SettingsStore::new();
        let ctx = cc.egui_ctx.clone();
        store.set_waker(move || ctx.request_repaint());
        workflow.load(&mut store);

        Self::with_store(store, workflow)
    }

    /// Wrap an existing store without triggering a fetch
    pub fn with_store(store: SettingsStore, workflow: SettingsWorkflow) -> Self {
        Self { store, workflow }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Apply queued results and draw the form
    pub fn show(&mut self, ui: &mut egui::Ui) {
        self.store.process_pending();

        ui.add_space(PADDING);
        egui::ScrollArea::vertical().show(ui, |ui| {
            if form::ui(ui, &mut self.store) {
                // Validation failures surface through the store's banner
                let _ = self.workflow.save(&mut self.store);
            }
        });
    }
}

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show(ui);
        });
    }
}

pub fn run_gui(config: AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let gateway = InMemoryGateway::new(AccountConfig::sample())
        .with_latency(config.gateway.fetch_delay(), config.gateway.save_delay())
        .with_failure(config.gateway.failure);
    info!(failure = ?config.gateway.failure, "Using in-memory settings backend");

    let workflow = SettingsWorkflow::new(Arc::new(gateway), runtime.handle().clone())
        .with_banner_timeout(config.ui.banner_timeout());

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Email Notification Settings"),
        ..Default::default()
    };

    eframe::run_native(
        "Email Notification Settings",
        options,
        Box::new(|cc| Ok(Box::new(SettingsApp::new(cc, workflow)))),
    )
    .map_err(|err| anyhow!("Failed to launch settings window: {err}"))
}
