//! Load and save workflow
//!
//! Save runs validate → persist → reflect result → auto-dismiss. Validation is
//! synchronous on the UI thread; the gateway call and the banner timer run on
//! the tokio runtime and report back through the store's [`Dispatcher`].
//!
//! The banner timer is never cancelled: with rapid repeated saves an older
//! timer can hide the banner of a newer save.

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::constants::banner::DISMISS_MS;
use crate::constants::messages;
use crate::gateway::SettingsGateway;
use crate::settings::SettingsPatch;
use crate::store::{Action, SettingsStore};
use crate::validation::{self, ValidationError};

pub struct SettingsWorkflow {
    gateway: Arc<dyn SettingsGateway>,
    runtime: Handle,
    banner_timeout: Duration,
}

impl SettingsWorkflow {
    pub fn new(gateway: Arc<dyn SettingsGateway>, runtime: Handle) -> Self {
        Self {
            gateway,
            runtime,
            banner_timeout: Duration::from_millis(DISMISS_MS),
        }
    }

    pub fn with_banner_timeout(mut self, banner_timeout: Duration) -> Self {
        self.banner_timeout = banner_timeout;
        self
    }

    /// Fetch the current settings into the store
    pub fn load(&self, store: &mut SettingsStore) -> JoinHandle<()> {
        store.dispatch(Action::FetchStarted);
        let dispatcher = store.dispatcher();
        let gateway = Arc::clone(&self.gateway);

        self.runtime.spawn(async move {
            let action = match gateway.fetch().await {
                Ok(doc) => Action::FetchSucceeded(doc),
                Err(err) => {
                    warn!(error = %err, "Fetch failed");
                    Action::FetchFailed(messages::FETCH_FAILED.to_string())
                }
            };
            dispatcher.dispatch(action);
        })
    }

    /// Validate and persist the store's current values.
    ///
    /// An invalid recipient list raises the validation banner and returns the
    /// error without contacting the gateway. Otherwise the returned task
    /// completes once the gateway has answered and the dismiss timer, started
    /// at the call, has fired.
    pub fn save(&self, store: &mut SettingsStore) -> Result<JoinHandle<()>, ValidationError> {
        if let Err(err) = validation::validate(store.state()) {
            info!(error = %err, "Save blocked by validation");
            store.dispatch(Action::ValidationFailed(err.clone()));
            return Err(err);
        }
        store.dispatch(Action::ValidationCleared);

        let patch = SettingsPatch::from_form(store.state());
        store.dispatch(Action::SaveStarted);

        let dispatcher = store.dispatcher();
        let gateway = Arc::clone(&self.gateway);
        let request = self.runtime.spawn(async move {
            let action = match gateway.save(&patch).await {
                Ok(doc) => Action::SaveSucceeded(doc),
                Err(err) => {
                    warn!(error = %err, "Save failed");
                    Action::SaveFailed(messages::SAVE_FAILED.to_string())
                }
            };
            dispatcher.dispatch(action);
        });

        // Runs from the click, independent of when the gateway answers
        let dispatcher = store.dispatcher();
        let banner_timeout = self.banner_timeout;
        let dismiss = self.runtime.spawn(async move {
            tokio::time::sleep(banner_timeout).await;
            dispatcher.dispatch(Action::SetResultBannerVisible(false));
        });

        Ok(self.runtime.spawn(async move {
            let _ = request.await;
            let _ = dismiss.await;
        }))
    }
}
