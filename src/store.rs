//! Settings store: the single source of truth for the form
//!
//! All mutations go through [`Action`]s, either dispatched directly by the UI
//! thread or queued from async tasks through a [`Dispatcher`] and applied on
//! the next [`SettingsStore::process_pending`].

use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::settings::{BatchingInterval, SettingsDocument};
use crate::validation::ValidationError;

/// Outcome of the most recent save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Unset,
    Succeeded,
    Failed,
}

/// Which result banner the form should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultBanner {
    Success,
    Failure,
}

/// Working copy of the settings plus UI metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub send_digests: bool,
    pub show_recipients_editor: bool,
    /// Raw editor text, one address per line
    pub recipients_text: String,
    pub send_end_user_alerts: bool,
    pub send_remediation_alerts: bool,
    pub alert_batching_interval_hours: BatchingInterval,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub show_result_banner: bool,
    pub save_state: SaveState,
    /// Set by a rejected save, cleared by the next one that validates
    pub validation_error: Option<ValidationError>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            send_digests: false,
            show_recipients_editor: false,
            recipients_text: String::new(),
            send_end_user_alerts: true,
            send_remediation_alerts: true,
            alert_batching_interval_hours: BatchingInterval::Realtime,
            is_loading: false,
            last_error: None,
            show_result_banner: false,
            save_state: SaveState::Unset,
            validation_error: None,
        }
    }
}

impl FormState {
    /// The batching selector is only meaningful while some alert is enabled
    pub fn batching_selector_enabled(&self) -> bool {
        self.send_end_user_alerts || self.send_remediation_alerts
    }

    pub fn recipients_editor_visible(&self) -> bool {
        self.send_digests && self.show_recipients_editor
    }

    pub fn validation_banner_visible(&self) -> bool {
        self.validation_error.is_some() && self.recipients_editor_visible()
    }

    pub fn banner(&self) -> Option<ResultBanner> {
        if !self.show_result_banner {
            return None;
        }
        match self.save_state {
            SaveState::Succeeded => Some(ResultBanner::Success),
            SaveState::Failed => Some(ResultBanner::Failure),
            SaveState::Unset => None,
        }
    }

    fn load_document(&mut self, doc: SettingsDocument) {
        self.send_digests = doc.send_digests;
        self.show_recipients_editor = !doc.digest_recipients.is_empty();
        self.recipients_text = doc.digest_recipients.join("\n");
        self.send_end_user_alerts = doc.send_end_user_alerts;
        self.send_remediation_alerts = doc.send_remediation_alerts;
        self.alert_batching_interval_hours = doc.alert_batching_interval_hours;
    }

    /// Apply a single mutation
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetSendDigests(value) => self.send_digests = value,
            Action::SetShowRecipientsEditor(value) => self.show_recipients_editor = value,
            Action::SetRecipientsText(text) => self.recipients_text = text,
            Action::SetSendEndUserAlerts(value) => self.send_end_user_alerts = value,
            Action::SetSendRemediationAlerts(value) => self.send_remediation_alerts = value,
            Action::SetBatchingInterval(interval) => self.alert_batching_interval_hours = interval,
            Action::SetResultBannerVisible(visible) => self.show_result_banner = visible,

            Action::FetchStarted => {
                self.is_loading = true;
                self.last_error = None;
            }
            Action::FetchSucceeded(doc) => {
                self.load_document(doc);
                self.is_loading = false;
                self.last_error = None;
            }
            Action::FetchFailed(message) => {
                self.is_loading = false;
                self.last_error = Some(message);
            }

            Action::SaveStarted => {
                self.is_loading = true;
                self.last_error = None;
                self.show_result_banner = false;
            }
            Action::SaveSucceeded(doc) => {
                self.load_document(doc);
                self.is_loading = false;
                self.last_error = None;
                self.save_state = SaveState::Succeeded;
                self.show_result_banner = true;
            }
            Action::SaveFailed(message) => {
                self.is_loading = false;
                self.last_error = Some(message);
                self.save_state = SaveState::Failed;
                self.show_result_banner = true;
            }

            Action::ValidationFailed(err) => self.validation_error = Some(err),
            Action::ValidationCleared => self.validation_error = None,
        }
    }
}

/// Every mutation the store accepts, one variant per field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetSendDigests(bool),
    SetShowRecipientsEditor(bool),
    SetRecipientsText(String),
    SetSendEndUserAlerts(bool),
    SetSendRemediationAlerts(bool),
    SetBatchingInterval(BatchingInterval),
    SetResultBannerVisible(bool),
    FetchStarted,
    FetchSucceeded(SettingsDocument),
    FetchFailed(String),
    SaveStarted,
    SaveSucceeded(SettingsDocument),
    SaveFailed(String),
    ValidationFailed(ValidationError),
    ValidationCleared,
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Cloneable handle that queues actions for the store from any thread
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
    waker: Option<Waker>,
}

impl Dispatcher {
    /// Queue `action`. Returns false if the store is gone, in which case the
    /// action is dropped.
    pub fn dispatch(&self, action: Action) -> bool {
        match self.tx.send(action) {
            Ok(()) => {
                if let Some(wake) = &self.waker {
                    wake();
                }
                true
            }
            Err(err) => {
                debug!(action = ?err.0, "Store no longer exists, discarding action");
                false
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("closed", &self.tx.is_closed())
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}

pub struct SettingsStore {
    state: FormState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    waker: Option<Waker>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::with_state(FormState::default())
    }

    pub fn with_state(state: FormState) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            tx,
            rx,
            waker: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Called whenever a dispatcher queues an action (e.g. to request a repaint).
    /// Only dispatchers created after this call see the hook.
    pub fn set_waker(&mut self, wake: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(wake));
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            tx: self.tx.clone(),
            waker: self.waker.clone(),
        }
    }

    /// Apply an action immediately
    pub fn dispatch(&mut self, action: Action) {
        match &action {
            // The workflow logs the underlying cause where it happens
            Action::FetchFailed(message) | Action::SaveFailed(message) => {
                debug!(error = %message, "Recording request failure");
            }
            Action::FetchSucceeded(_) => info!("Loaded email settings"),
            Action::SaveSucceeded(_) => info!("Saved email settings"),
            other => debug!(action = ?other, "Applying action"),
        }
        self.state.apply(action);
    }

    /// Apply every queued action in arrival order, returning how many ran
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
