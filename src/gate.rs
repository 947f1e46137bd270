//! The screen-level permission gate.
//!
//! A [`PermissionGate`] is driven by the host UI: call
//! [`PermissionGate::view_did_appear`] every time the screen becomes visible.
//! Each call evaluates two independent checks against the current platform
//! state:
//!
//! - authorization `Denied` presents a [`RemediationAlert`];
//! - authorization `NotDetermined` with location services enabled issues one
//!   when-in-use authorization request.
//!
//! A denied status with services disabled still shows the alert. Every other
//! combination does nothing.

use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, info};

use crate::alert::{AlertContent, RemediationAlert};
use crate::settings::{SettingsNavigator, APP_SETTINGS_URL};
use crate::AuthorizationStatus;

/// Callback run once a presentation or dismissal finishes.
pub type Completion = Box<dyn FnOnce()>;

/// Receives authorization decisions the platform delivers out of band.
pub trait LocationDelegate {
    fn authorization_changed(&self, _status: AuthorizationStatus) {}
}

/// Platform location subsystem.
pub trait LocationService {
    fn authorization_status(&self) -> AuthorizationStatus;

    fn location_services_enabled(&self) -> bool;

    /// Show the system prompt for when-in-use access. The outcome arrives
    /// later through the registered [`LocationDelegate`].
    fn request_when_in_use_authorization(&self);

    /// Register the delegate that receives authorization changes. Replaces
    /// any previous registration.
    fn set_delegate(&self, delegate: Weak<dyn LocationDelegate>);
}

/// Modal presentation surface of the hosting screen.
pub trait Presenter {
    fn present(&self, alert: RemediationAlert, animated: bool, completion: Option<Completion>);

    fn dismiss(&self, animated: bool, completion: Option<Completion>);
}

/// Copy and navigation target used by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub alert: AlertContent,
    pub settings_url: String,
}

impl GateConfig {
    pub fn with_alert(mut self, alert: AlertContent) -> Self {
        self.alert = alert;
        self
    }

    pub fn with_settings_url(mut self, url: impl Into<String>) -> Self {
        self.settings_url = url.into();
        self
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            alert: AlertContent::default(),
            settings_url: APP_SETTINGS_URL.to_string(),
        }
    }
}

/// What a single appearance did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateOutcome {
    pub alert_presented: bool,
    pub authorization_requested: bool,
}

impl GateOutcome {
    pub fn is_noop(&self) -> bool {
        !self.alert_presented && !self.authorization_requested
    }
}

/// Screen controller deciding between doing nothing, requesting
/// authorization, and offering a trip to Settings.
pub struct PermissionGate {
    location: Rc<dyn LocationService>,
    presenter: Rc<dyn Presenter>,
    navigator: Rc<dyn SettingsNavigator>,
    config: GateConfig,
}

impl PermissionGate {
    /// Create the gate and register it as the location service's delegate.
    ///
    /// Registration happens here, before the first appearance. The service
    /// only holds a weak reference, so dropping the returned `Rc` drops the
    /// gate.
    pub fn new(
        location: Rc<dyn LocationService>,
        presenter: Rc<dyn Presenter>,
        navigator: Rc<dyn SettingsNavigator>,
        config: GateConfig,
    ) -> Rc<Self> {
        let gate = Rc::new(Self {
            location,
            presenter,
            navigator,
            config,
        });

        let delegate: Rc<dyn LocationDelegate> = gate.clone();
        gate.location.set_delegate(Rc::downgrade(&delegate));
        debug!("permission gate registered as location delegate");

        gate
    }

    /// Evaluate permission state for a screen that just became visible.
    ///
    /// `animated` describes the appearance transition and does not affect the
    /// decision; the alert is always presented with animation.
    pub fn view_did_appear(&self, animated: bool) -> GateOutcome {
        let status = self.location.authorization_status();
        let mut outcome = GateOutcome::default();

        if status.is_denied() {
            self.present_remediation_alert();
            outcome.alert_presented = true;
        }

        let services_enabled = self.location.location_services_enabled();
        if services_enabled && status.is_not_determined() {
            info!("requesting when-in-use location authorization");
            self.location.request_when_in_use_authorization();
            outcome.authorization_requested = true;
        }

        debug!(%status, services_enabled, animated, ?outcome, "view appeared");
        outcome
    }

    fn present_remediation_alert(&self) {
        let alert = RemediationAlert::new(
            &self.config.alert,
            Rc::clone(&self.presenter),
            Rc::clone(&self.navigator),
            self.config.settings_url.clone(),
        );
        info!("location access denied, presenting settings alert");
        self.presenter.present(alert, true, None);
    }
}

impl LocationDelegate for PermissionGate {
    fn authorization_changed(&self, status: AuthorizationStatus) {
        debug!(%status, "location authorization changed");
    }
}

impl fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionGate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
