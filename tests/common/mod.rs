//! Recording fakes of the gate's platform collaborators.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use location_permission_gate::{
    AuthorizationStatus, Completion, GateConfig, LocationDelegate, LocationService,
    PermissionGate, Presenter, RemediationAlert, SettingsNavigator, SettingsUrl,
};

/// A platform call observed by one of the fakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RequestAuthorization,
    Present { animated: bool, completion: bool },
    Dismiss { animated: bool, completion: bool },
    Open(String),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct FakeLocationService {
    pub status: Cell<AuthorizationStatus>,
    pub enabled: Cell<bool>,
    pub delegate: RefCell<Option<Weak<dyn LocationDelegate>>>,
    log: CallLog,
}

impl LocationService for FakeLocationService {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.status.get()
    }

    fn location_services_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn request_when_in_use_authorization(&self) {
        self.log.borrow_mut().push(Call::RequestAuthorization);
    }

    fn set_delegate(&self, delegate: Weak<dyn LocationDelegate>) {
        *self.delegate.borrow_mut() = Some(delegate);
    }
}

pub struct RecordingPresenter {
    presented: RefCell<Vec<RemediationAlert>>,
    log: CallLog,
}

impl RecordingPresenter {
    /// Remove the most recently presented alert so its actions can be invoked.
    pub fn take_presented(&self) -> Option<RemediationAlert> {
        self.presented.borrow_mut().pop()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&self, alert: RemediationAlert, animated: bool, completion: Option<Completion>) {
        self.log.borrow_mut().push(Call::Present {
            animated,
            completion: completion.is_some(),
        });
        self.presented.borrow_mut().push(alert);
    }

    fn dismiss(&self, animated: bool, completion: Option<Completion>) {
        self.log.borrow_mut().push(Call::Dismiss {
            animated,
            completion: completion.is_some(),
        });
    }
}

pub struct RecordingNavigator {
    log: CallLog,
}

impl SettingsNavigator for RecordingNavigator {
    fn open(&self, url: &SettingsUrl) {
        self.log.borrow_mut().push(Call::Open(url.to_string()));
    }
}

pub struct Harness {
    pub log: CallLog,
    pub location: Rc<FakeLocationService>,
    pub presenter: Rc<RecordingPresenter>,
    pub gate: Rc<PermissionGate>,
}

impl Harness {
    pub fn new(status: AuthorizationStatus, services_enabled: bool) -> Self {
        Self::with_config(status, services_enabled, GateConfig::default())
    }

    pub fn with_config(
        status: AuthorizationStatus,
        services_enabled: bool,
        config: GateConfig,
    ) -> Self {
        let log = CallLog::default();
        let location = Rc::new(FakeLocationService {
            status: Cell::new(status),
            enabled: Cell::new(services_enabled),
            delegate: RefCell::new(None),
            log: log.clone(),
        });
        let presenter = Rc::new(RecordingPresenter {
            presented: RefCell::new(Vec::new()),
            log: log.clone(),
        });
        let navigator = Rc::new(RecordingNavigator { log: log.clone() });

        let gate = PermissionGate::new(location.clone(), presenter.clone(), navigator, config);

        Self {
            log,
            location,
            presenter,
            gate,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.log.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}
