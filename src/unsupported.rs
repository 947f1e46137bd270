//! Fallback for targets without a location backend.
//!
//! Location services always report disabled and the status stays
//! `NotDetermined`, so a gate on these targets never prompts and never
//! presents an alert.

use std::cell::RefCell;
use std::rc::Weak;

use tracing::warn;

use crate::{
    AuthorizationStatus, LocationDelegate, LocationService, Result, SettingsNavigator, SettingsUrl,
};

#[derive(Default)]
pub struct UnsupportedLocationService {
    delegate: RefCell<Option<Weak<dyn LocationDelegate>>>,
}

impl UnsupportedLocationService {
    pub fn new() -> Result<Self> {
        Ok(Self::default())
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate
            .borrow()
            .as_ref()
            .is_some_and(|delegate| delegate.strong_count() > 0)
    }
}

impl LocationService for UnsupportedLocationService {
    fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::NotDetermined
    }

    fn location_services_enabled(&self) -> bool {
        false
    }

    fn request_when_in_use_authorization(&self) {
        warn!("location authorization is not supported on this platform");
    }

    fn set_delegate(&self, delegate: Weak<dyn LocationDelegate>) {
        *self.delegate.borrow_mut() = Some(delegate);
    }
}

#[derive(Debug, Default)]
pub struct UnsupportedSettingsNavigator;

impl SettingsNavigator for UnsupportedSettingsNavigator {
    fn open(&self, url: &SettingsUrl) {
        warn!(%url, "opening settings is not supported on this platform");
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{platform_gate, Completion, Presenter, RemediationAlert};

    struct NeverPresents;

    impl Presenter for NeverPresents {
        fn present(
            &self,
            _alert: RemediationAlert,
            _animated: bool,
            _completion: Option<Completion>,
        ) {
            panic!("nothing should be presented without a location backend");
        }

        fn dismiss(&self, _animated: bool, _completion: Option<Completion>) {}
    }

    #[test]
    fn gate_is_inert_without_a_backend() {
        let gate = platform_gate(Rc::new(NeverPresents)).unwrap();
        assert!(gate.view_did_appear(false).is_noop());
    }

    #[test]
    fn delegate_registration_is_weak() {
        let service = UnsupportedLocationService::new().unwrap();
        let delegate: Rc<dyn LocationDelegate> = Rc::new(Listener);
        service.set_delegate(Rc::downgrade(&delegate));
        assert!(service.has_delegate());

        drop(delegate);
        assert!(!service.has_delegate());
    }

    struct Listener;

    impl LocationDelegate for Listener {}
}
