//! Darwin platform (iOS and macOS) location service and settings navigation
//!
//! Both iOS and macOS use the same CoreLocation framework and share identical
//! APIs for authorization. Settings URLs are opened with `robius-open`.

use std::cell::RefCell;
use std::rc::Weak;

use objc2::rc::Retained;
use objc2::runtime::{NSObject, NSObjectProtocol, ProtocolObject};
use objc2::{define_class, msg_send, DefinedClass, MainThreadMarker, MainThreadOnly};
use objc2_core_location::{CLAuthorizationStatus, CLLocationManager, CLLocationManagerDelegate};
use objc2_foundation::{NSString, NSURL};
use tracing::{debug, warn};

use crate::{
    AuthorizationStatus, Error, LocationDelegate, LocationService, Result, SettingsNavigator,
    SettingsUrl,
};

impl From<CLAuthorizationStatus> for AuthorizationStatus {
    fn from(status: CLAuthorizationStatus) -> Self {
        match status {
            CLAuthorizationStatus::NotDetermined => AuthorizationStatus::NotDetermined,
            CLAuthorizationStatus::Denied => AuthorizationStatus::Denied,
            CLAuthorizationStatus::AuthorizedWhenInUse => AuthorizationStatus::AuthorizedWhenInUse,
            CLAuthorizationStatus::AuthorizedAlways => AuthorizationStatus::AuthorizedAlways,
            // Restricted, plus anything newer than this crate: never prompt.
            _ => AuthorizationStatus::Restricted,
        }
    }
}

#[derive(Default)]
struct ObserverIvars {
    target: RefCell<Option<Weak<dyn LocationDelegate>>>,
}

define_class!(
    // SAFETY: NSObject has no subclassing requirements and the class does
    // not implement Drop.
    #[unsafe(super(NSObject))]
    #[thread_kind = MainThreadOnly]
    #[name = "LocationPermissionGateObserver"]
    #[ivars = ObserverIvars]
    struct AuthorizationObserver;

    unsafe impl NSObjectProtocol for AuthorizationObserver {}

    unsafe impl CLLocationManagerDelegate for AuthorizationObserver {
        #[unsafe(method(locationManagerDidChangeAuthorization:))]
        fn did_change_authorization(&self, manager: &CLLocationManager) {
            let status = unsafe { manager.authorizationStatus() }.into();
            self.forward(status);
        }
    }
);

impl AuthorizationObserver {
    fn new(mtm: MainThreadMarker) -> Retained<Self> {
        let this = Self::alloc(mtm).set_ivars(ObserverIvars::default());
        unsafe { msg_send![super(this), init] }
    }

    fn set_target(&self, target: Weak<dyn LocationDelegate>) {
        *self.ivars().target.borrow_mut() = Some(target);
    }

    fn forward(&self, status: AuthorizationStatus) {
        let target = self.ivars().target.borrow().as_ref().and_then(Weak::upgrade);
        match target {
            Some(delegate) => delegate.authorization_changed(status),
            None => debug!(%status, "authorization changed with no delegate registered"),
        }
    }
}

/// Location service backed by a `CLLocationManager`.
///
/// The manager only keeps a weak reference to its delegate, so the observer
/// object is owned here for as long as the service lives.
pub struct CoreLocationService {
    manager: Retained<CLLocationManager>,
    observer: Retained<AuthorizationObserver>,
}

impl CoreLocationService {
    /// Create the manager. `CLLocationManager` is main-thread-only.
    pub fn new() -> Result<Self> {
        let mtm = MainThreadMarker::new().ok_or(Error::NotMainThread)?;

        // SAFETY: we're on the main thread, checked above.
        let manager = unsafe { CLLocationManager::new() };
        let observer = AuthorizationObserver::new(mtm);
        unsafe { manager.setDelegate(Some(ProtocolObject::from_ref(&*observer))) };

        Ok(Self { manager, observer })
    }
}

impl LocationService for CoreLocationService {
    fn authorization_status(&self) -> AuthorizationStatus {
        unsafe { self.manager.authorizationStatus() }.into()
    }

    fn location_services_enabled(&self) -> bool {
        unsafe { CLLocationManager::locationServicesEnabled_class() }
    }

    fn request_when_in_use_authorization(&self) {
        unsafe { self.manager.requestWhenInUseAuthorization() }
    }

    fn set_delegate(&self, delegate: Weak<dyn LocationDelegate>) {
        self.observer.set_target(delegate);
    }
}

/// Opens settings URLs through the system URL handler.
///
/// `robius-open` goes through `openURL:options:completionHandler:` on iOS
/// and `NSWorkspace` on macOS.
#[derive(Debug, Default)]
pub struct SystemSettingsNavigator;

impl SettingsNavigator for SystemSettingsNavigator {
    fn open(&self, url: &SettingsUrl) {
        // SettingsUrl only admits RFC 3986 characters, so NSURL accepts every
        // value that reaches this point.
        let ns_url = unsafe { NSURL::URLWithString(&NSString::from_str(url.as_str())) };
        if ns_url.is_none() {
            panic!(
                "{}",
                Error::InvalidSettingsUrl {
                    url: url.to_string()
                }
            );
        }

        if let Err(err) = robius_open::Uri::new(url.as_str()).open() {
            warn!(%url, ?err, "failed to open settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_keeps_denied_and_undetermined_apart() {
        assert_eq!(
            AuthorizationStatus::from(CLAuthorizationStatus::Denied),
            AuthorizationStatus::Denied
        );
        assert_eq!(
            AuthorizationStatus::from(CLAuthorizationStatus::NotDetermined),
            AuthorizationStatus::NotDetermined
        );
        assert_eq!(
            AuthorizationStatus::from(CLAuthorizationStatus::Restricted),
            AuthorizationStatus::Restricted
        );
    }

    #[test]
    fn settings_urls_are_accepted_by_nsurl() {
        for url in [crate::APP_SETTINGS_URL, crate::MACOS_LOCATION_SETTINGS_URL] {
            let url = SettingsUrl::parse(url).unwrap();
            let ns_url = unsafe { NSURL::URLWithString(&NSString::from_str(url.as_str())) };
            assert!(ns_url.is_some(), "{url}");
        }
    }
}
