//! Web platform location service
//!
//! Uses the browser's Geolocation API. Browsers have no synchronous
//! permission query, so the status starts as `NotDetermined` and is updated
//! from the callbacks of the request's `getCurrentPosition()` call.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Geolocation, Position, PositionError};

use crate::{
    AuthorizationStatus, Error, LocationDelegate, LocationService, Result, SettingsNavigator,
    SettingsUrl,
};

struct BrowserState {
    status: Cell<AuthorizationStatus>,
    delegate: RefCell<Option<Weak<dyn LocationDelegate>>>,
}

impl BrowserState {
    fn settle(&self, status: AuthorizationStatus) {
        self.status.set(status);
        let delegate = self.delegate.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(delegate) = delegate {
            delegate.authorization_changed(status);
        }
    }
}

/// Location service backed by `navigator.geolocation`.
pub struct BrowserLocationService {
    geolocation: Option<Geolocation>,
    state: Rc<BrowserState>,
}

impl BrowserLocationService {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::Unavailable)?;
        let geolocation = window.navigator().geolocation().ok();

        Ok(Self {
            geolocation,
            state: Rc::new(BrowserState {
                status: Cell::new(AuthorizationStatus::NotDetermined),
                delegate: RefCell::new(None),
            }),
        })
    }
}

impl LocationService for BrowserLocationService {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.state.status.get()
    }

    fn location_services_enabled(&self) -> bool {
        self.geolocation.is_some()
    }

    fn request_when_in_use_authorization(&self) {
        let Some(geolocation) = &self.geolocation else {
            warn!("geolocation API not available");
            return;
        };

        let state = Rc::clone(&self.state);
        let success = Closure::once_into_js(move |_position: Position| {
            state.settle(AuthorizationStatus::AuthorizedWhenInUse);
        });

        let state = Rc::clone(&self.state);
        let failure = Closure::once_into_js(move |error: PositionError| {
            if error.code() == PositionError::PERMISSION_DENIED {
                state.settle(AuthorizationStatus::Denied);
            } else {
                // Timeouts and missing fixes only happen after access was granted.
                debug!(code = error.code(), "position error after authorization");
                state.settle(AuthorizationStatus::AuthorizedWhenInUse);
            }
        });

        if geolocation
            .get_current_position_with_error_callback(
                success.unchecked_ref(),
                Some(failure.unchecked_ref()),
            )
            .is_err()
        {
            warn!("failed to request position");
        }
    }

    fn set_delegate(&self, delegate: Weak<dyn LocationDelegate>) {
        *self.state.delegate.borrow_mut() = Some(delegate);
    }
}

/// Browsers expose no settings surface; requests are logged and dropped.
#[derive(Debug, Default)]
pub struct BrowserSettingsNavigator;

impl SettingsNavigator for BrowserSettingsNavigator {
    fn open(&self, url: &SettingsUrl) {
        warn!(%url, "browsers cannot open the system settings");
    }
}
