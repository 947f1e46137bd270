//! Location permission gate for mobile screens.
//!
//! Each time a screen appears, the [`PermissionGate`] looks at the platform's
//! location authorization state and does at most two things:
//!
//! - if access was **denied**, it presents a [`RemediationAlert`] with
//!   "Cancel" and "Go to Settings" actions;
//! - if access is **not determined** and location services are enabled, it
//!   asks the platform for when-in-use authorization.
//!
//! The gate talks to the platform only through three traits:
//! [`LocationService`], [`Presenter`] and [`SettingsNavigator`]. iOS and
//! macOS get a CoreLocation-backed service through objc2, Web gets one built
//! on the browser's Geolocation API, and every other target gets inert
//! stand-ins. The presenter belongs to the host UI.
//!
//! ## Features
//!
//! - `location-coarse`: Declare coarse location permission (default)
//! - `location-fine`: Declare fine/precise location permission
//! - `background-location`: Declare background location access
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use location_permission_gate::{platform_gate, Completion, Presenter, RemediationAlert};
//!
//! struct Screen;
//!
//! impl Presenter for Screen {
//!     fn present(
//!         &self,
//!         alert: RemediationAlert,
//!         _animated: bool,
//!         _completion: Option<Completion>,
//!     ) {
//!         println!("{}: {}", alert.title(), alert.message());
//!     }
//!
//!     fn dismiss(&self, _animated: bool, _completion: Option<Completion>) {}
//! }
//!
//! let gate = platform_gate(Rc::new(Screen)).expect("location service");
//! gate.view_did_appear(true);
//! ```
//!
//! ## Permissions
//!
//! The usage description shown by the OS the first time the prompt appears is
//! [`WHEN_IN_USE_USAGE_DESCRIPTION`]. It is embedded as a linker symbol by the
//! enabled location feature and injected into Info.plist / AndroidManifest.xml
//! by the Dioxus CLI.

mod alert;
mod gate;
mod settings;
mod status;

// Darwin-based platforms (iOS and macOS) share the same CoreLocation implementation
#[cfg(any(target_os = "ios", target_os = "macos"))]
mod darwin;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(any(target_os = "ios", target_os = "macos", target_arch = "wasm32")))]
mod unsupported;

use std::rc::Rc;

use permissions::{static_permission, Permission};

pub use alert::{ActionHandler, AlertAction, AlertActionStyle, AlertContent, RemediationAlert};
pub use gate::{
    Completion, GateConfig, GateOutcome, LocationDelegate, LocationService, PermissionGate,
    Presenter,
};
pub use settings::{SettingsNavigator, SettingsUrl, APP_SETTINGS_URL, MACOS_LOCATION_SETTINGS_URL};
pub use status::AuthorizationStatus;

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "ios", target_os = "macos"))] {
        pub use darwin::{CoreLocationService, SystemSettingsNavigator};
        /// Location service for the current target.
        pub type PlatformLocationService = darwin::CoreLocationService;
        /// Settings navigator for the current target.
        pub type PlatformSettingsNavigator = darwin::SystemSettingsNavigator;
    } else if #[cfg(target_arch = "wasm32")] {
        pub use web::{BrowserLocationService, BrowserSettingsNavigator};
        /// Location service for the current target.
        pub type PlatformLocationService = web::BrowserLocationService;
        /// Settings navigator for the current target.
        pub type PlatformSettingsNavigator = web::BrowserSettingsNavigator;
    } else {
        pub use unsupported::{UnsupportedLocationService, UnsupportedSettingsNavigator};
        /// Location service for the current target.
        pub type PlatformLocationService = unsupported::UnsupportedLocationService;
        /// Settings navigator for the current target.
        pub type PlatformSettingsNavigator = unsupported::UnsupportedSettingsNavigator;
    }
}

#[cfg(any(target_os = "ios", target_os = "macos"))]
dioxus_platform_bridge::darwin_plugin!(
    plugin = "permission_gate",
    frameworks = ["CoreLocation", "Foundation"]
);

/// Result type for permission gate operations
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while wiring the gate to the platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The configured settings URL is not a URL. This is a build
    /// configuration problem; the settings action panics on it.
    #[error("invalid settings URL {url:?}")]
    InvalidSettingsUrl { url: String },
    /// The function was not called from the main thread.
    #[error("location services must be used from the main thread")]
    NotMainThread,
    /// The platform API backing the location service is missing.
    #[error("location services are unavailable on this platform")]
    Unavailable,
}

/// Text the OS shows next to the first when-in-use authorization prompt.
pub const WHEN_IN_USE_USAGE_DESCRIPTION: &str = "please let use";

// Embed location permissions as linker symbols when features are enabled
#[cfg(feature = "location-fine")]
pub const LOCATION_FINE: Permission =
    static_permission!(Location(Fine), description = "please let use");

#[cfg(feature = "location-coarse")]
pub const LOCATION_COARSE: Permission =
    static_permission!(Location(Coarse), description = "please let use");

#[cfg(feature = "background-location")]
pub const BACKGROUND_LOCATION: Permission = static_permission!(
    Custom {
        android = "android.permission.ACCESS_BACKGROUND_LOCATION",
        ios = "NSLocationAlwaysAndWhenInUseUsageDescription",
        macos = "NSLocationUsageDescription",
        windows = "location",
        linux = "",
        web = ""
    },
    description = "please let use"
);

/// Internal function to ensure permission constants are linked into the binary.
/// This prevents the linker from optimizing them away as dead code.
#[doc(hidden)]
#[inline(never)]
pub fn __ensure_permissions_linked() {
    #[cfg(feature = "location-fine")]
    {
        let _ = &LOCATION_FINE;
    }
    #[cfg(feature = "location-coarse")]
    {
        let _ = &LOCATION_COARSE;
    }
    #[cfg(feature = "background-location")]
    {
        let _ = &BACKGROUND_LOCATION;
    }
}

#[inline(never)]
#[doc(hidden)]
fn __ensure_metadata_linked() {
    #[cfg(target_os = "ios")]
    let _ = &IOS_FRAMEWORK_METADATA;
}

/// Settings URL the platform's settings navigator understands.
pub fn platform_settings_url() -> &'static str {
    if cfg!(target_os = "macos") {
        MACOS_LOCATION_SETTINGS_URL
    } else {
        APP_SETTINGS_URL
    }
}

/// Build a gate wired to the current platform's location service and
/// settings navigator, with the default alert copy.
///
/// ## Platform behavior
///
/// - **iOS/macOS**: `CLLocationManager` via objc2; must be called on the main thread
/// - **Web**: `navigator.geolocation`; fails when there is no `window`
/// - **Android**: no backend yet; uses the inert fallback below, although the
///   `location-*` features still embed `ACCESS_*_LOCATION` manifest permissions
/// - **Other platforms**: services always report disabled, so the gate never acts
pub fn platform_gate(presenter: Rc<dyn Presenter>) -> Result<Rc<PermissionGate>> {
    __ensure_permissions_linked();
    __ensure_metadata_linked();

    let location = PlatformLocationService::new()?;
    let config = GateConfig::default().with_settings_url(platform_settings_url());

    Ok(PermissionGate::new(
        Rc::new(location),
        presenter,
        Rc::new(PlatformSettingsNavigator::default()),
        config,
    ))
}
