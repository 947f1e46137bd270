use std::fmt;

/// Location authorization state as reported by the platform.
///
/// The platform owns this value; the gate only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet.
    NotDetermined,
    /// Access is blocked by policy (parental controls, MDM) and the user
    /// cannot change it.
    Restricted,
    /// The user explicitly refused access.
    Denied,
    /// Access granted while the app is in use.
    AuthorizedWhenInUse,
    /// Access granted at any time, including in the background.
    AuthorizedAlways,
}

impl AuthorizationStatus {
    /// Every status, in the order the platform enumerates them.
    pub const ALL: [AuthorizationStatus; 5] = [
        AuthorizationStatus::NotDetermined,
        AuthorizationStatus::Restricted,
        AuthorizationStatus::Denied,
        AuthorizationStatus::AuthorizedWhenInUse,
        AuthorizationStatus::AuthorizedAlways,
    ];

    pub fn is_authorized(self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedWhenInUse | AuthorizationStatus::AuthorizedAlways
        )
    }

    pub fn is_denied(self) -> bool {
        self == AuthorizationStatus::Denied
    }

    pub fn is_not_determined(self) -> bool {
        self == AuthorizationStatus::NotDetermined
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthorizationStatus::NotDetermined => "not determined",
            AuthorizationStatus::Restricted => "restricted",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::AuthorizedWhenInUse => "authorized when in use",
            AuthorizationStatus::AuthorizedAlways => "authorized always",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_granted_states_are_authorized() {
        let authorized: Vec<_> = AuthorizationStatus::ALL
            .into_iter()
            .filter(|s| s.is_authorized())
            .collect();
        assert_eq!(
            authorized,
            [
                AuthorizationStatus::AuthorizedWhenInUse,
                AuthorizationStatus::AuthorizedAlways
            ]
        );
    }

    #[test]
    fn restricted_is_not_denied() {
        assert!(!AuthorizationStatus::Restricted.is_denied());
        assert!(AuthorizationStatus::Denied.is_denied());
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(
            AuthorizationStatus::AuthorizedWhenInUse.to_string(),
            "authorized when in use"
        );
        assert_eq!(AuthorizationStatus::NotDetermined.to_string(), "not determined");
    }
}
