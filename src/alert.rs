//! The modal dialog shown when location access was denied.

use std::fmt;
use std::rc::Rc;

use tracing::info;

use crate::gate::Presenter;
use crate::settings::{SettingsNavigator, SettingsUrl};

/// Callback run when the user picks an action.
pub type ActionHandler = Box<dyn Fn(&AlertAction)>;

/// Visual role of an alert button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertActionStyle {
    Default,
    Cancel,
}

/// User-facing copy of the remediation alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertContent {
    pub title: String,
    pub message: String,
    pub cancel_title: String,
    pub settings_title: String,
}

impl Default for AlertContent {
    fn default() -> Self {
        Self {
            title: "Enable Location?".to_string(),
            message: "We need your location to continue. Please change permission level in settings"
                .to_string(),
            cancel_title: "Cancel".to_string(),
            settings_title: "Go to Settings".to_string(),
        }
    }
}

/// One selectable button of an alert.
pub struct AlertAction {
    title: String,
    style: AlertActionStyle,
    handler: ActionHandler,
}

impl AlertAction {
    pub fn new(
        title: impl Into<String>,
        style: AlertActionStyle,
        handler: impl Fn(&AlertAction) + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            style,
            handler: Box::new(handler),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn style(&self) -> AlertActionStyle {
        self.style
    }

    /// Run the handler as if the user tapped this action.
    pub fn invoke(&self) {
        (self.handler)(self)
    }
}

impl fmt::Debug for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertAction")
            .field("title", &self.title)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Alert offering to open Settings after location access was denied.
///
/// Actions are always ordered `[Cancel, Go to Settings]`. An alert is built
/// for a single presentation and dropped once dismissed.
#[derive(Debug)]
pub struct RemediationAlert {
    title: String,
    message: String,
    actions: Vec<AlertAction>,
}

impl RemediationAlert {
    /// Build the alert. Both handlers dismiss through `presenter`; the
    /// settings handler then opens `settings_url` through `navigator`.
    ///
    /// `settings_url` is parsed only when the settings action fires. A URL
    /// that does not parse at that point is a broken build configuration and
    /// panics.
    pub fn new(
        content: &AlertContent,
        presenter: Rc<dyn Presenter>,
        navigator: Rc<dyn SettingsNavigator>,
        settings_url: impl Into<String>,
    ) -> Self {
        let cancel_presenter = Rc::clone(&presenter);
        let cancel = AlertAction::new(&content.cancel_title, AlertActionStyle::Cancel, move |_| {
            info!("location alert cancelled");
            cancel_presenter.dismiss(true, None);
        });

        let settings_url = settings_url.into();
        let settings = AlertAction::new(
            &content.settings_title,
            AlertActionStyle::Default,
            move |_| {
                presenter.dismiss(true, None);
                let url = SettingsUrl::parse(&settings_url).unwrap_or_else(|err| panic!("{err}"));
                info!(%url, "opening settings");
                navigator.open(&url);
            },
        );

        Self {
            title: content.title.clone(),
            message: content.message.clone(),
            actions: vec![cancel, settings],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn actions(&self) -> &[AlertAction] {
        &self.actions
    }

    pub fn cancel_action(&self) -> &AlertAction {
        &self.actions[0]
    }

    pub fn settings_action(&self) -> &AlertAction {
        &self.actions[1]
    }
}
