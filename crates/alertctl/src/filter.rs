//! Alert list filtering.
//!
//! Label filters (`severity`, `instance`) are applied first, then the
//! state flags. With no state flag set only active alerts are kept.

use crate::cli::ListAlertsArgs;
use crate::types::{Alert, AlertState};

/// Filter applied to `alerts list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    /// Keep every alert regardless of state.
    pub show_all: bool,
    /// Keep silenced alerts.
    pub show_silenced: bool,
    /// Keep inhibited alerts.
    pub show_inhibited: bool,
    /// Keep active alerts.
    pub show_active: bool,
    /// Required `severity` label value.
    pub severity: Option<String>,
    /// Required `instance` label value.
    pub instance: Option<String>,
}

impl From<&ListAlertsArgs> for AlertFilter {
    fn from(args: &ListAlertsArgs) -> Self {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        Self {
            show_all: args.all,
            show_silenced: args.silenced,
            show_inhibited: args.inhibited,
            show_active: args.active,
            severity: non_empty(&args.severity),
            instance: non_empty(&args.instance),
        }
    }
}

impl AlertFilter {
    const fn no_state_flags(&self) -> bool {
        !self.show_all && !self.show_silenced && !self.show_inhibited && !self.show_active
    }

    /// Returns true if the alert passes the filter.
    #[must_use]
    pub fn matches(&self, alert: &Alert) -> bool {
        if let Some(severity) = &self.severity {
            if alert.label("severity") != Some(severity.as_str()) {
                return false;
            }
        }
        if let Some(instance) = &self.instance {
            if alert.label("instance") != Some(instance.as_str()) {
                return false;
            }
        }

        let state = alert.filter_state();

        self.show_all
            || (self.show_silenced && state == AlertState::Silenced)
            || (self.show_inhibited && state == AlertState::Inhibited)
            || (self.show_active && state == AlertState::Active)
            || (self.no_state_flags() && state == AlertState::Active)
    }

    /// Keeps the matching alerts, in order, each at most once.
    #[must_use]
    pub fn apply(&self, alerts: Vec<Alert>) -> Vec<Alert> {
        alerts.into_iter().filter(|a| self.matches(a)).collect()
    }

    /// States the user asked for, in display order.
    #[must_use]
    pub fn requested_states(&self) -> Vec<AlertState> {
        let mut states = Vec::new();
        if self.show_silenced {
            states.push(AlertState::Silenced);
        }
        if self.show_inhibited {
            states.push(AlertState::Inhibited);
        }
        if self.show_active || (!self.show_all && states.is_empty()) {
            states.push(AlertState::Active);
        }
        states
    }

    /// Message printed when nothing matched.
    #[must_use]
    pub fn empty_message(&self) -> String {
        let mut msg = String::from("No alerts found");

        let states = self.requested_states();
        if !states.is_empty() {
            let names: Vec<&str> = states.iter().map(AlertState::as_str).collect();
            msg.push_str(" in state: ");
            msg.push_str(&names.join(" or "));
        }
        if let Some(severity) = &self.severity {
            msg.push_str(&format!(" with severity '{severity}'"));
        }
        if let Some(instance) = &self.instance {
            msg.push_str(&format!(" from instance '{instance}'"));
        }

        msg
    }
}
