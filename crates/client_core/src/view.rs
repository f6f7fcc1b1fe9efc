//! In-memory view state: which section is showing, what each section holds,
//! and the transient bits around it (auth message, notification, form inputs).

use std::{fmt, time::Duration};

use shared::protocol::NewEvent;

use crate::render::{AnalyticsPanel, AttendeeList, EventList, Navbar, RegistrationList};

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Events,
    MyRegistrations,
    Analytics,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Events => "events",
            Section::MyRegistrations => "my-registrations",
            Section::Analytics => "analytics",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub ttl: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Search box and category dropdown above the event list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub search: String,
    pub category: String,
}

/// Inputs of the create-event form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub location: String,
    /// `YYYY-MM-DDTHH:MM`, seconds are appended on submit.
    pub date_time: String,
    pub capacity: String,
    pub category: String,
}

impl EventForm {
    /// Clears the free-text fields after a successful submit; capacity and
    /// category keep their values.
    pub fn reset_text_fields(&mut self) {
        self.title.clear();
        self.description.clear();
        self.location.clear();
        self.date_time.clear();
    }

    pub fn to_request(&self) -> NewEvent {
        NewEvent {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            date_time: submitted_date_time(&self.date_time),
            capacity: parse_capacity(&self.capacity),
            category: self.category.clone(),
        }
    }
}

/// `YYYY-MM-DDTHH:MM` input with the seconds the server expects.
pub fn submitted_date_time(input: &str) -> String {
    format!("{input}:00")
}

/// Leading-integer parse of the capacity input: surrounding whitespace and
/// trailing garbage are ignored, a missing number yields `None`.
pub fn parse_capacity(raw: &str) -> Option<i32> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.as_bytes().first() {
        Some(b'-') => (-1, &raw[1..]),
        Some(b'+') => (1, &raw[1..]),
        _ => (1, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i32>().ok().map(|value| sign * value)
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub active: Section,
    pub navbar: Navbar,
    pub auth_tab: AuthTab,
    pub auth_message: Option<String>,
    pub notification: Option<Notification>,
    pub filter: EventFilter,
    pub event_form: EventForm,
    pub events: EventList,
    pub registrations: RegistrationList,
    pub analytics: AnalyticsPanel,
    /// Registrations of one event, as listed for its organizer.
    pub attendees: AttendeeList,
}

impl ViewState {
    pub fn is_visible(&self, section: Section) -> bool {
        self.active == section
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_parses_leading_integer() {
        assert_eq!(parse_capacity("25"), Some(25));
        assert_eq!(parse_capacity("  40 seats"), Some(40));
        assert_eq!(parse_capacity("-3"), Some(-3));
        assert_eq!(parse_capacity("seats"), None);
        assert_eq!(parse_capacity(""), None);
    }

    #[test]
    fn submitted_form_appends_seconds() {
        let form = EventForm {
            date_time: "2026-11-03T18:30".into(),
            capacity: "12".into(),
            ..EventForm::default()
        };
        let request = form.to_request();
        assert_eq!(request.date_time, "2026-11-03T18:30:00");
        assert_eq!(request.capacity, Some(12));
    }

    #[test]
    fn reset_keeps_capacity_and_category() {
        let mut form = EventForm {
            title: "t".into(),
            description: "d".into(),
            location: "l".into(),
            date_time: "2026-11-03T18:30".into(),
            capacity: "12".into(),
            category: "music".into(),
        };
        form.reset_text_fields();
        assert_eq!(
            form,
            EventForm {
                capacity: "12".into(),
                category: "music".into(),
                ..EventForm::default()
            }
        );
    }
}
