//! Pure mapping from API data to view models. Nothing here performs I/O or
//! reads session state; callers pass in what a card needs to know.

use chrono::NaiveDateTime;
use serde::Serialize;
use shared::{
    domain::{EventId, RegistrationId, RegistrationStatus, Role},
    protocol::{AnalyticsOverview, Event, EventStats, Registration, UserProfile},
};

pub const NO_EVENTS: &str = "No events.";
pub const NO_REGISTRATIONS: &str = "You have no registrations.";
pub const NO_ATTENDEES: &str = "Nobody has registered for this event yet.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navbar {
    pub show_login: bool,
    pub show_logout: bool,
    pub show_my_registrations: bool,
    pub show_analytics: bool,
    pub show_create_event: bool,
    pub user_label: Option<String>,
}

impl Default for Navbar {
    fn default() -> Self {
        render_navbar(None)
    }
}

pub fn render_navbar(user: Option<&UserProfile>) -> Navbar {
    let logged_in = user.is_some();
    let role = user.map_or(Role::Guest, |user| user.role);
    Navbar {
        show_login: !logged_in,
        show_logout: logged_in,
        show_my_registrations: logged_in,
        show_analytics: role.can_view_analytics(),
        show_create_event: role.can_create_events(),
        user_label: user.map(|user| format!("{} ({})", user.email, user.role)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub id: EventId,
    pub category: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub capacity: i32,
    /// Visual gating only; the server re-checks authorization.
    pub can_register: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventList {
    #[default]
    Placeholder,
    Cards(Vec<EventCard>),
}

impl EventList {
    pub fn cards(&self) -> &[EventCard] {
        match self {
            EventList::Placeholder => &[],
            EventList::Cards(cards) => cards,
        }
    }
}

pub fn render_events(events: &[Event], can_register: bool) -> EventList {
    if events.is_empty() {
        return EventList::Placeholder;
    }
    EventList::Cards(
        events
            .iter()
            .map(|event| EventCard {
                id: event.id,
                category: event.category.clone(),
                title: event.title.clone(),
                description: event.description.clone(),
                location: event.location.clone(),
                date: format_date(event.date_time),
                capacity: event.capacity,
                can_register,
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationCard {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub status: RegistrationStatus,
    pub ticket_code: String,
    pub registered_at: String,
    pub can_cancel: bool,
}

impl RegistrationCard {
    pub fn status_label(&self) -> &'static str {
        status_label(self.status)
    }
}

pub fn status_label(status: RegistrationStatus) -> &'static str {
    match status {
        RegistrationStatus::Confirmed => "Confirmed",
        RegistrationStatus::Cancelled => "Cancelled",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegistrationList {
    #[default]
    Placeholder,
    Cards(Vec<RegistrationCard>),
}

impl RegistrationList {
    pub fn cards(&self) -> &[RegistrationCard] {
        match self {
            RegistrationList::Placeholder => &[],
            RegistrationList::Cards(cards) => cards,
        }
    }
}

pub fn render_registrations(registrations: &[Registration]) -> RegistrationList {
    if registrations.is_empty() {
        return RegistrationList::Placeholder;
    }
    RegistrationList::Cards(
        registrations
            .iter()
            .map(|reg| RegistrationCard {
                id: reg.id,
                event_id: reg.event_id,
                status: reg.status,
                ticket_code: reg.ticket_code.clone(),
                registered_at: format_date(reg.created_at),
                can_cancel: reg.status.is_confirmed(),
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendeeRow {
    pub registration_id: RegistrationId,
    pub ticket_code: String,
    pub status: &'static str,
    pub registered_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttendeeList {
    #[default]
    Placeholder,
    Rows(Vec<AttendeeRow>),
}

impl AttendeeList {
    pub fn rows(&self) -> &[AttendeeRow] {
        match self {
            AttendeeList::Placeholder => &[],
            AttendeeList::Rows(rows) => rows,
        }
    }
}

/// Organizer view of an event's registrations, cancelled ones included.
pub fn render_attendees(registrations: &[Registration]) -> AttendeeList {
    if registrations.is_empty() {
        return AttendeeList::Placeholder;
    }
    AttendeeList::Rows(
        registrations
            .iter()
            .map(|reg| AttendeeRow {
                registration_id: reg.id,
                ticket_code: reg.ticket_code.clone(),
                status: status_label(reg.status),
                registered_at: format_date(reg.created_at),
            })
            .collect(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub value: i64,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalyticsPanel {
    #[default]
    Empty,
    Stats(Vec<StatCard>),
    Failed(String),
}

pub fn render_overview(overview: &AnalyticsOverview) -> AnalyticsPanel {
    AnalyticsPanel::Stats(vec![
        StatCard {
            value: overview.total_registrations,
            label: "Total registrations",
        },
        StatCard {
            value: overview.total_confirmed,
            label: "Confirmed",
        },
        StatCard {
            value: overview.total_cancelled,
            label: "Cancelled",
        },
        StatCard {
            value: overview.unique_events,
            label: "Events",
        },
        StatCard {
            value: overview.unique_users,
            label: "Users",
        },
    ])
}

pub fn render_event_stats(stats: &EventStats) -> AnalyticsPanel {
    AnalyticsPanel::Stats(vec![
        StatCard {
            value: stats.total.unwrap_or(0),
            label: "Registrations",
        },
        StatCard {
            value: stats.confirmed.unwrap_or(0),
            label: "Confirmed",
        },
        StatCard {
            value: stats.cancelled.unwrap_or(0),
            label: "Cancelled",
        },
    ])
}

pub fn format_date(value: NaiveDateTime) -> String {
    value.format("%d.%m.%Y. %H:%M").to_string()
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
