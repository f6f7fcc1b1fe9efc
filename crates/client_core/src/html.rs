//! HTML fragments for the view models in [`crate::render`], rendered through
//! minijinja. Templates are named `*.html`, so every interpolated value is
//! HTML-escaped.

use std::sync::OnceLock;

use minijinja::{context, Environment, Error, UndefinedBehavior};
use serde::Serialize;
use tracing::error;

use crate::{
    api::QrImage,
    render::{
        AnalyticsPanel, AttendeeList, EventCard, EventList, Navbar, RegistrationCard,
        RegistrationList, StatCard, NO_ATTENDEES, NO_EVENTS, NO_REGISTRATIONS,
    },
    view::{Notification, NotificationKind},
};

const TEMPLATES: &[(&str, &str)] = &[
    ("event_card.html", include_str!("../templates/event_card.html")),
    (
        "registration_card.html",
        include_str!("../templates/registration_card.html"),
    ),
    (
        "attendee_table.html",
        include_str!("../templates/attendee_table.html"),
    ),
    ("stat_card.html", include_str!("../templates/stat_card.html")),
    ("navbar.html", include_str!("../templates/navbar.html")),
    ("message.html", include_str!("../templates/message.html")),
    ("toast.html", include_str!("../templates/toast.html")),
    ("qr_image.html", include_str!("../templates/qr_image.html")),
];

fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for &(name, source) in TEMPLATES {
            // A broken template surfaces again as a render error.
            if let Err(err) = env.add_template(name, source) {
                error!(template = name, error = %err, "template failed to compile");
            }
        }
        env
    })
}

fn render<S: Serialize>(name: &str, ctx: S) -> Result<String, Error> {
    environment().get_template(name)?.render(ctx)
}

fn message(text: &str) -> Result<String, Error> {
    render("message.html", context! { text })
}

pub trait ToHtml {
    fn to_html(&self) -> Result<String, Error>;
}

impl ToHtml for EventCard {
    fn to_html(&self) -> Result<String, Error> {
        render("event_card.html", self)
    }
}

impl ToHtml for EventList {
    fn to_html(&self) -> Result<String, Error> {
        match self {
            EventList::Placeholder => message(NO_EVENTS),
            EventList::Cards(cards) => cards.iter().map(ToHtml::to_html).collect(),
        }
    }
}

impl ToHtml for RegistrationCard {
    fn to_html(&self) -> Result<String, Error> {
        render(
            "registration_card.html",
            context! { card => self, status => self.status_label() },
        )
    }
}

impl ToHtml for RegistrationList {
    fn to_html(&self) -> Result<String, Error> {
        match self {
            RegistrationList::Placeholder => message(NO_REGISTRATIONS),
            RegistrationList::Cards(cards) => cards.iter().map(ToHtml::to_html).collect(),
        }
    }
}

impl ToHtml for AttendeeList {
    fn to_html(&self) -> Result<String, Error> {
        match self {
            AttendeeList::Placeholder => message(NO_ATTENDEES),
            AttendeeList::Rows(rows) => render("attendee_table.html", context! { rows }),
        }
    }
}

impl ToHtml for StatCard {
    fn to_html(&self) -> Result<String, Error> {
        render("stat_card.html", self)
    }
}

impl ToHtml for AnalyticsPanel {
    fn to_html(&self) -> Result<String, Error> {
        match self {
            AnalyticsPanel::Empty => Ok(String::new()),
            AnalyticsPanel::Stats(cards) => cards.iter().map(ToHtml::to_html).collect(),
            AnalyticsPanel::Failed(text) => message(text),
        }
    }
}

#[derive(Serialize)]
struct NavItem<'a> {
    id: &'static str,
    visible: bool,
    label: &'a str,
}

fn item<'a>(id: &'static str, visible: bool, label: &'a str) -> NavItem<'a> {
    NavItem { id, visible, label }
}

impl ToHtml for Navbar {
    fn to_html(&self) -> Result<String, Error> {
        let items = [
            item("nav-events", true, "Events"),
            item("nav-my-reg", self.show_my_registrations, "My registrations"),
            item("nav-analytics", self.show_analytics, "Analytics"),
            item("nav-login", self.show_login, "Login"),
            item(
                "nav-user",
                self.user_label.is_some(),
                self.user_label.as_deref().unwrap_or_default(),
            ),
            item("nav-logout", self.show_logout, "Logout"),
        ];
        render("navbar.html", context! { items })
    }
}

impl ToHtml for Notification {
    fn to_html(&self) -> Result<String, Error> {
        let kind = match self.kind {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        };
        render("toast.html", context! { kind, message => self.message })
    }
}

impl ToHtml for QrImage {
    fn to_html(&self) -> Result<String, Error> {
        render("qr_image.html", context! { src => self.data_url() })
    }
}

#[cfg(test)]
#[path = "tests/html_tests.rs"]
mod tests;
