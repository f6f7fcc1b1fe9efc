//! Terminal rendering of the controller's view state.

use std::fmt::Write as _;

use anyhow::Result;
use client_core::{
    html::ToHtml,
    render::{
        format_date, status_label, AnalyticsPanel, AttendeeList, EventList, Navbar,
        RegistrationList, NO_ATTENDEES, NO_EVENTS, NO_REGISTRATIONS,
    },
    QrImage,
};
use shared::protocol::{Event, Registration};

pub struct Printer {
    pub html: bool,
}

impl Printer {
    pub fn events(&self, list: &EventList) -> Result<String> {
        if self.html {
            return Ok(list.to_html()?);
        }
        let EventList::Cards(cards) = list else {
            return Ok(NO_EVENTS.to_string());
        };
        let mut out = String::new();
        for card in cards {
            let _ = writeln!(out, "[{}] {}", card.category, card.title);
            if !card.description.is_empty() {
                let _ = writeln!(out, "  {}", card.description);
            }
            let _ = writeln!(
                out,
                "  Location: {} | Date: {} | Capacity: {}",
                card.location, card.date, card.capacity
            );
            if card.can_register {
                let _ = writeln!(out, "  register: eventhub join {}", card.id);
            } else {
                let _ = writeln!(out, "  id: {}", card.id);
            }
        }
        Ok(out.trim_end().to_string())
    }

    pub fn event(&self, event: &Event) -> String {
        let mut out = format!("[{}] {}\n", event.category, event.title);
        if !event.description.is_empty() {
            let _ = writeln!(out, "  {}", event.description);
        }
        let _ = write!(
            out,
            "  Location: {} | Date: {} | Capacity: {}\n  id: {}",
            event.location,
            format_date(event.date_time),
            event.capacity,
            event.id
        );
        out
    }

    pub fn registrations(&self, list: &RegistrationList) -> Result<String> {
        if self.html {
            return Ok(list.to_html()?);
        }
        let RegistrationList::Cards(cards) = list else {
            return Ok(NO_REGISTRATIONS.to_string());
        };
        let mut out = String::new();
        for card in cards {
            let _ = writeln!(out, "{} [{}]", card.ticket_code, card.status_label());
            let _ = writeln!(
                out,
                "  event: {} | registered: {}",
                card.event_id, card.registered_at
            );
            let _ = write!(out, "  qr: eventhub qr {}", card.id);
            if card.can_cancel {
                let _ = write!(out, " | cancel: eventhub cancel {}", card.id);
            }
            out.push('\n');
        }
        Ok(out.trim_end().to_string())
    }

    pub fn attendees(&self, list: &AttendeeList) -> Result<String> {
        if self.html {
            return Ok(list.to_html()?);
        }
        let AttendeeList::Rows(rows) = list else {
            return Ok(NO_ATTENDEES.to_string());
        };
        Ok(rows
            .iter()
            .map(|row| {
                format!(
                    "{:<20} {:<10} {}",
                    row.ticket_code, row.status, row.registered_at
                )
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub fn analytics(&self, panel: &AnalyticsPanel) -> Result<String> {
        if self.html {
            return Ok(panel.to_html()?);
        }
        Ok(match panel {
            AnalyticsPanel::Empty => String::new(),
            AnalyticsPanel::Stats(cards) => cards
                .iter()
                .map(|card| format!("{:>8}  {}", card.value, card.label))
                .collect::<Vec<_>>()
                .join("\n"),
            AnalyticsPanel::Failed(message) => message.clone(),
        })
    }

    pub fn navbar(&self, navbar: &Navbar) -> Result<String> {
        if self.html {
            return Ok(navbar.to_html()?);
        }
        let Some(label) = &navbar.user_label else {
            return Ok("Not logged in (eventhub login --email … --password …)".to_string());
        };
        let mut sections = vec!["events"];
        if navbar.show_my_registrations {
            sections.push("my");
        }
        if navbar.show_analytics {
            sections.push("analytics");
        }
        if navbar.show_create_event {
            sections.push("create-event");
        }
        Ok(format!("{label}\navailable: {}", sections.join(", ")))
    }

    /// Inline `<img>` carrying the image as a data URL.
    pub fn qr(&self, image: &QrImage) -> Result<String> {
        Ok(image.to_html()?)
    }

    pub fn ticket(&self, registration: &Registration) -> String {
        format!(
            "{} [{}]\n  event: {} | registered: {}",
            registration.ticket_code,
            status_label(registration.status),
            registration.event_id,
            format_date(registration.created_at)
        )
    }
}
