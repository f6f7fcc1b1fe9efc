use super::*;

use shared::domain::{EventId, RegistrationId, RegistrationStatus};
use uuid::Uuid;

use crate::render::AttendeeRow;

fn card(title: &str, can_register: bool) -> EventCard {
    EventCard {
        id: EventId(Uuid::from_u128(0xabc)),
        category: "music".into(),
        title: title.into(),
        description: "Open air".into(),
        location: "Park & Garden".into(),
        date: "03.11.2026. 18:30".into(),
        capacity: 120,
        can_register,
    }
}

#[test]
fn every_template_compiles() {
    for (name, _) in TEMPLATES {
        environment().get_template(name).expect(name);
    }
}

#[test]
fn script_in_title_renders_inert() {
    let html = card("<script>alert(1)</script>", false)
        .to_html()
        .expect("card");

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;"));
    assert!(html.contains("Park &amp; Garden"));
}

#[test]
fn quotes_cannot_break_out_of_markup() {
    let html = card(r#""><img src=x onerror=alert(1)>"#, false)
        .to_html()
        .expect("card");

    assert!(!html.contains("<img"));
    assert!(html.contains("&quot;&gt;&lt;img"));
}

#[test]
fn register_button_only_when_allowed() {
    let guest = card("Gig", false).to_html().expect("guest card");
    let member = card("Gig", true).to_html().expect("member card");

    assert!(!guest.contains("data-action=\"register\""));
    assert!(member.contains(&format!(
        "data-event-id=\"{}\"",
        Uuid::from_u128(0xabc)
    )));
    assert!(member.contains("Capacity: 120"));
    assert!(member.starts_with("<div class=\"card\">"));
    assert!(member.ends_with("</div></div>"));
}

#[test]
fn placeholders_render_fixed_text() {
    assert_eq!(
        EventList::Placeholder.to_html().expect("events"),
        "<p>No events.</p>"
    );
    assert_eq!(
        RegistrationList::Placeholder.to_html().expect("registrations"),
        "<p>You have no registrations.</p>"
    );
}

#[test]
fn cancelled_registration_has_no_cancel_button() {
    let reg = RegistrationCard {
        id: RegistrationId(Uuid::from_u128(9)),
        event_id: EventId(Uuid::from_u128(1)),
        status: RegistrationStatus::Cancelled,
        ticket_code: "<b>T</b>".into(),
        registered_at: "18.10.2026. 09:05".into(),
        can_cancel: false,
    };
    let html = reg.to_html().expect("registration");

    assert!(html.contains("<span class=\"badge\">Cancelled</span>"));
    assert!(html.contains("QR Code"));
    assert!(!html.contains("data-action=\"cancel\""));
    assert!(html.contains("&lt;b&gt;T&lt;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn confirmed_registration_offers_cancel() {
    let reg = RegistrationCard {
        id: RegistrationId(Uuid::from_u128(9)),
        event_id: EventId(Uuid::from_u128(1)),
        status: RegistrationStatus::Confirmed,
        ticket_code: "TKT-1".into(),
        registered_at: "18.10.2026. 09:05".into(),
        can_cancel: true,
    };
    let html = reg.to_html().expect("registration");

    assert!(html.contains(&format!(
        "data-action=\"cancel\" data-registration-id=\"{}\"",
        Uuid::from_u128(9)
    )));
}

#[test]
fn analytics_failure_is_escaped_text() {
    let html = AnalyticsPanel::Failed("<i>denied</i>".into())
        .to_html()
        .expect("panel");
    assert!(html.starts_with("<p>&lt;i&gt;denied&lt;"));
    assert!(!html.contains("<i>"));
    assert_eq!(AnalyticsPanel::Empty.to_html().expect("empty"), "");
}

#[test]
fn stat_cards_render_value_and_label() {
    let html = StatCard {
        value: 12,
        label: "Confirmed",
    }
    .to_html()
    .expect("stat");
    assert!(html.contains("<div class=\"number\">12</div>"));
    assert!(html.contains("<div class=\"label\">Confirmed</div>"));
}

#[test]
fn navbar_hides_gated_items_for_guests() {
    let html = Navbar::default().to_html().expect("navbar");

    assert!(html.starts_with("<ul class=\"nav\"><li id=\"nav-events\">Events</li>"));
    assert!(html.contains("<li id=\"nav-login\">Login</li>"));
    assert!(html.contains("<li id=\"nav-analytics\" class=\"hidden\">"));
    assert!(html.contains("<li id=\"nav-logout\" class=\"hidden\">"));
    assert!(html.ends_with("</li></ul>"));
}

#[test]
fn navbar_escapes_user_label() {
    let navbar = Navbar {
        show_login: false,
        show_logout: true,
        show_my_registrations: true,
        show_analytics: false,
        show_create_event: false,
        user_label: Some("<b>eve</b>@example.com (Attendee)".into()),
    };
    let html = navbar.to_html().expect("navbar");

    assert!(html.contains("<li id=\"nav-user\">&lt;b&gt;eve&lt;"));
    assert!(html.contains("<li id=\"nav-login\" class=\"hidden\">Login</li>"));
}

#[test]
fn attendee_table_lists_rows() {
    let list = AttendeeList::Rows(vec![AttendeeRow {
        registration_id: RegistrationId(Uuid::from_u128(4)),
        ticket_code: "TKT-<4>".into(),
        status: "Confirmed",
        registered_at: "18.10.2026. 09:05".into(),
    }]);
    let html = list.to_html().expect("attendees");

    assert!(html.starts_with("<table class=\"attendees\">"));
    assert!(html.contains("<td class=\"ticket-code\">TKT-&lt;4&gt;</td><td>Confirmed</td>"));
    assert_eq!(
        AttendeeList::Placeholder.to_html().expect("placeholder"),
        "<p>Nobody has registered for this event yet.</p>"
    );
}

#[test]
fn notification_renders_toast_kind() {
    let html = Notification::error("Event is full").to_html().expect("toast");
    assert_eq!(html, "<div class=\"toast error\">Event is full</div>");
}

#[test]
fn qr_image_embeds_data_url() {
    let image = QrImage {
        content_type: "image/png".into(),
        bytes: vec![1, 2, 3],
    };
    let html = image.to_html().expect("qr");
    assert!(html.starts_with("<img class=\"qr\" alt=\"Ticket QR code\" src=\"data:image"));
    assert!(html.contains("base64,AQID"));
}
