use serde::de::IgnoredAny;
use shared::{
    domain::{EventId, RegistrationId},
    protocol::{
        AnalyticsOverview, ApiResponse, AuthPayload, Credentials, Event, EventStats, EventUpdate,
        RegisterForEvent, Registration, UserProfile,
    },
};
use tracing::{info, warn};
use url::form_urlencoded;

pub mod api;
pub mod html;
pub mod render;
pub mod session;
pub mod view;

pub use api::{ApiGateway, BinaryError, QrImage, DEFAULT_API_BASE_URL};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use view::{
    parse_capacity, submitted_date_time, AuthTab, EventFilter, EventForm, Notification, Section,
    ViewState,
};

const LOGIN_OK: &str = "Logged in successfully!";
const REGISTER_OK: &str = "Registration successful!";
const LOGGED_OUT: &str = "You have logged out";
const EVENT_CREATED: &str = "Event created!";
const EVENT_UPDATED: &str = "Event updated!";
const EVENT_DELETED: &str = "Event deleted";
const NOTHING_TO_UPDATE: &str = "Nothing to update";
const REGISTRATION_CANCELLED: &str = "Registration cancelled";
const QR_FAILED: &str = "Error generating QR code";
const QR_UNAVAILABLE: &str = "QR service is unavailable";

pub fn ticket_message(ticket_code: &str) -> String {
    format!("Registered successfully! Ticket code: {ticket_code}")
}

/// Path of the event listing with the non-empty filter inputs as query
/// parameters.
pub fn events_path(filter: &EventFilter) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !filter.search.is_empty() {
        query.append_pair("search", &filter.search);
    }
    if !filter.category.is_empty() {
        query.append_pair("category", &filter.category);
    }
    let query = query.finish();
    if query.is_empty() {
        "/events".to_string()
    } else {
        format!("/events?{query}")
    }
}

/// Controller tying the session, the view state and the API together. Every
/// operation resolves user-facing failures into the view state instead of
/// returning them.
pub struct EventClient {
    api: ApiGateway,
    session: Session,
    view: ViewState,
}

impl EventClient {
    pub fn new(api: ApiGateway, session: Session) -> Self {
        let mut client = Self {
            api,
            session,
            view: ViewState::default(),
        };
        client.update_navbar();
        client
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Access to the input fields (filter, event form) and the auth tab.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.view.notification.take()
    }

    /// Start-up: re-validates a persisted token, then enters the events section.
    pub async fn start(&mut self) {
        if self.session.has_token() {
            self.fetch_current_user().await;
        }
        self.show_section(Section::Events).await;
    }

    pub async fn login(&mut self, email: &str, password: &str) {
        self.authenticate("/auth/login", email, password, LOGIN_OK).await;
    }

    pub async fn register(&mut self, email: &str, password: &str) {
        self.authenticate("/auth/register", email, password, REGISTER_OK).await;
    }

    async fn authenticate(&mut self, path: &str, email: &str, password: &str, success: &str) {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let res: ApiResponse<AuthPayload> = self.api.post(path, &credentials, None).await;
        match res.into_result() {
            Ok(payload) => {
                info!(email, "authenticated");
                self.session.begin(payload.token);
                self.view.auth_message = None;
                // A rejected profile fetch has already logged out and re-rendered.
                if self.fetch_current_user().await {
                    self.show_section(Section::Events).await;
                    self.view.notify(Notification::success(success));
                }
            }
            Err(err) => {
                self.view.auth_message = Some(err.message().to_string());
            }
        }
    }

    /// Returns whether a profile is now loaded. Any failure ends the session.
    pub async fn fetch_current_user(&mut self) -> bool {
        let res: ApiResponse<AuthPayload> = self.api.get("/auth/me", self.session.token()).await;
        match res.into_result() {
            Ok(payload) => {
                let attached = self.session.attach_user(UserProfile::from(payload));
                self.update_navbar();
                attached
            }
            Err(err) => {
                warn!(error = %err, "profile fetch failed; logging out");
                self.logout().await;
                false
            }
        }
    }

    pub async fn logout(&mut self) {
        info!("logging out");
        self.session.clear();
        self.update_navbar();
        self.show_section(Section::Events).await;
        self.view.notify(Notification::success(LOGGED_OUT));
    }

    fn update_navbar(&mut self) {
        self.view.navbar = render::render_navbar(self.session.user());
    }

    pub fn switch_auth_tab(&mut self, tab: AuthTab) {
        self.view.auth_tab = tab;
        self.view.auth_message = None;
    }

    /// Shows exactly one section and reloads its content.
    pub async fn show_section(&mut self, section: Section) {
        self.view.active = section;
        match section {
            Section::Events => self.load_events().await,
            Section::MyRegistrations => self.load_my_registrations().await,
            Section::Analytics => self.load_analytics().await,
        }
    }

    pub async fn load_events(&mut self) {
        let path = events_path(&self.view.filter);
        let res: ApiResponse<Vec<Event>> = self.api.get(&path, self.session.token()).await;
        // Failures and empty lists share the placeholder.
        self.view.events = match res.into_result() {
            Ok(events) => render::render_events(&events, self.session.has_token()),
            Err(err) => {
                warn!(error = %err, "event list unavailable");
                render::EventList::Placeholder
            }
        };
    }

    pub async fn create_event(&mut self) {
        let body = self.view.event_form.to_request();
        let res: ApiResponse<IgnoredAny> =
            self.api.post("/events", &body, self.session.token()).await;
        if res.success {
            self.view.notify(Notification::success(EVENT_CREATED));
            self.load_events().await;
            self.view.event_form.reset_text_fields();
        } else {
            self.view.notify(Notification::error(res.message_or_default()));
        }
    }

    pub async fn fetch_event(&mut self, event_id: EventId) -> Option<Event> {
        let path = format!("/events/{event_id}");
        let res: ApiResponse<Event> = self.api.get(&path, self.session.token()).await;
        match res.into_result() {
            Ok(event) => Some(event),
            Err(err) => {
                self.view.notify(Notification::error(err.message()));
                None
            }
        }
    }

    /// Sends only the changed fields; the server keeps the rest. An empty
    /// update is refused locally.
    pub async fn update_event(&mut self, event_id: EventId, update: &EventUpdate) -> Option<Event> {
        if update.is_empty() {
            self.view.notify(Notification::error(NOTHING_TO_UPDATE));
            return None;
        }
        let path = format!("/events/{event_id}");
        let res: ApiResponse<Event> = self.api.put(&path, update, self.session.token()).await;
        match res.into_result() {
            Ok(event) => {
                info!(%event_id, "event updated");
                self.view.notify(Notification::success(EVENT_UPDATED));
                self.load_events().await;
                Some(event)
            }
            Err(err) => {
                self.view.notify(Notification::error(err.message()));
                None
            }
        }
    }

    pub async fn delete_event(&mut self, event_id: EventId) {
        let path = format!("/events/{event_id}");
        let res: ApiResponse<IgnoredAny> = self.api.delete(&path, self.session.token()).await;
        if res.success {
            info!(%event_id, "event deleted");
            self.view.notify(Notification::success(EVENT_DELETED));
            self.load_events().await;
        } else {
            self.view.notify(Notification::error(res.message_or_default()));
        }
    }

    /// Organizer listing of everyone registered for an event.
    pub async fn load_event_registrations(&mut self, event_id: EventId) {
        let path = format!("/registrations/event/{event_id}");
        let res: ApiResponse<Vec<Registration>> = self.api.get(&path, self.session.token()).await;
        self.view.attendees = match res.into_result() {
            Ok(registrations) => render::render_attendees(&registrations),
            Err(err) => {
                self.view.notify(Notification::error(err.message()));
                render::AttendeeList::Placeholder
            }
        };
    }

    pub async fn register_for_event(&mut self, event_id: EventId) {
        let body = RegisterForEvent { event_id };
        let res: ApiResponse<Registration> = self
            .api
            .post("/registrations", &body, self.session.token())
            .await;
        let notification = match res.into_result() {
            Ok(registration) => Notification::success(ticket_message(&registration.ticket_code)),
            Err(err) => Notification::error(err.message()),
        };
        self.view.notify(notification);
    }

    pub async fn load_my_registrations(&mut self) {
        let res: ApiResponse<Vec<Registration>> = self
            .api
            .get("/registrations/my", self.session.token())
            .await;
        self.view.registrations = match res.into_result() {
            Ok(registrations) => render::render_registrations(&registrations),
            Err(err) => {
                warn!(error = %err, "registration list unavailable");
                render::RegistrationList::Placeholder
            }
        };
    }

    /// Fetches the QR image of a ticket. Failures only surface as notifications.
    pub async fn download_qr(&mut self, registration_id: RegistrationId) -> Option<QrImage> {
        let path = format!("/registrations/{registration_id}/qr");
        match self.api.get_binary(&path, self.session.token()).await {
            Ok(image) => Some(image),
            Err(BinaryError::Status(status)) => {
                warn!(%status, "qr download rejected");
                self.view.notify(Notification::error(QR_FAILED));
                None
            }
            Err(BinaryError::Transport(err)) => {
                warn!(error = %err, "qr service unreachable");
                self.view.notify(Notification::error(QR_UNAVAILABLE));
                None
            }
        }
    }

    pub async fn cancel_registration(&mut self, registration_id: RegistrationId) {
        let path = format!("/registrations/{registration_id}");
        let res: ApiResponse<IgnoredAny> = self.api.delete(&path, self.session.token()).await;
        if res.success {
            self.view.notify(Notification::success(REGISTRATION_CANCELLED));
            self.load_my_registrations().await;
        } else {
            self.view.notify(Notification::error(res.message_or_default()));
        }
    }

    pub async fn fetch_ticket(&mut self, registration_id: RegistrationId) -> Option<Registration> {
        let path = format!("/registrations/{registration_id}/ticket");
        let res: ApiResponse<Registration> = self.api.get(&path, self.session.token()).await;
        match res.into_result() {
            Ok(registration) => Some(registration),
            Err(err) => {
                self.view.notify(Notification::error(err.message()));
                None
            }
        }
    }

    pub async fn load_analytics(&mut self) {
        let res: ApiResponse<AnalyticsOverview> = self
            .api
            .get("/analytics/overview", self.session.token())
            .await;
        self.view.analytics = match res.into_result() {
            Ok(overview) => render::render_overview(&overview),
            Err(err) => render::AnalyticsPanel::Failed(err.message().to_string()),
        };
    }

    /// Per-event counters, shown in the analytics section without reloading
    /// the overview.
    pub async fn load_event_stats(&mut self, event_id: EventId) {
        self.view.active = Section::Analytics;
        let path = format!("/analytics/event/{event_id}");
        let res: ApiResponse<EventStats> = self.api.get(&path, self.session.token()).await;
        self.view.analytics = match res.into_result() {
            Ok(stats) => render::render_event_stats(&stats),
            Err(err) => render::AnalyticsPanel::Failed(err.message().to_string()),
        };
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
