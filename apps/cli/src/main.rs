use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    parse_capacity, submitted_date_time, ApiGateway, EventClient, EventFilter, EventForm,
    FileTokenStore, Section, Session,
};
use shared::{
    domain::{EventId, RegistrationId},
    protocol::EventUpdate,
};
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use config::load_settings;
use output::Printer;

#[derive(Parser, Debug)]
#[command(name = "eventhub", about = "Browse events and manage tickets")]
struct Args {
    /// Base URL of the REST API, e.g. http://localhost:3000/api
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Where the auth token is kept between runs
    #[arg(long, global = true)]
    token_path: Option<PathBuf>,
    #[arg(long, global = true, default_value = "eventhub.toml")]
    config: PathBuf,
    /// Print HTML fragments instead of plain text
    #[arg(long, global = true)]
    html: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    Events {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        category: String,
    },
    CreateEvent {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        location: String,
        /// Local date and time, YYYY-MM-DDTHH:MM
        #[arg(long)]
        date_time: String,
        #[arg(long)]
        capacity: String,
        #[arg(long)]
        category: String,
    },
    /// Show one event
    Event { event_id: EventId },
    /// Change some fields of an event you organize
    EditEvent {
        event_id: EventId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Local date and time, YYYY-MM-DDTHH:MM
        #[arg(long)]
        date_time: Option<String>,
        #[arg(long)]
        capacity: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    DeleteEvent { event_id: EventId },
    /// Who registered for an event you organize
    Attendees { event_id: EventId },
    /// Register for an event
    Join { event_id: EventId },
    /// List your registrations
    My,
    /// Save the QR code of a ticket; with --html, print it as an inline image
    Qr {
        registration_id: RegistrationId,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Cancel { registration_id: RegistrationId },
    Ticket { registration_id: RegistrationId },
    Analytics,
    /// Registration counters for one event
    Stats { event_id: EventId },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(&args.config).with_overrides(args.api_url, args.token_path);
    let store = Arc::new(FileTokenStore::new(&settings.token_path));
    let mut client = EventClient::new(
        ApiGateway::new(&settings.api_base_url),
        Session::restore(store),
    );
    let printer = Printer { html: args.html };

    match args.command {
        Command::Login { email, password } => {
            client.login(&email, &password).await;
            report_auth(&client)?;
            println!("{}", printer.navbar(&client.view().navbar)?);
        }
        Command::Register { email, password } => {
            client.switch_auth_tab(client_core::AuthTab::Register);
            client.register(&email, &password).await;
            report_auth(&client)?;
            println!("{}", printer.navbar(&client.view().navbar)?);
        }
        Command::Logout => {
            client.logout().await;
        }
        Command::Whoami => {
            restore_profile(&mut client).await;
            println!("{}", printer.navbar(&client.view().navbar)?);
        }
        Command::Events { search, category } => {
            restore_profile(&mut client).await;
            client.view_mut().filter = EventFilter { search, category };
            client.show_section(Section::Events).await;
            println!("{}", printer.events(&client.view().events)?);
        }
        Command::CreateEvent {
            title,
            description,
            location,
            date_time,
            capacity,
            category,
        } => {
            client.view_mut().event_form = EventForm {
                title,
                description,
                location,
                date_time,
                capacity,
                category,
            };
            client.create_event().await;
        }
        Command::Event { event_id } => {
            if let Some(event) = client.fetch_event(event_id).await {
                println!("{}", printer.event(&event));
            }
        }
        Command::EditEvent {
            event_id,
            title,
            description,
            location,
            date_time,
            capacity,
            category,
        } => {
            let update = EventUpdate {
                title,
                description,
                location,
                date_time: date_time.as_deref().map(submitted_date_time),
                capacity: capacity.as_deref().and_then(parse_capacity),
                category,
            };
            if let Some(event) = client.update_event(event_id, &update).await {
                println!("{}", printer.event(&event));
            }
        }
        Command::DeleteEvent { event_id } => {
            client.delete_event(event_id).await;
        }
        Command::Attendees { event_id } => {
            client.load_event_registrations(event_id).await;
            println!("{}", printer.attendees(&client.view().attendees)?);
        }
        Command::Join { event_id } => {
            client.register_for_event(event_id).await;
        }
        Command::My => {
            client.show_section(Section::MyRegistrations).await;
            println!("{}", printer.registrations(&client.view().registrations)?);
        }
        Command::Qr {
            registration_id,
            out,
        } => {
            if let Some(image) = client.download_qr(registration_id).await {
                if printer.html && out.is_none() {
                    println!("{}", printer.qr(&image)?);
                } else {
                    let path = out.unwrap_or_else(|| {
                        PathBuf::from(format!(
                            "ticket-{registration_id}.{}",
                            image.file_extension()
                        ))
                    });
                    fs::write(&path, &image.bytes)
                        .with_context(|| format!("failed to write '{}'", path.display()))?;
                    println!("{}", path.display());
                }
            }
        }
        Command::Cancel { registration_id } => {
            client.cancel_registration(registration_id).await;
            println!("{}", printer.registrations(&client.view().registrations)?);
        }
        Command::Ticket { registration_id } => {
            if let Some(registration) = client.fetch_ticket(registration_id).await {
                println!("{}", printer.ticket(&registration));
            }
        }
        Command::Analytics => {
            client.show_section(Section::Analytics).await;
            println!("{}", printer.analytics(&client.view().analytics)?);
        }
        Command::Stats { event_id } => {
            client.load_event_stats(event_id).await;
            println!("{}", printer.analytics(&client.view().analytics)?);
        }
    }

    if let Some(notification) = client.take_notification() {
        if notification.is_error() {
            bail!(notification.message);
        }
        eprintln!("{}", notification.message);
    }
    Ok(())
}

/// Register buttons and the navbar depend on the profile behind a stored token.
async fn restore_profile(client: &mut EventClient) {
    if client.session().has_token() {
        client.fetch_current_user().await;
    }
}

fn report_auth(client: &EventClient) -> Result<()> {
    if let Some(message) = &client.view().auth_message {
        bail!("{message}");
    }
    Ok(())
}
