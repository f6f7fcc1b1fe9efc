use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(EventId);
id_newtype!(RegistrationId);

/// Permission tier assigned by the server. `Guest` is never parsed from the
/// wire; it is the role of a session without a loaded profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    #[default]
    Guest,
    Attendee,
    Organizer,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Guest => "Guest",
            Role::Attendee => "Attendee",
            Role::Organizer => "Organizer",
            Role::Admin => "Admin",
        }
    }

    pub fn is_authenticated(self) -> bool {
        match self {
            Role::Guest => false,
            Role::Attendee | Role::Organizer | Role::Admin => true,
        }
    }

    pub fn can_create_events(self) -> bool {
        match self {
            Role::Organizer | Role::Admin => true,
            Role::Guest | Role::Attendee => false,
        }
    }

    pub fn can_view_analytics(self) -> bool {
        self.can_create_events()
    }
}

impl From<String> for Role {
    // Unknown tiers fall back to the least-privileged authenticated role.
    fn from(value: String) -> Self {
        match value.as_str() {
            "Organizer" => Role::Organizer,
            "Admin" => Role::Admin,
            _ => Role::Attendee,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn is_confirmed(self) -> bool {
        matches!(self, RegistrationStatus::Confirmed)
    }
}
