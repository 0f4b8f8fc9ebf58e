use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Coach {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CoachRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payloads. The store assigns `id` and `created_at`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewPlayer {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewCoach {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewCoachRequest {
    pub name: String,
    pub email: String,
}

impl From<&CoachRequest> for NewCoach {
    fn from(request: &CoachRequest) -> Self {
        NewCoach {
            name: request.name.clone(),
            email: request.email.clone(),
        }
    }
}
