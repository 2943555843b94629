use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A pricing inquiry from the quote simulator. The estimate is computed from
/// constants; the final price is set later by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub event_type: EventType,
    pub guest_count: u32,
    pub venue: Venue,
    /// Package key; unknown keys price at the fallback rate.
    pub package: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub ideas: String,
    pub final_price: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Wedding,
    Birthday,
    Corporate,
    KidsParty,
    Other,
}

impl EventType {
    /// Customer-facing label, used in the final-price email.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Wedding => "Casamento",
            EventType::Birthday => "Aniversário",
            EventType::Corporate => "Evento Corporativo",
            EventType::KidsParty => "Festas Infantis",
            EventType::Other => "Outro",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    Indoor,
    Outdoor,
}

impl Venue {
    pub fn label(&self) -> &'static str {
        match self {
            Venue::Indoor => "Espaço interno",
            Venue::Outdoor => "Espaço externo",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuoteRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub event_type: EventType,
    pub guest_count: u32,
    pub venue: Venue,
    pub package: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub ideas: String,
}

/// Admin input for the final price. Arrives as Brazilian currency text, e.g.
/// "R$ 1.200,50".
#[derive(Debug, Clone, Deserialize)]
pub struct SetFinalPriceRequest {
    pub final_price: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewQuote {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub event_type: EventType,
    pub guest_count: u32,
    pub venue: Venue,
    pub package: String,
    pub services: Vec<String>,
    pub ideas: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("Quote request not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
