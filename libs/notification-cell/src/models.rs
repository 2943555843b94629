use serde::{Deserialize, Serialize};
use std::fmt;

/// Which status-change email a dispatch delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Accepted,
    Rejected,
}

impl NotificationKind {
    pub fn template_name(&self) -> &'static str {
        match self {
            NotificationKind::Accepted => "appointment_accepted",
            NotificationKind::Rejected => "appointment_rejected",
        }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            NotificationKind::Accepted => "Confirmação de Agendamento - Sabina Decorações",
            NotificationKind::Rejected => "Agendamento Recusado - Sabina Decorações",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Accepted => write!(f, "accepted"),
            NotificationKind::Rejected => write!(f, "rejected"),
        }
    }
}

/// Terminal state of a single dispatch attempt. Nothing here propagates to
/// the request that triggered the dispatch; the caller already returned.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Templated email delivered.
    Delivered,
    /// Template or first delivery failed; plain-text fallback delivered.
    FallbackDelivered,
    /// Dropped by the process-wide cooldown.
    RateLimited,
    /// Both attempts failed, or the appointment could not be fetched.
    Failed(NotificationError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotificationError {
    #[error("appointment no longer exists")]
    LookupFailure,

    #[error("template rendering failed: {0}")]
    RenderFailure(String),

    #[error("mail transport failed: {0}")]
    TransportFailure(String),
}
