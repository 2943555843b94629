pub mod lookup;
pub mod models;
pub mod services;

pub use lookup::{AppointmentContact, AppointmentLookup, RestAppointmentLookup};
pub use models::{DispatchOutcome, NotificationError, NotificationKind};
pub use services::dispatcher::NotificationDispatcher;
pub use services::mailer::{MailerClient, OutboundEmail};
pub use services::rate_limit::DispatchRateLimiter;
pub use services::templates::{strip_tags, MessageTemplates};
