pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::{Appointment, AppointmentError, AppointmentStatus};
pub use router::{appointment_routes, SchedulingState};
pub use services::booking::VisitBookingService;
