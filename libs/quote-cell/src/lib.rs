pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::{QuoteError, QuoteRequest};
pub use router::{quote_routes, QuoteState};
pub use services::quote::QuoteService;
