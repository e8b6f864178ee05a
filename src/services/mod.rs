pub mod application_service;
pub mod auth_service;
pub mod review_service;
pub mod session;

pub use application_service::ApplicationService;
pub use auth_service::AuthService;
pub use review_service::{AdminScope, ReviewService};
pub use session::{SessionContext, SessionState};
