pub mod application_ctx;
pub mod registration_flow;

pub use application_ctx::ApplicationCtx;
pub use registration_flow::{RegistrationFlow, SubmitOutcome, WizardSession};
