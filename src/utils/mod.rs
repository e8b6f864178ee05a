pub mod logging;
pub mod validators;

pub use logging::truncate_text;
pub use validators::{validate_national_id, validate_tracking_code};
