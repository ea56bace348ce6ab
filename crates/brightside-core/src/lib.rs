pub mod error;
pub mod motivation;

pub use error::RecordError;
pub use motivation::{MotivationRecord, Quote};
