mod blocking;
mod gemini;
mod traits;

pub use blocking::BlockingMotivationService;
pub use gemini::{GeminiService, DEFAULT_API_URL, DEFAULT_MODEL};
pub use traits::{MotivationService, ServiceError, StaticMotivationService};
