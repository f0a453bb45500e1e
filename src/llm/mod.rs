pub mod provider;
pub mod claude;
pub mod gemini;
pub mod prompts;
pub mod parser;
pub mod fallback;
pub mod insights;

pub use provider::TextGenerator;
pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;
pub use prompts::InsightRequest;
pub use fallback::fallback_insights;
pub use insights::InsightGenerator;
