pub mod enricher;
pub mod prompt;

pub use enricher::GeminiEnricher;
