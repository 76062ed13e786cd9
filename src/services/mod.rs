pub mod catalog_service;
pub mod llm_service;
pub mod transform;

pub use catalog_service::CatalogService;
pub use llm_service::{LlmService, TokenUsage};
pub use transform::{LlmCleaner, LlmQuestionGenerator, QuestionGenerator, TextCleaner};
