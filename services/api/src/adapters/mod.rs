pub mod content_llm;
pub mod db;

pub use content_llm::OpenAiCompletionAdapter;
pub use db::PgStoreAdapter;
