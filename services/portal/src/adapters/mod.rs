pub mod chat_llm;
pub mod description_llm;
pub mod file_store;
pub mod memory;

pub use chat_llm::OpenAiChatAdapter;
pub use description_llm::OpenAiDescriptionAdapter;
pub use file_store::FileStore;
pub use memory::MemoryStore;
