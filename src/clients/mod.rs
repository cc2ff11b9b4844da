pub mod completion;
pub mod openai;

pub use completion::{ChatMessage, CompletionBackend, CompletionRequest, Role};
pub use openai::OpenAiClient;
