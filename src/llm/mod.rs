pub mod message;
pub mod openai;
pub mod traits;

pub use message::{ChatMessage, CompletionRequest, ResponseFormat};
pub use openai::OpenAiCompatClient;
pub use traits::CompletionProvider;
