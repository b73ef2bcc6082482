pub mod compiler;
pub mod handlers;
pub mod prompts;

pub use compiler::{PromptCompiler, UnknownAnalysisPolicy};
