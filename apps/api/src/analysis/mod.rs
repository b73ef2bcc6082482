// Analysis of YouTube videos and PDF documents, plus the artifacts around a
// result: text downloads, illustration images and helpfulness feedback.
// All generation goes through llm_client; no direct Gemini calls here.

pub mod export;
pub mod feedback;
pub mod handlers;
pub mod illustrate;
pub mod service;
