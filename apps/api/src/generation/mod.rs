// Resume generation: prompt composition, text generation with retry, and
// the HTTP handlers that expose generation, PDF download and email.
// All LLM calls go through llm_client::TextGenerator.

pub mod generator;
pub mod handlers;
pub mod prompts;
