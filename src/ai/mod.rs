//! AI-assisted search and recipe generation.
//!
//! The generator is an external text service behind [`Generator`]. Its
//! output is always reconciled against the stored vocabularies before use.

mod assistant;
mod generator;
mod openai;

pub use assistant::{AiAssistant, Vocabulary};
pub use generator::{DisabledGenerator, Generator, GeneratorError, Prompt};
pub use openai::OpenAiGenerator;
