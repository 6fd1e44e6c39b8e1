//! # Flashcard Generation
//!
//! This crate generates flashcards (text, image, audio) for a list of words
//! by dispatching to interchangeable third-party providers, then imports the
//! results into Anki via AnkiConnect. Providers are swapped per capability
//! class (text, image, text-to-speech) without touching the pipeline.

pub mod anki;
pub mod config;
pub mod errors;
pub mod input;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod store;
pub mod types;

pub use config::{GeneratorConfig, GeneratorConfigs, RuntimeOptions};
pub use errors::{AnkiError, GeneratorError, PipelineError};
pub use models::{AvailableModel, Capability};
pub use providers::factory::{GeneratorFactory, GeneratorSet};
pub use types::{CardRawDataV1, GeneratorResponse, WordWithContext};
