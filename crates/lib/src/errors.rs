use thiserror::Error;

/// Errors produced by the generator layer: configuration, dispatch,
/// remote provider calls, and artifact persistence.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to provider API: {0}")]
    Request(reqwest::Error),
    #[error("Failed to deserialize provider API response: {0}")]
    Deserialization(reqwest::Error),
    #[error("Provider API returned an error: {0}")]
    Api(String),
    #[error("Generator received input of the wrong type: {0}")]
    InvalidInputType(String),
    #[error("Required credential is missing: {0}")]
    MissingCredential(String),
    #[error("Unknown provider identifier: {0}")]
    UnknownProvider(String),
    #[error("Provider is not registered in the factory: {0}")]
    UnsupportedProvider(String),
    #[error("Cannot persist artifact: {0}")]
    InvalidArtifact(String),
    #[error("No voice or prompt mapping for language: {0}")]
    UnsupportedLanguage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the AnkiConnect collaborator.
#[derive(Error, Debug)]
pub enum AnkiError {
    #[error("Failed to reach AnkiConnect: {0}")]
    Request(reqwest::Error),
    #[error("Failed to deserialize AnkiConnect response: {0}")]
    Deserialization(reqwest::Error),
    #[error("AnkiConnect returned an error: {0}")]
    Protocol(String),
    #[error("Deck does not exist: {0}")]
    MissingDeck(String),
}

/// Errors surfaced by the two pipeline phases.
///
/// Per-word generation failures are handled inside the pipeline (logged and
/// skipped); a `PipelineError` aborts the current phase.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Anki(#[from] AnkiError),
    #[error("I/O error in processing directory: {0}")]
    Io(#[from] std::io::Error),
}
