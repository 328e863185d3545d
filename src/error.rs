use thiserror::Error;

/// A failed call against the release API, classified by what the caller
/// can do about it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("resource already exists")]
    AlreadyExists,

    #[error("resource not found")]
    NotFound,

    #[error("GitHub rejected the request: {message}")]
    Rejected { message: String },

    #[error("request to GitHub failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("could not create or update tag ref \"{reference}\"")]
    TagRef {
        reference: String,
        #[source]
        source: ApiError,
    },

    #[error("could not create release for tag \"{tag}\"")]
    CreateRelease {
        tag: String,
        #[source]
        source: ApiError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("input \"{input}\" must be a JSON boolean, got \"{value}\"")]
    InvalidBoolean { input: &'static str, value: String },

    #[error("repository must be in \"owner/name\" form, got \"{0}\"")]
    InvalidRepository(String),
}
