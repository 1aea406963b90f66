use thiserror::Error;

/// Errors raised around the scoring core. Scoring itself never fails.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream API answered with an error envelope.
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A fetch client was built without the credential it needs.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// The score sink could not write or read its records.
    #[error("persistence error at {path}: {source}")]
    Persistence {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("record encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("lexicon error at {path}: {reason}")]
    Lexicon { path: String, reason: String },
}
