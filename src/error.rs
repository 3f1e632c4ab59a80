use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the harness. None of these are recoverable mid-run:
/// a failed iteration invalidates the statistics for its benchmark, so every
/// error aborts the run and propagates to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A collection needed for target selection has no documents.
    #[error("cannot select benchmark targets: collection `{collection}` is empty")]
    TargetUnavailable { collection: String },

    /// A timed benchmark call failed. Samples are never dropped silently;
    /// statistics over fewer than the configured iterations would be
    /// misleading, so the whole run fails.
    #[error("benchmark `{benchmark}` failed on iteration {iteration}: {source}")]
    Operation {
        benchmark: String,
        iteration: u32,
        #[source]
        source: Box<Error>,
    },

    /// Invalid run configuration, rejected before any execution starts.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A fetch-modify-save cycle found no document to operate on.
    #[error("no matching document in collection `{collection}`")]
    NotFound { collection: String },

    /// An active-record model failed field validation before a write.
    #[error("record validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error(transparent)]
    BsonSer(#[from] mongodb::bson::ser::Error),

    #[error(transparent)]
    BsonDe(#[from] mongodb::bson::de::Error),

    #[error(transparent)]
    DocumentAccess(#[from] mongodb::bson::document::ValueAccessError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn operation(benchmark: &str, iteration: u32, source: Error) -> Self {
        Error::Operation {
            benchmark: benchmark.to_string(),
            iteration,
            source: Box::new(source),
        }
    }
}
