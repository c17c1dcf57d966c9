use thiserror::Error;

/// Convenient result alias for the Eventgate library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a suggest call is attempted without a keyword.
    #[error("keyword is required")]
    MissingKeyword,

    /// The geolocation provider returned no usable location for the address.
    #[error("no location found for IP address {ip}")]
    LookupFailed { ip: String },

    /// Raised when the upstream ticketing API reports an unknown event.
    #[error("event {id} not found")]
    EventNotFound { id: String },

    /// Raised when adding a favorite whose id is already stored.
    #[error("favorite {id} already exists")]
    FavoriteExists { id: String },

    /// Raised when removing a favorite that is not stored.
    #[error("favorite {id} not found")]
    FavoriteNotFound { id: String },

    /// A third-party API answered with a non-success status.
    #[error("{service} responded with status {status}")]
    UpstreamStatus { service: &'static str, status: u16 },

    /// A third-party API answered successfully but the payload lacked an expected field.
    #[error("malformed response from {service}: {message}")]
    MalformedResponse {
        service: &'static str,
        message: String,
    },

    /// Raised when coordinates or precision fall outside the encodable range.
    #[error("invalid geohash input: {message}")]
    InvalidGeohash { message: String },

    /// Raised when the persistence connection string cannot be interpreted.
    #[error("invalid database url: {url}")]
    InvalidDatabaseUrl { url: String },

    /// Raised when a configured upstream base URL cannot be parsed.
    #[error("invalid upstream base url: {url}")]
    InvalidBaseUrl { url: String },

    /// Raised when the store connection mutex was poisoned by a panicking writer.
    #[error("favorites store lock poisoned")]
    StorePoisoned,

    /// A store call dispatched to a worker thread did not run to completion.
    #[error("favorites store task failed: {message}")]
    StoreTask { message: String },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when the error reflects a failure of a third-party API rather
    /// than of the caller's input or the local store.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::UpstreamStatus { .. } | Error::MalformedResponse { .. } | Error::Http(_)
        )
    }
}
