use thiserror::Error;

/// Convenient result alias for the geopath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Searches never fail once their configuration is valid, so the only kind
/// surfaced is [`Error::InvalidArgument`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Raised when a request carries malformed configuration or input.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl Error {
    /// Build an [`Error::InvalidArgument`] from any displayable message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Raised when an algorithm name does not match a supported search.
    pub fn unknown_algorithm(name: &str) -> Self {
        Self::invalid_argument(format!(
            "unknown algorithm '{name}'{}",
            format_suggestions(&["dijkstra", "astar"])
        ))
    }

    /// Raised when a heuristic name does not match a supported distance function.
    pub fn unknown_heuristic(name: &str) -> Self {
        Self::invalid_argument(format!(
            "unknown heuristic '{name}'{}",
            format_suggestions(&["euclidean", "manhattan", "haversine"])
        ))
    }

    /// Raised when a queue strategy name is not recognised.
    pub fn unknown_queue(name: &str) -> Self {
        Self::invalid_argument(format!(
            "unknown queue strategy '{name}'{}",
            format_suggestions(&["linear", "heap"])
        ))
    }

    /// Raised when a travel mode name is not recognised.
    pub fn unknown_travel_mode(name: &str) -> Self {
        Self::invalid_argument(format!(
            "unknown travel mode '{name}'{}",
            format_suggestions(&["foot", "cycling", "driving"])
        ))
    }

    /// Raised when a coordinate is not finite or falls outside the valid range.
    pub fn invalid_coordinate(lat: f64, lon: f64) -> Self {
        Self::invalid_argument(format!(
            "coordinate ({lat}, {lon}) is outside latitude [-90, 90] / longitude [-180, 180]"
        ))
    }

    /// Whether this error reports malformed configuration.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

fn format_suggestions(accepted: &[&str]) -> String {
    if accepted.is_empty() {
        String::new()
    } else if accepted.len() == 1 {
        format!("; expected '{}'", accepted[0])
    } else {
        format!(
            "; expected one of: {}",
            accepted
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
