use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for Marquee box office operations.
///
/// Structured variants for the recoverable failure classes a sales session
/// can hit, with recovery hints for operator-facing errors. Every variant
/// except [`MarqueeError::Io`] is locally recoverable: a bad command or an
/// out-of-stock movie must never end an ongoing session.
#[derive(Error, Debug)]
pub enum MarqueeError {
    /// Database file missing at load. Treated as an empty catalog, not a
    /// fatal condition.
    #[error("movie database not found: '{path}'")]
    DatabaseUnavailable { path: PathBuf },

    /// A database line or input command that does not match the
    /// `name;ticketsSold;maxTickets` record format.
    #[error("malformed record: {detail}")]
    MalformedRecord { detail: String },

    /// A sale or swap referenced a movie that is not in the lineup.
    #[error("no such movie: {name}")]
    UnknownMovie { name: String },

    /// A sale would push tickets sold past the cap. State is unchanged.
    #[error("there are not {requested} tickets available for {name} ({available} left)")]
    InsufficientTickets {
        name: String,
        requested: u32,
        available: u32,
    },

    /// File I/O error while reading or writing the database.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarqueeError {
    /// Convenience constructor for [`MarqueeError::MalformedRecord`].
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedRecord {
            detail: detail.into(),
        }
    }

    /// Convenience constructor for [`MarqueeError::UnknownMovie`].
    pub fn unknown_movie(name: impl Into<String>) -> Self {
        Self::UnknownMovie { name: name.into() }
    }

    /// Whether the session loop can report this error and keep going.
    ///
    /// Only real I/O failures are considered unrecoverable.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }

    /// Human-friendly suggestion for fixing this error.
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::DatabaseUnavailable { .. } => {
                Some("starting with an empty lineup; the file is created on first save")
            }
            Self::MalformedRecord { .. } => {
                Some("records are `name;ticketsSold;maxTickets` with non-negative integers")
            }
            Self::UnknownMovie { .. } => Some("check the lineup listing for the exact title"),
            Self::InsufficientTickets { .. } | Self::Io(_) => None,
        }
    }
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, MarqueeError>;

#[cfg(test)]
mod tests {
    use super::MarqueeError;

    #[test]
    fn display_strings() {
        let err = MarqueeError::unknown_movie("Alien");
        assert_eq!(err.to_string(), "no such movie: Alien");

        let err = MarqueeError::InsufficientTickets {
            name: "Alien".to_owned(),
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "there are not 5 tickets available for Alien (2 left)"
        );

        let err = MarqueeError::malformed("expected 3 fields, got 1");
        assert_eq!(err.to_string(), "malformed record: expected 3 fields, got 1");
    }

    #[test]
    fn convenience_constructors() {
        let err = MarqueeError::malformed("missing cap");
        assert!(matches!(
            err,
            MarqueeError::MalformedRecord { detail } if detail == "missing cap"
        ));

        let err = MarqueeError::unknown_movie("Heat");
        assert!(matches!(
            err,
            MarqueeError::UnknownMovie { name } if name == "Heat"
        ));
    }

    #[test]
    fn io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: MarqueeError = io_err.into();
        assert!(matches!(err, MarqueeError::Io(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn is_recoverable() {
        assert!(MarqueeError::unknown_movie("x").is_recoverable());
        assert!(MarqueeError::malformed("x").is_recoverable());
        assert!(
            MarqueeError::InsufficientTickets {
                name: "x".to_owned(),
                requested: 1,
                available: 0,
            }
            .is_recoverable()
        );
        assert!(
            MarqueeError::DatabaseUnavailable {
                path: "MovieDatabase.txt".into(),
            }
            .is_recoverable()
        );
    }

    #[test]
    fn suggestions() {
        assert!(MarqueeError::malformed("x").suggestion().is_some());
        assert!(MarqueeError::unknown_movie("x").suggestion().is_some());
        assert!(
            MarqueeError::InsufficientTickets {
                name: "x".to_owned(),
                requested: 1,
                available: 0,
            }
            .suggestion()
            .is_none()
        );
    }
}
