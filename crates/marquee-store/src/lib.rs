//! Movie lineup storage for the Marquee box office.
//!
//! [`Lineup`] is the in-memory table of today's movies, keyed by name.
//! [`Database`] is the flat-file gateway that loads the lineup at startup
//! and atomically rewrites the whole file after every mutation.

pub mod database;
pub mod lineup;

pub use database::Database;
pub use lineup::Lineup;
