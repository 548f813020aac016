//! The in-memory table of today's movies.

use std::collections::HashMap;

use marquee_error::{MarqueeError, Result};
use marquee_types::{parse_record, serialize_record, MovieRecord};
use tracing::warn;

/// Today's movie lineup, keyed by movie name.
///
/// Keys are unique; iteration order is unspecified and callers must not
/// depend on it. The lineup is owned by the session for the whole process
/// lifetime — there is no shared or global state.
#[derive(Debug, Default)]
pub struct Lineup {
    movies: HashMap<String, MovieRecord>,
}

impl Lineup {
    /// An empty lineup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear and repopulate the lineup from raw database lines.
    ///
    /// Empty lines are skipped. A malformed line is skipped with a warning
    /// rather than failing the load. On duplicate names the last record
    /// wins. Returns the number of records loaded.
    pub fn load_from_lines<'a, I>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.movies.clear();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(line) {
                Ok(record) => {
                    self.movies.insert(record.name.clone(), record);
                }
                Err(error) => {
                    warn!(%error, line, "skipping malformed database line");
                }
            }
        }
        self.movies.len()
    }

    /// Lazy, restartable iteration over every record, unspecified order.
    pub fn list(&self) -> impl Iterator<Item = &MovieRecord> {
        self.movies.values()
    }

    /// Insert or replace a record by name.
    pub fn upsert(&mut self, record: MovieRecord) {
        self.movies.insert(record.name.clone(), record);
    }

    /// Remove a record by name. Absence is not an error.
    pub fn remove(&mut self, name: &str) -> Option<MovieRecord> {
        self.movies.remove(name)
    }

    /// Look up a record by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MovieRecord> {
        self.movies.get(name)
    }

    /// Number of movies showing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the lineup has no movies at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Bulk re-serialize of every record, one database line each.
    #[must_use]
    pub fn serialize_lines(&self) -> Vec<String> {
        self.movies.values().map(serialize_record).collect()
    }

    /// Sell `quantity` tickets for the named movie, returning the
    /// remaining availability.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::UnknownMovie`] when the name is not in the
    /// lineup and [`MarqueeError::InsufficientTickets`] when the sale would
    /// exceed the cap; in both cases the lineup is unchanged.
    pub fn sell_tickets(&mut self, name: &str, quantity: u32) -> Result<u32> {
        let movie = self
            .movies
            .get_mut(name)
            .ok_or_else(|| MarqueeError::unknown_movie(name))?;
        movie.sell(quantity)
    }

    /// Replace `outgoing` with `incoming`: remove-if-present, then upsert.
    ///
    /// Returns the removed record when one existed. A missing outgoing
    /// movie is not an error; the incoming movie is inserted regardless.
    pub fn swap(&mut self, outgoing: &str, incoming: MovieRecord) -> Option<MovieRecord> {
        let removed = self.movies.remove(outgoing);
        self.upsert(incoming);
        removed
    }
}
