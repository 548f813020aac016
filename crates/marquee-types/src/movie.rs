use std::fmt;

use marquee_error::{MarqueeError, Result};

/// A movie showing in the theater today.
///
/// Tracks how many tickets have been sold against the day's cap. The
/// `tickets_sold <= max_tickets` invariant is enforced by [`MovieRecord::sell`],
/// which is the only mutation a record sees after creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MovieRecord {
    /// Movie name, the unique key in the lineup. Never empty, never
    /// contains `;`.
    pub name: String,
    /// Tickets sold so far today.
    pub tickets_sold: u32,
    /// Total tickets available for today.
    pub max_tickets: u32,
}

impl MovieRecord {
    /// Create a fresh record with no sales yet, as an operator swap does.
    pub fn new(name: impl Into<String>, max_tickets: u32) -> Self {
        Self {
            name: name.into(),
            tickets_sold: 0,
            max_tickets,
        }
    }

    /// Tickets still available for purchase.
    ///
    /// Saturates at zero for records loaded with sales past the cap; the
    /// sale path rejects those before they get here.
    pub const fn available(&self) -> u32 {
        self.max_tickets.saturating_sub(self.tickets_sold)
    }

    /// Sell `quantity` tickets, returning the remaining availability.
    ///
    /// Fails with [`MarqueeError::InsufficientTickets`] when the sale would
    /// push `tickets_sold` past `max_tickets`, leaving the record unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::InsufficientTickets`] when fewer than
    /// `quantity` tickets remain.
    pub fn sell(&mut self, quantity: u32) -> Result<u32> {
        let sold = self
            .tickets_sold
            .checked_add(quantity)
            .filter(|&sold| sold <= self.max_tickets)
            .ok_or_else(|| MarqueeError::InsufficientTickets {
                name: self.name.clone(),
                requested: quantity,
                available: self.available(),
            })?;
        self.tickets_sold = sold;
        Ok(self.available())
    }

    /// Availability line shown to customers during the sale phase.
    pub fn availability_line(&self) -> String {
        format!("{} has {} tickets available", self.name, self.available())
    }
}

impl fmt::Display for MovieRecord {
    /// Sales summary shown in lineup listings and the end-of-day report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has sold {} tickets out of {}.",
            self.name, self.tickets_sold, self.max_tickets
        )
    }
}

#[cfg(test)]
mod tests {
    use marquee_error::MarqueeError;

    use super::MovieRecord;

    #[test]
    fn new_record_starts_with_zero_sales() {
        let movie = MovieRecord::new("Alien", 30);
        assert_eq!(movie.tickets_sold, 0);
        assert_eq!(movie.max_tickets, 30);
        assert_eq!(movie.available(), 30);
    }

    #[test]
    fn sell_within_cap_updates_count() {
        let mut movie = MovieRecord::new("Alien", 10);
        let remaining = movie.sell(4).expect("sale within cap should succeed");
        assert_eq!(remaining, 6);
        assert_eq!(movie.tickets_sold, 4);
    }

    #[test]
    fn sell_past_cap_is_rejected_and_leaves_state_unchanged() {
        let mut movie = MovieRecord {
            name: "Alien".to_owned(),
            tickets_sold: 8,
            max_tickets: 10,
        };
        let err = movie.sell(5).expect_err("sale past cap should fail");
        assert!(matches!(
            err,
            MarqueeError::InsufficientTickets {
                requested: 5,
                available: 2,
                ..
            }
        ));
        assert_eq!(movie.tickets_sold, 8);
    }

    #[test]
    fn sell_exactly_to_cap_succeeds() {
        let mut movie = MovieRecord::new("Alien", 10);
        let remaining = movie.sell(10).expect("selling out should succeed");
        assert_eq!(remaining, 0);
        assert_eq!(movie.tickets_sold, 10);
    }

    #[test]
    fn sell_quantity_overflow_counts_as_insufficient() {
        let mut movie = MovieRecord {
            name: "Alien".to_owned(),
            tickets_sold: 1,
            max_tickets: u32::MAX,
        };
        let err = movie.sell(u32::MAX).expect_err("overflow should be rejected");
        assert!(matches!(err, MarqueeError::InsufficientTickets { .. }));
        assert_eq!(movie.tickets_sold, 1);
    }

    #[test]
    fn available_saturates_for_oversold_records() {
        // A hand-edited database can carry sold > cap; the record reports
        // zero availability instead of wrapping.
        let movie = MovieRecord {
            name: "Alien".to_owned(),
            tickets_sold: 12,
            max_tickets: 10,
        };
        assert_eq!(movie.available(), 0);
    }

    #[test]
    fn display_is_the_sales_summary() {
        let movie = MovieRecord {
            name: "Alien".to_owned(),
            tickets_sold: 4,
            max_tickets: 30,
        };
        assert_eq!(movie.to_string(), "Alien has sold 4 tickets out of 30.");
        assert_eq!(
            movie.availability_line(),
            "Alien has 26 tickets available"
        );
    }
}
