//! Movie database line format serialization and deserialization.
//!
//! A database record is a single text line with three `;`-delimited fields:
//!
//! ```text
//! name;ticketsSold;maxTickets
//! ```
//!
//! Field 0 is the movie name (non-empty, must not contain `;`), field 1 the
//! number of tickets sold so far, field 2 the day's ticket cap. Fields past
//! the third are ignored. This module is the single parse entry point for
//! the format; nothing else in the workspace splits record lines by hand.

use marquee_error::{MarqueeError, Result};

use crate::movie::MovieRecord;

/// Parse a database line into a [`MovieRecord`].
///
/// # Errors
///
/// Returns [`MarqueeError::MalformedRecord`] when fewer than three fields
/// are present, the name is empty, or a numeric field is not a valid
/// non-negative integer.
pub fn parse_record(line: &str) -> Result<MovieRecord> {
    let mut fields = line.split(';');

    let name = fields
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| MarqueeError::malformed(format!("empty movie name in `{line}`")))?;
    let tickets_sold = parse_count(fields.next(), "ticketsSold", line)?;
    let max_tickets = parse_count(fields.next(), "maxTickets", line)?;

    Ok(MovieRecord {
        name: name.to_owned(),
        tickets_sold,
        max_tickets,
    })
}

/// Serialize a [`MovieRecord`] back to its database line.
pub fn serialize_record(record: &MovieRecord) -> String {
    format!(
        "{};{};{}",
        record.name, record.tickets_sold, record.max_tickets
    )
}

fn parse_count(field: Option<&str>, what: &str, line: &str) -> Result<u32> {
    let raw = field.ok_or_else(|| {
        MarqueeError::malformed(format!("missing {what} field in `{line}`"))
    })?;
    raw.parse::<u32>().map_err(|_| {
        MarqueeError::malformed(format!("{what} is not a non-negative integer: `{raw}`"))
    })
}

#[cfg(test)]
mod tests {
    use marquee_error::MarqueeError;
    use proptest::prelude::*;

    use super::{parse_record, serialize_record};
    use crate::movie::MovieRecord;

    #[test]
    fn parse_well_formed_line() {
        let record = parse_record("Alien;4;30").expect("well-formed line should parse");
        assert_eq!(record.name, "Alien");
        assert_eq!(record.tickets_sold, 4);
        assert_eq!(record.max_tickets, 30);
    }

    #[test]
    fn parse_preserves_spaces_in_names() {
        let record = parse_record("The Empire Strikes Back;0;45").expect("should parse");
        assert_eq!(record.name, "The Empire Strikes Back");
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let record = parse_record("Alien;4;30;stray").expect("extra fields are ignored");
        assert_eq!(record.max_tickets, 30);
    }

    #[test]
    fn parse_rejects_short_lines() {
        for line in ["Alien", "Alien;4", ""] {
            let err = parse_record(line).expect_err("short line should fail");
            assert!(matches!(err, MarqueeError::MalformedRecord { .. }), "{line}");
        }
    }

    #[test]
    fn parse_rejects_empty_name() {
        let err = parse_record(";4;30").expect_err("empty name should fail");
        assert!(matches!(err, MarqueeError::MalformedRecord { .. }));
    }

    #[test]
    fn parse_rejects_bad_counts() {
        for line in ["Alien;x;30", "Alien;4;x", "Alien;-1;30", "Alien;4;-30", "Alien;4.5;30"] {
            let err = parse_record(line).expect_err("bad count should fail");
            assert!(matches!(err, MarqueeError::MalformedRecord { .. }), "{line}");
        }
    }

    #[test]
    fn serialize_produces_the_line_format() {
        let record = MovieRecord {
            name: "Alien".to_owned(),
            tickets_sold: 4,
            max_tickets: 30,
        };
        assert_eq!(serialize_record(&record), "Alien;4;30");
    }

    proptest! {
        // Round-trip law: parse(serialize(r)) == r for any valid record.
        #[test]
        fn prop_record_round_trip(
            name in "[A-Za-z0-9][A-Za-z0-9 .,'&:!-]{0,30}",
            tickets_sold in any::<u32>(),
            max_tickets in any::<u32>(),
        ) {
            let record = MovieRecord { name, tickets_sold, max_tickets };
            let line = serialize_record(&record);
            let reparsed = parse_record(&line).expect("serialized record should parse");
            prop_assert_eq!(reparsed, record);
        }
    }
}
