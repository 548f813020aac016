pub mod movie;
pub mod record;

pub use movie::MovieRecord;
pub use record::{parse_record, serialize_record};
