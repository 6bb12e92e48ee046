//! Loading of survey data.

mod csv;

pub use self::csv::{read_csv, read_csv_from_reader};
