mod amount;
mod columns;
mod date;

pub use amount::{parse_amount, strip_currency_formatting, Direction};
pub use columns::{resolve_columns, ColumnPattern, MatchPolicy};
pub use date::leading_date;
