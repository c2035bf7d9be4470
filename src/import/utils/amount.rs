use rust_decimal::Decimal;
use std::str::FromStr as _;

/// The income/expense marker of a bill row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Income,
    Expense,
    NotCounted,
    Other,
}

impl Direction {
    pub fn from_cell(cell: &str) -> Self {
        match cell {
            "收入" => Direction::Income,
            "支出" => Direction::Expense,
            "不计收支" => Direction::NotCounted,
            _ => Direction::Other,
        }
    }

    /// Expenses become negative, everything else keeps its sign.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Direction::Expense => -amount,
            Direction::Income | Direction::NotCounted | Direction::Other => amount,
        }
    }
}

pub fn parse_amount(content: &str) -> Option<Decimal> {
    Decimal::from_str(content.trim()).ok()
}

/// Removes currency signs and thousands separators, e.g. `¥1,234.50` -> `1234.50`.
pub fn strip_currency_formatting(content: &str) -> String {
    content
        .chars()
        .filter(|c| !matches!(c, '¥' | '￥' | ','))
        .collect()
}
