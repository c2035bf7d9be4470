use super::utils::{
    leading_date, parse_amount, resolve_columns, strip_currency_formatting, ColumnPattern,
    Direction, MatchPolicy,
};
use super::{rewrite_row, BillFormat, Row, SkipReason};

const PATTERNS: [ColumnPattern; 4] = [
    ColumnPattern {
        name: "transaction time",
        needle: "交易时间",
        default: 0,
    },
    ColumnPattern {
        name: "income/expense",
        needle: "收/支",
        default: 5,
    },
    ColumnPattern {
        name: "amount",
        needle: "金额",
        default: 5,
    },
    ColumnPattern {
        name: "current status",
        needle: "当前状态",
        default: 7,
    },
];

/// Refunds and withdrawals to the user's own bank card are not spending.
const EXCLUDED_STATUSES: [&str; 3] = ["已全额退款", "提现已到账", "对方已退还"];

/// WeChat Pay (微信支付) bill export.
pub struct Wechat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WechatColumns {
    pub time: usize,
    pub direction: usize,
    pub amount: usize,
    pub status: usize,
}

impl WechatColumns {
    fn min_cells(&self) -> usize {
        [self.time, self.direction, self.amount, self.status]
            .into_iter()
            .max()
            .unwrap_or_default()
            + 1
    }
}

impl BillFormat for Wechat {
    type Columns = WechatColumns;

    const PREAMBLE_LINES: usize = 16;

    fn resolve_columns(header: &[String]) -> WechatColumns {
        let [time, direction, amount, status] =
            resolve_columns(header, &PATTERNS, MatchPolicy::Last);
        WechatColumns {
            time,
            direction,
            amount,
            status,
        }
    }

    fn process_row(columns: &WechatColumns, row: Row) -> Result<Row, SkipReason> {
        if row.len() < columns.min_cells() {
            return Err(SkipReason::Malformed);
        }
        let date = leading_date(&row[columns.time])
            .ok_or(SkipReason::Malformed)?
            .to_owned();

        if EXCLUDED_STATUSES.contains(&row[columns.status].as_str()) {
            return Err(SkipReason::ExcludedStatus);
        }

        let direction = Direction::from_cell(&row[columns.direction]);
        let amount = parse_amount(&strip_currency_formatting(&row[columns.amount]))
            .ok_or(SkipReason::UnparseableAmount)?;
        let amount = direction.signed(amount).to_string();

        Ok(rewrite_row(row, columns.time, date, columns.amount, amount))
    }
}
