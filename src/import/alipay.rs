use super::utils::{
    leading_date, parse_amount, resolve_columns, ColumnPattern, Direction, MatchPolicy,
};
use super::{rewrite_row, BillFormat, Row, SkipReason};

const DATE_COLUMN: usize = 0;
const DIRECTION_COLUMN: usize = 5;
const AMOUNT_COLUMN: usize = 6;

const STATUS_PATTERN: [ColumnPattern; 1] = [ColumnPattern {
    name: "transaction status",
    needle: "交易状态",
    default: 3,
}];

const CLOSED: &str = "交易关闭";

/// Alipay (支付宝) transaction export.
///
/// Only the status column is looked up in the header; date, direction and
/// amount sit at fixed positions in every known export version.
pub struct Alipay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlipayColumns {
    pub date: usize,
    pub direction: usize,
    pub amount: usize,
    pub status: usize,
}

impl AlipayColumns {
    fn min_cells(&self) -> usize {
        [self.date, self.direction, self.amount, self.status]
            .into_iter()
            .max()
            .unwrap_or_default()
            + 1
    }
}

impl BillFormat for Alipay {
    type Columns = AlipayColumns;

    const PREAMBLE_LINES: usize = 24;

    fn resolve_columns(header: &[String]) -> AlipayColumns {
        let [status] = resolve_columns(header, &STATUS_PATTERN, MatchPolicy::First);
        AlipayColumns {
            date: DATE_COLUMN,
            direction: DIRECTION_COLUMN,
            amount: AMOUNT_COLUMN,
            status,
        }
    }

    fn process_row(columns: &AlipayColumns, row: Row) -> Result<Row, SkipReason> {
        if row.len() < columns.min_cells() {
            return Err(SkipReason::Malformed);
        }
        let date = leading_date(&row[columns.date])
            .ok_or(SkipReason::Malformed)?
            .to_owned();

        let direction = Direction::from_cell(&row[columns.direction]);
        if direction == Direction::NotCounted {
            return Err(SkipReason::NonFinancial);
        }
        if row[columns.status] == CLOSED {
            return Err(SkipReason::Closed);
        }

        let amount = parse_amount(&row[columns.amount]).ok_or(SkipReason::UnparseableAmount)?;
        let amount = direction.signed(amount).to_string();

        Ok(rewrite_row(row, columns.date, date, columns.amount, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::testutils::{bill_lines, row};
    use crate::import::{FilterStats, Pipeline, Provider, Statement};

    const HEADER: &str =
        "交易时间,交易分类,交易对方,对方账号,商品说明,收/支,金额,收/付款方式,交易状态,交易订单号,商家订单号,备注,";

    fn process(csv_lines: &[&str]) -> Statement {
        Pipeline::new(Provider::Alipay)
            .process(&bill_lines(Alipay::PREAMBLE_LINES, csv_lines))
            .unwrap()
    }

    #[test]
    fn resolves_status_column_from_header() {
        let header = row(&HEADER.split(',').collect::<Vec<_>>());
        assert_eq!(
            AlipayColumns {
                date: 0,
                direction: 5,
                amount: 6,
                status: 8,
            },
            Alipay::resolve_columns(&header)
        );
    }

    #[test]
    fn status_column_defaults_to_index_3() {
        let header = row(&["时间", "分类", "对方", "状态", "说明", "收/支", "金额"]);
        assert_eq!(3, Alipay::resolve_columns(&header).status);
    }

    #[test]
    fn first_status_column_wins() {
        let header = row(&["交易时间", "交易状态", "退款交易状态"]);
        assert_eq!(1, Alipay::resolve_columns(&header).status);
    }

    #[test]
    fn drops_non_financial_row() {
        let statement = process(&[
            "交易时间,分类,对方,状态,说明,收/支,金额",
            "2024-01-05 10:00:00,...,...,...,...,不计收支,100.00",
        ]);
        assert!(statement.records.is_empty());
        assert_eq!(
            FilterStats {
                non_financial: 1,
                ..FilterStats::default()
            },
            statement.stats
        );
    }

    #[test]
    fn negates_expense_and_truncates_date() {
        let statement = process(&[
            HEADER,
            "2024-01-05 10:00:00,餐饮美食,某餐厅,abc***@example.com,午饭,支出,50.5,余额宝,交易成功,2024010500001,M001,,",
        ]);
        assert_eq!(
            vec![row(&[
                "2024-01-05",
                "餐饮美食",
                "某餐厅",
                "abc***@example.com",
                "午饭",
                "支出",
                "-50.5",
                "余额宝",
                "交易成功",
                "2024010500001",
                "M001",
                "",
                "",
            ])],
            statement.records
        );
        assert_eq!(1, statement.stats.kept);
    }

    #[test]
    fn keeps_income_and_other_amounts_positive() {
        let statement = process(&[
            HEADER,
            "2024-01-06 11:00:00,转账红包,朋友,,红包,收入,88.88,,交易成功,1,,,",
            "2024-01-07 12:00:00,其他,朋友,,转账,,20.00,,交易成功,2,,,",
        ]);
        assert_eq!("88.88", statement.records[0][6]);
        assert_eq!("20.00", statement.records[1][6]);
        assert_eq!(2, statement.stats.kept);
    }

    #[test]
    fn drops_closed_transactions() {
        let statement = process(&[
            HEADER,
            "2024-01-05 10:00:00,日用百货,商店,,纸巾,支出,9.90,花呗,交易关闭,1,,,",
            "2024-01-05 11:00:00,日用百货,商店,,纸巾,支出,9.90,花呗,交易关闭,2,,,",
            "2024-01-05 12:00:00,日用百货,商店,,纸巾,支出,9.90,花呗,交易成功,3,,,",
        ]);
        assert_eq!(1, statement.records.len());
        assert_eq!(2, statement.stats.closed);
        assert_eq!(1, statement.stats.kept);
    }

    #[test]
    fn non_financial_is_checked_before_status() {
        let statement = process(&[
            HEADER,
            "2024-01-05 10:00:00,退款,商店,,纸巾,不计收支,9.90,花呗,交易关闭,1,,,",
        ]);
        assert_eq!(1, statement.stats.non_financial);
        assert_eq!(0, statement.stats.closed);
    }

    #[test]
    fn skips_malformed_rows() {
        let statement = process(&[
            HEADER,
            "2024-01-05 10:00:00,餐饮美食,某餐厅,,午饭,支出",
            "昨天,餐饮美食,某餐厅,,午饭,支出,1.00,余额,交易成功,1,,,",
            "------------------------------------------------------------------------------------",
        ]);
        assert!(statement.records.is_empty());
        assert_eq!(3, statement.stats.malformed);
    }

    #[test]
    fn rows_shorter_than_status_column_are_malformed() {
        let statement = process(&[
            HEADER,
            "2024-01-05 10:00:00,餐饮美食,某餐厅,,午饭,支出,1.00,余额",
        ]);
        assert_eq!(1, statement.stats.malformed);
    }

    #[test]
    fn skips_unparseable_amount() {
        let statement = process(&[
            HEADER,
            "2024-01-05 10:00:00,餐饮美食,某餐厅,,午饭,支出,n/a,余额,交易成功,1,,,",
        ]);
        assert!(statement.records.is_empty());
        assert_eq!(1, statement.stats.unparseable_amount);
        assert_eq!(0, statement.stats.kept);
    }

    #[test]
    fn quoted_cells_with_commas() {
        let statement = process(&[
            HEADER,
            "\"2024-03-01 09:30:00\",\"数码电器\",\"某店\",\"\",\"耳机, 蓝牙\",\"支出\",\"199.00\",\"信用卡\",\"交易成功\",\"1\",\"\",\"\",",
        ]);
        assert_eq!("耳机, 蓝牙", statement.records[0][4]);
        assert_eq!("-199.00", statement.records[0][6]);
    }

    #[test]
    fn header_is_passed_through() {
        let statement = process(&[HEADER]);
        assert_eq!(row(&HEADER.split(',').collect::<Vec<_>>()), statement.header);
        assert!(statement.records.is_empty());
    }
}
