use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::decode;
use crate::error::PipelineError;
use crate::export;

mod alipay;
mod utils;
mod wechat;

pub use alipay::Alipay;
pub use wechat::Wechat;

/// Cells of one CSV line, in source order.
pub type Row = Vec<String>;

/// Why a data row was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer cells than the resolved columns need, or no leading date.
    Malformed,
    /// Alipay "不计收支".
    NonFinancial,
    /// Alipay "交易关闭".
    Closed,
    /// WeChat refunded or withdrawn transactions.
    ExcludedStatus,
    UnparseableAmount,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub non_financial: usize,
    pub closed: usize,
    pub excluded_status: usize,
    pub unparseable_amount: usize,
    pub malformed: usize,
}

impl FilterStats {
    fn record_skip(&mut self, reason: SkipReason) {
        let counter = match reason {
            SkipReason::Malformed => &mut self.malformed,
            SkipReason::NonFinancial => &mut self.non_financial,
            SkipReason::Closed => &mut self.closed,
            SkipReason::ExcludedStatus => &mut self.excluded_status,
            SkipReason::UnparseableAmount => &mut self.unparseable_amount,
        };
        *counter += 1;
    }
}

/// The cleaned bill: the provider's header row and the rewritten transaction rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub header: Row,
    pub records: Vec<Row>,
    pub stats: FilterStats,
}

/// A provider export layout.
pub trait BillFormat {
    type Columns: std::fmt::Debug;

    /// Number of provider metadata lines before the header row.
    const PREAMBLE_LINES: usize;

    fn resolve_columns(header: &[String]) -> Self::Columns;

    /// Rewrites one data row, or says why it is dropped.
    fn process_row(columns: &Self::Columns, row: Row) -> Result<Row, SkipReason>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    /// Alipay (支付宝)
    Alipay,
    /// WeChat Pay (微信支付)
    #[value(alias = "wechat")]
    Weixin,
}

impl Provider {
    pub fn preamble_lines(self) -> usize {
        match self {
            Provider::Alipay => Alipay::PREAMBLE_LINES,
            Provider::Weixin => Wechat::PREAMBLE_LINES,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Alipay => "Alipay",
            Provider::Weixin => "WeChat Pay",
        }
    }
}

/// Where a pipeline reads its bill from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    /// Raw bytes in an unknown encoding, e.g. piped standard input.
    Bytes(Vec<u8>),
    /// Already decoded lines.
    Lines(Vec<String>),
}

impl Source {
    fn into_lines(self) -> Result<Vec<String>, PipelineError> {
        match self {
            Source::File(path) => {
                let bytes = std::fs::read(&path)?;
                Ok(decode::decode(&bytes)?.lines())
            }
            Source::Bytes(bytes) => Ok(decode::decode(&bytes)?.lines()),
            Source::Lines(lines) => Ok(lines),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipeline {
    provider: Provider,
    preamble_lines: usize,
}

impl Pipeline {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            preamble_lines: provider.preamble_lines(),
        }
    }

    pub fn with_preamble_lines(self, preamble_lines: usize) -> Self {
        Self {
            preamble_lines,
            ..self
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Cleans the bill and returns the result. When `output` is given, the
    /// result is also written there.
    ///
    /// Any error is logged and turned into `None`.
    pub fn run(&self, source: Source, output: Option<&Path>) -> Option<Statement> {
        match self.try_run(source, output) {
            Ok(statement) => Some(statement),
            Err(err) => {
                log::error!(
                    "Failed to process {} bill: {}",
                    self.provider.display_name(),
                    err
                );
                None
            }
        }
    }

    fn try_run(&self, source: Source, output: Option<&Path>) -> Result<Statement, PipelineError> {
        let lines = source.into_lines()?;
        let statement = self.process(&lines)?;
        if let Some(output) = output {
            export::write_statement(output, &statement)?;
        }
        Ok(statement)
    }

    pub fn process(&self, lines: &[String]) -> Result<Statement, PipelineError> {
        match self.provider {
            Provider::Alipay => process_lines::<Alipay>(lines, self.preamble_lines),
            Provider::Weixin => process_lines::<Wechat>(lines, self.preamble_lines),
        }
    }
}

fn process_lines<F: BillFormat>(
    lines: &[String],
    preamble_lines: usize,
) -> Result<Statement, PipelineError> {
    let body = join_lines(lines.iter().skip(preamble_lines));
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut records = reader.records();

    let header: Row = match records.next() {
        Some(header) => header?.iter().map(str::to_owned).collect(),
        None => return Err(PipelineError::MissingHeader { preamble_lines }),
    };
    let columns = F::resolve_columns(&header);
    log::debug!("Resolved columns: {:?}", columns);

    let mut stats = FilterStats::default();
    let mut kept = Vec::new();
    for record in records {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row: Row = record.iter().map(str::to_owned).collect();
        match F::process_row(&columns, row) {
            Ok(row) => {
                kept.push(row);
                stats.kept += 1;
            }
            Err(reason) => {
                log::debug!(
                    "Skipping line {} after the preamble: {:?}",
                    line,
                    reason
                );
                stats.record_skip(reason);
            }
        }
    }

    Ok(Statement {
        header,
        records: kept,
        stats,
    })
}

/// Joins lines back into one text, terminating lines that lack a line break.
fn join_lines<'a>(lines: impl Iterator<Item = &'a String>) -> String {
    let mut body = String::new();
    for line in lines {
        body.push_str(line);
        if !line.ends_with(['\n', '\r']) {
            body.push('\n');
        }
    }
    body
}

/// Replaces the date and amount cells of a kept row.
fn rewrite_row(
    mut row: Row,
    date_column: usize,
    date: String,
    amount_column: usize,
    amount: String,
) -> Row {
    row[date_column] = date;
    row[amount_column] = amount;
    row
}
