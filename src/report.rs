use std::path::Path;

use console::style;

use crate::import::{FilterStats, Provider};

pub trait LineWriter {
    fn write_line(&self, line: &str);
}

#[derive(Clone, Copy)]
pub struct StdoutLineWriter;
impl LineWriter for StdoutLineWriter {
    fn write_line(&self, line: &str) {
        println!("{}", line);
    }
}

/// Prints what was written and how many rows each filter dropped.
pub fn print_summary(
    writer: &impl LineWriter,
    provider: Provider,
    output: &Path,
    stats: &FilterStats,
) {
    writer.write_line(&format!(
        "{} {}",
        style(format!("Processed {} bill, wrote", provider.display_name())).bold(),
        style(output.display()).cyan()
    ));
    item(writer, stats.kept, "transactions kept");
    match provider {
        Provider::Alipay => {
            item(writer, stats.non_financial, "rows not counted as income/expense dropped");
            item(writer, stats.closed, "closed transactions dropped");
        }
        Provider::Weixin => {
            item(writer, stats.excluded_status, "refunded or withdrawn rows dropped");
        }
    }
    if stats.unparseable_amount > 0 {
        warning(writer, stats.unparseable_amount, "rows with unparseable amounts skipped");
    }
    if stats.malformed > 0 {
        warning(writer, stats.malformed, "malformed rows skipped");
    }
}

fn item(writer: &impl LineWriter, count: usize, what: &str) {
    writer.write_line(&format!("  • {} {}", style(count).bold(), what));
}

fn warning(writer: &impl LineWriter, count: usize, what: &str) {
    writer.write_line(&format!(
        "  • {} {}",
        style(count).bold().yellow(),
        style(what).yellow()
    ));
}
