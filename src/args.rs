use std::path::PathBuf;

use clap::Parser;

use crate::import::Provider;

/// Clean up Alipay or WeChat Pay bill exports (CSV) for bookkeeping.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to the exported bill
    pub input_file: Option<PathBuf>,

    /// Bill type
    #[clap(short = 't', long = "type", value_enum, default_value_t = Provider::Alipay)]
    pub bill_type: Provider,

    /// Path to the exported bill (same as the positional argument)
    #[clap(short, long)]
    pub input: Option<PathBuf>,

    /// Path of the cleaned CSV file [default: <input>_处理后.csv]
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Number of metadata lines before the header row [default: 24 for alipay, 16 for weixin]
    #[clap(long)]
    pub skip_lines: Option<usize>,
}

pub fn parse() -> Args {
    Args::parse()
}
