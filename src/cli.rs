use std::io::{IsTerminal as _, Read as _};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use thiserror::Error;

use crate::args::Args;
use crate::import::{Pipeline, Provider, Source};
use crate::report::{self, LineWriter, StdoutLineWriter};

const OUTPUT_SUFFIX: &str = "_处理后.csv";

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "No input file given. Pass the bill as an argument, use -i, or pipe it in.

Examples:
  bill-cleaner 支付宝交易明细.csv
  bill-cleaner -i 支付宝交易明细.csv
  bill-cleaner -t weixin < 微信支付账单.csv"
)]
pub struct UsageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

pub fn main(args: Args) -> Result<()> {
    run(args, std::io::stdin().is_terminal(), &StdoutLineWriter)
}

fn run(args: Args, stdin_is_terminal: bool, writer: &impl LineWriter) -> Result<()> {
    let input = resolve_input(&args, stdin_is_terminal)?;
    let output = resolve_output_path(args.output.as_deref(), &input, args.bill_type);
    let pipeline = match args.skip_lines {
        Some(skip_lines) => Pipeline::new(args.bill_type).with_preamble_lines(skip_lines),
        None => Pipeline::new(args.bill_type),
    };

    let source = match input {
        InputSource::File(path) => {
            log::info!("Reading from file {}", path.display());
            Source::File(path)
        }
        InputSource::Stdin => {
            log::info!("Reading from standard input");
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read standard input")?;
            Source::Bytes(bytes)
        }
    };

    let statement = pipeline.run(source, Some(&output)).ok_or_else(|| {
        anyhow!(
            "Failed to process {} bill",
            pipeline.provider().display_name()
        )
    })?;
    report::print_summary(writer, pipeline.provider(), &output, &statement.stats);
    Ok(())
}

/// The positional path wins over `--input`; without either, piped stdin is used.
pub fn resolve_input(args: &Args, stdin_is_terminal: bool) -> Result<InputSource, UsageError> {
    if let Some(path) = args.input_file.as_ref().or(args.input.as_ref()) {
        Ok(InputSource::File(path.clone()))
    } else if !stdin_is_terminal {
        Ok(InputSource::Stdin)
    } else {
        Err(UsageError)
    }
}

pub fn resolve_output_path(
    explicit: Option<&Path>,
    input: &InputSource,
    provider: Provider,
) -> PathBuf {
    if let Some(explicit) = explicit {
        return explicit.to_path_buf();
    }
    match input {
        InputSource::File(path) => match path.file_stem() {
            Some(stem) => {
                let mut filename = stem.to_os_string();
                filename.push(OUTPUT_SUFFIX);
                path.with_file_name(filename)
            }
            None => PathBuf::from(default_output_name(provider)),
        },
        InputSource::Stdin => PathBuf::from(default_output_name(provider)),
    }
}

fn default_output_name(provider: Provider) -> &'static str {
    match provider {
        Provider::Alipay => "支付宝交易明细_处理后.csv",
        Provider::Weixin => "微信支付账单_处理后.csv",
    }
}
