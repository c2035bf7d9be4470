use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = bill_cleaner::args::parse();
    bill_cleaner::cli::main(args)
}
