pub mod args;
pub mod cli;
pub mod decode;
pub mod error;
pub mod export;
pub mod import;
pub mod report;
