use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CrawlError {
    #[error("KEGG request failed: {0}")]
    Http(String),

    #[error("KEGG returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid request header: {0}")]
    InvalidHeader(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid configuration: {0}")]
    #[diagnostic(help("check kegg-crawl.json or the command line flags"))]
    InvalidConfig(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("failed to write CSV output: {0}")]
    Csv(String),
}
