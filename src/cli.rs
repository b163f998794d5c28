use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "collector-check")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Check connectivity to regional collector endpoints")]
pub struct Cli {
    /// Write a default config file and exit
    #[arg(long = "init")]
    pub init: bool,

    /// Print the effective configuration and exit
    #[arg(long = "print")]
    pub print: bool,

    /// Validate the configuration and exit
    #[arg(long = "check")]
    pub check: bool,

    /// List available tasks and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Force tasks to run regardless of gating (comma separated identifiers)
    #[arg(short = 't', long = "tasks", value_delimiter = ',')]
    pub tasks: Vec<String>,

    /// Region code the installation reports to (repeatable)
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Proxy URL for outbound probes
    #[arg(long = "proxy")]
    pub proxy: Option<String>,

    /// License key used to infer the region
    #[arg(long = "license-key")]
    pub license_key: Option<String>,

    /// Config file path (default: ~/.collector-check/config.toml)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
