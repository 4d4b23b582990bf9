use clap::Parser;
use std::path::PathBuf;

/// runlog-stats: serves success/failure statistics for test-run log files.
#[derive(Parser, Debug, Clone)]
#[command(name = "runlog-stats")]
pub struct CliArgs {
    /// Directory containing the line-delimited test-run logs
    #[arg(short = 'd', long = "log-dir", default_value = "logs")]
    pub log_dir: PathBuf,

    /// HTTP port
    #[arg(long = "port", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long = "bind", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// File suffix that marks a log file
    #[arg(long = "suffix", default_value = LOG_FILE_SUFFIX)]
    pub suffix: String,

    /// Page size used when a listing request gives none
    #[arg(long = "default-limit", default_value_t = DEFAULT_PAGE_LIMIT)]
    pub default_limit: usize,

    /// JSON file with the ordered (prefix, network) table
    #[arg(long = "networks-file")]
    pub networks_file: Option<PathBuf>,

    /// Also write service logs to this file
    #[arg(short = 'l', long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub log_dir: PathBuf,
    pub port: u16,
    pub bind: String,
    pub suffix: String,
    pub default_limit: usize,
    pub networks_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

// Server constants
pub const DEFAULT_PORT: u16 = 3080;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

// Discovery constants
pub const LOG_FILE_SUFFIX: &str = ".log";
pub const ROLLUP_READ_CONCURRENCY: usize = 8;

// Listing constants
pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_LIMIT: usize = 7;
pub const MAX_PAGE_LIMIT: usize = 500;
pub const ALL_NETWORKS: &str = "all";

// Record constants
pub const TEST_RESULT_TYPE: &str = "test_result";
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

// Network table: (prefix, network), first match wins
pub const DEFAULT_NETWORKS: &[(&str, &str)] = &[
    ("datil-dev", "datil-dev"),
    ("datil-test", "datil-test"),
];
pub const FALLBACK_NETWORK: &str = "datil";

impl ServiceConfig {
    pub fn from_args(args: CliArgs) -> Self {
        let default_limit = args.default_limit.clamp(1, MAX_PAGE_LIMIT);

        ServiceConfig {
            log_dir: args.log_dir,
            port: args.port,
            bind: args.bind,
            suffix: args.suffix,
            default_limit,
            networks_file: args.networks_file,
            log_file: args.log_file,
        }
    }

    /// Socket address string for the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            log_dir: PathBuf::from("logs"),
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND_ADDR.to_string(),
            suffix: LOG_FILE_SUFFIX.to_string(),
            default_limit: DEFAULT_PAGE_LIMIT,
            networks_file: None,
            log_file: None,
        }
    }
}
