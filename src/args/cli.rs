use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_positive_u64, parse_positive_usize, parse_rate};
use super::types::{PositiveU64, PositiveUsize, ProbeMode};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async SSH/SFTP connection load tester - rate-paced authentication cycles, bounded concurrency, per-attempt outcome metrics, and chart exports for capacity planning."
)]
pub struct StressArgs {
    /// Target SSH server address
    #[arg(long, short, env = "SSHAMMER_TARGET")]
    pub target: Option<String>,

    /// Target SSH server port
    #[arg(long, short, default_value = "22")]
    pub port: u16,

    /// Username to authenticate as
    #[arg(long, short, default_value = "root", env = "SSHAMMER_USER")]
    pub user: String,

    /// Password used to authenticate the target user
    #[arg(long, short = 'P', env = "SSHAMMER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Private key used to authenticate the target user (defaults to key
    /// discovery under ~/.ssh when no password is given)
    #[arg(long, short)]
    pub key: Option<String>,

    /// Total number of connection attempts in the campaign
    #[arg(long, short, default_value = "100", value_parser = parse_positive_u64)]
    pub count: PositiveU64,

    /// Target attempt-start rate (attempts per second)
    #[arg(long, short, default_value = "10", value_parser = parse_rate)]
    pub rate: f64,

    /// Maximum in-flight attempts (derived from the rate when unset)
    #[arg(long, value_parser = parse_positive_usize)]
    pub concurrency: Option<PositiveUsize>,

    /// Per-attempt timeout (supports ms/s/m/h)
    #[arg(long, default_value = "10s", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// What to probe after authentication
    #[arg(long, short, default_value = "sftp", ignore_case = true)]
    pub mode: ProbeMode,

    /// Directory to list when probing in sftp mode
    #[arg(long, default_value = "/")]
    pub path: String,

    /// Keep each connection open for this long before disconnecting
    /// (supports ms/s/m/h)
    #[arg(long, value_parser = parse_duration_arg)]
    pub hold: Option<Duration>,

    /// Write the result set to a file
    #[arg(long, short)]
    pub output: Option<String>,

    /// Load a saved result set and render it instead of running a campaign
    #[arg(long)]
    pub load: Option<String>,

    /// Render charts after the campaign (or after --load)
    #[arg(long)]
    pub graph: bool,

    /// Directory for rendered charts
    #[arg(long = "charts-path", default_value = "./charts")]
    pub charts_path: String,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}
