mod cli;
mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::StressArgs;
pub use parsers::{parse_duration_arg, parse_rate};
pub use types::{PositiveU64, PositiveUsize, ProbeMode};
