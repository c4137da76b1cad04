use clap::{CommandFactory, Parser};
use std::time::Duration;

use super::*;
use crate::error::AppResult;

#[test]
fn cli_definition_is_consistent() {
    StressArgs::command().debug_assert();
}

#[test]
fn defaults_match_documented_values() -> AppResult<()> {
    let args = StressArgs::try_parse_from(["sshammer", "--target", "example.com"])?;
    assert_eq!(args.port, 22);
    assert_eq!(args.user, "root");
    assert_eq!(args.count.get(), 100);
    assert!((args.rate - 10.0).abs() < f64::EPSILON);
    assert!(args.concurrency.is_none());
    assert_eq!(args.timeout, Duration::from_secs(10));
    assert_eq!(args.mode, ProbeMode::Sftp);
    assert_eq!(args.path, "/");
    assert!(args.hold.is_none());
    assert!(!args.graph);
    Ok(())
}

#[test]
fn mode_parses_case_insensitively() -> AppResult<()> {
    let args = StressArgs::try_parse_from(["sshammer", "-t", "host", "--mode", "SSH"])?;
    assert_eq!(args.mode, ProbeMode::Ssh);
    Ok(())
}

#[test]
fn count_rejects_zero() {
    let result = StressArgs::try_parse_from(["sshammer", "-t", "host", "--count", "0"]);
    assert!(result.is_err());
}

#[test]
fn rate_rejects_zero_negative_and_garbage() {
    for value in ["0", "-1", "nan", "inf", "fast"] {
        assert!(parse_rate(value).is_err(), "rate '{}' should be rejected", value);
    }
}

#[test]
fn rate_accepts_fractional_values() -> AppResult<()> {
    let rate = parse_rate("2.5")?;
    assert!((rate - 2.5).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn duration_parser_accepts_units() -> AppResult<()> {
    assert_eq!(parse_duration_arg("250ms")?, Duration::from_millis(250));
    assert_eq!(parse_duration_arg("30")?, Duration::from_secs(30));
    assert_eq!(parse_duration_arg("30s")?, Duration::from_secs(30));
    assert_eq!(parse_duration_arg("2m")?, Duration::from_secs(120));
    assert_eq!(parse_duration_arg("1h")?, Duration::from_secs(3600));
    Ok(())
}

#[test]
fn duration_parser_rejects_bad_input() {
    for value in ["", "ms", "10d", "-5s", "0s"] {
        assert!(
            parse_duration_arg(value).is_err(),
            "duration '{}' should be rejected",
            value
        );
    }
}

#[test]
fn positive_u64_round_trips() -> AppResult<()> {
    let value: PositiveU64 = "42".parse()?;
    assert_eq!(value.get(), 42);
    assert!("0".parse::<PositiveU64>().is_err());
    assert!("-3".parse::<PositiveU64>().is_err());
    Ok(())
}
