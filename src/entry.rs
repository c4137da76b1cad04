use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::args::StressArgs;
use crate::auth::{Credential, resolve_credential};
use crate::campaign::{CampaignConfig, Endpoint, derived_concurrency, run_campaign};
use crate::charts;
use crate::error::{AppError, AppResult, ValidationError};
use crate::report;
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};
use crate::ssh::{Connector, SshConnector};
use crate::summary;

struct CampaignPlan {
    config: CampaignConfig,
    credential: Credential,
    output: Option<String>,
    graph: bool,
    charts_path: String,
}

enum RunPlan {
    /// Render a previously saved result set.
    Load {
        path: String,
        graph: bool,
        charts_path: String,
    },
    /// Run a live campaign.
    Campaign(Box<CampaignPlan>),
}

pub fn run() -> AppResult<()> {
    let args = StressArgs::parse();
    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: StressArgs) -> AppResult<()> {
    let plan = build_plan(args)?;
    execute_plan(plan).await
}

fn build_plan(args: StressArgs) -> AppResult<RunPlan> {
    if let Some(path) = args.load.clone() {
        if args.output.is_some() {
            return Err(AppError::validation(ValidationError::LoadWithOutput));
        }
        if args.target.is_some() {
            return Err(AppError::validation(ValidationError::LoadWithTarget));
        }
        return Ok(RunPlan::Load {
            path,
            graph: args.graph,
            charts_path: args.charts_path,
        });
    }

    let target = args
        .target
        .clone()
        .ok_or_else(|| AppError::validation(ValidationError::MissingTarget))?;
    let credential = resolve_credential(&args)?;

    let concurrency = args
        .concurrency
        .map_or_else(|| derived_concurrency(args.rate), |cap| cap.get());
    let config = CampaignConfig {
        endpoint: Endpoint::new(target, args.port),
        user: args.user.clone(),
        count: args.count.get(),
        rate: args.rate,
        concurrency,
        attempt_timeout: args.timeout,
        mode: args.mode,
        sftp_path: args.path.clone(),
        hold: args.hold,
    };
    config.validate().map_err(AppError::config)?;

    Ok(RunPlan::Campaign(Box::new(CampaignPlan {
        config,
        credential,
        output: args.output,
        graph: args.graph,
        charts_path: args.charts_path,
    })))
}

async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::Load {
            path,
            graph,
            charts_path,
        } => {
            let result = report::load_result_set(&path).await?;
            summary::print_summary(&result);
            if graph {
                charts::render_charts(&result, &charts_path).await?;
            }
            Ok(())
        }
        RunPlan::Campaign(plan) => run_campaign_plan(*plan).await,
    }
}

async fn run_campaign_plan(plan: CampaignPlan) -> AppResult<()> {
    let connector: Arc<dyn Connector> = Arc::new(SshConnector::new(
        plan.config.endpoint.clone(),
        plan.credential,
        plan.config.mode,
        plan.config.sftp_path.clone(),
        plan.config.hold,
    ));

    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let result = run_campaign(plan.config, connector, &shutdown_tx).await?;

    // Wake the signal task so it exits cleanly once the campaign is over.
    drop(shutdown_tx.send(()));
    drop(signal_handle.await);

    summary::print_summary(&result);
    if let Some(output) = plan.output.as_deref() {
        report::save_result_set(output, &result).await?;
        info!("Results written to {}", output);
    }
    if plan.graph {
        charts::render_charts(&result, &plan.charts_path).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> StressArgs {
        match StressArgs::try_parse_from(argv) {
            Ok(args) => args,
            Err(err) => panic!("failed to parse test argv: {}", err),
        }
    }

    #[test]
    fn load_flag_builds_a_load_plan() -> AppResult<()> {
        let plan = build_plan(parse(&["sshammer", "--load", "results.json", "--graph"]))?;
        match plan {
            RunPlan::Load { path, graph, .. } => {
                assert_eq!(path, "results.json");
                assert!(graph);
            }
            RunPlan::Campaign(_) => panic!("expected a load plan"),
        }
        Ok(())
    }

    #[test]
    fn load_conflicts_with_output() {
        let result = build_plan(parse(&[
            "sshammer",
            "--load",
            "results.json",
            "--output",
            "out.json",
        ]));
        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::LoadWithOutput))
        ));
    }

    #[test]
    fn missing_target_is_rejected() {
        let result = build_plan(parse(&["sshammer", "--password", "hunter2"]));
        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::MissingTarget))
        ));
    }

    #[test]
    fn campaign_plan_derives_concurrency_from_rate() -> AppResult<()> {
        let plan = build_plan(parse(&[
            "sshammer",
            "--target",
            "example.com",
            "--password",
            "hunter2",
            "--rate",
            "50",
        ]))?;
        match plan {
            RunPlan::Campaign(plan) => {
                assert_eq!(plan.config.concurrency, 500);
                assert_eq!(plan.config.count, 100);
            }
            RunPlan::Load { .. } => panic!("expected a campaign plan"),
        }
        Ok(())
    }

    #[test]
    fn explicit_concurrency_wins_over_derivation() -> AppResult<()> {
        let plan = build_plan(parse(&[
            "sshammer",
            "--target",
            "example.com",
            "--password",
            "hunter2",
            "--concurrency",
            "8",
        ]))?;
        match plan {
            RunPlan::Campaign(plan) => assert_eq!(plan.config.concurrency, 8),
            RunPlan::Load { .. } => panic!("expected a campaign plan"),
        }
        Ok(())
    }
}
