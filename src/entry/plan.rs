use std::process::ExitCode;

use chrono::{SecondsFormat, Utc};
use clap::ArgMatches;

use crate::args::ProbeArgs;
use crate::error::AppResult;
use crate::probe::{ProbeContext, ProbeKind, Reporter, Verdict, run_command};

/// Merges the config file into the parsed arguments.
pub(super) fn resolve_args(mut args: ProbeArgs, matches: &ArgMatches) -> AppResult<ProbeArgs> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, matches, &config)?;
    }
    Ok(args)
}

pub(super) async fn execute_plan(args: &ProbeArgs) -> AppResult<ExitCode> {
    let ctx = ProbeContext::from_args(args)?;
    let stdout = std::io::stdout();
    let mut out = Reporter::new(stdout.lock());
    out.line(format!(
        "apiprobe run at {} against {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ctx.client.base_url()
    ))?;

    let mut rng = rand::thread_rng();
    let results = run_command(&ctx, &args.command, &mut rng, &mut out).await?;

    let failed = failed_probes(&results);
    if failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!("Probes failed: {}", failed.join(", "));
        Ok(ExitCode::FAILURE)
    }
}

/// Probes that aborted or found an inconsistency; warnings do not count.
fn failed_probes(results: &[(ProbeKind, Verdict)]) -> Vec<&'static str> {
    results
        .iter()
        .filter(|(_, verdict)| verdict.is_failure())
        .map(|(kind, _)| kind.name())
        .collect()
}
