mod plan;

use std::ffi::OsString;
use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::ProbeArgs;
use crate::error::AppResult;
use plan::{execute_plan, resolve_args};

pub(crate) fn run() -> AppResult<ExitCode> {
    let Some((args, matches)) = parse_args()? else {
        return Ok(ExitCode::SUCCESS);
    };
    let args = resolve_args(args, &matches)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(execute_plan(&args))
}

fn parse_args() -> AppResult<Option<(ProbeArgs, ArgMatches)>> {
    let mut cmd = ProbeArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = ProbeArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--")
}
