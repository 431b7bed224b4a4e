use anyhow::{Context, Result};
use tracing::info;

use hrprep_cli::pipeline::{RunRequest, RunResult, run};
use hrprep_model::{CategoryPolicy, ProcessingOptions, reference_classification};

use crate::cli::{ClassesArgs, RunArgs};
use crate::summary::print_classification;

fn processing_options(args: &RunArgs) -> ProcessingOptions {
    let policy = if args.strict {
        CategoryPolicy::Strict
    } else {
        CategoryPolicy::Permissive
    };
    ProcessingOptions::new()
        .with_category_policy(policy)
        .with_warn_on_unranked(!args.no_unranked_warnings)
}

pub fn run_file(args: &RunArgs) -> Result<RunResult> {
    let options = processing_options(args);
    info!(
        input = %args.input.display(),
        policy = ?options.category_policy,
        "starting run"
    );
    let request = RunRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        with_index: args.with_index,
        report_json: args.report_json.clone(),
        options,
    };
    run(&request)
}

pub fn run_classes(args: &ClassesArgs) -> Result<()> {
    let classification = reference_classification().context("build reference classification")?;
    if args.json {
        let json = serde_json::to_string_pretty(&classification)
            .context("serialize classification")?;
        println!("{json}");
    } else {
        print_classification(&classification);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn run_args(argv: &[&str]) -> RunArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Run(args) => args,
            Command::Classes(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_options_from_flags() {
        let options = processing_options(&run_args(&["hrprep", "run", "jobs.csv"]));
        assert_eq!(options.category_policy, CategoryPolicy::Permissive);
        assert!(options.warn_on_unranked);

        let options = processing_options(&run_args(&["hrprep", "run", "jobs.csv", "--strict"]));
        assert_eq!(options.category_policy, CategoryPolicy::Strict);

        let options = processing_options(&run_args(&[
            "hrprep",
            "run",
            "jobs.csv",
            "--no-unranked-warnings",
        ]));
        assert!(!options.warn_on_unranked);
    }

    #[test]
    fn test_quiet_warnings_conflict_with_strict() {
        let parsed = Cli::try_parse_from([
            "hrprep",
            "run",
            "jobs.csv",
            "--strict",
            "--no-unranked-warnings",
        ]);
        assert!(parsed.is_err());
    }
}
