//! Application orchestrator.
//! Loads/merges settings, initializes logging, installs the signal handler,
//! validates the run configuration, walks the tree and prints a summary.

use anyhow::{Context, Result};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use bren::cli::Args;
use bren::config::{CONFIG_ENV, Settings, load_settings, validate_and_normalize};
use bren::output as out;
use bren::{BrenError, LogLevel, RunReport, Walker, default_config_path, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let settings = match load_settings() {
        Ok(s) => s,
        Err(e) => {
            out::print_error(&e.to_string());
            return Err(e.into());
        }
    };
    let settings: Option<&Settings> = settings.as_ref().map(|(_, s)| s);

    // CLI > settings file > defaults
    let log_level = args
        .effective_log_level()
        .or_else(|| settings.and_then(|s| s.log_level.clone()))
        .unwrap_or_default();
    let log_file = args
        .log_file
        .clone()
        .or_else(|| settings.and_then(|s| s.log_file.clone()));
    let root_given = args.resolved_path().is_some();
    let mut cfg = args.build_config(settings);

    let guard_opt = init_tracing(&log_level, log_file.as_deref(), args.json)
        .context("Failed to initialize logging")?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })?;
    }

    debug!(?args, "starting bren");

    let result = (|| -> Result<()> {
        if !root_given {
            return Err(report_config_error(BrenError::RootMissing).into());
        }
        validate_and_normalize(&mut cfg).map_err(report_config_error)?;

        let dry_run = cfg.dry_run;
        let report = Walker::new(cfg).run().map_err(|e| {
            error!(code = e.code(), error = %e, "run aborted");
            out::print_error(&e.to_string());
            e
        })?;

        print_summary(&report, dry_run, &log_level);
        if report.interrupted {
            let e = BrenError::Interrupted;
            error!(code = e.code(), kind = "interrupted", "run stopped by user");
            return Err(e.into());
        }
        Ok(())
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

/// Map a failed run to the process exit status.
/// Typed errors were already reported where they happened; anything else is printed here.
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<BrenError>() {
        Some(e) if e.is_config_error() => ExitCode::from(2),
        Some(BrenError::Interrupted) => ExitCode::from(130),
        Some(_) => ExitCode::FAILURE,
        None => {
            out::print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn report_config_error(e: BrenError) -> BrenError {
    error!(code = e.code(), error = %e, "invalid configuration");
    out::print_error(&e.to_string());
    e
}

fn print_config_location() {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}",
            std::path::Path::new(&explicit).display()
        ));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default bren settings path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A settings file exists at that location.");
            } else {
                out::print_info("No settings file exists there; built-in defaults apply.");
            }
        }
        None => out::print_error("Could not determine a default settings path"),
    }
}

fn print_summary(report: &RunReport, dry_run: bool, level: &LogLevel) {
    info!(
        renamed = report.renamed(),
        planned = report.planned(),
        skipped = report.skipped(),
        failed = report.failed(),
        "summary"
    );
    if *level == LogLevel::Quiet {
        return;
    }
    let msg = if dry_run {
        format!(
            "{} planned, {} skipped, {} failed",
            report.planned(),
            report.skipped(),
            report.failed()
        )
    } else {
        format!(
            "{} renamed, {} skipped, {} failed",
            report.renamed(),
            report.skipped(),
            report.failed()
        )
    };
    if report.failed() == 0 && !report.interrupted {
        out::print_success(&msg);
    } else {
        out::print_warn(&msg);
    }
}
