//! Implementation of the `tracker validate` command.
//!
//! Responsibility: load the bundle and preheat snapshot, apply CLI and config
//! overrides, run the validation service and render the report. No
//! validation rules live here.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use tracker_adapters::{
    CaptureScopeAccessManager, FixedClock, InMemoryPreheat, SystemClock, load_bundle,
    load_preheat,
};
use tracker_core::{
    application::{Clock, PreheatContext, TrackerValidationService},
    domain::{EntityKind, ImportStrategy, TrackerBundle, TrackerValidationReport, ValidationMode},
    error::TrackerError,
};

use crate::{
    cli::{OutputFormat, ReportFormat, ValidateArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `tracker validate`.
///
/// 1. Load bundle and snapshot
/// 2. Resolve mode, strategy and identifier schemes (flag > config > file)
/// 3. Validate
/// 4. Render, then turn a non-empty report into exit status 5
#[instrument(skip_all, fields(bundle = %args.bundle.display()))]
pub fn execute(
    args: ValidateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let format = resolve_format(&args, &global, &config)?;

    let mut bundle = load_bundle(&args.bundle)?;
    apply_overrides(&mut bundle, &args, &config);
    let mut preheat = build_preheat(&args, &config)?;

    debug!(
        mode = %bundle.validation_mode,
        strategy = %bundle.import_strategy,
        identifiers = ?preheat.identifiers(),
        "Inputs resolved"
    );

    let clock: Box<dyn Clock> = match args.now {
        Some(now) => Box::new(FixedClock::new(now)),
        None => Box::new(SystemClock),
    };
    let service = TrackerValidationService::builder()
        .access_manager(Arc::new(CaptureScopeAccessManager::new()))
        .clock(clock)
        .build()?;

    let report = service.validate(&mut bundle, &mut preheat)?;
    info!(run_id = %report.run_id, errors = report.len(), "Report ready");

    render(&report, &bundle, format, &output)?;

    if report.has_errors() {
        return Err(CliError::ValidationFailed {
            errors: report.len(),
            aborted: report.aborted,
        });
    }
    Ok(())
}

fn resolve_format(
    args: &ValidateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
) -> CliResult<ReportFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    if global.output_format == OutputFormat::Json {
        return Ok(ReportFormat::Json);
    }
    config
        .output
        .format
        .parse()
        .map_err(|message: String| CliError::ConfigError {
            message: format!("output.format: {message}"),
            source: None,
        })
}

fn apply_overrides(bundle: &mut TrackerBundle, args: &ValidateArgs, config: &AppConfig) {
    if let Some(mode) = args.mode.map(ValidationMode::from).or(config.validation.mode) {
        bundle.validation_mode = mode;
    }
    if let Some(strategy) = args
        .strategy
        .map(ImportStrategy::from)
        .or(config.validation.import_strategy)
    {
        bundle.import_strategy = strategy;
    }
}

fn build_preheat(args: &ValidateArgs, config: &AppConfig) -> CliResult<InMemoryPreheat> {
    let snapshot = load_preheat(&args.preheat)?;
    let mut identifiers = config.identifiers.apply(snapshot.identifiers);
    if let Some(scheme) = args.program_scheme {
        identifiers.program = scheme.into();
    }
    if let Some(scheme) = args.org_unit_scheme {
        identifiers.org_unit = scheme.into();
    }
    Ok(snapshot.with_identifiers(identifiers).into_preheat())
}

fn render(
    report: &TrackerValidationReport,
    bundle: &TrackerBundle,
    format: ReportFormat,
    output: &OutputManager,
) -> CliResult<()> {
    match format {
        ReportFormat::Json => {
            let body = serde_json::to_string_pretty(report).map_err(|e| TrackerError::Internal {
                message: format!("failed to serialise report: {e}"),
            })?;
            output.document(&body)?;
        }

        ReportFormat::Codes => {
            for entry in &report.error_reports {
                output.document(&format!("{}\t{}", entry.error_code, entry.uid))?;
            }
        }

        ReportFormat::Table => {
            output.header(&format!(
                "Validated {} tracked entities, {} enrollments, {} events ({} mode)",
                bundle.count(EntityKind::TrackedEntity),
                bundle.count(EntityKind::Enrollment),
                bundle.count(EntityKind::Event),
                report.mode,
            ))?;

            for entry in &report.error_reports {
                let parent = entry
                    .main_id
                    .as_deref()
                    .map(|id| format!(" in {id}"))
                    .unwrap_or_default();
                output.print(&format!(
                    "  {}  {} {}{}  [{} #{}]",
                    output.code(entry.error_code.as_str()),
                    entry.tracker_type,
                    entry.uid,
                    parent,
                    entry.validator,
                    entry.line_number,
                ))?;
                output.print(&format!("         {}", entry.message))?;
            }

            if report.is_empty() {
                output.success("No validation errors")?;
            } else if report.aborted {
                output.warning("Stopped at the first error (fail-fast)")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ModeArg, StrategyArg};
    use std::path::PathBuf;

    fn args() -> ValidateArgs {
        ValidateArgs {
            bundle: PathBuf::from("bundle.json"),
            preheat: PathBuf::from("preheat.json"),
            mode: None,
            strategy: None,
            program_scheme: None,
            org_unit_scheme: None,
            now: None,
            format: None,
        }
    }

    fn global(output_format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            log_file: None,
            output_format,
        }
    }

    #[test]
    fn flag_beats_config_beats_bundle() {
        let mut config = AppConfig::default();
        config.validation.mode = Some(ValidationMode::FailFast);
        config.validation.import_strategy = Some(ImportStrategy::Update);
        let mut bundle = TrackerBundle::default();

        let mut flags = args();
        flags.strategy = Some(StrategyArg::Create);
        apply_overrides(&mut bundle, &flags, &config);

        assert_eq!(bundle.validation_mode, ValidationMode::FailFast);
        assert_eq!(bundle.import_strategy, ImportStrategy::Create);

        flags.mode = Some(ModeArg::Full);
        apply_overrides(&mut bundle, &flags, &config);
        assert_eq!(bundle.validation_mode, ValidationMode::Full);
    }

    #[test]
    fn bundle_settings_survive_empty_config() {
        let mut bundle = TrackerBundle::default().with_validation_mode(ValidationMode::FailFast);

        apply_overrides(&mut bundle, &args(), &AppConfig::default());

        assert_eq!(bundle.validation_mode, ValidationMode::FailFast);
    }

    #[test]
    fn report_format_resolution() {
        let config = AppConfig::default();
        assert_eq!(
            resolve_format(&args(), &global(OutputFormat::Auto), &config).unwrap(),
            ReportFormat::Table
        );
        assert_eq!(
            resolve_format(&args(), &global(OutputFormat::Json), &config).unwrap(),
            ReportFormat::Json
        );

        let mut bad = AppConfig::default();
        bad.output.format = "yaml".into();
        assert!(matches!(
            resolve_format(&args(), &global(OutputFormat::Auto), &bad),
            Err(CliError::ConfigError { .. })
        ));
    }
}
