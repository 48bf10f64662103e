//! Validation Service - the pipeline entry point.
//!
//! One call to [`TrackerValidationService::validate`]:
//! 1. Samples the clock and creates a fresh reporter in the bundle's mode
//! 2. Runs every hook over the bundle
//! 3. Turns a fail-fast halt into the final (partial) report
//!
//! Precondition faults surface as `Err`; they are never folded into a report.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        context::ValidationContext,
        hooks::ValidationHook,
        ports::{AccessManager, Clock, PreheatContext},
        reporter::{ValidationErrorReporter, ValidationHalt},
        runner::{BundleEntities, HookRunner},
    },
    domain::{EntityKind, TrackerBundle, TrackerValidationReport},
    error::{TrackerError, TrackerResult},
};

/// Runs the hook pipeline over import bundles.
///
/// Holds no per-run state: each call builds its own reporter, so one
/// service can validate bundles from several threads as long as each run
/// gets its own preheat.
pub struct TrackerValidationService {
    runner: HookRunner,
    clock: Box<dyn Clock>,
}

impl TrackerValidationService {
    pub fn new(runner: HookRunner, clock: Box<dyn Clock>) -> Self {
        Self { runner, clock }
    }

    pub fn builder() -> TrackerValidationServiceBuilder {
        TrackerValidationServiceBuilder::default()
    }

    pub fn runner(&self) -> &HookRunner {
        &self.runner
    }

    /// Validate `bundle` against `preheat`.
    ///
    /// An empty report means the bundle may be persisted. The bundle and
    /// preheat may be modified by program inference.
    #[instrument(
        skip_all,
        fields(
            mode = %bundle.validation_mode,
            strategy = %bundle.import_strategy,
            tracked_entities = bundle.count(EntityKind::TrackedEntity),
            enrollments = bundle.count(EntityKind::Enrollment),
            events = bundle.count(EntityKind::Event),
        )
    )]
    pub fn validate(
        &self,
        bundle: &mut TrackerBundle,
        preheat: &mut dyn PreheatContext,
    ) -> TrackerResult<TrackerValidationReport> {
        let mode = bundle.validation_mode;
        let now = self.clock.now();
        let mut reporter = ValidationErrorReporter::new(mode);

        let TrackerBundle {
            user,
            import_strategy,
            tracked_entities,
            enrollments,
            events,
            ..
        } = bundle;
        let mut ctx = ValidationContext::new(user.as_ref(), *import_strategy, now, preheat);
        let entities = BundleEntities {
            tracked_entities,
            enrollments,
            events,
        };

        let report = match self.runner.run(&mut reporter, &mut ctx, entities) {
            Ok(()) => TrackerValidationReport::new(mode, false, reporter.into_reports()),
            Err(ValidationHalt::FailFast { reports }) => {
                warn!(
                    validator = reports.last().map(|r| r.validator.as_str()),
                    "Fail-fast: aborting validation at first error"
                );
                TrackerValidationReport::new(mode, true, reports)
            }
            Err(ValidationHalt::Fault(fault)) => {
                warn!(%fault, "Validation could not run");
                return Err(TrackerError::Fault(fault));
            }
        };

        info!(
            run_id = %report.run_id,
            errors = report.len(),
            aborted = report.aborted,
            "Validation finished"
        );
        Ok(report)
    }
}

/// Assembles a [`TrackerValidationService`].
///
/// A clock is required. Without explicit hooks the default pipeline is
/// used, which needs an access manager.
#[derive(Default)]
pub struct TrackerValidationServiceBuilder {
    access: Option<Arc<dyn AccessManager>>,
    clock: Option<Box<dyn Clock>>,
    hooks: Vec<Box<dyn ValidationHook>>,
}

impl TrackerValidationServiceBuilder {
    pub fn access_manager(mut self, access: Arc<dyn AccessManager>) -> Self {
        self.access = Some(access);
        self
    }

    pub fn clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use `hook` instead of the default pipeline.
    pub fn hook<H: ValidationHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn build(self) -> TrackerResult<TrackerValidationService> {
        let clock = self
            .clock
            .ok_or(ApplicationError::AdapterNotConfigured { name: "clock" })?;

        let runner = if self.hooks.is_empty() {
            let access = self
                .access
                .ok_or(ApplicationError::AdapterNotConfigured {
                    name: "access manager",
                })?;
            HookRunner::with_default_hooks(access)
        } else {
            self.hooks
                .into_iter()
                .try_fold(HookRunner::new(), HookRunner::register_boxed)?
        };

        Ok(TrackerValidationService::new(runner, clock))
    }
}
