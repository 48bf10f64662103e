//! Hook registry and dispatch loop.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        context::ValidationContext,
        hooks::{
            EnrollmentDateHook, EventCategoryOptHook, ExistenceHook, MetaHook, SecurityHook,
            ValidationHook,
        },
        ports::AccessManager,
        reporter::{HookResult, ValidationErrorReporter},
    },
    domain::{EntityKind, Enrollment, Event, TrackedEntity},
    error::TrackerResult,
};

/// The entity collections of a bundle, borrowed apart from its settings.
pub struct BundleEntities<'b> {
    pub tracked_entities: &'b [TrackedEntity],
    pub enrollments: &'b [Enrollment],
    pub events: &'b mut [Event],
}

/// Ordered set of hooks.
///
/// Hooks are kept sorted by [`ValidationHook::order`]; hooks sharing a key
/// keep their registration order.
#[derive(Default)]
pub struct HookRunner {
    hooks: Vec<Box<dyn ValidationHook>>,
}

impl HookRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in pipeline: existence, meta, security, enrollment dates
    /// and category options.
    pub fn with_default_hooks(access: Arc<dyn AccessManager>) -> Self {
        let mut hooks: Vec<Box<dyn ValidationHook>> = vec![
            Box::new(ExistenceHook),
            Box::new(MetaHook),
            Box::new(SecurityHook::new(access)),
            Box::new(EnrollmentDateHook),
            Box::new(EventCategoryOptHook),
        ];
        hooks.sort_by_key(|hook| hook.order());
        Self { hooks }
    }

    /// Add a hook. Names must be unique, since reports are stamped with them.
    pub fn register<H: ValidationHook + 'static>(self, hook: H) -> TrackerResult<Self> {
        self.register_boxed(Box::new(hook))
    }

    pub fn register_boxed(mut self, hook: Box<dyn ValidationHook>) -> TrackerResult<Self> {
        if self.hooks.iter().any(|existing| existing.name() == hook.name()) {
            return Err(ApplicationError::DuplicateHook { name: hook.name() }.into());
        }
        self.hooks.push(hook);
        self.hooks.sort_by_key(|hook| hook.order());
        Ok(self)
    }

    pub fn hooks(&self) -> impl Iterator<Item = &dyn ValidationHook> {
        self.hooks.iter().map(|hook| hook.as_ref())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Visit kinds in dependency order, then hooks by order, then entities
    /// in bundle order. Every applicable hook sees every entity.
    ///
    /// Returns at the first halt; nothing scheduled after it runs.
    pub fn run(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        entities: BundleEntities<'_>,
    ) -> HookResult {
        let BundleEntities {
            tracked_entities,
            enrollments,
            events,
        } = entities;

        for kind in EntityKind::DEPENDENCY_ORDER {
            for hook in self.hooks.iter().filter(|hook| hook.applies_to(kind)) {
                match kind {
                    EntityKind::TrackedEntity => {
                        dispatch(hook.as_ref(), kind, tracked_entities.len(), reporter, |hook, reporter, index| {
                            hook.validate_tracked_entity(reporter, ctx, &tracked_entities[index])
                        })?;
                    }
                    EntityKind::Enrollment => {
                        dispatch(hook.as_ref(), kind, enrollments.len(), reporter, |hook, reporter, index| {
                            hook.validate_enrollment(reporter, ctx, &enrollments[index])
                        })?;
                    }
                    EntityKind::Event => {
                        dispatch(hook.as_ref(), kind, events.len(), reporter, |hook, reporter, index| {
                            hook.validate_event(reporter, ctx, &mut events[index])
                        })?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Run one hook over `count` entities of one kind.
#[instrument(level = "debug", skip_all, fields(hook = hook.name(), kind = %kind))]
fn dispatch<F>(
    hook: &dyn ValidationHook,
    kind: EntityKind,
    count: usize,
    reporter: &mut ValidationErrorReporter,
    mut validate: F,
) -> HookResult
where
    F: FnMut(&dyn ValidationHook, &mut ValidationErrorReporter, usize) -> HookResult,
{
    reporter.enter(hook.name(), kind);
    let before = reporter.reports().len();

    for index in 0..count {
        reporter.set_position(index);
        validate(hook, reporter, index)?;
    }

    debug!(
        entities = count,
        reported = reporter.reports().len() - before,
        "Hook finished"
    );
    Ok(())
}
