//! What a hook sees of the run besides the entity it validates.

use chrono::{DateTime, Utc};

use crate::application::ports::PreheatContext;
use crate::domain::{Event, ImportStrategy, Program, TrackerIdentifierParams, User};

/// Read access to the batch settings and preheat for one run.
///
/// The preheat is only writable through [`ValidationContext::backfill_program`].
pub struct ValidationContext<'a> {
    user: Option<&'a User>,
    strategy: ImportStrategy,
    now: DateTime<Utc>,
    preheat: &'a mut dyn PreheatContext,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        user: Option<&'a User>,
        strategy: ImportStrategy,
        now: DateTime<Utc>,
        preheat: &'a mut dyn PreheatContext,
    ) -> Self {
        Self {
            user,
            strategy,
            now,
            preheat,
        }
    }

    pub fn user(&self) -> Option<&'a User> {
        self.user
    }

    pub fn strategy(&self) -> ImportStrategy {
        self.strategy
    }

    /// Sampled once when the run started.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn preheat(&self) -> &dyn PreheatContext {
        &*self.preheat
    }

    pub fn identifiers(&self) -> &TrackerIdentifierParams {
        self.preheat.identifiers()
    }

    /// Record `program` as the owner of `event`'s stage.
    ///
    /// Writes the program identifier into the event and registers the program
    /// in the preheat under the configured program scheme, so later hooks and
    /// later events resolve it.
    pub(crate) fn backfill_program(&mut self, event: &mut Event, program: Program) {
        let scheme = self.preheat.identifiers().program;
        event.program = Some(scheme.identifier_of(&program));
        self.preheat.put_program(scheme, program);
    }
}
