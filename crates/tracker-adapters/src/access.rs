//! Capture-scope access checks against the organisation-unit hierarchy.

use tracing::debug;
use tracker_core::{
    application::{AccessManager, HookResult, ValidationErrorReporter},
    domain::{EntityRef, OrganisationUnit, TrackerErrorCode, User},
};

/// Grants capture access to a unit when the user holds it or one of its
/// ancestors, or holds the `ALL` authority.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureScopeAccessManager;

impl CaptureScopeAccessManager {
    pub fn new() -> Self {
        Self
    }

    pub fn in_capture_scope(user: &User, org_unit: &OrganisationUnit) -> bool {
        user.is_super()
            || org_unit
                .ancestry()
                .any(|uid| user.organisation_units.iter().any(|scope| scope == uid))
    }
}

impl AccessManager for CaptureScopeAccessManager {
    fn check_org_unit_in_capture_scope(
        &self,
        reporter: &mut ValidationErrorReporter,
        user: &User,
        entity: &EntityRef,
        org_unit: &OrganisationUnit,
    ) -> HookResult {
        if Self::in_capture_scope(user, org_unit) {
            return Ok(());
        }

        debug!(user = %user.username, org_unit = %org_unit.uid, %entity, "Outside capture scope");
        reporter.add_error(
            entity.clone(),
            ValidationErrorReporter::new_report(TrackerErrorCode::E1000)
                .arg(&user.username)
                .arg(&org_unit.uid),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::application::ValidationHalt;
    use tracker_core::domain::{AUTHORITY_ALL, TrackerType, ValidationMode};

    fn user(scope: &[&str], authorities: &[&str]) -> User {
        User {
            uid: "u1".into(),
            username: "clerk".into(),
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
            organisation_units: scope.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn unit(uid: &str, path: &str) -> OrganisationUnit {
        OrganisationUnit {
            uid: uid.into(),
            code: None,
            name: uid.into(),
            path: path.into(),
        }
    }

    #[test]
    fn descendants_of_scope_roots_are_in_scope() {
        let clinic = unit("clinic", "/country/district/clinic");

        assert!(CaptureScopeAccessManager::in_capture_scope(&user(&["district"], &[]), &clinic));
        assert!(CaptureScopeAccessManager::in_capture_scope(&user(&["clinic"], &[]), &clinic));
        assert!(!CaptureScopeAccessManager::in_capture_scope(&user(&["other"], &[]), &clinic));
    }

    #[test]
    fn superuser_is_always_in_scope() {
        let clinic = unit("clinic", "/country/clinic");
        assert!(CaptureScopeAccessManager::in_capture_scope(
            &user(&[], &[AUTHORITY_ALL]),
            &clinic
        ));
    }

    #[test]
    fn denial_reports_e1000_with_user_and_unit() {
        let mut reporter = ValidationErrorReporter::new(ValidationMode::Full);
        let entity = EntityRef::new(TrackerType::Event, "ev1");

        CaptureScopeAccessManager
            .check_org_unit_in_capture_scope(
                &mut reporter,
                &user(&["other"], &[]),
                &entity,
                &unit("clinic", "/country/clinic"),
            )
            .unwrap();

        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].error_code, TrackerErrorCode::E1000);
        assert_eq!(reports[0].args, vec!["clerk", "clinic"]);
        assert_eq!(reports[0].uid, "ev1");
    }

    #[test]
    fn denial_halts_in_fail_fast_mode() {
        let mut reporter = ValidationErrorReporter::new(ValidationMode::FailFast);
        let entity = EntityRef::new(TrackerType::Event, "ev1");

        let result = CaptureScopeAccessManager.check_org_unit_in_capture_scope(
            &mut reporter,
            &user(&[], &[]),
            &entity,
            &unit("clinic", "/clinic"),
        );

        assert!(matches!(result, Err(ValidationHalt::FailFast { .. })));
    }
}
