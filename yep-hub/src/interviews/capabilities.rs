//! Viewer capability resolution
//!
//! Role checks happen exactly once per request: the raw role list is folded
//! into this struct and the builders and normalizers take it by value. The
//! permission surface is testable without touching the database.

use yep_common::db::models::roles;

/// What the requesting viewer is allowed to see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerCapabilities {
    pub is_admin: bool,
    pub is_chapter_lead: bool,
    pub is_instructor: bool,
    /// May see hiring-domain tasks (reviewers, plus anyone who applies)
    pub can_hiring: bool,
    /// May see readiness-domain tasks (reviewers and instructors)
    pub can_readiness: bool,
    /// May request the team view (reviewers only)
    pub can_team_view: bool,
}

impl ViewerCapabilities {
    pub fn from_roles<S: AsRef<str>>(role_list: &[S]) -> Self {
        let has = |role: &str| role_list.iter().any(|r| r.as_ref() == role);

        let is_admin = has(roles::ADMIN);
        let is_chapter_lead = has(roles::CHAPTER_LEAD);
        let is_instructor = has(roles::INSTRUCTOR);
        let is_reviewer = is_admin || is_chapter_lead;

        Self {
            is_admin,
            is_chapter_lead,
            is_instructor,
            can_hiring: is_reviewer || has(roles::APPLICANT),
            can_readiness: is_reviewer || is_instructor,
            can_team_view: is_reviewer,
        }
    }

    /// Admins and chapter leads review on behalf of the team
    pub fn is_reviewer(&self) -> bool {
        self.is_admin || self.is_chapter_lead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(roles: &[&str]) -> ViewerCapabilities {
        ViewerCapabilities::from_roles(roles)
    }

    #[test]
    fn test_admin_gets_everything() {
        let c = caps(&["ADMIN"]);
        assert!(c.is_admin);
        assert!(c.is_reviewer());
        assert!(c.can_hiring);
        assert!(c.can_readiness);
        assert!(c.can_team_view);
    }

    #[test]
    fn test_chapter_lead_is_reviewer() {
        let c = caps(&["CHAPTER_LEAD"]);
        assert!(!c.is_admin);
        assert!(c.is_reviewer());
        assert!(c.can_team_view);
    }

    #[test]
    fn test_plain_applicant() {
        let c = caps(&["APPLICANT"]);
        assert!(c.can_hiring);
        assert!(!c.can_readiness);
        assert!(!c.can_team_view);
        assert!(!c.is_reviewer());
    }

    #[test]
    fn test_instructor_without_applications() {
        let c = caps(&["INSTRUCTOR"]);
        assert!(!c.can_hiring);
        assert!(c.can_readiness);
        assert!(c.is_instructor);
        assert!(!c.can_team_view);
    }

    #[test]
    fn test_instructor_who_also_applies() {
        let c = caps(&["INSTRUCTOR", "APPLICANT"]);
        assert!(c.can_hiring);
        assert!(c.can_readiness);
        assert!(!c.can_team_view);
    }

    #[test]
    fn test_unrelated_roles_grant_nothing() {
        let c = caps(&["MENTOR", "ALUMNI"]);
        assert!(!c.can_hiring);
        assert!(!c.can_readiness);
        assert!(!c.can_team_view);
    }

    #[test]
    fn test_empty_role_list() {
        let c = caps(&[]);
        assert!(!c.can_hiring);
        assert!(!c.can_readiness);
        assert!(!c.can_team_view);
    }
}
