//! Student dashboard gate.
//!
//! Decided synchronously from the [`SessionContext`] snapshot. Teachers always get
//! through; students need the institute-membership flag.

use super::session::SessionContext;
use super::{GuardScreen, HOME, LOGIN};

pub const TEACHER_ROLE: &str = "teacher";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAccess {
    LoginRequired,
    Teacher,
    Student,
    Restricted,
}

pub fn evaluate_dashboard(session: &SessionContext) -> DashboardAccess {
    let Some(snapshot) = session.snapshot() else {
        return DashboardAccess::LoginRequired;
    };

    if snapshot.role() == Some(TEACHER_ROLE) {
        DashboardAccess::Teacher
    } else if snapshot.is_sujhav_student() {
        DashboardAccess::Student
    } else {
        DashboardAccess::Restricted
    }
}

impl DashboardAccess {
    pub fn renders_children(&self) -> bool {
        matches!(self, Self::Teacher | Self::Student)
    }

    /// Screen shown instead of the dashboard, if any.
    pub fn screen(&self) -> Option<GuardScreen> {
        match self {
            Self::Teacher | Self::Student => None,
            Self::LoginRequired => Some(GuardScreen {
                title: "Login required",
                message: "Please log in to access your dashboard.".to_string(),
                action: LOGIN,
            }),
            Self::Restricted => Some(GuardScreen {
                title: "Access restricted",
                message: "The dashboard is available to enrolled Sujhav students only. \
                          Contact the institute office if you believe this is a mistake."
                    .to_string(),
                action: HOME,
            }),
        }
    }
}
