//! Page-level access guards for the admin back-office and the student dashboard.
//!
//! Both are UX gates: each resolves once per mount into "render children" or a
//! [`GuardScreen`]. Authorization itself is enforced by the API extractors.
//!
//! - [`admin`]: authoritative, asks `GET /api/admin/me` once.
//! - [`dashboard`]: optimistic, reads the locally stored user snapshot, no network.

pub mod admin;
pub mod dashboard;
pub mod session;

pub use admin::{AdminGuard, AdminGuardState, HttpWhoAmI, WhoAmI, WhoAmIError};
pub use dashboard::{DashboardAccess, evaluate_dashboard};
pub use session::{MemoryStore, SessionContext, SnapshotStore, USER_STORAGE_KEY, UserSnapshot};

/// Link offered on every denial screen so the user is never stranded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavAction {
    pub label: &'static str,
    pub href: &'static str,
}

pub const HOME: NavAction = NavAction {
    label: "Go to home",
    href: "/",
};

pub const LOGIN: NavAction = NavAction {
    label: "Log in",
    href: "/login",
};

/// What a guard shows instead of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardScreen {
    pub title: &'static str,
    pub message: String,
    pub action: NavAction,
}
