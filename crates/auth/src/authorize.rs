use thiserror::Error;

use crate::{Role, StaffProfile};

/// Screens of the back office, each guarded by an access rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Dashboard,
    Recipes,
    Inventory,
    Staff,
}

impl Screen {
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Login => "/login",
            Screen::Dashboard => "/dashboard",
            Screen::Recipes => "/recipes",
            Screen::Inventory => "/inventory",
            Screen::Staff => "/staff",
        }
    }

    fn manager_only(&self) -> bool {
        matches!(self, Screen::Dashboard | Screen::Recipes | Screen::Inventory)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("this screen is for managers only")]
    Forbidden { redirect: Screen },
}

impl AuthzError {
    /// Where the user is sent instead.
    pub fn redirect(&self) -> Screen {
        match self {
            AuthzError::Unauthenticated => Screen::Login,
            AuthzError::Forbidden { redirect } => *redirect,
        }
    }
}

/// Decide whether `profile` may open `screen`.
///
/// - No IO
/// - Login is always reachable
/// - Dashboard, recipes and inventory need a manager; everyone else lands on
///   the staff screen
pub fn authorize(profile: Option<&StaffProfile>, screen: Screen) -> Result<(), AuthzError> {
    if screen == Screen::Login {
        return Ok(());
    }
    let profile = profile.ok_or(AuthzError::Unauthenticated)?;

    if screen.manager_only() && !profile.role.is_manager() {
        return Err(AuthzError::Forbidden {
            redirect: Screen::Staff,
        });
    }
    Ok(())
}

/// Managers and admins can open new shifts.
pub fn can_manage_shifts(role: &Role) -> bool {
    matches!(role, Role::Manager | Role::Admin)
}

/// Only managers can delete a whole shift.
pub fn can_delete_shifts(role: &Role) -> bool {
    role.is_manager()
}
