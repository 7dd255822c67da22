//! Which screen a session shows, derived from its role and what it asked for.

use serde::{Deserialize, Serialize};

use crate::domain::Role;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminTab {
    #[default]
    Orders,
    Menu,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    #[default]
    Login,
    Menu,
    MyOrders,
    AdminDashboard(AdminTab),
}

/// Resolves a requested view for `role` (`None` when signed out).
///
/// Admins always end up on their dashboard, keeping the requested tab if one
/// was asked for. Students pick between the menu and their orders. Guests can
/// only browse.
pub fn resolve(role: Option<Role>, requested: View) -> View {
    match role {
        None => View::Login,
        Some(Role::Admin) => match requested {
            View::AdminDashboard(tab) => View::AdminDashboard(tab),
            _ => View::AdminDashboard(AdminTab::default()),
        },
        Some(Role::Student) => match requested {
            View::MyOrders => View::MyOrders,
            _ => View::Menu,
        },
        Some(Role::Guest) => View::Menu,
    }
}

/// The view a freshly signed-in user lands on.
pub fn landing(role: Role) -> View {
    resolve(Some(role), View::Menu)
}

/// Holds the currently selected view token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewRouter {
    current: View,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn navigate(&mut self, role: Option<Role>, requested: View) -> View {
        self.current = resolve(role, requested);
        self.current
    }

    pub fn land(&mut self, role: Role) -> View {
        self.current = landing(role);
        self.current
    }

    pub fn reset(&mut self) {
        self.current = View::Login;
    }
}
