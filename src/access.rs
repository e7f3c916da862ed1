use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Top-level dashboard screens, in sidebar order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Inventory,
    Opportunities,
    Crm,
    Analysis,
    Metrics,
    UserManagement,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Dashboard,
        View::Inventory,
        View::Opportunities,
        View::Crm,
        View::Analysis,
        View::Metrics,
        View::UserManagement,
    ];
}

impl Default for View {
    fn default() -> Self {
        View::Dashboard
    }
}

/// Whether `role` may open `view`.
pub fn can_access(role: Role, view: View) -> bool {
    match role {
        Role::SuperAdmin => true,
        Role::Admin => view != View::UserManagement,
        Role::User => matches!(
            view,
            View::Dashboard | View::Inventory | View::Opportunities | View::Analysis
        ),
    }
}

pub fn accessible_views(role: Role) -> Vec<View> {
    View::ALL.into_iter().filter(|v| can_access(role, *v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_sees_everything() {
        assert_eq!(accessible_views(Role::SuperAdmin), View::ALL.to_vec());
    }

    #[test]
    fn admin_cannot_manage_users() {
        assert!(can_access(Role::Admin, View::Crm));
        assert!(can_access(Role::Admin, View::Metrics));
        assert!(!can_access(Role::Admin, View::UserManagement));
    }

    #[test]
    fn user_limited_to_listing_views() {
        assert_eq!(
            accessible_views(Role::User),
            vec![View::Dashboard, View::Inventory, View::Opportunities, View::Analysis]
        );
    }
}
