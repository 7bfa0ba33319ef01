use training_core::model::{Identity, UserId};

/// One row of the user-management table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRowVm {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub role_label: &'static str,
    pub email: String,
    pub status_label: &'static str,
    pub is_active: bool,
}

/// Convert accounts into table rows, in the order the server returned them.
#[must_use]
pub fn map_user_rows(users: &[Identity]) -> Vec<UserRowVm> {
    users
        .iter()
        .map(|user| UserRowVm {
            id: user.id(),
            username: user.username().to_owned(),
            display_name: user.display_name(),
            role_label: user.role().display_name(),
            email: user.email().unwrap_or("\u{2014}").to_owned(),
            status_label: if user.status().is_active() {
                "Active"
            } else {
                "Inactive"
            },
            is_active: user.status().is_active(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_core::model::{AccountStatus, Role};
    use training_core::time::fixed_now;

    fn identity(role: Role, status: AccountStatus, email: Option<&str>) -> Identity {
        Identity::new(
            UserId::new(1),
            "mgarcia",
            "Maria",
            "Garcia",
            email.map(str::to_owned),
            role,
            status,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn row_carries_role_and_status_labels() {
        let rows = map_user_rows(&[identity(
            Role::Instructor,
            AccountStatus::Active,
            Some("m.garcia@example.com"),
        )]);
        assert_eq!(rows[0].display_name, "Maria Garcia");
        assert_eq!(rows[0].role_label, "Instructor");
        assert_eq!(rows[0].status_label, "Active");
        assert!(rows[0].is_active);
        assert_eq!(rows[0].email, "m.garcia@example.com");
    }

    #[test]
    fn missing_email_renders_a_dash() {
        let rows = map_user_rows(&[identity(Role::Client, AccountStatus::Inactive, None)]);
        assert_eq!(rows[0].email, "\u{2014}");
        assert_eq!(rows[0].status_label, "Inactive");
    }
}
