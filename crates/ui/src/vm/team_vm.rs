use training_core::model::{MemberRole, Team, TeamId, UserId};

/// One roster row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberRowVm {
    pub user_id: UserId,
    pub display_name: String,
    pub role_label: &'static str,
    pub is_client: bool,
}

/// UI-ready representation of one team with its roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamVm {
    pub id: TeamId,
    pub name: String,
    pub member_count_label: String,
    pub client_count: usize,
    pub members: Vec<MemberRowVm>,
}

fn member_role_label(role: MemberRole) -> &'static str {
    match role {
        MemberRole::Client => "Trainee",
        MemberRole::Instructor => "Instructor",
        MemberRole::Supervisor => "Supervisor",
    }
}

/// Convert a team into its render-ready form.
#[must_use]
pub fn map_team(team: &Team) -> TeamVm {
    let members: Vec<MemberRowVm> = team
        .members()
        .iter()
        .map(|member| MemberRowVm {
            user_id: member.user_id,
            display_name: member.display_name.clone(),
            role_label: member_role_label(member.role),
            is_client: member.role == MemberRole::Client,
        })
        .collect();
    let client_count = members.iter().filter(|m| m.is_client).count();

    TeamVm {
        id: team.id(),
        name: team.name().to_owned(),
        member_count_label: format!("{} member(s)", members.len()),
        client_count,
        members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_core::model::TeamMember;
    use training_core::time::fixed_now;

    #[test]
    fn roster_rows_split_clients_from_instructors() {
        let team = Team::new(
            TeamId::new(1),
            "Backend Guild",
            UserId::new(10),
            vec![
                TeamMember {
                    user_id: UserId::new(1),
                    role: MemberRole::Client,
                    display_name: "Ana Lopez".into(),
                },
                TeamMember {
                    user_id: UserId::new(2),
                    role: MemberRole::Instructor,
                    display_name: "Juan Perez".into(),
                },
            ],
            fixed_now(),
        )
        .unwrap();

        let vm = map_team(&team);
        assert_eq!(vm.name, "Backend Guild");
        assert_eq!(vm.member_count_label, "2 member(s)");
        assert_eq!(vm.client_count, 1);
        assert_eq!(vm.members[0].role_label, "Trainee");
        assert_eq!(vm.members[1].role_label, "Instructor");
    }
}
