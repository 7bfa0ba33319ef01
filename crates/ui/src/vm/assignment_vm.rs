use training_core::model::{AssignmentId, LinkId, MaterialId, TechnologyId};
use training_services::AssignmentChecklists;

/// Which checklist entry a toggle writes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChecklistTarget {
    Technology(TechnologyId),
    Material(MaterialId),
    InstructorLink(LinkId),
}

/// One renderable checklist row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistItemVm {
    pub target: ChecklistTarget,
    pub label: String,
    pub detail: Option<String>,
    pub checked: bool,
}

/// UI-ready representation of one assignment's progress card.
///
/// The percentage here is the client-side checklist aggregation, recomputed
/// from the records; the server-stored status is shown only as a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentCardVm {
    pub assignment_id: AssignmentId,
    pub training_name: String,
    pub status_label: &'static str,
    pub assigned_on: String,
    pub percentage: u8,
    pub percentage_label: String,
    pub completed_label: String,
    pub is_fully_complete: bool,
    pub meeting_link: Option<String>,
    pub technologies: Vec<ChecklistItemVm>,
    pub materials: Vec<ChecklistItemVm>,
    pub links: Vec<ChecklistItemVm>,
}

/// Convert loaded checklists into a render-ready card.
#[must_use]
pub fn map_assignment_card(
    training_name: &str,
    checklists: &AssignmentChecklists,
) -> AssignmentCardVm {
    let summary = checklists.summary();
    let assignment = &checklists.assignment;

    let technologies = checklists
        .technologies
        .iter()
        .map(|tech| ChecklistItemVm {
            target: ChecklistTarget::Technology(tech.technology_id),
            label: tech.name.clone(),
            detail: tech.level.clone(),
            checked: checklists.is_technology_checked(tech.technology_id),
        })
        .collect();

    let materials = checklists
        .materials
        .iter()
        .map(|material| ChecklistItemVm {
            target: ChecklistTarget::Material(material.id()),
            label: material.title().to_owned(),
            detail: Some(material.link().to_string()),
            checked: checklists.is_material_checked(material.id()),
        })
        .collect();

    let links = assignment
        .instructor_links()
        .iter()
        .map(|link| ChecklistItemVm {
            target: ChecklistTarget::InstructorLink(link.id().clone()),
            label: link.title().to_owned(),
            detail: Some(link.link().to_string()),
            checked: checklists.is_link_checked(link.id()),
        })
        .collect();

    AssignmentCardVm {
        assignment_id: assignment.id(),
        training_name: training_name.to_owned(),
        status_label: assignment.status().label(),
        assigned_on: assignment.assigned_at().format("%Y-%m-%d").to_string(),
        percentage: summary.percentage(),
        percentage_label: format!("{}%", summary.percentage()),
        completed_label: format!("{} of {} items", summary.completed(), summary.total()),
        is_fully_complete: summary.is_fully_complete(),
        meeting_link: assignment.meeting_link().map(str::to_owned),
        technologies,
        materials,
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_core::model::{
        AssignmentStatus, MaterialProgressRecord, ProgressId, ProgressTarget, RequiredTechnology,
        StudyMaterial, TechnologyProgressRecord, TrainingAssignment, TrainingId, UserId,
    };
    use training_core::time::fixed_now;

    fn checklists() -> AssignmentChecklists {
        let assignment = TrainingAssignment::new(
            AssignmentId::new(12),
            UserId::new(3),
            TrainingId::new(7),
            None,
            AssignmentStatus::InProgress,
            0,
            fixed_now(),
            Some("https://meet.example.com/x".into()),
            Vec::new(),
        )
        .unwrap();

        AssignmentChecklists {
            assignment,
            technologies: vec![
                RequiredTechnology {
                    technology_id: TechnologyId::new(1),
                    name: "Rust".into(),
                    level: Some("intermediate".into()),
                },
                RequiredTechnology {
                    technology_id: TechnologyId::new(2),
                    name: "SQL".into(),
                    level: None,
                },
            ],
            materials: vec![
                StudyMaterial::new(
                    MaterialId::new(5),
                    TrainingId::new(7),
                    "Ownership chapter",
                    "https://doc.rust-lang.org/book/ch04-00.html",
                    None,
                )
                .unwrap(),
            ],
            technology_records: vec![TechnologyProgressRecord {
                id: ProgressId::new(1),
                assignment_id: AssignmentId::new(12),
                technology_id: TechnologyId::new(1),
                completed: true,
            }],
            material_records: vec![MaterialProgressRecord {
                id: ProgressId::new(2),
                assignment_id: AssignmentId::new(12),
                user_id: UserId::new(3),
                target: ProgressTarget::Material(MaterialId::new(5)),
                completed: true,
            }],
        }
    }

    #[test]
    fn two_of_three_renders_sixty_seven_percent() {
        let card = map_assignment_card("Rust Backend", &checklists());
        assert_eq!(card.percentage, 67);
        assert_eq!(card.percentage_label, "67%");
        assert_eq!(card.completed_label, "2 of 3 items");
        assert!(!card.is_fully_complete);
    }

    #[test]
    fn checked_flags_follow_the_records() {
        let card = map_assignment_card("Rust Backend", &checklists());
        assert!(card.technologies[0].checked);
        assert!(!card.technologies[1].checked);
        assert!(card.materials[0].checked);
        assert!(card.links.is_empty());
    }

    #[test]
    fn status_label_is_the_server_view_not_the_aggregation() {
        let card = map_assignment_card("Rust Backend", &checklists());
        // 67% aggregated, yet the server still says in progress.
        assert_eq!(card.status_label, "In progress");
        assert_eq!(card.meeting_link.as_deref(), Some("https://meet.example.com/x"));
    }
}
