use crate::model::ids::{AssignmentId, LinkId, MaterialId, ProgressId, TechnologyId, UserId};

//
// ─── CHECKLIST RECORDS ─────────────────────────────────────────────────────────
//

/// One entry of the technology checklist: has the trainee covered this
/// technology within this assignment?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnologyProgressRecord {
    pub id: ProgressId,
    pub assignment_id: AssignmentId,
    pub technology_id: TechnologyId,
    pub completed: bool,
}

/// What a material-progress record points at: a study material attached to
/// the training, or an ad-hoc instructor link attached to the assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressTarget {
    Material(MaterialId),
    InstructorLink(LinkId),
}

/// One entry of the material/link checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialProgressRecord {
    pub id: ProgressId,
    pub assignment_id: AssignmentId,
    pub user_id: UserId,
    pub target: ProgressTarget,
    pub completed: bool,
}

impl MaterialProgressRecord {
    #[must_use]
    pub fn material_id(&self) -> Option<MaterialId> {
        match &self.target {
            ProgressTarget::Material(id) => Some(*id),
            ProgressTarget::InstructorLink(_) => None,
        }
    }

    #[must_use]
    pub fn link_id(&self) -> Option<&LinkId> {
        match &self.target {
            ProgressTarget::Material(_) => None,
            ProgressTarget::InstructorLink(id) => Some(id),
        }
    }
}

//
// ─── AGGREGATION ───────────────────────────────────────────────────────────────
//

/// Client-side completion summary over an assignment's three checklists.
///
/// This is the CLIENT'S notion of completion, recomputed from checklist
/// state on every render. It is intentionally independent of the
/// server-stored status/percentage on the assignment itself and is never
/// written back to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    total: usize,
    completed: usize,
}

impl ProgressSummary {
    /// Builds a summary from raw counts. `completed` is clamped to `total`.
    #[must_use]
    pub fn from_counts(total: usize, completed: usize) -> Self {
        Self {
            total,
            completed: completed.min(total),
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Integer percentage, half rounding up; 0 when there is nothing to do.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.completed as f64 / self.total as f64) * 100.0;
        // f64::round is half-away-from-zero; both operands are non-negative.
        pct.round() as u8
    }

    /// True only when there was something to complete and all of it is done.
    /// An empty checklist set is never "complete".
    #[must_use]
    pub fn is_fully_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Merges the three independent checklists into one summary.
///
/// - `required_technologies`: how many technologies the training requires.
/// - `materials`: ids of the study materials attached to the training.
/// - `instructor_links`: ids of the links attached to the assignment.
///
/// Completion is read from the progress records, keyed by item: a technology
/// counts when a record with its id is flagged complete; materials and links
/// likewise. Records for items no longer present (a removed material, say)
/// are ignored rather than counted.
#[must_use]
pub fn aggregate_progress(
    required_technologies: &[TechnologyId],
    materials: &[MaterialId],
    instructor_links: &[LinkId],
    technology_records: &[TechnologyProgressRecord],
    material_records: &[MaterialProgressRecord],
) -> ProgressSummary {
    let total = required_technologies.len() + materials.len() + instructor_links.len();

    let completed_technologies = required_technologies
        .iter()
        .filter(|tech| {
            technology_records
                .iter()
                .any(|rec| rec.technology_id == **tech && rec.completed)
        })
        .count();

    let completed_materials = materials
        .iter()
        .filter(|mat| {
            material_records
                .iter()
                .any(|rec| rec.material_id() == Some(**mat) && rec.completed)
        })
        .count();

    let completed_links = instructor_links
        .iter()
        .filter(|link| {
            material_records
                .iter()
                .any(|rec| rec.link_id() == Some(*link) && rec.completed)
        })
        .count();

    ProgressSummary::from_counts(
        total,
        completed_technologies + completed_materials + completed_links,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech_record(tech: u64, completed: bool) -> TechnologyProgressRecord {
        TechnologyProgressRecord {
            id: ProgressId::new(tech),
            assignment_id: AssignmentId::new(1),
            technology_id: TechnologyId::new(tech),
            completed,
        }
    }

    fn material_record(mat: u64, completed: bool) -> MaterialProgressRecord {
        MaterialProgressRecord {
            id: ProgressId::new(100 + mat),
            assignment_id: AssignmentId::new(1),
            user_id: UserId::new(1),
            target: ProgressTarget::Material(MaterialId::new(mat)),
            completed,
        }
    }

    fn link_record(link: &LinkId, completed: bool) -> MaterialProgressRecord {
        MaterialProgressRecord {
            id: ProgressId::new(200),
            assignment_id: AssignmentId::new(1),
            user_id: UserId::new(1),
            target: ProgressTarget::InstructorLink(link.clone()),
            completed,
        }
    }

    #[test]
    fn two_of_three_items_is_67_percent() {
        // N=2 technologies (1 complete), M=1 material (complete), K=0.
        let techs = [TechnologyId::new(1), TechnologyId::new(2)];
        let mats = [MaterialId::new(1)];
        let summary = aggregate_progress(
            &techs,
            &mats,
            &[],
            &[tech_record(1, true), tech_record(2, false)],
            &[material_record(1, true)],
        );
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.completed(), 2);
        assert_eq!(summary.percentage(), 67);
        assert!(!summary.is_fully_complete());
    }

    #[test]
    fn empty_checklists_are_zero_and_never_complete() {
        let summary = aggregate_progress(&[], &[], &[], &[], &[]);
        assert_eq!(summary.percentage(), 0);
        assert!(!summary.is_fully_complete());
    }

    #[test]
    fn all_items_checked_is_fully_complete() {
        let techs = [TechnologyId::new(1)];
        let mats = [MaterialId::new(2)];
        let link = LinkId::derive(AssignmentId::new(1), 0);
        let links = [link.clone()];
        let summary = aggregate_progress(
            &techs,
            &mats,
            &links,
            &[tech_record(1, true)],
            &[material_record(2, true), link_record(&link, true)],
        );
        assert_eq!(summary.percentage(), 100);
        assert!(summary.is_fully_complete());
    }

    #[test]
    fn records_for_removed_items_are_ignored() {
        // A record for material 9 exists but material 9 is no longer attached.
        let summary = aggregate_progress(
            &[TechnologyId::new(1)],
            &[],
            &[],
            &[tech_record(1, false)],
            &[material_record(9, true)],
        );
        assert_eq!(summary.total(), 1);
        assert_eq!(summary.completed(), 0);
    }

    #[test]
    fn missing_records_count_as_incomplete() {
        let summary = aggregate_progress(
            &[TechnologyId::new(1), TechnologyId::new(2)],
            &[],
            &[],
            &[tech_record(1, true)],
            &[],
        );
        assert_eq!(summary.completed(), 1);
        assert_eq!(summary.percentage(), 50);
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 1 of 8 = 12.5 -> 13
        let summary = ProgressSummary::from_counts(8, 1);
        assert_eq!(summary.percentage(), 13);
        // 1 of 3 = 33.33 -> 33
        assert_eq!(ProgressSummary::from_counts(3, 1).percentage(), 33);
        // 2 of 3 = 66.67 -> 67
        assert_eq!(ProgressSummary::from_counts(3, 2).percentage(), 67);
    }

    #[test]
    fn completed_is_clamped_to_total() {
        let summary = ProgressSummary::from_counts(2, 5);
        assert_eq!(summary.completed(), 2);
        assert!(summary.is_fully_complete());
    }
}
