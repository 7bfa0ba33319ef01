use training_core::model::{AssignmentStatus, ProgressSummary, TrainingAssignment};

/// The dashboard stat cards.
///
/// All counts come from the SERVER-STORED assignment status, never from the
/// client-side checklist aggregation: the dashboard summarizes what the
/// backend believes, the progress cards show what the checklists say.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DashboardStatsVm {
    pub total: usize,
    pub assigned: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub completion_label: String,
}

/// Compute stat cards over a set of assignments.
#[must_use]
pub fn map_dashboard_stats(assignments: &[TrainingAssignment]) -> DashboardStatsVm {
    let mut stats = DashboardStatsVm {
        total: assignments.len(),
        ..DashboardStatsVm::default()
    };
    for assignment in assignments {
        match assignment.status() {
            AssignmentStatus::Assigned => stats.assigned += 1,
            AssignmentStatus::InProgress => stats.in_progress += 1,
            AssignmentStatus::Completed => stats.completed += 1,
        }
    }
    let percentage = ProgressSummary::from_counts(stats.total, stats.completed).percentage();
    stats.completion_label = format!("{percentage}% completed");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_core::model::{AssignmentId, TrainingId, UserId};
    use training_core::time::fixed_now;

    fn assignment(id: u64, status: AssignmentStatus, stored_pct: u8) -> TrainingAssignment {
        TrainingAssignment::new(
            AssignmentId::new(id),
            UserId::new(1),
            TrainingId::new(7),
            None,
            status,
            stored_pct,
            fixed_now(),
            None,
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn counts_follow_the_stored_status_not_the_percentage() {
        // 100% stored but still in progress: counts as in-progress.
        let stats = map_dashboard_stats(&[
            assignment(1, AssignmentStatus::Completed, 100),
            assignment(2, AssignmentStatus::InProgress, 100),
            assignment(3, AssignmentStatus::Assigned, 0),
            assignment(4, AssignmentStatus::Completed, 40),
        ]);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.assigned, 1);
        assert_eq!(stats.completion_label, "50% completed");
    }

    #[test]
    fn empty_set_is_zero_percent() {
        let stats = map_dashboard_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_label, "0% completed");
    }
}
