//! Dashboard numbers derived from the planner collections.

use std::collections::HashSet;

use time::{Duration, PrimitiveDateTime};
use uuid::Uuid;

use crate::models::{Assignment, Course, StudySession};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    /// Estimated hours still ahead in courses that are not completed.
    pub remaining_study_hours: f64,
    /// `hours_from_sessions + hours_from_completed_courses`, one decimal.
    pub hours_completed: f64,
    pub hours_from_sessions: f64,
    pub hours_from_completed_courses: f64,
    pub due_this_week: usize,
    pub overdue: usize,
}

impl DashboardStats {
    pub fn compute(
        courses: &[Course],
        assignments: &[Assignment],
        sessions: &[StudySession],
        now: PrimitiveDateTime,
    ) -> Self {
        let completed_courses: HashSet<Uuid> = courses
            .iter()
            .filter(|c| c.is_completed)
            .map(|c| c.id)
            .collect();

        let remaining_study_hours = assignments
            .iter()
            .filter(|a| !a.is_done() && !completed_courses.contains(&a.course_id))
            .map(|a| a.estimated_hours)
            .sum();

        let hours_from_completed_courses: f64 = assignments
            .iter()
            .filter(|a| completed_courses.contains(&a.course_id))
            .map(|a| a.estimated_hours)
            .sum();

        // Sessions against a completed course are already covered by its
        // estimated hours. Sessions pointing at a missing assignment count for nothing.
        let session_minutes: u64 = sessions
            .iter()
            .filter(|s| match s.assignment_id {
                None => true,
                Some(id) => assignments
                    .iter()
                    .find(|a| a.id == id)
                    .is_some_and(|a| !completed_courses.contains(&a.course_id)),
            })
            .map(|s| u64::from(s.minutes))
            .sum();
        let hours_from_sessions = session_minutes as f64 / 60.0;

        let week_end = now.saturating_add(Duration::days(7));
        let due_this_week = assignments
            .iter()
            .filter(|a| !a.is_done() && a.due_date > now && a.due_date <= week_end)
            .count();
        let overdue = assignments
            .iter()
            .filter(|a| !a.is_done() && a.due_date < now)
            .count();

        Self {
            remaining_study_hours,
            hours_completed: round_tenth(hours_from_sessions + hours_from_completed_courses),
            hours_from_sessions,
            hours_from_completed_courses,
            due_this_week,
            overdue,
        }
    }

    pub fn milestone(&self) -> Option<&'static Milestone> {
        milestone(self.hours_completed)
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, PartialEq)]
pub struct Milestone {
    pub threshold: f64,
    pub subtitle: &'static str,
}

/// Highest first.
pub static MILESTONES: [Milestone; 6] = [
    Milestone { threshold: 64.0, subtitle: "Legendary status unlocked!" },
    Milestone { threshold: 32.0, subtitle: "Master level! Truly dedicated." },
    Milestone { threshold: 16.0, subtitle: "In the zone! Amazing focus." },
    Milestone { threshold: 8.0, subtitle: "On fire! You're unstoppable." },
    Milestone { threshold: 4.0, subtitle: "You're building a habit!" },
    Milestone { threshold: 2.0, subtitle: "Great start! Keep the momentum." },
];

/// Highest milestone reached by `hours`, if any.
pub fn milestone(hours: f64) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|m| hours >= m.threshold)
}
