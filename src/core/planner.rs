//! The planner owns the course, assignment and study-session collections.
//!
//! Every mutation goes through a `Planner` method, which updates the
//! in-memory collection and queues exactly one store write for it. Queued
//! writes go out on [`Planner::save`] (or are handed to the caller through
//! [`Planner::take_pending`]).

use time::{Date, OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

use crate::{
    core::{
        db::{KeyValueStore, PendingWrite, Persisted, flush},
        matrix::WeeklyMatrix,
        stats::DashboardStats,
        timer::CompletedSession,
    },
    error::{PlannerError, Result},
    models::{
        Assignment, AssignmentUpdate, Course, CourseUpdate, NewAssignment, NewCourse, Status,
        StudySession,
    },
};

pub const ASSIGNMENTS_KEY: &str = "assignments";
pub const COURSES_KEY: &str = "courses";
pub const SESSIONS_KEY: &str = "studySessions";

/// Outcome of completing a course, for the congratulation message.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCompletion {
    pub course_id: Uuid,
    pub course_name: String,
    pub hours: f64,
    pub assignments_closed: usize,
}

impl CourseCompletion {
    pub fn message(&self) -> String {
        format!(
            "Congratulations! You completed \"{}\" and logged {} hours.",
            self.course_name, self.hours
        )
    }
}

/// A course and its Done assignments.
#[derive(Debug, Clone)]
pub struct CourseProgress<'a> {
    pub course: &'a Course,
    pub done: Vec<&'a Assignment>,
}

/// Assignments that can still receive study time, grouped by course.
#[derive(Debug, Clone)]
pub struct SessionTargets<'a> {
    pub course: &'a Course,
    pub assignments: Vec<&'a Assignment>,
}

#[derive(Debug, Clone)]
pub struct Planner<S> {
    store: S,
    courses: Persisted<Vec<Course>>,
    assignments: Persisted<Vec<Assignment>>,
    sessions: Persisted<Vec<StudySession>>,
    pending: Vec<PendingWrite>,
}

impl<S: KeyValueStore> Planner<S> {
    /// Load all collections, starting empty where nothing usable is stored.
    pub async fn load(store: S) -> anyhow::Result<Self> {
        let courses = Persisted::load(&store, COURSES_KEY, Vec::new()).await?;
        let assignments = Persisted::load(&store, ASSIGNMENTS_KEY, Vec::new()).await?;
        let sessions = Persisted::load(&store, SESSIONS_KEY, Vec::new()).await?;
        tracing::debug!(
            courses = courses.get().len(),
            assignments = assignments.get().len(),
            sessions = sessions.get().len(),
            "planner loaded"
        );
        Ok(Self {
            store,
            courses,
            assignments,
            sessions,
            pending: Vec::new(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flush queued writes, in the order the changes were made.
    pub async fn save(&mut self) -> anyhow::Result<()> {
        let writes = self.take_pending();
        flush(&self.store, writes).await
    }
}

impl<S> Planner<S> {
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Hand the queued writes to the caller, who becomes responsible for
    /// flushing them.
    pub fn take_pending(&mut self) -> Vec<PendingWrite> {
        std::mem::take(&mut self.pending)
    }

    pub fn courses(&self) -> &[Course] {
        self.courses.get()
    }

    pub fn assignments(&self) -> &[Assignment] {
        self.assignments.get()
    }

    pub fn sessions(&self) -> &[StudySession] {
        self.sessions.get()
    }

    pub fn course(&self, id: Uuid) -> Option<&Course> {
        self.courses().iter().find(|c| c.id == id)
    }

    pub fn assignment(&self, id: Uuid) -> Option<&Assignment> {
        self.assignments().iter().find(|a| a.id == id)
    }

    pub fn active_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses().iter().filter(|c| !c.is_completed)
    }

    pub fn completed_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses().iter().filter(|c| c.is_completed)
    }

    pub fn add_course(&mut self, course: NewCourse) -> Result<Course> {
        let course = Course {
            id: Uuid::new_v4(),
            name: course.name,
            code: course.code,
            color: course.color,
            is_completed: false,
        };
        let created = course.clone();
        let write = self.courses.update(|courses| courses.push(course))?;
        self.pending.push(write);
        tracing::debug!(course = %created.id, name = %created.name, "course added");
        Ok(created)
    }

    pub fn update_course(&mut self, id: Uuid, update: CourseUpdate) -> Result<Course> {
        let mut course = self
            .course(id)
            .cloned()
            .ok_or(PlannerError::CourseNotFound(id))?;
        if let Some(name) = update.name {
            course.name = name;
        }
        if let Some(code) = update.code {
            course.code = code;
        }
        if let Some(color) = update.color {
            course.color = color;
        }

        let updated = course.clone();
        let write = self.courses.update(|courses| replace_by_id(courses, course, |c| c.id))?;
        self.pending.push(write);
        tracing::debug!(course = %id, "course updated");
        Ok(updated)
    }

    /// Mark a course completed and close every one of its assignments.
    pub fn complete_course(&mut self, id: Uuid) -> Result<CourseCompletion> {
        let course = self.course(id).ok_or(PlannerError::CourseNotFound(id))?;
        if course.is_completed {
            return Err(PlannerError::CourseAlreadyCompleted(course.name.clone()));
        }
        let course_name = course.name.clone();
        let hours = self.course_hours(id);

        let write = self.courses.update(|courses| {
            if let Some(course) = courses.iter_mut().find(|c| c.id == id) {
                course.is_completed = true;
            }
        })?;
        self.pending.push(write);

        let mut assignments_closed = 0;
        let write = self.assignments.update(|assignments| {
            for assignment in assignments.iter_mut().filter(|a| a.course_id == id) {
                if assignment.status != Status::Done {
                    assignments_closed += 1;
                }
                assignment.status = Status::Done;
            }
        })?;
        self.pending.push(write);

        tracing::info!(course = %id, hours, assignments_closed, "course completed");
        Ok(CourseCompletion {
            course_id: id,
            course_name,
            hours,
            assignments_closed,
        })
    }

    /// Sum of estimated hours over all of a course's assignments.
    pub fn course_hours(&self, course_id: Uuid) -> f64 {
        self.assignments()
            .iter()
            .filter(|a| a.course_id == course_id)
            .map(|a| a.estimated_hours)
            .sum()
    }

    pub fn add_assignment(&mut self, assignment: NewAssignment) -> Result<Assignment> {
        if self.course(assignment.course_id).is_none() {
            return Err(PlannerError::UnknownCourse(assignment.course_id));
        }
        let assignment = Assignment {
            id: Uuid::new_v4(),
            title: assignment.title,
            course_id: assignment.course_id,
            description: assignment.description,
            due_date: assignment.due_date,
            priority: assignment.priority,
            status: Status::NotStarted,
            estimated_hours: assignment.estimated_hours,
        };
        let created = assignment.clone();
        let write = self.assignments.update(|assignments| assignments.push(assignment))?;
        self.pending.push(write);
        tracing::debug!(assignment = %created.id, title = %created.title, "assignment added");
        Ok(created)
    }

    pub fn update_assignment(&mut self, id: Uuid, update: AssignmentUpdate) -> Result<Assignment> {
        let mut assignment = self
            .assignment(id)
            .cloned()
            .ok_or(PlannerError::AssignmentNotFound(id))?;
        if let Some(course_id) = update.course_id {
            if self.course(course_id).is_none() {
                return Err(PlannerError::UnknownCourse(course_id));
            }
            assignment.course_id = course_id;
        }
        if let Some(title) = update.title {
            assignment.title = title;
        }
        if let Some(description) = update.description {
            assignment.description = description;
        }
        if let Some(due_date) = update.due_date {
            assignment.due_date = due_date;
        }
        if let Some(priority) = update.priority {
            assignment.priority = priority;
        }
        if let Some(status) = update.status {
            assignment.status = status;
        }
        if let Some(hours) = update.estimated_hours {
            assignment.estimated_hours = hours;
        }

        let updated = assignment.clone();
        let write = self
            .assignments
            .update(|assignments| replace_by_id(assignments, assignment, |a| a.id))?;
        self.pending.push(write);
        tracing::debug!(assignment = %id, "assignment updated");
        Ok(updated)
    }

    pub fn set_assignment_status(&mut self, id: Uuid, status: Status) -> Result<()> {
        self.update_assignment(
            id,
            AssignmentUpdate {
                status: Some(status),
                ..Default::default()
            },
        )?;
        Ok(())
    }

    pub fn record_session(
        &mut self,
        session: CompletedSession,
        started_at: OffsetDateTime,
    ) -> Result<StudySession> {
        if session.minutes == 0 {
            return Err(PlannerError::EmptySession);
        }
        let session = StudySession {
            id: Uuid::new_v4(),
            assignment_id: session.assignment_id,
            started_at,
            minutes: session.minutes,
        };
        let recorded = session.clone();
        let write = self.sessions.update(|sessions| sessions.push(session))?;
        self.pending.push(write);
        tracing::info!(
            minutes = recorded.minutes,
            assignment = ?recorded.assignment_id,
            "study session recorded"
        );
        Ok(recorded)
    }

    /// Empty all three collections. Refused unless `confirmed`.
    pub fn reset(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(PlannerError::ResetNotConfirmed);
        }
        let writes = [
            self.assignments.set(Vec::new())?,
            self.courses.set(Vec::new())?,
            self.sessions.set(Vec::new())?,
        ];
        self.pending.extend(writes);
        tracing::info!("planner reset");
        Ok(())
    }

    pub fn stats(&self, now: PrimitiveDateTime) -> DashboardStats {
        DashboardStats::compute(self.courses(), self.assignments(), self.sessions(), now)
    }

    /// Week grid of assignments that are not done yet.
    pub fn weekly_matrix(&self, today: Date) -> WeeklyMatrix<'_> {
        WeeklyMatrix::build(today, self.assignments().iter().filter(|a| !a.is_done()))
    }

    /// A course's assignments, earliest due first.
    pub fn course_assignments(&self, course_id: Uuid) -> Vec<&Assignment> {
        let mut assignments: Vec<&Assignment> = self
            .assignments()
            .iter()
            .filter(|a| a.course_id == course_id)
            .collect();
        assignments.sort_by_key(|a| a.due_date);
        assignments
    }

    /// Courses with at least one Done assignment.
    pub fn course_progress(&self) -> Vec<CourseProgress<'_>> {
        self.courses()
            .iter()
            .map(|course| CourseProgress {
                course,
                done: self
                    .assignments()
                    .iter()
                    .filter(|a| a.course_id == course.id && a.is_done())
                    .collect(),
            })
            .filter(|progress| !progress.done.is_empty())
            .collect()
    }

    pub fn session_targets(&self) -> Vec<SessionTargets<'_>> {
        self.courses()
            .iter()
            .map(|course| SessionTargets {
                course,
                assignments: self
                    .assignments()
                    .iter()
                    .filter(|a| a.course_id == course.id && !a.is_done())
                    .collect(),
            })
            .collect()
    }
}

fn replace_by_id<T>(items: &mut [T], item: T, id: impl Fn(&T) -> Uuid) {
    let target = id(&item);
    if let Some(slot) = items.iter_mut().find(|existing| id(existing) == target) {
        *slot = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::MemoryStore;
    use crate::models::{Color, Priority};
    use time::macros::datetime;

    fn new_course(name: &str) -> NewCourse {
        NewCourse {
            name: name.to_string(),
            code: "C1".to_string(),
            color: Color::default(),
        }
    }

    #[tokio::test]
    async fn each_change_queues_one_write() -> anyhow::Result<()> {
        let mut planner = Planner::load(MemoryStore::new()).await?;
        let course = planner.add_course(new_course("Math"))?;
        planner.add_assignment(NewAssignment {
            title: "Sheet 1".to_string(),
            course_id: course.id,
            description: String::new(),
            due_date: datetime!(2025-03-10 0:00),
            priority: Priority::High,
            estimated_hours: 2.0,
        })?;

        let writes = planner.take_pending();
        let keys: Vec<&str> = writes.iter().map(|w| w.key).collect();
        assert_eq!(keys, vec![COURSES_KEY, ASSIGNMENTS_KEY]);
        assert!(!planner.has_pending());
        Ok(())
    }

    #[tokio::test]
    async fn rejected_changes_queue_nothing() -> anyhow::Result<()> {
        let mut planner = Planner::load(MemoryStore::new()).await?;
        assert!(planner.reset(false).is_err());
        assert!(planner.update_course(Uuid::new_v4(), CourseUpdate::default()).is_err());
        assert!(!planner.has_pending());
        Ok(())
    }
}
