//! Add/edit forms and the assignment detail view.
//!
//! Forms hold raw user input. `validate` either yields a complete record or a
//! single [`FormError`]; nothing is applied on failure.

use time::{Date, PrimitiveDateTime, Time, macros::{date, format_description}};
use uuid::Uuid;

use crate::models::{
    Assignment, AssignmentUpdate, Color, Course, CourseUpdate, NewAssignment, NewCourse, Priority,
    Status,
};

/// Latest due date the assignment form accepts.
pub const MAX_DUE_DATE: Date = date!(2999 - 12 - 31);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in all required fields ({0} is missing).")]
    MissingField(&'static str),

    #[error("invalid due date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("due date must not be after 2999-12-31")]
    DateOutOfRange,

    #[error("estimated hours must be a non-negative number")]
    InvalidHours,

    #[error("unknown course: {0}")]
    UnknownCourse(Uuid),
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseForm {
    pub name: String,
    pub code: String,
    pub color: Color,
}

impl CourseForm {
    pub fn from_course(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            code: course.code.clone(),
            color: course.color,
        }
    }

    pub fn validate(&self) -> Result<NewCourse, FormError> {
        Ok(NewCourse {
            name: required(&self.name, "name")?,
            code: required(&self.code, "code")?,
            color: self.color,
        })
    }

    /// The edit-form counterpart of `validate`: every field is replaced.
    pub fn validate_update(&self) -> Result<CourseUpdate, FormError> {
        let course = self.validate()?;
        Ok(CourseUpdate {
            name: Some(course.name),
            code: Some(course.code),
            color: Some(course.color),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentForm {
    pub title: String,
    pub course_id: Option<Uuid>,
    pub description: String,
    /// `YYYY-MM-DD` as typed.
    pub due_date: String,
    pub priority: Priority,
    pub estimated_hours: f64,
}

impl Default for AssignmentForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            course_id: None,
            description: String::new(),
            due_date: String::new(),
            priority: Priority::Medium,
            estimated_hours: 1.0,
        }
    }
}

impl AssignmentForm {
    /// Blank form, preselecting `default_course` or else the first course.
    pub fn new(courses: &[Course], default_course: Option<Uuid>) -> Self {
        Self {
            course_id: default_course.or_else(|| courses.first().map(|c| c.id)),
            ..Self::default()
        }
    }

    pub fn from_assignment(assignment: &Assignment) -> Self {
        Self {
            title: assignment.title.clone(),
            course_id: Some(assignment.course_id),
            description: assignment.description.clone(),
            due_date: format_date(assignment.due_date.date()),
            priority: assignment.priority,
            estimated_hours: assignment.estimated_hours,
        }
    }

    pub fn validate(&self, courses: &[Course]) -> Result<NewAssignment, FormError> {
        let title = required(&self.title, "title")?;
        let course_id = self.course_id.ok_or(FormError::MissingField("course"))?;
        let due_date = required(&self.due_date, "due date")?;
        let due_date = parse_due_date(&due_date)?;

        if !self.estimated_hours.is_finite() || self.estimated_hours < 0.0 {
            return Err(FormError::InvalidHours);
        }
        if !courses.iter().any(|c| c.id == course_id) {
            return Err(FormError::UnknownCourse(course_id));
        }

        Ok(NewAssignment {
            title,
            course_id,
            description: self.description.clone(),
            due_date,
            priority: self.priority,
            estimated_hours: self.estimated_hours,
        })
    }

    /// Edit-form submit. Status is left alone.
    pub fn validate_update(&self, courses: &[Course]) -> Result<AssignmentUpdate, FormError> {
        let assignment = self.validate(courses)?;
        Ok(AssignmentUpdate {
            title: Some(assignment.title),
            course_id: Some(assignment.course_id),
            description: Some(assignment.description),
            due_date: Some(assignment.due_date),
            priority: Some(assignment.priority),
            estimated_hours: Some(assignment.estimated_hours),
            status: None,
        })
    }
}

fn format_date(date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    date.format(&format).unwrap_or_else(|_| date.to_string())
}

/// Parse `YYYY-MM-DD` into local midnight of that day.
pub fn parse_due_date(input: &str) -> Result<PrimitiveDateTime, FormError> {
    let format = format_description!("[year]-[month]-[day]");
    let date = Date::parse(input.trim(), &format)
        .map_err(|_| FormError::InvalidDate(input.to_string()))?;
    if date > MAX_DUE_DATE {
        return Err(FormError::DateOutOfRange);
    }
    Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DetailError {
    #[error("status has unsaved changes; save or discard them first")]
    UnsavedChanges,
}

/// Read-only view of one assignment with an editable, not yet saved, status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    assignment_id: Uuid,
    saved_status: Status,
    local_status: Status,
}

impl DetailView {
    pub fn open(assignment: &Assignment) -> Self {
        Self {
            assignment_id: assignment.id,
            saved_status: assignment.status,
            local_status: assignment.status,
        }
    }

    pub fn assignment_id(&self) -> Uuid {
        self.assignment_id
    }

    pub fn status(&self) -> Status {
        self.local_status
    }

    pub fn set_status(&mut self, status: Status) {
        self.local_status = status;
    }

    pub fn has_changes(&self) -> bool {
        self.local_status != self.saved_status
    }

    pub fn discard(&mut self) {
        self.local_status = self.saved_status;
    }

    /// Closing is refused while the status differs from the saved one.
    pub fn try_close(&self) -> Result<(), DetailError> {
        if self.has_changes() {
            return Err(DetailError::UnsavedChanges);
        }
        Ok(())
    }

    /// Close and return the status change to apply, if there is one.
    pub fn save(self) -> Option<(Uuid, Status)> {
        self.has_changes()
            .then_some((self.assignment_id, self.local_status))
    }
}
