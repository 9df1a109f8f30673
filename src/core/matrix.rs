//! Seven-day by priority grid of upcoming assignments.

use time::{Date, Duration};

use crate::models::{Assignment, Priority};

pub const WEEK_DAYS: usize = 7;

type Cells<'a> = [[Vec<&'a Assignment>; 3]; WEEK_DAYS];

#[derive(Debug, Clone)]
pub struct WeeklyMatrix<'a> {
    days: [Date; WEEK_DAYS],
    cells: Cells<'a>,
}

impl<'a> WeeklyMatrix<'a> {
    /// Bucket `assignments` by due date and priority for the week starting at
    /// `today`. Anything due outside the window is dropped. Done assignments
    /// are not filtered here.
    pub fn build<I>(today: Date, assignments: I) -> Self
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        let days = std::array::from_fn(|offset| today.saturating_add(Duration::days(offset as i64)));
        let mut cells: Cells<'a> = Default::default();

        for assignment in assignments {
            let offset = (assignment.due_date.date() - today).whole_days();
            if !(0..WEEK_DAYS as i64).contains(&offset) {
                continue;
            }
            cells[offset as usize][assignment.priority.row()].push(assignment);
        }

        Self { days, cells }
    }

    pub fn days(&self) -> &[Date; WEEK_DAYS] {
        &self.days
    }

    /// Assignments due on `days()[day]` with `priority`, in input order.
    pub fn bucket(&self, day: usize, priority: Priority) -> &[&'a Assignment] {
        self.cells
            .get(day)
            .map(|row| row[priority.row()].as_slice())
            .unwrap_or(&[])
    }

    pub fn day_index(&self, date: Date) -> Option<usize> {
        self.days.iter().position(|d| *d == date)
    }

    pub fn len(&self) -> usize {
        self.cells.iter().flatten().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
