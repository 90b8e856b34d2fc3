//! Task creation form for the terminal user interface.
//!
//! This module provides the `TaskForm` structure: three inputs (description,
//! start date, end date), field focus handling, and conversion of the entered
//! text into a `NewTask`.

use chrono::NaiveDate;

use crate::{dates::parse_date_input, error::FormError, task::NewTask, tui::input::InputField};

/// Field order in the creation form.
pub const DESCRIPTION_FIELD: usize = 0;
pub const START_DATE_FIELD: usize = 1;
pub const END_DATE_FIELD: usize = 2;
const FIELD_COUNT: usize = 3;

/// Creation form state.
#[derive(Debug)]
pub struct TaskForm {
    pub description: InputField,
    pub start_date: InputField,
    pub end_date: InputField,
    pub current_field: usize,
}

impl TaskForm {
    pub fn new() -> Self {
        let mut form = Self {
            description: InputField::new(),
            start_date: InputField::new(),
            end_date: InputField::new(),
            current_field: DESCRIPTION_FIELD,
        };
        form.update_active_field();
        form
    }

    fn fields_mut(&mut self) -> [&mut InputField; FIELD_COUNT] {
        [&mut self.description, &mut self.start_date, &mut self.end_date]
    }

    /// The field that currently receives keystrokes.
    pub fn current_mut(&mut self) -> &mut InputField {
        match self.current_field {
            START_DATE_FIELD => &mut self.start_date,
            END_DATE_FIELD => &mut self.end_date,
            _ => &mut self.description,
        }
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    pub fn update_active_field(&mut self) {
        let current = self.current_field;
        for (i, field) in self.fields_mut().into_iter().enumerate() {
            field.active = i == current;
        }
    }

    /// Mark all fields inactive, e.g. when focus leaves the form.
    pub fn blur(&mut self) {
        for field in self.fields_mut() {
            field.active = false;
        }
    }

    /// Validate the entered values and build a creation request.
    ///
    /// Start and end dates are not checked against each other.
    pub fn to_new_task(&self, today: NaiveDate) -> Result<NewTask, FormError> {
        let description = self.description.value.trim();
        if description.is_empty() {
            return Err(FormError::MissingDescription);
        }
        let start_date = parse_field(&self.start_date, "Start", today)?;
        let end_date = parse_field(&self.end_date, "End", today)?;
        Ok(NewTask::new(description, start_date, end_date))
    }

    /// Build the creation request and, on success, clear every field.
    pub fn submit(&mut self, today: NaiveDate) -> Result<NewTask, FormError> {
        let task = self.to_new_task(today)?;
        for field in self.fields_mut() {
            field.clear();
        }
        self.current_field = DESCRIPTION_FIELD;
        self.update_active_field();
        Ok(task)
    }
}

/// Parse a required date input.
pub fn parse_field(field: &InputField, name: &'static str, today: NaiveDate) -> Result<NaiveDate, FormError> {
    let raw = field.value.trim();
    if raw.is_empty() {
        return Err(FormError::MissingDate { field: name });
    }
    parse_date_input(raw, today).ok_or_else(|| FormError::InvalidDate {
        field: name,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled(desc: &str, start: &str, end: &str) -> TaskForm {
        let mut form = TaskForm::new();
        form.description = InputField::with_value(desc);
        form.start_date = InputField::with_value(start);
        form.end_date = InputField::with_value(end);
        form
    }

    #[test]
    fn test_submit_builds_request_and_clears() {
        let mut form = filled("  Write report ", "2024-03-01", "tomorrow");
        form.next_field();
        let task = form.submit(date(2024, 3, 4)).unwrap();
        assert_eq!(task, NewTask::new("Write report", date(2024, 3, 1), date(2024, 3, 5)));
        assert!(form.description.value.is_empty());
        assert!(form.start_date.value.is_empty());
        assert!(form.end_date.value.is_empty());
        assert_eq!(form.current_field, DESCRIPTION_FIELD);
        assert!(form.description.active);
    }

    #[test]
    fn test_missing_fields_are_refused_and_kept() {
        let today = date(2024, 3, 4);
        let mut form = filled("   ", "2024-03-01", "2024-03-02");
        assert_eq!(form.submit(today), Err(FormError::MissingDescription));
        assert_eq!(form.start_date.value, "2024-03-01");

        let mut form = filled("x", "", "2024-03-02");
        assert_eq!(form.submit(today), Err(FormError::MissingDate { field: "Start" }));

        let mut form = filled("x", "2024-03-01", "someday");
        assert_eq!(
            form.submit(today),
            Err(FormError::InvalidDate { field: "End", value: "someday".into() })
        );
        assert_eq!(form.end_date.value, "someday");
    }

    #[test]
    fn test_end_before_start_is_accepted() {
        let mut form = filled("backwards", "2024-05-10", "2024-05-01");
        let task = form.submit(date(2024, 1, 1)).unwrap();
        assert!(task.end_date < task.start_date);
    }

    #[test]
    fn test_field_cycling() {
        let mut form = TaskForm::new();
        assert!(form.description.active);
        form.prev_field();
        assert_eq!(form.current_field, END_DATE_FIELD);
        assert!(form.end_date.active && !form.description.active);
        form.next_field();
        form.next_field();
        assert_eq!(form.current_field, START_DATE_FIELD);
        form.current_mut().handle_char('t');
        assert_eq!(form.start_date.value, "t");
        form.blur();
        assert!(!form.start_date.active);
    }
}
