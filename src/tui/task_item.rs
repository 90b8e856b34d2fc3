//! Per-row display mode for the task list.
//!
//! Each row is either shown read-only or being edited in place. Rows switch
//! modes independently of each other.

use chrono::NaiveDate;

use crate::{
    dates::format_date,
    error::FormError,
    task::Task,
    tui::{input::InputField, task_form::parse_field},
};

/// Display mode of one task row.
#[derive(Debug, Clone, Default)]
pub enum ItemMode {
    #[default]
    View,
    Edit(TaskEditor),
}

impl ItemMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, ItemMode::Edit(_))
    }
}

/// Which editor input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Description,
    EndDate,
}

/// Edit buffer for the fields that can be changed in place.
#[derive(Debug, Clone)]
pub struct TaskEditor {
    pub description: InputField,
    pub end_date: InputField,
    pub focus: EditorField,
}

impl TaskEditor {
    /// Start editing with the task's current values.
    pub fn from_task(task: &Task) -> Self {
        let mut editor = Self {
            description: InputField::with_value(&task.description),
            end_date: InputField::with_value(&format_date(task.end_date)),
            focus: EditorField::Description,
        };
        editor.sync_active();
        editor
    }

    fn sync_active(&mut self) {
        self.description.active = self.focus == EditorField::Description;
        self.end_date.active = self.focus == EditorField::EndDate;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            EditorField::Description => EditorField::EndDate,
            EditorField::EndDate => EditorField::Description,
        };
        self.sync_active();
    }

    pub fn current_mut(&mut self) -> &mut InputField {
        match self.focus {
            EditorField::Description => &mut self.description,
            EditorField::EndDate => &mut self.end_date,
        }
    }

    /// Merge the edited description and end date into `task`.
    ///
    /// Every other field is carried over unchanged.
    pub fn apply_to(&self, task: &Task, today: NaiveDate) -> Result<Task, FormError> {
        let end_date = parse_field(&self.end_date, "End", today)?;
        Ok(Task {
            description: self.description.value.clone(),
            end_date,
            ..task.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Status;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Task {
        Task {
            id: 7,
            code: "TASK7".into(),
            description: "Draft".into(),
            start_date: date(2024, 4, 1),
            end_date: date(2024, 4, 9),
            status: Status::Completed,
        }
    }

    #[test]
    fn test_editor_starts_from_task_values() {
        let editor = TaskEditor::from_task(&sample());
        assert_eq!(editor.description.value, "Draft");
        assert_eq!(editor.end_date.value, "2024-04-09");
        assert!(editor.description.active);
        assert!(!editor.end_date.active);
    }

    #[test]
    fn test_apply_merges_only_editable_fields() {
        let task = sample();
        let mut editor = TaskEditor::from_task(&task);
        editor.current_mut().handle_char('!');
        editor.toggle_focus();
        editor.end_date = InputField::with_value("2024-04-20");

        let updated = editor.apply_to(&task, date(2024, 4, 2)).unwrap();
        assert_eq!(updated.description, "Draft!");
        assert_eq!(updated.end_date, date(2024, 4, 20));
        assert_eq!(updated.id, 7);
        assert_eq!(updated.code, "TASK7");
        assert_eq!(updated.start_date, date(2024, 4, 1));
        assert_eq!(updated.status, Status::Completed);
    }

    #[test]
    fn test_apply_rejects_bad_end_date() {
        let task = sample();
        let mut editor = TaskEditor::from_task(&task);
        editor.end_date.clear();
        assert_eq!(
            editor.apply_to(&task, date(2024, 4, 2)),
            Err(FormError::MissingDate { field: "End" })
        );
    }

    #[test]
    fn test_mode_tag() {
        assert!(!ItemMode::default().is_editing());
        assert!(ItemMode::Edit(TaskEditor::from_task(&sample())).is_editing());
    }
}
