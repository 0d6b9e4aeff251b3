//! Attendance recording form.

use crate::server::model::form::{FormInput, FormParser, FormValues, ValidationErrors};

/// Attendance ids ticked on the attendance list.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendedForm {
    pub attendance_ids: Vec<i64>,
}

impl FormInput for AttendedForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let selected = form.required_all("selectedAttendances", "Select at least one person");

        let attendance_ids: Vec<i64> = selected
            .iter()
            .filter_map(|value| value.parse::<i64>().ok())
            .collect();

        if attendance_ids.len() != selected.len() {
            form.error("selectedAttendances", "Select people from the attendance list");
        }

        form.finish(move || Some(Self { attendance_ids }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_every_selected_attendance() {
        let values = FormValues::new(vec![
            ("selectedAttendances".to_string(), "11".to_string()),
            ("selectedAttendances".to_string(), "12".to_string()),
        ]);
        assert_eq!(AttendedForm::parse(&values).unwrap().attendance_ids, vec![11, 12]);
    }

    #[test]
    fn requires_a_selection() {
        let errors = AttendedForm::parse(&FormValues::default()).unwrap_err();
        assert_eq!(
            errors.message_for("selectedAttendances"),
            Some("Select at least one person")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let values = FormValues::new(vec![("selectedAttendances".to_string(), "abc".to_string())]);
        assert!(AttendedForm::parse(&values).is_err());
    }
}
