//! CLI infrastructure for the registry.
//!
//! Turns command-line input into a form and renders results for a terminal.

use crate::application::registration::{RegistrationForm, validate};
use crate::domain::{PersonRecord, RegistrationError, Severity, Sex};

/// Build a form from `add` arguments, restricting sex to the offered choices
/// the way a drop-down would.
///
/// Missing fields and age errors are reported first; the sex choice is only
/// checked once the form is otherwise valid. Accepted values are stored under
/// their canonical label.
pub fn prepare_form(
    name: String,
    age: String,
    sex: String,
    birth_date: Option<String>,
) -> Result<RegistrationForm, RegistrationError> {
    let mut form = RegistrationForm {
        name,
        age,
        sex,
        birth_date,
    };
    validate(&form)?;

    let choice: Sex = form
        .sex
        .parse()
        .map_err(|_| RegistrationError::UnknownSex(form.sex.clone()))?;
    form.sex = choice.to_string();
    Ok(form)
}

/// Process exit status for a failed command: 2 for bad input, 1 for storage.
pub fn exit_code(err: &RegistrationError) -> u8 {
    if err.is_validation() { 2 } else { 1 }
}

/// One-line message for stderr, e.g. `warning: Attention: All fields ...`.
pub fn render_error(err: &RegistrationError) -> String {
    let level = match err.severity() {
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    format!("{level}: {}: {}", err.title(), err)
}

/// Records as an aligned text table with a header row.
pub fn render_table(records: &[PersonRecord]) -> String {
    let headers = ["Name", "Age", "Sex", "Birth date"];
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.age.to_string(),
                r.sex.clone(),
                r.birth_date.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 4]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = line(headers);
    for row in &rows {
        out.push('\n');
        out.push_str(&line([&row[0], &row[1], &row[2], &row[3]]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, age: i64, sex: &str, birth_date: Option<&str>) -> PersonRecord {
        PersonRecord {
            name: name.into(),
            age,
            sex: sex.into(),
            birth_date: birth_date.map(Into::into),
        }
    }

    #[test]
    fn test_prepare_form_canonicalizes_sex() {
        let form = prepare_form("Ana".into(), "30".into(), "feminino".into(), None).unwrap();
        assert_eq!(form.sex, "Female");
        assert_eq!(form.name, "Ana");
    }

    #[test]
    fn test_prepare_form_reports_missing_fields_before_sex() {
        let err = prepare_form("Ana".into(), "30".into(), String::new(), None).unwrap_err();
        assert!(matches!(err, RegistrationError::MissingFields));

        let err = prepare_form(String::new(), "30".into(), "Robot".into(), None).unwrap_err();
        assert!(matches!(err, RegistrationError::MissingFields));

        let err = prepare_form("Ana".into(), "x".into(), "Robot".into(), None).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidAge(_)));
    }

    #[test]
    fn test_prepare_form_rejects_unknown_sex() {
        let err = prepare_form("Ana".into(), "30".into(), "Robot".into(), None).unwrap_err();
        assert!(matches!(err, RegistrationError::UnknownSex(ref s) if s == "Robot"));
        assert!(err.to_string().contains("Male, Female, Other"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&RegistrationError::MissingFields), 2);
        assert_eq!(exit_code(&RegistrationError::InvalidAge("0".into())), 2);
        assert_eq!(exit_code(&RegistrationError::UnknownSex("x".into())), 2);
        assert_eq!(
            exit_code(&RegistrationError::StorageUnavailable(anyhow::anyhow!("locked"))),
            1
        );
        assert_eq!(
            exit_code(&RegistrationError::ReadFailed(anyhow::anyhow!("io"))),
            1
        );
    }

    #[test]
    fn test_render_error_includes_level_and_title() {
        assert_eq!(
            render_error(&RegistrationError::MissingFields),
            "warning: Attention: All fields must be filled in."
        );
        let text = render_error(&RegistrationError::WriteFailed(anyhow::anyhow!("disk full")));
        assert!(text.starts_with("error: Insert error: "));
        assert!(text.ends_with("disk full"));
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_table(&[]), "Name  Age  Sex  Birth date");
    }

    #[test]
    fn test_render_table_pads_to_widest_cell() {
        let table = render_table(&[
            record("Ana", 30, "Female", Some("1994-05-01")),
            record("Bartolomeu", 7, "Male", None),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name        Age  Sex     Birth date");
        assert_eq!(lines[1], "Ana         30   Female  1994-05-01");
        // Trailing padding of the empty birth date is trimmed.
        assert_eq!(lines[2], "Bartolomeu  7    Male");
    }

    #[test]
    fn test_render_table_counts_characters_not_bytes() {
        let table = render_table(&[record("Zélia", 70, "Female", None)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Name   Age  Sex     Birth date");
        assert_eq!(lines[1], "Zélia  70   Female");
    }
}
