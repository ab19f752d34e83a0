use crate::domain::{NewPerson, RegistrationError};

use super::RegistrationForm;

/// Check a form and turn it into an insertable record.
///
/// Required fields are checked before the age, so a form with both an empty
/// name and a bad age reports the missing fields. Name and sex are kept
/// exactly as typed; only the age is trimmed, for parsing. Sex membership and
/// the birth date format are left to the front end.
pub fn validate(form: &RegistrationForm) -> Result<NewPerson, RegistrationError> {
    if form.name.is_empty() || form.age.is_empty() || form.sex.is_empty() {
        return Err(RegistrationError::MissingFields);
    }

    let age_text = form.age.trim();
    let age = match age_text.parse::<i64>() {
        Ok(age) if age > 0 => age,
        _ => return Err(RegistrationError::InvalidAge(age_text.to_string())),
    };

    let birth_date = form.birth_date.clone().filter(|v| !v.is_empty());

    Ok(NewPerson {
        name: form.name.clone(),
        age,
        sex: form.sex.clone(),
        birth_date,
    })
}
