use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex choices offered by a registration front end.
///
/// Storage keeps the value as plain text and never enforces membership, so
/// records read back carry a `String` rather than this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Other];

    /// The choices as a front end lists them, e.g. "Male, Female, Other".
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(Sex::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Sex {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Portuguese labels come from data files written by the first revision.
        match s.trim().to_lowercase().as_str() {
            "male" | "masculino" => Ok(Self::Male),
            "female" | "feminino" => Ok(Self::Female),
            "other" | "outro" => Ok(Self::Other),
            other => Err(format!("unknown sex: {other}")),
        }
    }
}

/// One person's registration as stored in the `pessoas` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub age: i64,
    pub sex: String,
    /// Free-form date text, stored exactly as entered.
    #[serde(default)]
    pub birth_date: Option<String>,
}

/// A record that passed input validation and is ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub age: i64,
    pub sex: String,
    pub birth_date: Option<String>,
}

impl From<NewPerson> for PersonRecord {
    fn from(person: NewPerson) -> Self {
        Self {
            name: person.name,
            age: person.age,
            sex: person.sex,
            birth_date: person.birth_date,
        }
    }
}
