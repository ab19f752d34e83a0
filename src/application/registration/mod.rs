//! Register people and read the registry back.

mod validation;

pub use validation::validate;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{PersonRecord, RegistrationError};
use crate::infra::app_config::AppConfig;
use crate::infra::db::Database;

/// Raw text entered by the user, one field per input widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub age: String,
    pub sex: String,
    #[serde(default)]
    pub birth_date: Option<String>,
}

impl RegistrationForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Result of a successful registration.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub record: PersonRecord,
    pub message: String,
    /// Full table read back after the insert, when refreshing is enabled.
    /// A failed read does not undo the registration.
    pub refresh: Option<Result<Vec<PersonRecord>, RegistrationError>>,
}

pub struct RecordService {
    db: Database,
    refresh_after_submit: bool,
}

impl RecordService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            refresh_after_submit: true,
        }
    }

    /// Open the database chosen by `path`, falling back to the config and
    /// then to the platform default.
    pub fn open(config: &AppConfig, path: Option<PathBuf>) -> Result<Self, RegistrationError> {
        let path = path
            .or_else(|| config.db_path.clone())
            .unwrap_or_else(Database::default_path);
        let db = Database::open_at(path).map_err(RegistrationError::StorageUnavailable)?;
        Ok(Self::new(db).with_refresh(config.refresh_after_submit))
    }

    pub fn with_refresh(mut self, refresh_after_submit: bool) -> Self {
        self.refresh_after_submit = refresh_after_submit;
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn ensure_schema(&self) -> Result<(), RegistrationError> {
        self.db.ensure_schema().map_err(|err| {
            log::warn!("Schema check failed: {:#}", err);
            RegistrationError::StorageUnavailable(err)
        })
    }

    /// Validate and store one record.
    ///
    /// The form is cleared only after the row is written; on any error it is
    /// left exactly as the user typed it.
    pub fn submit(&self, form: &mut RegistrationForm) -> Result<SubmitOutcome, RegistrationError> {
        let person = validate(form)?;
        self.ensure_schema()?;

        self.db.person_repo().insert(&person).map_err(|err| {
            log::warn!("Insert of {:?} failed: {:#}", person.name, err);
            RegistrationError::WriteFailed(err)
        })?;
        log::info!("Registered {}", person.name);

        let message = format!("Person {} registered successfully!", person.name);
        form.clear();

        let refresh = self.refresh_after_submit.then(|| self.list_all());

        Ok(SubmitOutcome {
            record: person.into(),
            message,
            refresh,
        })
    }

    /// All records ordered by name.
    pub fn list_all(&self) -> Result<Vec<PersonRecord>, RegistrationError> {
        self.ensure_schema()?;
        let records = self.db.person_repo().list_all().map_err(|err| {
            log::warn!("Reading records failed: {:#}", err);
            RegistrationError::ReadFailed(err)
        })?;
        log::debug!("Read {} records", records.len());
        Ok(records)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize, RegistrationError> {
        self.ensure_schema()?;
        self.db
            .person_repo()
            .count()
            .map_err(RegistrationError::ReadFailed)
    }
}
