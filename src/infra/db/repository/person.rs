use super::{DbConn, lock};
use crate::domain::{NewPerson, PersonRecord};
use anyhow::Result;

/// Repository for the `pessoas` table.
pub struct PersonRepository {
    conn: DbConn,
}

impl PersonRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    pub fn insert(&self, person: &NewPerson) -> Result<()> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO pessoas (nome, idade, sexo, data_nascimento) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![&person.name, person.age, &person.sex, &person.birth_date],
        )?;
        Ok(())
    }

    /// Every stored record, ordered by name with SQLite's default collation.
    pub fn list_all(&self) -> Result<Vec<PersonRecord>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT nome, idade, sexo, data_nascimento FROM pessoas ORDER BY nome ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PersonRecord {
                name: row.get(0)?,
                age: row.get::<_, Option<i64>>(1)?.unwrap_or_default(),
                sex: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                birth_date: row.get(3)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn count(&self) -> Result<usize> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pessoas", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
