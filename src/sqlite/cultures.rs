use rusqlite::{params, OptionalExtension};

use crate::error::{DomainError, Result};
use crate::repository::CultureRepository;
use crate::schema::{Culture, Localization};

use super::records;
use super::SqliteSession;

impl CultureRepository for SqliteSession<'_> {
    fn culture_with_key(&self, id: i64) -> Result<Culture> {
        records::select_one(self.conn, "WHERE \"Id\" = ?1", params![id])?
            .ok_or_else(|| DomainError::not_found("culture", id))
    }

    fn cultures(&self) -> Result<Vec<Culture>> {
        records::select(self.conn, "ORDER BY \"Id\"", [])
    }

    fn not_neutral_cultures(&self) -> Result<Vec<Culture>> {
        records::select(
            self.conn,
            "WHERE \"IsNeutral\" = 0 AND \"Id\" <> ?1 ORDER BY \"Id\"",
            params![self.neutral_culture_id],
        )
    }

    fn create_culture(&self, culture: &mut Culture) -> Result<()> {
        if let Some(id) = records::insert(self.conn, culture)? {
            culture.id = id;
        }
        Ok(())
    }

    fn create_dictionary(&self) -> Result<i64> {
        self.conn.execute("INSERT INTO \"Dictionaries\" DEFAULT VALUES", [])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_dictionary(&self, id: i64) -> Result<()> {
        match self
            .conn
            .execute("DELETE FROM \"Dictionaries\" WHERE \"Id\" = ?1", params![id])?
        {
            0 => Err(DomainError::not_found("dictionary", id)),
            _ => Ok(()),
        }
    }

    fn localizations_by_dictionary(&self, dictionary_id: i64) -> Result<Vec<Localization>> {
        records::select(
            self.conn,
            "WHERE \"DictionaryId\" = ?1 ORDER BY \"CultureId\"",
            params![dictionary_id],
        )
    }

    fn set_localization(&self, dictionary_id: i64, culture_id: i64, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO \"Localizations\" (\"DictionaryId\", \"CultureId\", \"Value\") \
             VALUES (?1, ?2, ?3) \
             ON CONFLICT (\"DictionaryId\", \"CultureId\") DO UPDATE SET \"Value\" = excluded.\"Value\"",
            params![dictionary_id, culture_id, value],
        )?;
        Ok(())
    }

    fn localized_value(
        &self,
        dictionary_id: i64,
        culture_id: i64,
        fallback_culture_id: i64,
    ) -> Result<Option<String>> {
        let value = self
            .conn
            .prepare_cached(
                "SELECT \"Value\" FROM \"Localizations\" \
                 WHERE \"DictionaryId\" = ?1 AND \"CultureId\" IN (?2, ?3) \
                 ORDER BY CASE WHEN \"CultureId\" = ?2 THEN 0 ELSE 1 END \
                 LIMIT 1",
            )?
            .query_row(params![dictionary_id, culture_id, fallback_culture_id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }
}
