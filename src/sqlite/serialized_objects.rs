use log::debug;
use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::error::{DomainError, Result};
use crate::query::{Params, Scope};
use crate::repository::SerializedObjectRepository;
use crate::schema::SerializedObject;
use crate::sql::Dialect;
use crate::Record;

use super::records;
use super::SqliteSession;

impl SerializedObjectRepository for SqliteSession<'_> {
    fn serialized_object_with_key(&self, culture_id: i64, object_id: i64) -> Result<Option<SerializedObject>> {
        records::select_one(
            self.conn,
            "WHERE \"CultureId\" = ?1 AND \"ObjectId\" = ?2",
            params![culture_id, object_id],
        )
    }

    fn serialized_object_with_url(&self, culture_id: i64, url: &str) -> Result<Option<SerializedObject>> {
        let statement = self.builder.with_url(culture_id, url).render(Dialect::Sqlite);
        debug!("{} -- {} parameter(s)", statement.sql, statement.params.len());

        Ok(self
            .conn
            .prepare(&statement.sql)?
            .query_row(params_from_iter(statement.params.iter()), SerializedObject::from_row)
            .optional()?)
    }

    fn query_serialized_objects(&self, scope: &Scope, query: &Params) -> Result<Vec<SerializedObject>> {
        let statement = self.builder.select(scope, query).render(Dialect::Sqlite);
        debug!("{} -- {} parameter(s)", statement.sql, statement.params.len());

        let mut prepared = self.conn.prepare(&statement.sql)?;
        let rows = prepared.query_map(params_from_iter(statement.params.iter()), SerializedObject::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn count_serialized_objects(&self, scope: &Scope, query: &Params) -> Result<u64> {
        let statement = self.builder.count(scope, query).render(Dialect::Sqlite);
        debug!("{} -- {} parameter(s)", statement.sql, statement.params.len());

        let count: i64 = self
            .conn
            .prepare(&statement.sql)?
            .query_row(params_from_iter(statement.params.iter()), |row| row.get(0))?;
        u64::try_from(count).map_err(|_| DomainError::QueryExecution(format!("negative count {}", count)))
    }

    fn create_serialized_object(&self, serialized_object: &SerializedObject) -> Result<()> {
        records::insert(self.conn, serialized_object)?;
        Ok(())
    }

    fn edit_serialized_object(&self, serialized_object: &SerializedObject) -> Result<()> {
        match records::update(self.conn, serialized_object)? {
            0 => Err(DomainError::not_found(
                "serialized object",
                format!("{}/{}", serialized_object.culture_id, serialized_object.object_id),
            )),
            _ => Ok(()),
        }
    }

    fn delete_serialized_object(&self, culture_id: i64, object_id: i64) -> Result<()> {
        match records::delete::<SerializedObject>(self.conn, &[&culture_id, &object_id])? {
            0 => Err(DomainError::not_found(
                "serialized object",
                format!("{}/{}", culture_id, object_id),
            )),
            _ => Ok(()),
        }
    }

    fn delete_serialized_objects_by_object(&self, object_id: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM \"SerializedObjects\" WHERE \"ObjectId\" = ?1",
            params![object_id],
        )?;
        Ok(())
    }
}
