use rusqlite::params;

use crate::error::{DomainError, Result};
use crate::repository::ObjectRepository;
use crate::schema::{Object, Property, Relation};

use super::records;
use super::SqliteSession;

impl ObjectRepository for SqliteSession<'_> {
    fn object_with_key(&self, id: i64) -> Result<Object> {
        records::select_one(self.conn, "WHERE \"Id\" = ?1", params![id])?
            .ok_or_else(|| DomainError::not_found("object", id))
    }

    fn objects_by_class(&self, class_id: i64) -> Result<Vec<Object>> {
        records::select(self.conn, "WHERE \"ClassId\" = ?1 ORDER BY \"Id\"", params![class_id])
    }

    fn create_object(&self, object: &mut Object) -> Result<()> {
        if let Some(id) = records::insert(self.conn, object)? {
            object.id = id;
        }
        Ok(())
    }

    fn delete_object(&self, id: i64) -> Result<()> {
        match records::delete::<Object>(self.conn, &[&id])? {
            0 => Err(DomainError::not_found("object", id)),
            _ => Ok(()),
        }
    }

    fn properties_by_object(&self, object_id: i64) -> Result<Vec<Property>> {
        records::select(self.conn, "WHERE \"ObjectId\" = ?1 ORDER BY \"Id\"", params![object_id])
    }

    fn property_by_object_and_member(&self, object_id: i64, member_id: i64) -> Result<Option<Property>> {
        records::select_one(
            self.conn,
            "WHERE \"ObjectId\" = ?1 AND \"MemberId\" = ?2",
            params![object_id, member_id],
        )
    }

    fn create_property(&self, property: &mut Property) -> Result<()> {
        if let Some(id) = records::insert(self.conn, property)? {
            property.id = id;
        }
        Ok(())
    }

    fn edit_property(&self, property: &Property) -> Result<()> {
        match records::update(self.conn, property)? {
            0 => Err(DomainError::not_found("property", property.id)),
            _ => Ok(()),
        }
    }

    fn delete_property(&self, id: i64) -> Result<()> {
        match records::delete::<Property>(self.conn, &[&id])? {
            0 => Err(DomainError::not_found("property", id)),
            _ => Ok(()),
        }
    }

    fn relations_by_foreign(&self, foreign_id: i64) -> Result<Vec<Relation>> {
        records::select(self.conn, "WHERE \"ForeignId\" = ?1 ORDER BY \"Id\"", params![foreign_id])
    }

    fn relations_by_primary(&self, primary_id: i64) -> Result<Vec<Relation>> {
        records::select(self.conn, "WHERE \"PrimaryId\" = ?1 ORDER BY \"Id\"", params![primary_id])
    }

    fn create_relation(&self, relation: &mut Relation) -> Result<()> {
        if let Some(id) = records::insert(self.conn, relation)? {
            relation.id = id;
        }
        Ok(())
    }

    fn delete_relation(&self, id: i64) -> Result<()> {
        match records::delete::<Relation>(self.conn, &[&id])? {
            0 => Err(DomainError::not_found("relation", id)),
            _ => Ok(()),
        }
    }
}
