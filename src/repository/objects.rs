use crate::error::Result;
use crate::schema::{Object, Property, Relation};

pub trait ObjectRepository {
    /// Fails with `NotFound` for an unknown id.
    fn object_with_key(&self, id: i64) -> Result<Object>;

    fn objects_by_class(&self, class_id: i64) -> Result<Vec<Object>>;

    fn create_object(&self, object: &mut Object) -> Result<()>;

    /// Removes the object row only; callers remove dependent rows first.
    fn delete_object(&self, id: i64) -> Result<()>;

    fn properties_by_object(&self, object_id: i64) -> Result<Vec<Property>>;

    fn property_by_object_and_member(&self, object_id: i64, member_id: i64) -> Result<Option<Property>>;

    fn create_property(&self, property: &mut Property) -> Result<()>;

    fn edit_property(&self, property: &Property) -> Result<()>;

    fn delete_property(&self, id: i64) -> Result<()>;

    /// Relations where the object is the foreign (referencing) endpoint.
    fn relations_by_foreign(&self, foreign_id: i64) -> Result<Vec<Relation>>;

    /// Relations where the object is the primary (referenced) endpoint.
    fn relations_by_primary(&self, primary_id: i64) -> Result<Vec<Relation>>;

    fn create_relation(&self, relation: &mut Relation) -> Result<()>;

    fn delete_relation(&self, id: i64) -> Result<()>;
}
