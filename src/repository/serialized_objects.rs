use crate::error::Result;
use crate::query::{Params, RelationFilter, Scope};
use crate::schema::SerializedObject;

/// Access to the per-culture serialized-object cache.
///
/// Implementors provide keyed access, writes and the two scoped queries;
/// the named listings are built on top of those.
pub trait SerializedObjectRepository {
    fn serialized_object_with_key(&self, culture_id: i64, object_id: i64) -> Result<Option<SerializedObject>>;

    /// Case-insensitive match on `UrlPropertyStringValue`.
    fn serialized_object_with_url(&self, culture_id: i64, url: &str) -> Result<Option<SerializedObject>>;

    /// Rows in `scope`, filtered/sorted/paged by `params`.
    fn query_serialized_objects(&self, scope: &Scope, params: &Params) -> Result<Vec<SerializedObject>>;

    /// Number of rows `query_serialized_objects` returns for `scope` and
    /// `params` without paging.
    fn count_serialized_objects(&self, scope: &Scope, params: &Params) -> Result<u64>;

    fn create_serialized_object(&self, serialized_object: &SerializedObject) -> Result<()>;

    fn edit_serialized_object(&self, serialized_object: &SerializedObject) -> Result<()>;

    fn delete_serialized_object(&self, culture_id: i64, object_id: i64) -> Result<()>;

    /// Remove the object's rows in every culture.
    fn delete_serialized_objects_by_object(&self, object_id: i64) -> Result<()>;

    fn serialized_objects_by_class(
        &self,
        culture_id: i64,
        class_id: i64,
        params: &Params,
    ) -> Result<Vec<SerializedObject>> {
        self.query_serialized_objects(&Scope::class(culture_id, class_id), params)
    }

    /// Objects of `class_id` referenced by `object_id` through any member.
    fn serialized_objects_by_class_and_object(
        &self,
        culture_id: i64,
        class_id: i64,
        object_id: i64,
        params: &Params,
    ) -> Result<Vec<SerializedObject>> {
        let scope = Scope::class(culture_id, class_id).with_relation(RelationFilter::PrimaryOf {
            foreign_id: object_id,
            member_id: None,
        });
        self.query_serialized_objects(&scope, params)
    }

    /// Objects `object_id` points to (optionally only through `member_id`).
    fn primary_serialized_objects(
        &self,
        culture_id: i64,
        object_id: i64,
        member_id: Option<i64>,
        params: &Params,
    ) -> Result<Vec<SerializedObject>> {
        let scope = Scope::culture(culture_id).with_relation(RelationFilter::PrimaryOf {
            foreign_id: object_id,
            member_id,
        });
        self.query_serialized_objects(&scope, params)
    }

    /// Objects pointing to `object_id` (optionally only through `member_id`).
    fn foreign_serialized_objects(
        &self,
        culture_id: i64,
        object_id: i64,
        member_id: Option<i64>,
        params: &Params,
    ) -> Result<Vec<SerializedObject>> {
        let scope = Scope::culture(culture_id).with_relation(RelationFilter::ForeignOf {
            primary_id: object_id,
            member_id,
        });
        self.query_serialized_objects(&scope, params)
    }

    fn count_serialized_objects_by_class(&self, culture_id: i64, class_id: i64, params: &Params) -> Result<u64> {
        self.count_serialized_objects(&Scope::class(culture_id, class_id), params)
    }

    fn count_serialized_objects_by_class_and_object(
        &self,
        culture_id: i64,
        class_id: i64,
        object_id: i64,
        params: &Params,
    ) -> Result<u64> {
        let scope = Scope::class(culture_id, class_id).with_relation(RelationFilter::PrimaryOf {
            foreign_id: object_id,
            member_id: None,
        });
        self.count_serialized_objects(&scope, params)
    }
}
