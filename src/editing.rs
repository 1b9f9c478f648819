//! Object editing workflow.
//!
//! Every write runs in one transaction together with the registered event
//! handlers, so a failing handler (e.g. a serialization error) leaves the
//! store untouched. Post-commit notifications follow a successful commit.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};
use log::info;

use crate::error::{DomainError, Result};
use crate::events::ObjectEvents;
use crate::registry::TypeRegistry;
use crate::repository::{DataTypeRepository, MemberRepository, Storage, Transactional};
use crate::schema::{DataTypeParameterValue, Member, Object, Property, Relation, StorageDataType};

/// Submitted value of one scalar member.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyInput {
    Integer(i64),
    Decimal(f64),
    DateTime(DateTime<Utc>),
    /// Text per culture id.
    Localized(Vec<(i64, String)>),
}

impl PropertyInput {
    pub fn storage_data_type(&self) -> StorageDataType {
        match self {
            PropertyInput::Integer(_) => StorageDataType::Integer,
            PropertyInput::Decimal(_) => StorageDataType::Decimal,
            PropertyInput::DateTime(_) => StorageDataType::DateTime,
            PropertyInput::Localized(_) => StorageDataType::String,
        }
    }
}

/// Property values and relation targets submitted for one object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectInput {
    pub properties: Vec<(i64, PropertyInput)>,
    /// Relation member id to the primary object ids it points to. Listed
    /// members have their relations replaced; others are left alone.
    pub relations: Vec<(i64, Vec<i64>)>,
}

impl ObjectInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, member_id: i64, value: PropertyInput) -> Self {
        self.properties.push((member_id, value));
        self
    }

    pub fn relation(mut self, member_id: i64, primary_ids: impl IntoIterator<Item = i64>) -> Self {
        self.relations.push((member_id, primary_ids.into_iter().collect()));
        self
    }
}

pub struct ObjectEditor<'a, S> {
    storage: &'a S,
    events: &'a ObjectEvents<S>,
}

impl<'a, S> ObjectEditor<'a, S>
where
    S: Storage + Transactional,
{
    pub fn new(storage: &'a S, events: &'a ObjectEvents<S>) -> Self {
        Self { storage, events }
    }

    pub fn create(&self, class_id: i64, input: &ObjectInput) -> Result<Object> {
        let object = self.storage.transaction(|storage| {
            storage.class_with_key(class_id)?;
            let mut object = Object { id: 0, class_id };
            storage.create_object(&mut object)?;

            Self::write(storage, &object, input)?;
            self.events.object_edited(storage, None, &object)?;

            info!("created object {} of class {}", object.id, class_id);
            Ok(object)
        })?;
        self.events.objects_committed(self.storage, std::slice::from_ref(&object))?;
        Ok(object)
    }

    pub fn edit(&self, object_id: i64, input: &ObjectInput) -> Result<Object> {
        let object = self.storage.transaction(|storage| {
            let object = storage.object_with_key(object_id)?;

            Self::write(storage, &object, input)?;
            self.events.object_edited(storage, Some(&object), &object)?;

            info!("edited object {}", object.id);
            Ok(object)
        })?;
        self.events.objects_committed(self.storage, std::slice::from_ref(&object))?;
        Ok(object)
    }

    /// Remove the object with its properties, relations and cache rows.
    pub fn delete(&self, object_id: i64) -> Result<()> {
        let object = self.storage.transaction(|storage| {
            let object = storage.object_with_key(object_id)?;
            self.events.object_deleted(storage, &object)?;

            for property in storage.properties_by_object(object.id)? {
                storage.delete_property(property.id)?;
                if let Some(dictionary_id) = property.string_value_id {
                    storage.delete_dictionary(dictionary_id)?;
                }
            }
            // a self-reference shows up on both sides
            let relations: BTreeSet<i64> = storage
                .relations_by_foreign(object.id)?
                .into_iter()
                .chain(storage.relations_by_primary(object.id)?)
                .map(|relation| relation.id)
                .collect();
            for relation_id in relations {
                storage.delete_relation(relation_id)?;
            }
            storage.delete_serialized_objects_by_object(object.id)?;
            storage.delete_object(object.id)?;

            info!("deleted object {}", object.id);
            Ok(object)
        })?;
        self.events.objects_committed(self.storage, std::slice::from_ref(&object))
    }

    fn write(storage: &S, object: &Object, input: &ObjectInput) -> Result<()> {
        let members: HashMap<i64, Member> = storage
            .members_by_class_including_parent(object.class_id)?
            .into_iter()
            .map(|member| (member.id, member))
            .collect();
        let registry = TypeRegistry::new(storage);

        for (member_id, value) in &input.properties {
            let member = Self::member_of(&members, object, *member_id)?;
            let kind = registry.member_kind(member)?.ok_or_else(|| {
                DomainError::Validation(format!("member {} is a relation", member.code))
            })?;
            if kind != value.storage_data_type() {
                return Err(DomainError::Validation(format!(
                    "member {} stores {} values, got {}",
                    member.code,
                    kind,
                    value.storage_data_type()
                )));
            }
            Self::write_property(storage, object, member, value)?;
        }

        for (member_id, primary_ids) in &input.relations {
            let member = Self::member_of(&members, object, *member_id)?;
            let Some(relation_class_id) = member.relation_class_id else {
                return Err(DomainError::Validation(format!(
                    "member {} is not a relation",
                    member.code
                )));
            };
            Self::write_relations(storage, object, member, relation_class_id, primary_ids)?;
        }

        Ok(())
    }

    fn member_of<'m>(members: &'m HashMap<i64, Member>, object: &Object, member_id: i64) -> Result<&'m Member> {
        members.get(&member_id).ok_or_else(|| {
            DomainError::Validation(format!(
                "member {} does not belong to class {}",
                member_id, object.class_id
            ))
        })
    }

    fn write_property(storage: &S, object: &Object, member: &Member, value: &PropertyInput) -> Result<()> {
        let existing = storage.property_by_object_and_member(object.id, member.id)?;
        let mut property = existing
            .clone()
            .unwrap_or_else(|| Property::new(object.id, member.id));

        match value {
            PropertyInput::Integer(v) => property.integer_value = Some(*v),
            PropertyInput::Decimal(v) => property.decimal_value = Some(*v),
            PropertyInput::DateTime(v) => property.date_time_value = Some(*v),
            PropertyInput::Localized(texts) => {
                let dictionary_id = match property.string_value_id {
                    Some(id) => id,
                    None => storage.create_dictionary()?,
                };
                for (culture_id, text) in texts {
                    storage.set_localization(dictionary_id, *culture_id, text)?;
                }
                property.string_value_id = Some(dictionary_id);
            }
        }

        match existing {
            Some(_) => storage.edit_property(&property),
            None => storage.create_property(&mut property),
        }
    }

    fn write_relations(
        storage: &S,
        object: &Object,
        member: &Member,
        relation_class_id: i64,
        primary_ids: &[i64],
    ) -> Result<()> {
        for relation in storage.relations_by_foreign(object.id)? {
            if relation.member_id == member.id {
                storage.delete_relation(relation.id)?;
            }
        }

        for primary_id in primary_ids {
            let primary = storage.object_with_key(*primary_id)?;
            if !Self::is_instance_of(storage, primary.class_id, relation_class_id)? {
                return Err(DomainError::Validation(format!(
                    "object {} cannot be referenced through member {}",
                    primary.id, member.code
                )));
            }

            let mut relation = Relation {
                id: 0,
                member_id: member.id,
                primary_id: primary.id,
                foreign_id: object.id,
            };
            storage.create_relation(&mut relation)?;
        }
        Ok(())
    }

    /// Whether `class_id` is `ancestor_id` or inherits from it.
    fn is_instance_of(storage: &S, class_id: i64, ancestor_id: i64) -> Result<bool> {
        let mut next = Some(class_id);
        let mut steps = 0;
        while let Some(id) = next {
            if id == ancestor_id {
                return Ok(true);
            }
            steps += 1;
            if steps > 64 {
                return Err(DomainError::Validation(format!(
                    "class {} has a cyclic parent chain",
                    class_id
                )));
            }
            next = storage.class_with_key(id)?.parent_id;
        }
        Ok(false)
    }
}

/// Member deletion workflow.
///
/// Deleting a member drops its properties, so every object of the owning
/// class and of its subclasses is reserialized in the same transaction.
pub struct MemberEditor<'a, S> {
    storage: &'a S,
    events: &'a ObjectEvents<S>,
}

impl<'a, S> MemberEditor<'a, S>
where
    S: Storage + Transactional,
{
    pub fn new(storage: &'a S, events: &'a ObjectEvents<S>) -> Self {
        Self { storage, events }
    }

    /// Delete the member and rebuild the objects that carried it. Returns
    /// the rebuilt objects.
    pub fn delete(&self, member_id: i64) -> Result<Vec<Object>> {
        let objects = self.storage.transaction(|storage| {
            let member = storage.member_with_key(member_id)?;
            storage.delete_member(member.id)?;

            let mut objects = Vec::new();
            for class_id in Self::class_with_descendants(storage, member.class_id)? {
                objects.extend(storage.objects_by_class(class_id)?);
            }
            for object in &objects {
                self.events.object_edited(storage, Some(object), object)?;
            }

            info!(
                "deleted member {} of class {}, rebuilt {} object(s)",
                member.code,
                member.class_id,
                objects.len()
            );
            Ok(objects)
        })?;
        self.events.objects_committed(self.storage, &objects)?;
        Ok(objects)
    }

    fn class_with_descendants(storage: &S, class_id: i64) -> Result<Vec<i64>> {
        let mut found = vec![class_id];
        let mut visited = HashSet::from([class_id]);
        let mut index = 0;
        while index < found.len() {
            for child in storage.classes_by_parent(found[index])? {
                if visited.insert(child.id) {
                    found.push(child.id);
                }
            }
            index += 1;
        }
        Ok(found)
    }
}

/// Create or overwrite the data type parameter values of a member.
///
/// Every parameter must belong to the member's data type.
pub fn set_data_type_parameter_values<S>(storage: &S, member_id: i64, values: &[(i64, String)]) -> Result<()>
where
    S: MemberRepository + DataTypeRepository + ?Sized,
{
    let member = storage.member_with_key(member_id)?;
    let data_type_id = member.scalar_data_type_id().ok_or_else(|| {
        DomainError::Validation(format!("relation member {} has no data type", member.code))
    })?;
    let parameters = storage.data_type_parameters_by_data_type(data_type_id)?;

    for (parameter_id, value) in values {
        if !parameters.iter().any(|p| p.id == *parameter_id) {
            return Err(DomainError::Validation(format!(
                "parameter {} does not belong to data type {}",
                parameter_id, data_type_id
            )));
        }

        match storage.data_type_parameter_value_by_parameter_and_member(*parameter_id, member.id)? {
            Some(mut existing) => {
                existing.value = value.clone();
                storage.edit_data_type_parameter_value(&existing)?;
            }
            None => {
                let mut created = DataTypeParameterValue {
                    id: 0,
                    data_type_parameter_id: *parameter_id,
                    member_id: member.id,
                    value: value.clone(),
                };
                storage.create_data_type_parameter_value(&mut created)?;
            }
        }
    }
    Ok(())
}
