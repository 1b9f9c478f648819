//! Serialization Manager: flattens an object's property rows into one cached
//! document per culture.

use std::collections::HashMap;

use log::{debug, info};

use crate::config::DomainConfig;
use crate::document::SerializedDocument;
use crate::error::Result;
use crate::registry::TypeRegistry;
use crate::repository::{
    CultureRepository, DataTypeRepository, MemberRepository, ObjectRepository, SerializedObjectRepository,
};
use crate::schema::{Member, Object, Property, SerializedObject, StorageDataType};
use crate::value::PropertyValue;

/// Rebuilds `SerializedObjects` rows from `Properties`.
///
/// Writes go through the caller's storage handle, so they belong to
/// whatever transaction the caller has open.
pub struct SerializationManager<'a, S: ?Sized> {
    storage: &'a S,
    config: &'a DomainConfig,
}

impl<'a, S> SerializationManager<'a, S>
where
    S: MemberRepository
        + DataTypeRepository
        + CultureRepository
        + ObjectRepository
        + SerializedObjectRepository
        + ?Sized,
{
    pub fn new(storage: &'a S, config: &'a DomainConfig) -> Self {
        Self { storage, config }
    }

    /// Upsert the object's cache row in every non-neutral culture.
    pub fn serialize_object(&self, object: &Object) -> Result<()> {
        let members = self.storage.members_by_class_including_parent(object.class_id)?;
        let properties: HashMap<i64, Property> = self
            .storage
            .properties_by_object(object.id)?
            .into_iter()
            .map(|property| (property.member_id, property))
            .collect();
        let registry = TypeRegistry::new(self.storage);

        let cultures = self.storage.not_neutral_cultures()?;
        for culture in &cultures {
            let serialized_object =
                self.build(object, culture.id, &members, &properties, &registry)?;

            match self.storage.serialized_object_with_key(culture.id, object.id)? {
                Some(_) => self.storage.edit_serialized_object(&serialized_object)?,
                None => self.storage.create_serialized_object(&serialized_object)?,
            }
        }

        info!(
            "serialized object {} of class {} in {} culture(s)",
            object.id,
            object.class_id,
            cultures.len()
        );
        Ok(())
    }

    /// The cache row of `object` in one culture, without writing it.
    pub fn serialized_object(&self, object: &Object, culture_id: i64) -> Result<SerializedObject> {
        let members = self.storage.members_by_class_including_parent(object.class_id)?;
        let properties: HashMap<i64, Property> = self
            .storage
            .properties_by_object(object.id)?
            .into_iter()
            .map(|property| (property.member_id, property))
            .collect();
        let registry = TypeRegistry::new(self.storage);

        self.build(object, culture_id, &members, &properties, &registry)
    }

    fn build(
        &self,
        object: &Object,
        culture_id: i64,
        members: &[Member],
        properties: &HashMap<i64, Property>,
        registry: &TypeRegistry<'_, S>,
    ) -> Result<SerializedObject> {
        let mut document = SerializedDocument::new();
        let mut url = None;

        for member in members {
            let Some(kind) = registry.member_kind(member)? else {
                continue;
            };
            let Some(property) = properties.get(&member.id) else {
                continue;
            };

            let value = self.property_value(property, kind, culture_id)?;
            if member.code.eq_ignore_ascii_case(&self.config.url_member_code) {
                url = Some(match &value {
                    PropertyValue::String(text) => text.clone(),
                    other => other.to_string(),
                });
            }
            document.push(member.id, member.code.clone(), value);
        }

        debug!(
            "object {} culture {}: {} serialized propert(ies)",
            object.id,
            culture_id,
            document.len()
        );

        Ok(SerializedObject {
            culture_id,
            object_id: object.id,
            class_id: object.class_id,
            url_property_string_value: url,
            serialized_properties: document.encode()?,
        })
    }

    fn property_value(&self, property: &Property, kind: StorageDataType, culture_id: i64) -> Result<PropertyValue> {
        property.value(kind, |dictionary_id| {
            Ok(self
                .storage
                .localized_value(dictionary_id, culture_id, self.config.neutral_culture_id)?
                .unwrap_or_default())
        })
    }
}
