//! Resolution of data type ids to storage kinds.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;
use crate::repository::DataTypeRepository;
use crate::schema::{Member, StorageDataType};

/// Memoizing lookup of `DataType.StorageDataType` by data type id.
///
/// Lives for one unit of work; data types edited afterwards are not seen.
pub struct TypeRegistry<'a, R: DataTypeRepository + ?Sized> {
    repository: &'a R,
    kinds: RefCell<HashMap<i64, StorageDataType>>,
}

impl<'a, R: DataTypeRepository + ?Sized> TypeRegistry<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self {
            repository,
            kinds: RefCell::new(HashMap::new()),
        }
    }

    /// Storage kind of a data type. Fails with `NotFound` for an unknown id.
    pub fn resolve_storage_kind(&self, data_type_id: i64) -> Result<StorageDataType> {
        if let Some(kind) = self.kinds.borrow().get(&data_type_id) {
            return Ok(*kind);
        }

        let kind = self.repository.data_type_with_key(data_type_id)?.storage_data_type;
        self.kinds.borrow_mut().insert(data_type_id, kind);
        Ok(kind)
    }

    /// Storage kind of a scalar member; `None` for relation members.
    pub fn member_kind(&self, member: &Member) -> Result<Option<StorageDataType>> {
        member
            .scalar_data_type_id()
            .map(|id| self.resolve_storage_kind(id))
            .transpose()
    }
}
