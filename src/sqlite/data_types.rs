use rusqlite::params;

use crate::error::{DomainError, Result};
use crate::repository::DataTypeRepository;
use crate::schema::{DataType, DataTypeParameter, DataTypeParameterValue};

use super::records;
use super::SqliteSession;

impl DataTypeRepository for SqliteSession<'_> {
    fn data_type_with_key(&self, id: i64) -> Result<DataType> {
        records::select_one(self.conn, "WHERE \"Id\" = ?1", params![id])?
            .ok_or_else(|| DomainError::not_found("data type", id))
    }

    fn data_types(&self) -> Result<Vec<DataType>> {
        records::select(self.conn, "ORDER BY \"Position\" IS NULL, \"Position\", \"Id\"", [])
    }

    fn create_data_type(&self, data_type: &mut DataType) -> Result<()> {
        if let Some(id) = records::insert(self.conn, data_type)? {
            data_type.id = id;
        }
        Ok(())
    }

    fn edit_data_type(&self, data_type: &DataType) -> Result<()> {
        match records::update(self.conn, data_type)? {
            0 => Err(DomainError::not_found("data type", data_type.id)),
            _ => Ok(()),
        }
    }

    fn delete_data_type(&self, id: i64) -> Result<()> {
        match records::delete::<DataType>(self.conn, &[&id])? {
            0 => Err(DomainError::not_found("data type", id)),
            _ => Ok(()),
        }
    }

    fn data_type_parameters_by_data_type(&self, data_type_id: i64) -> Result<Vec<DataTypeParameter>> {
        records::select(
            self.conn,
            "WHERE \"DataTypeId\" = ?1 ORDER BY \"Id\"",
            params![data_type_id],
        )
    }

    fn create_data_type_parameter(&self, parameter: &mut DataTypeParameter) -> Result<()> {
        if let Some(id) = records::insert(self.conn, parameter)? {
            parameter.id = id;
        }
        Ok(())
    }

    fn delete_data_type_parameter(&self, id: i64) -> Result<()> {
        match records::delete::<DataTypeParameter>(self.conn, &[&id])? {
            0 => Err(DomainError::not_found("data type parameter", id)),
            _ => Ok(()),
        }
    }

    fn data_type_parameter_value_by_parameter_and_member(
        &self,
        data_type_parameter_id: i64,
        member_id: i64,
    ) -> Result<Option<DataTypeParameterValue>> {
        records::select_one(
            self.conn,
            "WHERE \"DataTypeParameterId\" = ?1 AND \"MemberId\" = ?2",
            params![data_type_parameter_id, member_id],
        )
    }

    fn data_type_parameter_values_by_member(&self, member_id: i64) -> Result<Vec<DataTypeParameterValue>> {
        records::select(self.conn, "WHERE \"MemberId\" = ?1 ORDER BY \"Id\"", params![member_id])
    }

    fn create_data_type_parameter_value(&self, value: &mut DataTypeParameterValue) -> Result<()> {
        if let Some(id) = records::insert(self.conn, value)? {
            value.id = id;
        }
        Ok(())
    }

    fn edit_data_type_parameter_value(&self, value: &DataTypeParameterValue) -> Result<()> {
        match records::update(self.conn, value)? {
            0 => Err(DomainError::not_found("data type parameter value", value.id)),
            _ => Ok(()),
        }
    }
}
