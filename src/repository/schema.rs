use crate::error::Result;
use crate::schema::{Class, DataType, DataTypeParameter, DataTypeParameterValue, Member};

pub trait ClassRepository {
    /// Fails with `NotFound` for an unknown id.
    fn class_with_key(&self, id: i64) -> Result<Class>;

    fn classes(&self) -> Result<Vec<Class>>;

    /// Classes whose parent is `parent_id`.
    fn classes_by_parent(&self, parent_id: i64) -> Result<Vec<Class>>;

    /// Insert and assign `class.id`.
    fn create_class(&self, class: &mut Class) -> Result<()>;

    fn edit_class(&self, class: &Class) -> Result<()>;

    fn delete_class(&self, id: i64) -> Result<()>;
}

pub trait MemberRepository {
    /// Fails with `NotFound` for an unknown id.
    fn member_with_key(&self, id: i64) -> Result<Member>;

    /// Own members of a class, ordered by position.
    fn members_by_class(&self, class_id: i64) -> Result<Vec<Member>>;

    /// Members of the class and of its parent chain, ordered by position.
    fn members_by_class_including_parent(&self, class_id: i64) -> Result<Vec<Member>>;

    /// Insert and assign `member.id`.
    fn create_member(&self, member: &mut Member) -> Result<()>;

    fn edit_member(&self, member: &Member) -> Result<()>;

    /// Removes the member with its properties, relations and parameter values.
    fn delete_member(&self, id: i64) -> Result<()>;
}

pub trait DataTypeRepository {
    /// Fails with `NotFound` for an unknown id.
    fn data_type_with_key(&self, id: i64) -> Result<DataType>;

    fn data_types(&self) -> Result<Vec<DataType>>;

    fn create_data_type(&self, data_type: &mut DataType) -> Result<()>;

    fn edit_data_type(&self, data_type: &DataType) -> Result<()>;

    fn delete_data_type(&self, id: i64) -> Result<()>;

    fn data_type_parameters_by_data_type(&self, data_type_id: i64) -> Result<Vec<DataTypeParameter>>;

    fn create_data_type_parameter(&self, parameter: &mut DataTypeParameter) -> Result<()>;

    fn delete_data_type_parameter(&self, id: i64) -> Result<()>;

    fn data_type_parameter_value_by_parameter_and_member(
        &self,
        data_type_parameter_id: i64,
        member_id: i64,
    ) -> Result<Option<DataTypeParameterValue>>;

    fn data_type_parameter_values_by_member(&self, member_id: i64) -> Result<Vec<DataTypeParameterValue>>;

    fn create_data_type_parameter_value(&self, value: &mut DataTypeParameterValue) -> Result<()>;

    fn edit_data_type_parameter_value(&self, value: &DataTypeParameterValue) -> Result<()>;
}
