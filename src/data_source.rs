//! Helpers for data sources: request arguments to [`Params`], cache rows to
//! view objects and nested loading driven by the `NestedXPaths` argument.

use std::collections::HashMap;

use crate::config::DomainConfig;
use crate::document::ViewObject;
use crate::error::{DomainError, Result};
use crate::nested::NestedObjectLoader;
use crate::query::{Filtering, Paging, Params, Sorting};
use crate::registry::TypeRegistry;
use crate::repository::{ClassRepository, DataTypeRepository, MemberRepository, SerializedObjectRepository};
use crate::schema::SerializedObject;
use crate::sql::Direction;

/// Configured arguments of a data source (name/value pairs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSourceArgs {
    args: Vec<(String, String)>,
}

impl DataSourceArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((name.into(), value.into()));
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn string(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| DomainError::Validation(format!("missing argument {}", name)))
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        let value = self.string(name)?;
        value.trim().parse().map_err(|_| {
            DomainError::Validation(format!("argument {} is not an integer: {:?}", name, value))
        })
    }

    pub fn bool(&self, name: &str) -> Result<bool> {
        let value = self.string(name)?.trim();
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(DomainError::Validation(format!(
                "argument {} is not a boolean: {:?}",
                name, value
            )))
        }
    }

    fn flag(&self, name: &str) -> Result<bool> {
        if self.has(name) {
            self.bool(name)
        } else {
            Ok(false)
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataSourceArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Build request [`Params`] from data source arguments and the request's
/// query string.
///
/// Sorting (when enabled) needs `SortingMemberId` and `SortingDirection`.
/// Paging reads skip/take from the query parameters named by
/// `SkipUrlParameterName`/`TakeUrlParameterName`; unparseable values count as
/// zero and a zero take falls back to `DefaultTake`, then to
/// `config.default_take`. Filtering reads the text from the query parameter
/// named by `QueryUrlParameterName`.
pub fn params_from_args<S>(
    storage: &S,
    args: &DataSourceArgs,
    query: &HashMap<String, String>,
    enable_sorting: bool,
    config: &DomainConfig,
) -> Result<Params>
where
    S: MemberRepository + DataTypeRepository + ?Sized,
{
    let sorting = if enable_sorting {
        let member = storage.member_with_key(args.int("SortingMemberId")?)?;
        let kind = TypeRegistry::new(storage).member_kind(&member)?.ok_or_else(|| {
            DomainError::Validation(format!("cannot sort by relation member {}", member.code))
        })?;
        let direction: Direction = args.string("SortingDirection")?.parse()?;
        Some(Sorting::new(kind, member.id, direction))
    } else {
        None
    };

    let paging = if args.flag("EnablePaging")? {
        let skip = query_number(query, args.get("SkipUrlParameterName"));
        let mut take = query_number(query, args.get("TakeUrlParameterName"));
        if take == 0 {
            take = match args.get("DefaultTake") {
                Some(_) => u32::try_from(args.int("DefaultTake")?).unwrap_or(0),
                None => 0,
            };
        }
        if take == 0 {
            take = config.default_take;
        }
        Some(Paging::new(skip, take))
    } else {
        None
    };

    let filtering = if args.flag("EnableFiltering")? {
        let text = args
            .get("QueryUrlParameterName")
            .and_then(|name| query.get(name))
            .cloned()
            .unwrap_or_default();
        Some(Filtering::new(text))
    } else {
        None
    };

    Ok(Params::new(filtering, sorting, paging))
}

fn query_number(query: &HashMap<String, String>, name: Option<&str>) -> u32 {
    name.and_then(|name| query.get(name))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Decode a cache row into a view object.
pub fn view_object(serialized_object: &SerializedObject) -> Result<ViewObject> {
    ViewObject::from_serialized(serialized_object)
}

/// Expand the relation paths listed in the `NestedXPaths` argument.
pub fn load_nested_objects<S>(
    storage: &S,
    culture_id: i64,
    objects: Vec<ViewObject>,
    args: &DataSourceArgs,
) -> Result<Vec<ViewObject>>
where
    S: ClassRepository + MemberRepository + SerializedObjectRepository + ?Sized,
{
    match args.get("NestedXPaths") {
        Some(paths) if !paths.trim().is_empty() => {
            NestedObjectLoader::new(storage, culture_id).expand(objects, paths)
        }
        _ => Ok(objects),
    }
}
