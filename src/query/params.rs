use std::str::FromStr;

use crate::error::DomainError;
use crate::schema::StorageDataType;
use crate::sql::Direction;

/// Free-text filter: case-sensitive substring of any localized string property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtering {
    pub query: String,
}

impl Filtering {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Order by one member's value, compared under its storage kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorting {
    pub member_id: i64,
    pub storage_data_type: StorageDataType,
    pub direction: Direction,
}

impl Sorting {
    pub fn new(storage_data_type: StorageDataType, member_id: i64, direction: Direction) -> Self {
        Self {
            member_id,
            storage_data_type,
            direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub skip: u32,
    pub take: u32,
}

impl Paging {
    pub fn new(skip: u32, take: u32) -> Self {
        Self { skip, take }
    }
}

/// Per-request filtering/sorting/paging bundle. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pub filtering: Option<Filtering>,
    pub sorting: Option<Sorting>,
    pub paging: Option<Paging>,
}

impl Params {
    pub fn new(
        filtering: Option<Filtering>,
        sorting: Option<Sorting>,
        paging: Option<Paging>,
    ) -> Self {
        Self {
            filtering,
            sorting,
            paging,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn filtered(mut self, query: impl Into<String>) -> Self {
        self.filtering = Some(Filtering::new(query));
        self
    }

    pub fn sorted(mut self, sorting: Sorting) -> Self {
        self.sorting = Some(sorting);
        self
    }

    pub fn paged(mut self, skip: u32, take: u32) -> Self {
        self.paging = Some(Paging::new(skip, take));
        self
    }

    /// The same params with paging removed.
    pub fn without_paging(&self) -> Self {
        Self {
            paging: None,
            ..self.clone()
        }
    }

    /// The filter text, if filtering is present and non-empty.
    pub fn filter_query(&self) -> Option<&str> {
        self.filtering
            .as_ref()
            .map(|f| f.query.as_str())
            .filter(|q| !q.is_empty())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(DomainError::Validation(format!(
                "sorting direction must be asc or desc, got {:?}",
                s
            )))
        }
    }
}
