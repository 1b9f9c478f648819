//! Query layer over the serialized-object cache.
//!
//! A caller describes *which* cache rows it wants with a [`Scope`]
//! (culture, optional class, optional relation filter) and *how* with
//! [`Params`] (filtering, sorting, paging). [`QueryBuilder`] turns both into
//! one SQL AST that serves the row query and its count alike.

mod builder;
mod params;

pub use builder::QueryBuilder;
pub use params::{Filtering, Paging, Params, Sorting};

/// Restriction through the `Relations` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationFilter {
    /// Objects referenced by `foreign_id` (primary endpoints), optionally
    /// only through `member_id`.
    PrimaryOf {
        foreign_id: i64,
        member_id: Option<i64>,
    },
    /// Objects referencing `primary_id` (foreign endpoints), optionally only
    /// through `member_id`.
    ForeignOf {
        primary_id: i64,
        member_id: Option<i64>,
    },
}

/// Which cache rows a query ranges over.
///
/// The class match is exact: subclasses are not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub culture_id: i64,
    pub class_id: Option<i64>,
    pub relation: Option<RelationFilter>,
}

impl Scope {
    pub fn culture(culture_id: i64) -> Self {
        Self {
            culture_id,
            class_id: None,
            relation: None,
        }
    }

    pub fn class(culture_id: i64, class_id: i64) -> Self {
        Self {
            culture_id,
            class_id: Some(class_id),
            relation: None,
        }
    }

    pub fn with_relation(mut self, relation: RelationFilter) -> Self {
        self.relation = Some(relation);
        self
    }
}
