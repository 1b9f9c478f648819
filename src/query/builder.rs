use crate::schema::{SerializedObject, StorageDataType};
use crate::sql::{col, param, Direction, Expr, JoinKind, Operand, Projection, Select, SqlValue};

use super::{Params, RelationFilter, Scope, Sorting};

const SERIALIZED_OBJECTS: &str = "SerializedObjects";
const PROPERTIES: &str = "Properties";
const LOCALIZATIONS: &str = "Localizations";
const RELATIONS: &str = "Relations";

// aliases
const SO: &str = "so";
const SORT_PROPERTY: &str = "sp";
const SORT_TEXT: &str = "sl";
const SORT_NEUTRAL_TEXT: &str = "sn";
const FILTER_PROPERTY: &str = "fp";
const FILTER_TEXT: &str = "fl";
const RELATION: &str = "r";

/// Builds the row and count statements over `SerializedObjects`.
///
/// Both statements share joins and predicates, so a count always equals the
/// number of rows the unpaged query returns.
///
/// Sorting joins the sort member's property row. Only string sorting goes on
/// to the localizations (requested culture first, neutral culture as
/// fallback); objects without text in either culture, or without a property
/// row for the sort member, drop out of sorted results. Ties are broken by
/// ascending object id.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    neutral_culture_id: i64,
}

impl QueryBuilder {
    pub fn new(neutral_culture_id: i64) -> Self {
        Self { neutral_culture_id }
    }

    /// Rows: sorted when `params.sorting` is set, paged when `params.paging` is set.
    pub fn select(&self, scope: &Scope, params: &Params) -> Select {
        let mut select = self.base(scope, params, Projection::record::<SerializedObject>(SO));

        match params.sorting {
            Some(sorting) => {
                select = select
                    .order_by(self.sort_key(&sorting), sorting.direction)
                    .order_by(col(SO, "ObjectId"), Direction::Asc);
            }
            // stable pages even without a requested order
            None if params.paging.is_some() => {
                select = select.order_by(col(SO, "ObjectId"), Direction::Asc);
            }
            None => {}
        }

        if let Some(paging) = params.paging {
            select = select.limit(paging.skip, paging.take);
        }

        select
    }

    /// The row whose URL value equals `url` ignoring ASCII case; the lowest
    /// object id wins when several match.
    pub fn with_url(&self, culture_id: i64, url: &str) -> Select {
        Select::from(SERIALIZED_OBJECTS, SO, Projection::record::<SerializedObject>(SO))
            .filter(Expr::eq(col(SO, "CultureId"), param(culture_id)))
            .filter(Expr::EqIgnoreCase(col(SO, "UrlPropertyStringValue"), SqlValue::from(url)))
            .order_by(col(SO, "ObjectId"), Direction::Asc)
            .limit(0, 1)
    }

    /// `COUNT(*)` over exactly the rows `select` would return without paging.
    pub fn count(&self, scope: &Scope, params: &Params) -> Select {
        self.base(scope, params, Projection::Count)
    }

    fn base(&self, scope: &Scope, params: &Params, projection: Projection) -> Select {
        let mut select = Select::from(SERIALIZED_OBJECTS, SO, projection);

        if let Some(sorting) = &params.sorting {
            select = self.join_sort_member(select, scope, sorting);
        }

        select = select.filter(Expr::eq(col(SO, "CultureId"), param(scope.culture_id)));

        if let Some(class_id) = scope.class_id {
            select = select.filter(Expr::eq(col(SO, "ClassId"), param(class_id)));
        }

        if let Some(relation) = &scope.relation {
            select = select.filter(Self::relation_predicate(relation));
        }

        if let Some(query) = params.filter_query() {
            select = select.filter(self.text_filter(scope.culture_id, query));
        }

        if let Some(Sorting {
            storage_data_type: StorageDataType::String,
            ..
        }) = params.sorting
        {
            select = select.filter(Expr::IsNotNull(Self::localized_sort_text()));
        }

        select
    }

    fn join_sort_member(&self, select: Select, scope: &Scope, sorting: &Sorting) -> Select {
        let select = select.join(
            JoinKind::Inner,
            PROPERTIES,
            SORT_PROPERTY,
            Expr::and(
                Expr::eq(col(SORT_PROPERTY, "ObjectId"), col(SO, "ObjectId")),
                Expr::eq(col(SORT_PROPERTY, "MemberId"), param(sorting.member_id)),
            ),
        );

        // numeric and date sorts must not touch localizations
        if sorting.storage_data_type != StorageDataType::String {
            return select;
        }

        select
            .join(
                JoinKind::Left,
                LOCALIZATIONS,
                SORT_TEXT,
                Expr::and(
                    Expr::eq(col(SORT_TEXT, "DictionaryId"), col(SORT_PROPERTY, "StringValueId")),
                    Expr::eq(col(SORT_TEXT, "CultureId"), param(scope.culture_id)),
                ),
            )
            .join(
                JoinKind::Left,
                LOCALIZATIONS,
                SORT_NEUTRAL_TEXT,
                Expr::and(
                    Expr::eq(
                        col(SORT_NEUTRAL_TEXT, "DictionaryId"),
                        col(SORT_PROPERTY, "StringValueId"),
                    ),
                    Expr::eq(col(SORT_NEUTRAL_TEXT, "CultureId"), param(self.neutral_culture_id)),
                ),
            )
    }

    fn sort_key(&self, sorting: &Sorting) -> Operand {
        match sorting.storage_data_type {
            StorageDataType::Integer => col(SORT_PROPERTY, "IntegerValue").into(),
            StorageDataType::Decimal => col(SORT_PROPERTY, "DecimalValue").into(),
            StorageDataType::DateTime => col(SORT_PROPERTY, "DateTimeValue").into(),
            StorageDataType::String => Self::localized_sort_text(),
        }
    }

    fn localized_sort_text() -> Operand {
        Operand::Coalesce(vec![col(SORT_TEXT, "Value"), col(SORT_NEUTRAL_TEXT, "Value")])
    }

    /// Objects with at least one string property whose text, in the
    /// requested or the neutral culture, contains `query`.
    fn text_filter(&self, culture_id: i64, query: &str) -> Expr {
        let matching = Select::from(
            PROPERTIES,
            FILTER_PROPERTY,
            Projection::Columns(vec![col(FILTER_PROPERTY, "ObjectId")]),
        )
        .join(
            JoinKind::Inner,
            LOCALIZATIONS,
            FILTER_TEXT,
            Expr::eq(col(FILTER_TEXT, "DictionaryId"), col(FILTER_PROPERTY, "StringValueId")),
        )
        .filter(Expr::or(
            Expr::eq(col(FILTER_TEXT, "CultureId"), param(self.neutral_culture_id)),
            Expr::eq(col(FILTER_TEXT, "CultureId"), param(culture_id)),
        ))
        .filter(Expr::Contains(col(FILTER_TEXT, "Value"), SqlValue::from(query)));

        Expr::in_select(col(SO, "ObjectId"), matching)
    }

    fn relation_predicate(relation: &RelationFilter) -> Expr {
        let (selected, anchor, anchor_id, member_id) = match *relation {
            RelationFilter::PrimaryOf {
                foreign_id,
                member_id,
            } => ("PrimaryId", "ForeignId", foreign_id, member_id),
            RelationFilter::ForeignOf {
                primary_id,
                member_id,
            } => ("ForeignId", "PrimaryId", primary_id, member_id),
        };

        let mut related = Select::from(
            RELATIONS,
            RELATION,
            Projection::Columns(vec![col(RELATION, selected)]),
        )
        .filter(Expr::eq(col(RELATION, anchor), param(anchor_id)));

        if let Some(member_id) = member_id {
            related = related.filter(Expr::eq(col(RELATION, "MemberId"), param(member_id)));
        }

        Expr::in_select(col(SO, "ObjectId"), related)
    }
}
