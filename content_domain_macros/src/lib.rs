mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)]
// ============================================================================

/// Derive macro mapping a struct with named fields onto a relational table.
///
/// Generates an implementation of `content_domain::Record`: the table name,
/// the column list in field order, the key columns, a row reader and the
/// column/value pairs used for inserts and updates.
///
/// # Usage
///
/// ```ignore
/// #[derive(Record)]
/// #[record(table = "Members")]
/// struct Member {
///     pub id: i64,                  // column "Id", generated key
///     pub class_id: i64,            // column "ClassId"
///     #[record(column = "PropertyDataTypeId")]
///     pub data_type_id: Option<i64>,
/// }
/// ```
///
/// Field attributes:
/// - `column = "Name"`: explicit column name (default: PascalCase field name)
/// - `key`: part of the primary key, written by the caller
/// - `generated`: single primary key assigned by the store on insert
///
/// Without any `key`/`generated` attribute a field named `id` is the
/// generated key.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
