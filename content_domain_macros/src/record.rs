use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr};

/// Column metadata collected from one named field.
struct ColumnField {
    ident: syn::Ident,
    column: String,
    key: bool,
    generated: bool,
}

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    // Extract #[record(table = "...")] from struct-level attributes
    let table = match extract_table(&input) {
        Ok(table) => table,
        Err(err) => return err.to_compile_error().into(),
    };

    let fields = match collect_fields(&input) {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let columns: Vec<&str> = fields.iter().map(|f| f.column.as_str()).collect();

    // Default: a field named `id` is the generated key
    let explicit_key = fields.iter().any(|f| f.key);
    let keys: Vec<&str> = fields
        .iter()
        .filter(|f| if explicit_key { f.key } else { f.ident == "id" })
        .map(|f| f.column.as_str())
        .collect();
    let generated = if explicit_key {
        fields.iter().any(|f| f.generated)
    } else {
        keys.len() == 1
    };

    let readers = fields.iter().enumerate().map(|(index, f)| {
        let ident = &f.ident;
        quote! { #ident: row.get(#index)? }
    });

    let values = fields.iter().map(|f| {
        let ident = &f.ident;
        let column = &f.column;
        quote! { (#column, &self.#ident as &dyn content_domain::rusqlite::ToSql) }
    });

    let expanded = quote! {
        impl content_domain::Record for #name {
            const TABLE: &'static str = #table;
            const COLUMNS: &'static [&'static str] = &[#(#columns),*];
            const KEY: &'static [&'static str] = &[#(#keys),*];
            const GENERATED_KEY: bool = #generated;

            fn from_row(
                row: &content_domain::rusqlite::Row<'_>,
            ) -> content_domain::rusqlite::Result<Self> {
                Ok(Self {
                    #(#readers),*
                })
            }

            fn values(&self) -> Vec<(&'static str, &dyn content_domain::rusqlite::ToSql)> {
                vec![#(#values),*]
            }
        }
    };

    TokenStream::from(expanded)
}

fn extract_table(input: &DeriveInput) -> syn::Result<String> {
    let mut table = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value: LitStr = meta.value()?.parse()?;
                table = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute"))
            }
        })?;
    }

    // Default: PascalCase struct name + "s"
    Ok(table.unwrap_or_else(|| format!("{}s", input.ident)))
}

fn collect_fields(input: &DeriveInput) -> syn::Result<Vec<ColumnField>> {
    let named = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Record derive: only structs with named fields are supported",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record derive: only structs are supported",
            ))
        }
    };

    named.iter().map(column_field).collect()
}

fn column_field(field: &Field) -> syn::Result<ColumnField> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Record derive: unnamed field"))?;

    let mut column = None;
    let mut key = false;
    let mut generated = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                let value: LitStr = meta.value()?.parse()?;
                column = Some(value.value());
            } else if meta.path.is_ident("key") {
                key = true;
            } else if meta.path.is_ident("generated") {
                key = true;
                generated = true;
            } else {
                return Err(meta.error("unsupported record attribute"));
            }
            Ok(())
        })?;
    }

    Ok(ColumnField {
        column: column.unwrap_or_else(|| to_pascal_case(&ident.to_string())),
        ident,
        key,
        generated,
    })
}

fn to_pascal_case(s: &str) -> String {
    let mut result = String::new();
    let mut upper = true;
    for ch in s.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            result.extend(ch.to_uppercase());
            upper = false;
        } else {
            result.push(ch);
        }
    }
    result
}
