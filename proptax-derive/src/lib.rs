use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro that describes the CSV columns of a record struct.
///
/// For each named field, extracts:
/// - Column name (respects `#[serde(rename = "...")]`)
/// - Required (false for `Option<T>` or fields marked `#[serde(default)]`)
/// - Description (from doc comments)
///
/// Generates `csv_schema() -> &'static [CsvField]` and `csv_header() -> Vec<&'static str>`.
/// `CsvField` must be in scope at the derive site.
#[proc_macro_derive(CsvSchema, attributes(serde))]
pub fn derive_csv_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "CsvSchema requires named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "CsvSchema only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let columns: Vec<_> = fields
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let serde_args = serde_args(&field.attrs);
            let column = find_rename(&serde_args).unwrap_or_else(|| ident.to_string());
            let required = !is_option_type(&field.ty) && !has_default(&serde_args);
            let doc = doc_comment(&field.attrs);
            Some((column, required, doc))
        })
        .collect();

    let entries = columns.iter().map(|(column, required, doc)| {
        quote! {
            CsvField {
                name: #column,
                required: #required,
                description: #doc,
            }
        }
    });
    let names = columns.iter().map(|(column, _, _)| column);

    let expanded = quote! {
        impl #name {
            pub fn csv_schema() -> &'static [CsvField] {
                static SCHEMA: &[CsvField] = &[
                    #(#entries),*
                ];
                SCHEMA
            }

            pub fn csv_header() -> Vec<&'static str> {
                vec![#(#names),*]
            }
        }
    };

    TokenStream::from(expanded)
}

/// Flattened token text of every `#[serde(...)]` attribute on a field.
fn serde_args(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .filter_map(|attr| match &attr.meta {
            Meta::List(list) => Some(list.tokens.to_string()),
            _ => None,
        })
        .collect()
}

fn find_rename(args: &[String]) -> Option<String> {
    args.iter().find_map(|tokens| {
        let start = tokens.find("rename")?;
        let rest = &tokens[start..];
        let after_eq = rest[rest.find('=')? + 1..].trim();
        let quoted = after_eq.strip_prefix('"')?;
        let end = quoted.find('"')?;
        Some(quoted[..end].to_string())
    })
}

fn has_default(args: &[String]) -> bool {
    args.iter().any(|tokens| {
        tokens
            .split(',')
            .any(|arg| arg.trim().starts_with("default"))
    })
}

fn doc_comment(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(meta) => match &meta.value {
                syn::Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(text) => Some(text.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
