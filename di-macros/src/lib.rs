//! Compile-time dependency injection macros for Workforce.
//!
//! - `#[derive(Context)]` makes every field of the root context extractable
//! - `#[derive(FromContext)]` builds a service by resolving each of its fields
//!
//! Generated code refers to `crate::FromRef`, so the consuming crate must
//! expose the trait at its root.

use proc_macro::TokenStream;
use syn::{punctuated::Punctuated, token::Comma, Data, DeriveInput, Field, Fields};

mod context;
mod from_context;

/// Derive macro for the DI root.
///
/// Generates `impl FromRef<Root> for FieldType` for each named field, so
/// each field type must be unique within the struct and implement `Clone`.
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub employees: AppEmployeeStore,
///     pub companies: AppCompanyStore,
/// }
///
/// // impl FromRef<Context> for AppEmployeeStore { ... }
/// // impl FromRef<Context> for AppCompanyStore { ... }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for types built from the DI root.
///
/// Generates `impl FromRef<Context> for Type` resolving each field with
/// `FromRef::from_ref(ctx)`. The root defaults to a type named `Context`
/// in scope; override it with `#[from_context(Context = "path::ToRoot")]`.
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// pub struct EmployeeService {
///     employees: AppEmployeeStore,
/// }
/// ```
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}

/// Returns the named fields of a struct, or a spanned compile error.
pub(crate) fn named_fields<'a>(
    input: &'a DeriveInput,
    derive_name: &str,
) -> Result<&'a Punctuated<Field, Comma>, syn::Error> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{derive_name} can only be derived for structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{derive_name} can only be derived for structs"),
        )),
    }
}
