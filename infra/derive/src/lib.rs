#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the catalog infrastructure.
//!
//! ## Usage
//! Add the crate to any library that declares its own error enum:
//! ```toml
//! [dependencies]
//! catalog-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```
//!
//! Examples below are `ignore`d to avoid compiling in this crate; the consuming
//! crates' tests exercise them.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// A high-level attribute macro for defining domain-specific error enums.
///
/// This macro reduces boilerplate by transforming a standard enum into a fully-featured
/// error type wired for problem-details responses.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `#[source]` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` when an `Internal`
///   variant is present.
/// * **Problem Classification**: When at least one variant carries `#[kind(...)]`,
///   implements `catalog_kernel::problem::ProblemSource`. Each variant declares its
///   `ErrorKind` up front; variants without the attribute are `Unclassified`. A variant
///   field named `errors` is exposed as the validation error list.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected to keep error wiring explicit and reliable.
/// 5. Enums using `#[kind(...)]` must be compiled in a crate that depends on `catalog-kernel`.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_derive::catalog_error;
/// use std::borrow::Cow;
///
/// #[catalog_error]
/// pub enum ProductError {
///     #[kind(NotFound)]
///     #[error("Product '{id}' not found")]
///     Missing { id: String },
///
///     #[kind(BadRequest)]
///     #[error("Product payload rejected")]
///     Rejected { errors: Vec<String> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn catalog_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
