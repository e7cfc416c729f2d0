mod rename;
mod shape;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Generates a `Shape` implementation listing the struct's public fields in declaration order,
/// so the struct can be passed to `rust_data_shaping::project`.
///
/// Field types must implement `rust_data_shaping::ToValue`.
///
/// # Attributes
///
/// - `#[shape(rename_all = "...")]` on the struct: `camelCase`, `PascalCase`, `snake_case`,
///   `lowercase`, `UPPERCASE`, `SCREAMING_SNAKE_CASE` or `kebab-case`
/// - `#[shape(rename = "...")]` on a field: exposed name, overrides `rename_all`
/// - `#[shape(skip)]` on a public field: never exposed
/// - `#[shape(include)]` on a non-public field: exposed anyway
///
/// # Example
///
/// ```ignore
/// use rust_data_shaping::Shape;
///
/// #[derive(Shape)]
/// #[shape(rename_all = "PascalCase")]
/// pub struct Course {
///     pub id: u32,
///     pub title: String,
///     #[shape(skip)]
///     pub author_id: u32,
///     #[shape(include, rename = "Summary")]
///     description: Option<String>,
/// }
/// ```
#[proc_macro_derive(Shape, attributes(shape))]
pub fn derive_shape(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let result = shape::handle(ast);
    match result {
        Ok(codegen) => codegen.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
