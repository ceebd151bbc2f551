//! Proc macros for workstation: `view!` markup declaration and `style!` inline styles.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on `workstation`.

use proc_macro::TokenStream;

mod style_macro;
mod view_macro;

/// Markup-style screen declaration macro.
///
/// Transforms JSX-like markup into keyword calls on a `&mut Workstation`.
/// The macro evaluates to `workstation::Result<()>`.
///
/// # Syntax
///
/// - `<tag />`: a keyword call without a block
/// - `<tag attr="val"> ... </tag>`: a keyword call whose block declares the children
///
/// `screen`, `label`, `textbox`, `passwordfield`, `button`, `table` and `row`
/// map to their keywords. Any other tag declares a custom widget of that type.
///
/// # Attributes
///
/// - `id`, `text` (or `title`), `style`, `onclick`
/// - Values are string literals or `{expressions}`
/// - A string `style` is parsed at run time with `Style::parse`
///
/// # Example
///
/// ```ignore
/// view!(&mut ws,
///     <screen title="Login">
///         <label text="Username" />
///         <textbox id="txtUser" />
///         <button text="Login" onclick={|| println!("clicked")} />
///     </screen>
/// )?;
/// ```
#[proc_macro]
pub fn view(input: TokenStream) -> TokenStream {
    view_macro::view_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Compile-time checked style declarations.
///
/// Produces a `workstation::Style` with one property per declaration.
///
/// ```ignore
/// let style = style! {
///     color: red;
///     background: #1a1a2e;
///     padding: 1 2;
///     width: 50%;
/// };
/// ```
#[proc_macro]
pub fn style(input: TokenStream) -> TokenStream {
    style_macro::style_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
