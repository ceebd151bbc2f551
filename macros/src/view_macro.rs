//! RSX view! macro: parse JSX-like markup and generate workstation keyword calls.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Error, Expr, Ident, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// An attribute value: `"literal"` or `{expression}`.
#[derive(Clone)]
pub(crate) enum AttrValue {
    Lit(LitStr),
    Expr(Expr),
}

/// A parsed RSX attribute: `name="value"` or `name={expr}`.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub name: Ident,
    pub value: AttrValue,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match &self.value {
            AttrValue::Lit(lit) => lit.value(),
            AttrValue::Expr(expr) => quote!(#expr).to_string(),
        };
        f.debug_struct("Attribute")
            .field("name", &self.name.to_string())
            .field("value", &value)
            .finish()
    }
}

/// A parsed RSX element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: Ident,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
    pub self_closing: bool,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag.to_string())
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The top-level view! input: a workstation expression, a comma, elements.
struct ViewInput {
    target: Expr,
    elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

/// Recognized attribute names.
const KNOWN_ATTRS: &[&str] = &["id", "text", "title", "style", "onclick"];

/// Tags that map onto a keyword method taking no block.
const LEAF_KEYWORDS: &[&str] = &["label", "textbox", "passwordfield", "button", "row"];

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for ViewInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let target: Expr = input.parse()?;
        input.parse::<Token![,]>()?;
        let mut elements = Vec::new();
        while !input.is_empty() {
            elements.push(parse_element(input)?);
        }
        Ok(ViewInput { target, elements })
    }
}

fn parse_attr_value(input: ParseStream) -> Result<AttrValue> {
    if input.peek(LitStr) {
        return Ok(AttrValue::Lit(input.parse()?));
    }
    if input.peek(syn::token::Brace) {
        let content;
        braced!(content in input);
        return Ok(AttrValue::Expr(content.parse()?));
    }
    Err(input.error("expected a string literal or a `{expression}` attribute value"))
}

/// Parse a single RSX element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let tag: Ident = input.parse()?;

    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        let name: Ident = input.parse()?;
        if !KNOWN_ATTRS.contains(&name.to_string().as_str()) {
            return Err(Error::new(
                name.span(),
                format!(
                    "unknown attribute `{}`; expected one of: {}",
                    name,
                    KNOWN_ATTRS.join(", ")
                ),
            ));
        }
        input.parse::<Token![=]>()?;
        let value = parse_attr_value(input)?;
        if let (true, AttrValue::Lit(lit)) = (name == "onclick", &value) {
            return Err(Error::new(lit.span(), "`onclick` takes a `{closure}`, not a string"));
        }
        attrs.push(Attribute { name, value });
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing_tag: Ident = input.parse()?;
            if closing_tag != tag {
                return Err(Error::new(
                    closing_tag.span(),
                    format!(
                        "mismatched closing tag: expected `</{}>`, found `</{}>`",
                        tag, closing_tag
                    ),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(parse_element(input)?);
        } else {
            return Err(input.error("expected `<` to start a child element or `</` to close the parent"));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Build the keyword argument: `()`, the bare text when it is the only
/// attribute (so the id convention applies), or an `Attributes` builder chain.
fn generate_args(elem: &Element) -> TokenStream {
    match elem.attrs.as_slice() {
        [] => return quote! { () },
        [only] if only.name == "text" || only.name == "title" => {
            return match &only.value {
                AttrValue::Lit(lit) => quote! { #lit },
                AttrValue::Expr(expr) => quote! { #expr },
            };
        }
        _ => {}
    }
    let calls = elem.attrs.iter().map(|attr| {
        let name = attr.name.to_string();
        match (name.as_str(), &attr.value) {
            ("style", AttrValue::Lit(lit)) => {
                quote! { .with_style(::workstation::Style::parse(#lit)?) }
            }
            ("style", AttrValue::Expr(expr)) => quote! { .with_style(#expr) },
            // Rejected while parsing.
            ("onclick", AttrValue::Lit(_)) => quote! {},
            ("onclick", AttrValue::Expr(expr)) => quote! { .with_onclick(#expr) },
            (other, value) => {
                // `title` is the screen spelling of `text`.
                let method = if other == "id" { "with_id" } else { "with_text" };
                let method = Ident::new(method, attr.name.span());
                match value {
                    AttrValue::Lit(lit) => quote! { .#method(#lit) },
                    AttrValue::Expr(expr) => quote! { .#method(#expr) },
                }
            }
        }
    });
    quote! { ::workstation::Attributes::new() #(#calls)* }
}

/// Generate the statement for a single element.
fn generate_element(elem: &Element) -> Result<TokenStream> {
    let tag = &elem.tag;
    let tag_str = tag.to_string();
    let args = generate_args(elem);

    let children = elem
        .children
        .iter()
        .map(generate_element)
        .collect::<Result<Vec<_>>>()?;
    let block = quote! {
        |__ws: &mut ::workstation::Workstation| -> ::workstation::Result<()> {
            #(#children)*
            Ok(())
        }
    };

    let has_title = elem
        .attrs
        .iter()
        .any(|a| a.name == "title" || a.name == "text");

    let stmt = match tag_str.as_str() {
        "screen" if !has_title => {
            return Err(Error::new(tag.span(), "`<screen>` requires a `title` attribute"));
        }
        "screen" | "table" if elem.children.is_empty() => {
            quote! { __ws.#tag(#args)?; }
        }
        "screen" => quote! { __ws.screen_with(#args, #block)?; },
        "table" => quote! { __ws.table_with(#args, #block)?; },
        leaf if LEAF_KEYWORDS.contains(&leaf) => {
            if !elem.children.is_empty() {
                return Err(Error::new(
                    tag.span(),
                    format!("`<{}>` cannot contain child elements", leaf),
                ));
            }
            quote! { __ws.#tag(#args)?; }
        }
        custom if elem.children.is_empty() => {
            quote! { __ws.widget(#custom, #args)?; }
        }
        custom => quote! { __ws.container_with(#custom, #args, #block)?; },
    };
    Ok(stmt)
}

/// Entry point: generate code for the entire view! macro.
pub(crate) fn view_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: ViewInput = syn::parse2(input)?;

    if parsed.elements.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "view! macro requires at least one element",
        ));
    }

    let target = &parsed.target;
    let statements = parsed
        .elements
        .iter()
        .map(generate_element)
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        {
            let __ws: &mut ::workstation::Workstation = #target;
            (|| -> ::workstation::Result<()> {
                #(#statements)*
                Ok(())
            })()
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================
