//! style! macro: check style declarations at compile time and generate a `Style`.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Ident, LitFloat, LitInt, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A single parsed style value, already rendered to its text form.
#[derive(Debug, Clone)]
pub(crate) struct StyleValue {
    pub text: String,
    /// Values written without whitespace between them (`rgb(..)` arguments
    /// and their commas) join without a space.
    pub glue: bool,
}

/// A single declaration: `property-name: value1 value2;`
#[derive(Debug, Clone)]
pub(crate) struct StyleDeclaration {
    /// The property name in kebab-case (e.g. "background-color").
    pub name: String,
    pub name_span: Span,
    pub values: Vec<StyleValue>,
}

impl StyleDeclaration {
    /// The value text as the runtime parser would normalize it.
    pub fn value(&self) -> String {
        let mut out = String::new();
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 && !value.glue {
                out.push(' ');
            }
            out.push_str(&value.text);
        }
        out
    }
}

#[derive(Debug)]
struct StyleInput {
    declarations: Vec<StyleDeclaration>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for StyleInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut declarations = Vec::new();
        while !input.is_empty() {
            if input.peek(Token![;]) {
                input.parse::<Token![;]>()?;
                continue;
            }
            declarations.push(parse_declaration(input)?);
        }
        Ok(StyleInput { declarations })
    }
}

/// Parse a single declaration: `property-name: values;`. The trailing
/// semicolon may be omitted on the last declaration.
pub(crate) fn parse_declaration(input: ParseStream) -> Result<StyleDeclaration> {
    let first_ident: Ident = input.parse()?;
    let mut name = first_ident.to_string();
    let name_span = first_ident.span();

    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        let next: Ident = input.parse()?;
        name.push('-');
        name.push_str(&next.to_string());
    }

    input.parse::<Token![:]>()?;

    let mut values = Vec::new();
    while !input.is_empty() && !input.peek(Token![;]) {
        parse_value(input, &mut values)?;
    }
    if input.peek(Token![;]) {
        input.parse::<Token![;]>()?;
    }

    if values.is_empty() {
        return Err(Error::new(name_span, format!("property `{}` has no value", name)));
    }

    Ok(StyleDeclaration {
        name,
        name_span,
        values,
    })
}

fn push(values: &mut Vec<StyleValue>, text: String) {
    values.push(StyleValue { text, glue: false });
}

/// Parse one value token (or a function call) and append it to `values`.
pub(crate) fn parse_value(input: ParseStream, values: &mut Vec<StyleValue>) -> Result<()> {
    // Hex color: `#` followed by an identifier, or by a number literal. The
    // lexer reads `1a1a2e` as an integer with a suffix and `1e1e1e` as a float
    // with an exponent, so both keep their source spelling.
    if input.peek(Token![#]) {
        input.parse::<Token![#]>()?;
        let hex = if input.peek(Ident) {
            input.parse::<Ident>()?.to_string()
        } else if input.peek(LitInt) || input.peek(LitFloat) {
            let mut s = if input.peek(LitInt) {
                input.parse::<LitInt>()?.to_string()
            } else {
                input.parse::<LitFloat>()?.to_string()
            };
            if input.peek(Ident) {
                s.push_str(&input.parse::<Ident>()?.to_string());
            }
            s
        } else {
            return Err(input.error("expected hex color value after `#`"));
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(input.error(format!("`#{}` is not a hex color", hex)));
        }
        push(values, format!("#{}", hex));
        return Ok(());
    }

    if input.peek(LitStr) {
        let lit: LitStr = input.parse()?;
        push(values, format!("{:?}", lit.value()));
        return Ok(());
    }

    let negative = if input.peek(Token![-]) && (input.peek2(LitInt) || input.peek2(LitFloat)) {
        input.parse::<Token![-]>()?;
        true
    } else {
        false
    };
    let sign = if negative { "-" } else { "" };

    // Numbers keep their literal spelling; a suffix (`10px`) is the unit.
    if input.peek(LitFloat) || input.peek(LitInt) {
        let mut text = if input.peek(LitFloat) {
            input.parse::<LitFloat>()?.to_string()
        } else {
            input.parse::<LitInt>()?.to_string()
        };
        if input.peek(Token![%]) {
            input.parse::<Token![%]>()?;
            text.push('%');
        }
        push(values, format!("{}{}", sign, text));
        return Ok(());
    }

    if input.peek(Ident) {
        let mut text = input.parse::<Ident>()?.to_string();
        while input.peek(Token![-]) && input.peek2(Ident) {
            input.parse::<Token![-]>()?;
            text.push('-');
            text.push_str(&input.parse::<Ident>()?.to_string());
        }

        if input.peek(syn::token::Paren) {
            let content;
            syn::parenthesized!(content in input);
            let mut args = Vec::new();
            while !content.is_empty() {
                if content.peek(Token![,]) {
                    content.parse::<Token![,]>()?;
                    args.push(StyleValue {
                        text: ",".into(),
                        glue: true,
                    });
                    continue;
                }
                parse_value(&content, &mut args)?;
            }
            let mut call = text;
            call.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 && !arg.glue {
                    call.push(' ');
                }
                call.push_str(&arg.text);
            }
            call.push(')');
            push(values, call);
            return Ok(());
        }

        push(values, text);
        return Ok(());
    }

    if input.peek(Token![!]) {
        input.parse::<Token![!]>()?;
        let ident: Ident = input.parse()?;
        if ident != "important" {
            return Err(Error::new(ident.span(), "expected `important` after `!`"));
        }
        push(values, "!important".into());
        return Ok(());
    }

    Err(input.error("unexpected token in style value"))
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Entry point: generate a `Style` builder chain for the whole input.
pub(crate) fn style_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: StyleInput = syn::parse2(input)?;

    if parsed.declarations.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "style! macro requires at least one declaration",
        ));
    }

    let mut seen: Vec<&str> = Vec::new();
    for decl in &parsed.declarations {
        if seen.contains(&decl.name.as_str()) {
            return Err(Error::new(
                decl.name_span,
                format!("property `{}` is declared more than once", decl.name),
            ));
        }
        seen.push(&decl.name);
    }

    let calls = parsed.declarations.iter().map(|decl| {
        let name = &decl.name;
        let value = decl.value();
        quote! { .with(#name, #value) }
    });

    Ok(quote! {
        ::workstation::Style::new() #(#calls)*
    })
}

// ===========================================================================
// Tests
// ===========================================================================
