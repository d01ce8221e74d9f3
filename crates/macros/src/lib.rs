use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, LitStr};

/// Builds a `sqlbind_core` type descriptor from a compact literal, e.g.
/// `ty!("{ name: string, age: int }")` or `ty!("list<{ id: int }>")`.
///
/// Supported forms: the scalar names (`null`, `bool`, `int`, `float`,
/// `decimal`, `string`, `bytes`, `timestamp`, `uuid`, `any`, `unknown`),
/// `list<...>`, `set<...>`, and `{ field: type, ... }` objects.
#[proc_macro]
pub fn ty(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);
    let source = lit.value();

    let mut parser = TypeParser::new(&source);
    match parser.parse_root() {
        Ok(tokens) => tokens.into(),
        Err(message) => syn::Error::new(lit.span(), message)
            .to_compile_error()
            .into(),
    }
}

struct TypeParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn parse_root(&mut self) -> Result<TokenStream2, String> {
        let tokens = self.parse_type()?;
        self.skip_whitespace();
        if self.pos != self.src.len() {
            return Err(format!(
                "unexpected trailing input: `{}`",
                &self.src[self.pos..]
            ));
        }
        Ok(tokens)
    }

    fn parse_type(&mut self) -> Result<TokenStream2, String> {
        self.skip_whitespace();
        if self.peek() == Some('{') {
            return self.parse_object();
        }

        let name = self.parse_ident()?;
        let tokens = match name.as_str() {
            "null" => quote! { ::sqlbind_core::binding::model::Type::null() },
            "bool" => quote! { ::sqlbind_core::binding::model::Type::bool() },
            "int" => quote! { ::sqlbind_core::binding::model::Type::int() },
            "float" => quote! { ::sqlbind_core::binding::model::Type::float() },
            "decimal" => quote! { ::sqlbind_core::binding::model::Type::decimal() },
            "string" => quote! { ::sqlbind_core::binding::model::Type::string() },
            "bytes" => quote! { ::sqlbind_core::binding::model::Type::bytes() },
            "timestamp" => quote! { ::sqlbind_core::binding::model::Type::timestamp() },
            "uuid" => quote! { ::sqlbind_core::binding::model::Type::uuid() },
            "any" => quote! { ::sqlbind_core::binding::model::Type::any() },
            "unknown" => quote! { ::sqlbind_core::binding::model::Type::unknown() },
            "list" => {
                let inner = self.parse_angle_argument()?;
                quote! { ::sqlbind_core::binding::model::Type::list(#inner) }
            }
            "set" => {
                let inner = self.parse_angle_argument()?;
                quote! { ::sqlbind_core::binding::model::Type::set(#inner) }
            }
            other => return Err(format!("unknown type name `{other}`")),
        };
        Ok(tokens)
    }

    fn parse_angle_argument(&mut self) -> Result<TokenStream2, String> {
        self.expect('<')?;
        let inner = self.parse_type()?;
        self.expect('>')?;
        Ok(inner)
    }

    fn parse_object(&mut self) -> Result<TokenStream2, String> {
        self.expect('{')?;
        let mut fields: Vec<(String, TokenStream2)> = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }
            let name = self.parse_ident()?;
            self.expect(':')?;
            let field_type = self.parse_type()?;
            fields.push((name, field_type));

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err("expected `,` or `}` after object field".to_string()),
            }
        }

        let inserts = fields.iter().map(|(name, field_type)| {
            quote! { fields.insert(#name.to_string(), #field_type); }
        });
        Ok(quote! {
            {
                let mut fields = ::std::collections::BTreeMap::new();
                #(#inserts)*
                ::sqlbind_core::binding::model::Type::object(fields)
            }
        })
    }

    fn parse_ident(&mut self) -> Result<String, String> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(match self.peek() {
                Some(c) => format!("expected an identifier, found `{c}`"),
                None => "expected an identifier, found end of input".to_string(),
            });
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(format!("expected `{expected}`, found `{c}`")),
            None => Err(format!("expected `{expected}`, found end of input")),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }
}
