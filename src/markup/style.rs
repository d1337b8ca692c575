//! Minimal reading of inline `style` attributes.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, ToCss, parse_important,
};

/// Collects each declaration as lower-cased `(property, value)` text.
struct InlineDeclarations;

impl<'i> DeclarationParser<'i> for InlineDeclarations {
    type Declaration = (String, String);
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        // Comments and whitespace are skipped by `next`; nested blocks such
        // as `url(...)` are skipped whole on the following call.
        let mut parts = Vec::new();
        loop {
            if input.try_parse(parse_important).is_ok() {
                break;
            }
            match input.next() {
                Ok(token) => parts.push(token.to_css_string()),
                Err(_) => break,
            }
        }
        Ok((name.to_ascii_lowercase(), parts.join(" ").to_ascii_lowercase()))
    }
}

impl<'i> AtRuleParser<'i> for InlineDeclarations {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarations {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> RuleBodyItemParser<'i, (String, String), ()> for InlineDeclarations {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Lower-cased `(property, value)` pairs of a `style` attribute, in source
/// order. Malformed declarations are dropped and `!important` is ignored.
pub fn declarations(style: &str) -> Vec<(String, String)> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);
    let mut decls = InlineDeclarations;
    RuleBodyParser::new(&mut parser, &mut decls)
        .filter_map(Result::ok)
        .collect()
}

/// Values of every declaration of `property`, in order.
pub fn values<'a>(
    decls: &'a [(String, String)],
    property: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    decls
        .iter()
        .filter(move |(name, _)| name == property)
        .map(|(_, value)| value.as_str())
}

/// `font-weight` of `bold`, `bolder` or at least 600.
pub fn is_bold(style: &str) -> bool {
    let decls = declarations(style);
    let shorthand = values(&decls, "font")
        .any(|v| v.split_whitespace().any(|t| t == "bold" || t == "bolder"));
    shorthand
        || values(&decls, "font-weight").any(|value| match value {
            "bold" | "bolder" => true,
            numeric => numeric.parse::<u16>().is_ok_and(|w| w >= 600),
        })
}

/// `font-style` of `italic` or `oblique`.
pub fn is_italic(style: &str) -> bool {
    let decls = declarations(style);
    values(&decls, "font-style")
        .chain(values(&decls, "font"))
        .any(|v| v.split_whitespace().any(|t| t == "italic" || t == "oblique"))
}

/// `text-decoration` (or `-line`) containing `underline`.
pub fn is_underline(style: &str) -> bool {
    let decls = declarations(style);
    values(&decls, "text-decoration")
        .chain(values(&decls, "text-decoration-line"))
        .any(|v| v.split_whitespace().any(|t| t == "underline"))
}
