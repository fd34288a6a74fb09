use winnow::combinator::{alt, cut_err, opt, repeat};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::{AttributeMatch, AttributeTest, Selector};

// -- Whitespace & names -----------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

fn name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '-' || c == '_'
        }),
    )
        .take()
        .parse_next(input)
}

// -- Values -----------------------------------------------------------------

fn quoted(input: &mut &str) -> ModalResult<String> {
    let quote = alt(('"', '\'')).parse_next(input)?;
    let mut s = String::new();
    loop {
        match any.parse_next(input)? {
            c if c == quote => return Ok(s),
            '\\' => s.push(any.parse_next(input)?),
            c => s.push(c),
        }
    }
}

// -- Selector parts ---------------------------------------------------------

fn tag(input: &mut &str) -> ModalResult<Option<String>> {
    alt(('*'.value(None), name.map(|n: &str| Some(n.to_owned())))).parse_next(input)
}

fn attribute_test(input: &mut &str) -> ModalResult<AttributeTest> {
    let contains = alt(("*=".value(true), "=".value(false))).parse_next(input)?;
    ws.parse_next(input)?;
    let value = cut_err(quoted)
        .context(StrContext::Expected(StrContextValue::Description(
            "quoted attribute value",
        )))
        .parse_next(input)?;
    Ok(if contains {
        AttributeTest::Contains(value)
    } else {
        AttributeTest::Equals(value)
    })
}

fn attribute(input: &mut &str) -> ModalResult<AttributeMatch> {
    '['.parse_next(input)?;
    ws.parse_next(input)?;
    let attr_name = cut_err(name)
        .context(StrContext::Expected(StrContextValue::Description(
            "attribute name",
        )))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let test = opt(attribute_test).parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(']')
        .context(StrContext::Expected(StrContextValue::CharLiteral(']')))
        .parse_next(input)?;
    Ok(AttributeMatch {
        name: attr_name.to_owned(),
        test,
    })
}

// -- Top-level parser -------------------------------------------------------

pub(super) fn selector(input: &mut &str) -> ModalResult<Selector> {
    ws.parse_next(input)?;
    let tag = opt(tag).parse_next(input)?;
    let attributes: Vec<AttributeMatch> = match tag {
        Some(_) => repeat(0.., attribute).parse_next(input)?,
        None => repeat(1.., attribute)
            .context(StrContext::Expected(StrContextValue::Description(
                "tag name or attribute test",
            )))
            .parse_next(input)?,
    };
    ws.parse_next(input)?;
    Ok(Selector {
        tag: tag.flatten(),
        attributes,
    })
}
