//! Shared chumsky parser utilities
//!
//! Small combinators used by the type-token grammar.

use chumsky::prelude::*;
use chumsky::text::ident;

/// Parse inline whitespace only (spaces and tabs, no newlines).
///
/// Uses explicit character matching to avoid the "repeated combinator making no progress"
/// issue that can occur with `chumsky::text::whitespace().repeated()`.
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse a dotted identifier path such as `System.Collections.Generic.List`.
///
/// A leading `@` (verbatim identifier) is kept as part of the segment.
pub fn dotted_identifier<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    let segment = just('@')
        .or_not()
        .then(ident())
        .to_slice()
        .map(|s: &str| s.to_string());

    segment
        .separated_by(just('.').padded_by(inline_whitespace()))
        .at_least(1)
        .collect::<Vec<String>>()
        .map(|parts| parts.join("."))
}

/// Parse a comma-separated list with optional inline whitespace around items.
pub fn comma_list<'src, T, P>(item: P) -> impl Parser<'src, &'src str, Vec<T>> + Clone
where
    P: Parser<'src, &'src str, T> + Clone,
{
    item.padded_by(inline_whitespace())
        .separated_by(just(','))
        .at_least(1)
        .collect::<Vec<T>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_whitespace() {
        let parser = inline_whitespace().then(just("test")).then_ignore(end());
        assert!(parser.parse("test").into_result().is_ok());
        assert!(parser.parse(" \ttest").into_result().is_ok());
        assert!(parser.parse("\ntest").into_result().is_err());
    }

    #[test]
    fn test_dotted_identifier() {
        let parser = dotted_identifier().then_ignore(end());
        assert_eq!(
            parser.parse("System.Collections.Generic.List").into_result().unwrap(),
            "System.Collections.Generic.List"
        );
        assert_eq!(parser.parse("@event").into_result().unwrap(), "@event");
        assert!(parser.parse("Foo.").into_result().is_err());
        assert!(parser.parse("1abc").into_result().is_err());
    }

    #[test]
    fn test_comma_list() {
        let parser = comma_list(dotted_identifier()).then_ignore(end());
        assert_eq!(
            parser.parse("string, int ,Order").into_result().unwrap(),
            vec!["string", "int", "Order"]
        );
        assert!(parser.parse("").into_result().is_err());
    }
}
