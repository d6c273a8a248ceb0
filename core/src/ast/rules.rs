use pest::iterators::{Pair, Pairs};
use pest_derive::Parser;

use crate::error::ElpianErrorExt;
use crate::location::{Location, Span};
use crate::script::Script;

use super::err::SyntaxError;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct RulesParser;

pub(crate) type ParseResult<T> = Result<T, Box<dyn ElpianErrorExt>>;

pub(crate) fn fetch_next_pair<'a>(
    pairs: &mut Pairs<'a, Rule>,
    location: &Option<Location>,
    span: &Option<Span>,
) -> ParseResult<Pair<'a, Rule>> {
    match pairs.next() {
        Some(pair) => Ok(pair),
        None => Err(SyntaxError::with(
            "Expected more inner pairs but found none.".into(),
            "elpian.ast.rules.fetch_next_pair".into(),
            location.clone(),
            span.clone(),
        )
        .boxed()),
    }
}

/// Consume the next pair and check that it is the keyword token `rule`.
pub(crate) fn expect_keyword(
    pairs: &mut Pairs<'_, Rule>,
    rule: Rule,
    location: &Option<Location>,
    span: &Option<Span>,
) -> ParseResult<()> {
    let pair = fetch_next_pair(pairs, location, span)?;
    if pair.as_rule() == rule {
        Ok(())
    } else {
        Err(SyntaxError::with(
            format!("Expected {:?} but found {:?}.", rule, pair.as_rule()),
            "elpian.ast.rules.expect_keyword".into(),
            location.clone(),
            span.clone(),
        )
        .boxed())
    }
}

pub(crate) fn get_data_from_rule<'a>(
    rule: &Pair<'a, Rule>,
    script: &Script,
) -> (Pairs<'a, Rule>, Option<Location>, Option<Span>) {
    let inner_rules = rule.clone().into_inner();
    let span = get_span_from_pair(rule, script);
    let location = get_location_from_pair(rule, script);
    (inner_rules, location, span)
}

pub fn get_location_from_pair(rule: &Pair<Rule>, script: &Script) -> Option<Location> {
    Some(Location::from_position(&script.name, &rule.as_span().start_pos()))
}

pub fn get_span_from_pair(rule: &Pair<Rule>, script: &Script) -> Option<Span> {
    Some(Span::from_pest(&script.name, &rule.as_span()))
}

pub(crate) fn unexpected_rule(
    pair: &Pair<Rule>,
    what: &str,
    issuer: &str,
    script: &Script,
) -> Box<dyn ElpianErrorExt> {
    SyntaxError::with(
        format!("Unexpected {} type: {:?}", what, pair.as_rule()),
        issuer.into(),
        get_location_from_pair(pair, script),
        get_span_from_pair(pair, script),
    )
    .boxed()
}

/// Reject constructs the selected language edition does not have yet.
pub(crate) fn require_es2015(
    construct: &str,
    script: &Script,
    location: &Option<Location>,
    span: &Option<Span>,
) -> ParseResult<()> {
    if script.ecma_version.supports_es2015() {
        return Ok(());
    }
    Err(SyntaxError::with(
        format!(
            "{} requires ecmaVersion 2015 or later (selected {})",
            construct, script.ecma_version
        ),
        "elpian.ast.rules.require_es2015".into(),
        location.clone(),
        span.clone(),
    )
    .boxed())
}
