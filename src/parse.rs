//! Parser generators and functions for turning dice notation into [`DiceGroup`]s.
//!
//! Notation is made of one or more groups written back to back, such as `2d20kl1min5+2-4d4d2+6+8d8+9`. Each group is:
//!
//! ```text
//! group       := count? "d" die_kind selection? clamp? modifiers? trailing_op?
//! count       := digit{1,3}
//! die_kind    := digit+ | "f"
//! selection   := "@adv" | "@dis" | ("k"|"d") ("h"|"l")? digit+
//! clamp       := ("min"|"max") digit+
//! modifiers   := ( ("+"|"-"|"*"|"/") digit+ )+
//! trailing_op := "+" | "-" | "*" | "/"
//! ```
//!
//! A modifier operand immediately followed by `d` is instead the count of the next group, so `d8+2d6` is two groups.

#![cfg(feature = "parse")]

use std::str::FromStr;

use chumsky::{prelude::*, span::Span as _};
use tracing::debug;

use crate::{
	dice::{Clamp, DiceGroup, Modifier, Op, Selection, Sides},
	error::NotationError,
};

/// Parser extras used by every parser in this module
type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Generates a parser for an unsigned decimal number, where `what` names the number in overflow errors.
fn number<'src>(what: &'static str) -> impl Parser<'src, &'src str, u32, Extra<'src>> + Clone {
	text::digits(10)
		.collect::<String>()
		.try_map(move |digits: String, span| {
			digits
				.parse()
				.map_err(|err| Rich::custom(span, format!("{what}: {err}")))
		})
}

/// Generates a parser for the four arithmetic operators.
fn op<'src>() -> impl Parser<'src, &'src str, Op, Extra<'src>> + Clone {
	choice((
		just('+').to(Op::Add),
		just('-').to(Op::Sub),
		just('*').to(Op::Mul),
		just('/').to(Op::Div),
	))
}

/// Generates a parser that handles a single dice group like "d20", "4d6k3", "2d20kl1min5+2-", etc.
///
/// The resulting group's [`raw_text`](DiceGroup::raw_text) is left empty. [`groups()`] fills it in.
pub fn group<'src>() -> impl Parser<'src, &'src str, DiceGroup, Extra<'src>> + Clone {
	let count = text::digits(10)
		.at_most(3)
		.collect::<String>()
		.try_map(|digits: String, span| {
			digits
				.parse::<u32>()
				.map_err(|err| Rich::custom(span, format!("Dice count: {err}")))
		});

	let sides = choice((
		just('f').to(Sides::Fudge),
		// Oversized face counts saturate so that validation reports them as too large
		text::digits(10)
			.collect::<String>()
			.map(|digits: String| Sides::Num(digits.parse().unwrap_or(u32::MAX))),
	));

	let selection = choice((
		just("@adv").to(Selection::Advantage),
		just("@dis").to(Selection::Disadvantage),
		one_of("kd")
			.then(one_of("hl").or_not())
			.then(number("Selection amount"))
			.map(|((kind, side), amount)| match (kind, side) {
				('k', Some('l')) => Selection::KeepLow(amount),
				('k', _) => Selection::KeepHigh(amount),
				(_, Some('h')) => Selection::DropHigh(amount),
				_ => Selection::DropLow(amount),
			}),
	));

	let clamp = choice((
		just("min").to(Clamp::Min as fn(u32) -> _),
		just("max").to(Clamp::Max as fn(u32) -> _),
	))
	.then(number("Clamp threshold"))
	.map(|(clamp, threshold)| clamp(threshold));

	let modifier = op()
		.then(number("Modifier"))
		.then_ignore(just('d').not())
		.map(|(op, operand)| Modifier::new(op, operand));

	count
		.or_not()
		.then_ignore(just('d'))
		.then(sides)
		.then(selection.or_not())
		.then(clamp.or_not())
		.then(modifier.repeated().collect::<Vec<_>>())
		.then(op().or_not())
		.map(
			|(((((count, sides), selection), clamp), modifiers), continuation)| DiceGroup {
				raw_text: String::new(),
				count: count.unwrap_or(1),
				sides,
				selection,
				clamp,
				modifiers,
				continuation,
			},
		)
}

/// Generates a parser for a whole chain of dice groups, filling in each group's
/// [`raw_text`](DiceGroup::raw_text) with the slice of input it consumed.
pub fn groups<'src>() -> impl Parser<'src, &'src str, Vec<DiceGroup>, Extra<'src>> + Clone {
	group()
		.map_with(|mut group: DiceGroup, e| {
			group.raw_text = e.slice().to_owned();
			group
		})
		.repeated()
		.at_least(1)
		.collect::<Vec<_>>()
		.then_ignore(end())
}

/// Removes all whitespace from notation and lowercases it. Parsing always operates on normalized notation.
///
/// # Examples
/// ```
/// assert_eq!(dicebag::parse::normalize(" 2D20 kl1 + 4 "), "2d20kl1+4");
/// ```
#[must_use]
pub fn normalize(notation: &str) -> String {
	notation
		.chars()
		.filter(|c| !c.is_whitespace())
		.collect::<String>()
		.to_lowercase()
}

/// Parses a full piece of notation into its ordered dice groups.
///
/// The normalized notation is parsed in a single pass. If any part of it doesn't match, the whole parse fails and
/// nothing is returned.
///
/// # Errors
/// If the notation is empty or doesn't match the grammar at some position, [`NotationError::Syntax`] is returned,
/// carrying the notation exactly as given.
///
/// # Examples
/// ```
/// use dicebag::{dice::{Op, Selection, Sides}, parse::parse};
///
/// let groups = parse("2d20kl1min5+2- 4d4d2+6+ 8d8+9")?;
/// assert_eq!(groups.len(), 3);
/// assert_eq!(groups[0].raw_text, "2d20kl1min5+2-");
/// assert_eq!(groups[0].selection, Some(Selection::KeepLow(1)));
/// assert_eq!(groups[0].continuation, Some(Op::Sub));
/// assert_eq!(groups[1].raw_text, "4d4d2+6+");
/// assert_eq!(groups[1].selection, Some(Selection::DropLow(2)));
/// assert_eq!(groups[2].raw_text, "8d8+9");
/// assert_eq!(groups[2].sides, Sides::Num(8));
///
/// assert!(parse("4d6k").is_err());
/// # Ok::<(), dicebag::NotationError>(())
/// ```
pub fn parse(notation: &str) -> Result<Vec<DiceGroup>, NotationError> {
	let normalized = normalize(notation);
	if normalized.is_empty() {
		return Err(NotationError::Syntax {
			input: notation.to_owned(),
			offset: 0,
			details: "no dice to roll".to_owned(),
		});
	}

	let groups = groups()
		.parse(normalized.as_str())
		.into_result()
		.map_err(|errs| syntax_error(notation, &errs))?;

	debug!(notation, groups = groups.len(), "parsed dice notation");
	Ok(groups)
}

/// Builds a syntax error from chumsky's errors for the normalized form of `input`.
fn syntax_error(input: &str, errs: &[Rich<'_, char>]) -> NotationError {
	NotationError::Syntax {
		input: input.to_owned(),
		offset: errs.first().map_or(0, |err| err.span().start()),
		details: errs
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join("; "),
	}
}

impl FromStr for DiceGroup {
	type Err = NotationError;

	/// Parses exactly one dice group. Use [`parse()`] for notation with several groups.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{DiceGroup, Selection, Sides};
	///
	/// let group: DiceGroup = "4D6 k3".parse()?;
	/// assert_eq!(group.count, 4);
	/// assert_eq!(group.sides, Sides::Num(6));
	/// assert_eq!(group.selection, Some(Selection::KeepHigh(3)));
	/// assert_eq!(group.raw_text, "4d6k3");
	///
	/// assert!("d8+d4".parse::<DiceGroup>().is_err());
	/// # Ok::<(), dicebag::NotationError>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = normalize(s);
		let mut group = group()
			.then_ignore(end())
			.parse(normalized.as_str())
			.into_result()
			.map_err(|errs| syntax_error(s, &errs))?;
		group.raw_text = normalized;
		Ok(group)
	}
}
