//! Simple rolls of a single kind of die with a flat modifier, like `/d20 quantity:2 modifier:5`.

use std::fmt;

use crate::{
	dice::{DiceGroup, Error, Op, Rolled, Roller, Sides},
	rules::Rules,
	session::Describe,
};

/// Advantage or disadvantage for a quick roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "There's nothing else a roll can have")]
pub enum Edge {
	/// Keep the highest of at least two dice
	Advantage,

	/// Keep the lowest of at least two dice
	Disadvantage,
}

/// Rolls `quantity` dice with `sides` faces and adds a flat `modifier` to their sum.
///
/// A quantity below 1 rolls a single die. With an [`Edge`], at least two dice are rolled and only the highest or lowest
/// one counts.
///
/// # Errors
/// If the dice break one of the limits in `rules`, an error variant is returned.
///
/// # Examples
/// ```
/// use dicebag::{dice::roller::Iter as IterRoller, quick::{self, Edge}, session::Describe, Rules};
///
/// let roll = quick::roll(&mut IterRoller::new([7, 13]), 20, 1, 2, Some(Edge::Advantage), &Rules::default())?;
/// assert_eq!(roll.title(), "Rolled d20+2");
/// assert_eq!(roll.result(), 15);
/// assert_eq!(roll.describe(None), "Result: [~~7~~, **13**]+2 = 15");
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
pub fn roll(
	roller: &mut impl Roller,
	sides: u32,
	quantity: u32,
	modifier: i32,
	edge: Option<Edge>,
	rules: &Rules,
) -> Result<QuickRoll, Error> {
	let mut builder = DiceGroup::builder().count(quantity.max(1)).sides(Sides::Num(sides));
	builder = match edge {
		Some(Edge::Advantage) => builder.advantage(),
		Some(Edge::Disadvantage) => builder.disadvantage(),
		None => builder,
	};
	if modifier != 0 {
		let op = if modifier < 0 { Op::Sub } else { Op::Add };
		builder = builder.modifier(op, modifier.unsigned_abs());
	}

	let group = builder.build();
	let rolled = roller.roll(&group, rules)?.into_owned();
	Ok(QuickRoll { modifier, rolled })
}

/// Result of a [quick roll](roll())
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickRoll {
	/// Flat modifier added to the dice
	modifier: i32,

	/// Dice that were rolled
	rolled: Rolled<'static>,
}

impl QuickRoll {
	/// Gets the number of sides of the dice that were rolled.
	#[must_use]
	pub fn sides(&self) -> Sides {
		self.rolled.group.sides
	}

	/// Gets the flat modifier.
	#[must_use]
	#[inline]
	pub const fn modifier(&self) -> i32 {
		self.modifier
	}

	/// Gets the dice that were rolled.
	#[must_use]
	#[inline]
	pub const fn rolled(&self) -> &Rolled<'static> {
		&self.rolled
	}

	/// Sums the kept dice and adds the modifier.
	#[must_use]
	pub fn result(&self) -> i64 {
		self.rolled.sum() + i64::from(self.modifier)
	}

	/// Builds a short heading for the roll, like `Rolled d20+2`.
	#[must_use]
	pub fn title(&self) -> String {
		format!("Rolled d{}{}", self.sides(), ModifierText(self.modifier))
	}
}

impl Describe for QuickRoll {
	/// Builds the roll's result line. Plain rolls only show the sum of the dice (`Result: [**9**]-1 = 8`), while rolls
	/// with advantage or disadvantage list the dropped dice first, then the kept one (`Result: [~~7~~, **13**] = 13`).
	///
	/// If `list_limit` is specified and more dice than it were dropped, the dropped dice are truncated and followed by
	/// "X more...".
	fn describe(&self, list_limit: Option<usize>) -> String {
		let modifier = ModifierText(self.modifier);
		let result = self.result();

		if self.rolled.group.selection.is_none() {
			return format!("Result: [**{}**]{modifier} = {result}", self.rolled.sum());
		}

		let dropped = self.rolled.dropped_rolls();
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated = dropped.len().saturating_sub(list_limit);
		let mut parts = dropped
			.iter()
			.take(list_limit)
			.map(|val| format!("~~{val}~~"))
			.collect::<Vec<_>>();
		if truncated > 0 {
			parts.push(format!("{truncated} more..."));
		}
		parts.extend(self.rolled.kept_rolls().iter().map(|val| format!("**{val}**")));

		format!("Result: [{}]{modifier} = {result}", parts.join(", "))
	}
}

impl fmt::Display for QuickRoll {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Signed modifier text, empty for zero
struct ModifierText(i32);

impl fmt::Display for ModifierText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			0 => Ok(()),
			modifier => write!(f, "{modifier:+}"),
		}
	}
}
