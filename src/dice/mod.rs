//! Dice group descriptors, the dice rolled from them, and validation of their limits.
//!
//! A [`DiceGroup`] is one parsed unit of notation, such as `2d20kl1min5+2-`. It is rolled with a [`Roller`], which
//! produces a [`Rolled`] set of dice that knows which dice were dropped and how to total itself. To parse notation into
//! groups, see [`parse`](crate::parse::parse()).

pub mod roller;
pub mod selection;

use std::{borrow::Cow, cmp, fmt};

pub use self::{
	roller::Roller,
	selection::{Selection, Side},
};
use crate::{
	rules::{ClampOrder, Rules},
	session::Describe,
};

/// One group of identical dice along with everything that should happen to them once rolled
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct DiceGroup {
	/// Exact notation text this group was parsed from (after whitespace removal and lowercasing)
	pub raw_text: String,

	/// Number of dice to roll
	pub count: u32,

	/// Kind of die to roll
	pub sides: Sides,

	/// Which of the rolled dice count towards the total, if not all of them
	pub selection: Option<Selection>,

	/// Floor or ceiling for the subtotal
	pub clamp: Option<Clamp>,

	/// Arithmetic applied to the subtotal, in order
	pub modifiers: Vec<Modifier>,

	/// Trailing operator that joined this group to the next one. Only used for display.
	pub continuation: Option<Op>,
}

impl DiceGroup {
	/// Creates a new group of plain dice with a given count and kind of die.
	#[must_use]
	pub fn new(count: u32, sides: Sides) -> Self {
		Self::builder().count(count).sides(sides).build()
	}

	/// Creates a new dice group builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Number of dice that are actually rolled. Advantage and disadvantage always roll at least two.
	#[must_use]
	pub fn effective_count(&self) -> u32 {
		match self.selection {
			Some(Selection::Advantage | Selection::Disadvantage) => cmp::max(self.count, 2),
			_ => self.count,
		}
	}

	/// Checks the group against the limits of a set of rules.
	///
	/// # Errors
	/// If the group rolls too many or too few dice, has dice with too many or too few sides, or divides by zero, an
	/// error variant describing the violated limit is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::{DiceGroup, Error, Sides}, rules::Rules};
	///
	/// let group = DiceGroup::new(101, Sides::Num(6));
	/// assert!(matches!(group.validate(&Rules::default()), Err(Error::TooManyDice { count: 101, max: 100 })));
	/// ```
	pub fn validate(&self, rules: &Rules) -> Result<(), Error> {
		if self.count > rules.max_dice {
			return Err(Error::TooManyDice {
				count: self.count,
				max: rules.max_dice,
			});
		}
		if self.count == 0 {
			return Err(Error::NoDice);
		}

		if let Sides::Num(sides) = self.sides {
			if sides == 0 {
				return Err(Error::NoSides);
			}
			if sides > rules.max_sides {
				return Err(Error::DiceTooLarge {
					sides,
					max: rules.max_sides,
				});
			}
		}

		if self
			.modifiers
			.iter()
			.any(|modifier| modifier.op == Op::Div && modifier.operand == 0)
		{
			return Err(Error::DivisionByZero);
		}

		Ok(())
	}

	/// Splits the raw notation text into the part up to and including `d<sides>` and everything after it.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{DiceGroup, Sides};
	///
	/// let group = DiceGroup::builder().count(2).sides(Sides::Num(20)).raw_text("2d20kl1+2-").build();
	/// assert_eq!(group.split_notation(), ("2d20", "kl1+2-"));
	/// ```
	#[must_use]
	pub fn split_notation(&self) -> (&str, &str) {
		let text = self.raw_text.as_str();
		let head_len = text.find('d').map_or(0, |d_pos| {
			let after = &text[d_pos + 1..];
			let sides_len = if after.starts_with('f') {
				1
			} else {
				after.bytes().take_while(u8::is_ascii_digit).count()
			};
			d_pos + 1 + sides_len
		});
		text.split_at(head_len)
	}
}

impl Default for DiceGroup {
	/// Creates the default group (1d20).
	#[inline]
	fn default() -> Self {
		Self {
			raw_text: String::new(),
			count: 1,
			sides: Sides::Num(20),
			selection: None,
			clamp: None,
			modifiers: Vec::new(),
			continuation: None,
		}
	}
}

impl fmt::Display for DiceGroup {
	/// Formats the group as canonical notation, always including the count (e.g. `1d20`, `4d6dl1+2`).
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)?;
		if let Some(selection) = self.selection {
			write!(f, "{selection}")?;
		}
		if let Some(clamp) = self.clamp {
			write!(f, "{clamp}")?;
		}
		for modifier in &self.modifiers {
			write!(f, "{modifier}")?;
		}
		if let Some(op) = self.continuation {
			write!(f, "{op}")?;
		}
		Ok(())
	}
}

/// Kind of die in a [`DiceGroup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Notation only has numeric and fudge dice")]
pub enum Sides {
	/// Die with faces from 1 to the given number
	Num(u32),

	/// Fudge/fate die, with the faces -1, 0, and +1
	Fudge,
}

impl Sides {
	/// Lowest face of the die.
	#[must_use]
	pub const fn min_face(self) -> i32 {
		match self {
			Self::Num(..) => 1,
			Self::Fudge => -1,
		}
	}

	/// Highest face of the die. Faces beyond [`i32::MAX`] saturate.
	#[must_use]
	pub fn max_face(self) -> i32 {
		match self {
			Self::Num(sides) => i32::try_from(sides).unwrap_or(i32::MAX),
			Self::Fudge => 1,
		}
	}
}

impl fmt::Display for Sides {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Num(sides) => write!(f, "{sides}"),
			Self::Fudge => f.write_str("f"),
		}
	}
}

/// Arithmetic operator used by [`Modifier`]s and group continuations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Notation only has four operators")]
pub enum Op {
	/// Addition. Symbol: `+`
	Add,

	/// Subtraction. Symbol: `-`
	Sub,

	/// Multiplication. Symbol: `*`
	Mul,

	/// Real-number division. Symbol: `/`
	Div,
}

impl Op {
	/// Gets the symbol that represents the operator.
	#[must_use]
	pub const fn symbol(self) -> char {
		match self {
			Self::Add => '+',
			Self::Sub => '-',
			Self::Mul => '*',
			Self::Div => '/',
		}
	}

	/// Applies the operator to two values.
	#[must_use]
	pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
		match self {
			Self::Add => lhs + rhs,
			Self::Sub => lhs - rhs,
			Self::Mul => lhs * rhs,
			Self::Div => lhs / rhs,
		}
	}
}

impl fmt::Display for Op {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.symbol())
	}
}

/// Arithmetic step applied to a group's subtotal, such as `+2` or `/3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct Modifier {
	/// Operator to apply
	pub op: Op,

	/// Right-hand side of the operation
	pub operand: u32,
}

impl Modifier {
	/// Creates a new modifier.
	#[must_use]
	pub const fn new(op: Op, operand: u32) -> Self {
		Self { op, operand }
	}

	/// Applies the modifier to a running total.
	#[must_use]
	pub fn apply(self, total: f64) -> f64 {
		self.op.apply(total, f64::from(self.operand))
	}
}

impl fmt::Display for Modifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.op, self.operand)
	}
}

/// Floor or ceiling for a group's subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Unlikely to change, no logical fallback")]
pub enum Clamp {
	/// Raises subtotals below the threshold up to it. Notation: `min<threshold>`
	Min(u32),

	/// Lowers subtotals above the threshold down to it. Notation: `max<threshold>`
	Max(u32),
}

impl Clamp {
	/// Gets the threshold of the clamp.
	#[must_use]
	pub const fn threshold(self) -> u32 {
		match self {
			Self::Min(threshold) | Self::Max(threshold) => threshold,
		}
	}

	/// Applies the clamp to a total.
	#[must_use]
	pub fn apply(self, total: f64) -> f64 {
		match self {
			Self::Min(min) => total.max(f64::from(min)),
			Self::Max(max) => total.min(f64::from(max)),
		}
	}
}

impl fmt::Display for Clamp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Min(min) => write!(f, "min{min}"),
			Self::Max(max) => write!(f, "max{max}"),
		}
	}
}

/// Single die produced from rolling a [`DiceGroup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct DieRoll {
	/// Value that was rolled
	pub val: i32,

	/// Selection that caused the drop of this die, if any
	pub dropped_by: Option<Selection>,
}

impl DieRoll {
	/// Creates a new die roll with the given value.
	#[must_use]
	pub const fn new(val: i32) -> Self {
		Self { val, dropped_by: None }
	}

	/// Marks this die roll as dropped by a given selection, setting [`Self::dropped_by`].
	///
	/// # Panics
	/// Panics if `Self::dropped_by` is already [`Some`].
	pub fn drop(&mut self, from: Selection) {
		assert!(
			self.dropped_by.is_none(),
			"marking a die as dropped that has already been dropped"
		);
		self.dropped_by = Some(from);
	}

	/// Indicates whether this die roll has been dropped by a selection.
	#[must_use]
	#[inline]
	pub const fn is_dropped(&self) -> bool {
		self.dropped_by.is_some()
	}

	/// Indicates whether this die roll is being kept. This is the direct inverse of [`DieRoll::is_dropped()`].
	#[must_use]
	#[inline]
	pub const fn is_kept(&self) -> bool {
		self.dropped_by.is_none()
	}
}

impl PartialOrd for DieRoll {
	fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for DieRoll {
	fn cmp(&self, other: &Self) -> cmp::Ordering {
		self.val.cmp(&other.val)
	}
}

impl fmt::Display for DieRoll {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// Kept rolls are wrapped in bold markers and dropped rolls in strikethrough markers.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{DieRoll, Selection};
	///
	/// let mut roll = DieRoll::new(4);
	/// assert_eq!(roll.to_string(), "**4**");
	/// roll.drop(Selection::KeepHigh(1));
	/// assert_eq!(roll.to_string(), "~~4~~");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_dropped() {
			write!(f, "~~{}~~", self.val)
		} else {
			write!(f, "**{}**", self.val)
		}
	}
}

/// Representation of the result from rolling a [`DiceGroup`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Rolled<'a> {
	/// Each individual die roll that was made, in the order it was made
	pub rolls: Vec<DieRoll>,

	/// Group that was rolled to produce this
	pub group: Cow<'a, DiceGroup>,
}

impl Rolled<'_> {
	/// Values of every die that was rolled, in roll order.
	#[must_use]
	pub fn raw_rolls(&self) -> Vec<i32> {
		self.rolls.iter().map(|roll| roll.val).collect()
	}

	/// Values of the dice that count towards the total. These are in roll order when the group has no selection, and
	/// in ascending order otherwise.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{roller::{Iter as IterRoller, Roller}, DiceGroup, Sides};
	/// use dicebag::rules::Rules;
	///
	/// let group = DiceGroup::builder().count(4).sides(Sides::Num(6)).keep_high(3).build();
	/// let rolled = IterRoller::new([1, 6, 6, 3]).roll(&group, &Rules::default())?;
	/// assert_eq!(rolled.kept_rolls(), vec![3, 6, 6]);
	/// assert_eq!(rolled.dropped_rolls(), vec![1]);
	/// # Ok::<(), dicebag::dice::Error>(())
	/// ```
	#[must_use]
	pub fn kept_rolls(&self) -> Vec<i32> {
		let mut kept = self
			.rolls
			.iter()
			.filter(|roll| roll.is_kept())
			.map(|roll| roll.val)
			.collect::<Vec<_>>();
		if self.group.selection.is_some() {
			kept.sort_unstable();
		}
		kept
	}

	/// Values of the dice that were dropped, in ascending order.
	#[must_use]
	pub fn dropped_rolls(&self) -> Vec<i32> {
		let mut dropped = self
			.rolls
			.iter()
			.filter(|roll| roll.is_dropped())
			.map(|roll| roll.val)
			.collect::<Vec<_>>();
		dropped.sort_unstable();
		dropped
	}

	/// Sums all kept rolls, before any clamp or modifier.
	#[must_use]
	pub fn sum(&self) -> i64 {
		self.rolls
			.iter()
			.filter(|roll| roll.is_kept())
			.map(|roll| i64::from(roll.val))
			.sum()
	}

	/// Calculates the subtotal of the group with its clamp applied before its modifiers.
	///
	/// This always uses [`ClampOrder::BeforeModifiers`], whatever [`Rules`](crate::Rules) the group was rolled with.
	/// Use [`RollSession::subtotal`](crate::RollSession::subtotal) or [`Self::total_with`] to honor a session's clamp
	/// order.
	#[must_use]
	#[inline]
	pub fn total(&self) -> f64 {
		self.total_with(ClampOrder::BeforeModifiers)
	}

	/// Calculates the subtotal of the group, applying its clamp and modifiers in the given order.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{Clamp, DiceGroup, Modifier, Op, Rolled, Sides};
	/// use dicebag::rules::ClampOrder;
	///
	/// let group = DiceGroup::builder().count(2).sides(Sides::Num(6)).min(10).modifier(Op::Sub, 4).build();
	/// let rolled = Rolled::from_group_and_rolls(&group, [1, 2]);
	/// assert_eq!(rolled.total_with(ClampOrder::BeforeModifiers), 6.0);
	/// assert_eq!(rolled.total_with(ClampOrder::AfterModifiers), 10.0);
	/// ```
	#[must_use]
	#[expect(
		clippy::cast_precision_loss,
		reason = "Sums are bounded by the dice limits and stay far below 2^52"
	)]
	pub fn total_with(&self, order: ClampOrder) -> f64 {
		let clamp = |total: f64| self.group.clamp.map_or(total, |clamp| clamp.apply(total));
		let modify = |total: f64| {
			self.group
				.modifiers
				.iter()
				.fold(total, |total, modifier| modifier.apply(total))
		};

		let sum = self.sum() as f64;
		match order {
			ClampOrder::BeforeModifiers => modify(clamp(sum)),
			ClampOrder::AfterModifiers => clamp(modify(sum)),
		}
	}

	/// Moves all of self's owned data into a new instance and clones any unowned data in order to create a `'static`
	/// instance of self.
	#[must_use]
	pub fn into_owned(self) -> Rolled<'static> {
		Rolled {
			rolls: self.rolls,
			group: Cow::Owned(self.group.into_owned()),
		}
	}

	/// Creates a new rolled group from a given group and an iterator of values, without applying its selection.
	#[must_use]
	pub fn from_group_and_rolls(group: &DiceGroup, rolls: impl IntoIterator<Item = i32>) -> Rolled<'_> {
		Rolled {
			rolls: rolls.into_iter().map(DieRoll::new).collect(),
			group: Cow::Borrowed(group),
		}
	}
}

impl Describe for Rolled<'_> {
	/// Builds the group's notation with the list of individual rolls inserted right after `d<sides>`
	/// (see [`DieRoll::fmt()`]).
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::{roller::{Iter as IterRoller, Roller}, DiceGroup, Sides}, rules::Rules, session::Describe};
	///
	/// let group = DiceGroup::builder().count(2).sides(Sides::Num(20)).keep_low(1).raw_text("2d20kl1+2").build();
	/// let rolled = IterRoller::new([18, 4]).roll(&group, &Rules::default())?;
	/// assert_eq!(rolled.describe(None), "2d20[~~18~~, **4**]kl1+2");
	/// assert_eq!(rolled.describe(Some(1)), "2d20[~~18~~, 1 more...]kl1+2");
	/// # Ok::<(), dicebag::dice::Error>(())
	/// ```
	///
	/// [`DieRoll::fmt()`]: ./struct.DieRoll.html#method.fmt
	fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated_rolls = self.rolls.len().saturating_sub(list_limit);
		let (head, tail) = self.group.split_notation();

		format!(
			"{head}[{}{}]{tail}",
			self.rolls
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			}
		)
	}
}

impl fmt::Display for Rolled<'_> {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// A limit violated by a [`DiceGroup`]
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The group rolls more dice than allowed.
	#[error("too many dice ({count} requested, at most {max} allowed)")]
	TooManyDice {
		/// Number of dice requested
		count: u32,

		/// Maximum allowed
		max: u32,
	},

	/// The group's dice have more sides than allowed.
	#[error("dice too large ({sides} sides requested, at most {max} allowed)")]
	DiceTooLarge {
		/// Number of sides requested
		sides: u32,

		/// Maximum allowed
		max: u32,
	},

	/// The group rolls zero dice.
	#[error("no dice to roll")]
	NoDice,

	/// The group's dice have zero sides.
	#[error("dice must have at least one side")]
	NoSides,

	/// One of the group's modifiers divides by zero.
	#[error("division by zero")]
	DivisionByZero,
}

/// Builds [`DiceGroup`]s with a fluent interface.
///
/// Unless [`Builder::raw_text()`] is used, the built group's raw text is its canonical notation.
///
/// # Examples
///
/// ## Basic dice
/// ```
/// use dicebag::dice::{DiceGroup, Sides};
///
/// let group = DiceGroup::builder().count(2).sides(Sides::Num(6)).build();
/// assert_eq!(group, DiceGroup::new(2, Sides::Num(6)));
/// assert_eq!(group.raw_text, "2d6");
/// ```
///
/// ## Selection, clamp, and modifiers
/// ```
/// use dicebag::dice::{Clamp, DiceGroup, Modifier, Op, Selection, Sides};
///
/// let group = DiceGroup::builder()
/// 	.count(2)
/// 	.sides(Sides::Num(20))
/// 	.keep_low(1)
/// 	.min(5)
/// 	.modifier(Op::Add, 2)
/// 	.continuation(Op::Sub)
/// 	.build();
/// assert_eq!(group.selection, Some(Selection::KeepLow(1)));
/// assert_eq!(group.clamp, Some(Clamp::Min(5)));
/// assert_eq!(group.modifiers, vec![Modifier::new(Op::Add, 2)]);
/// assert_eq!(group.raw_text, "2d20kl1min5+2-");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder(DiceGroup);

impl Builder {
	/// Sets the number of dice to roll.
	#[must_use]
	pub fn count(mut self, count: u32) -> Self {
		self.0.count = count;
		self
	}

	/// Sets the kind of die.
	#[must_use]
	pub fn sides(mut self, sides: Sides) -> Self {
		self.0.sides = sides;
		self
	}

	/// Sets the selection to apply to the rolls.
	#[must_use]
	pub fn selection(mut self, selection: Selection) -> Self {
		self.0.selection = Some(selection);
		self
	}

	/// Rolls with advantage (keep the highest of at least two).
	#[must_use]
	pub fn advantage(self) -> Self {
		self.selection(Selection::Advantage)
	}

	/// Rolls with disadvantage (keep the lowest of at least two).
	#[must_use]
	pub fn disadvantage(self) -> Self {
		self.selection(Selection::Disadvantage)
	}

	/// Keeps the highest `amount` dice.
	#[must_use]
	pub fn keep_high(self, amount: u32) -> Self {
		self.selection(Selection::KeepHigh(amount))
	}

	/// Keeps the lowest `amount` dice.
	#[must_use]
	pub fn keep_low(self, amount: u32) -> Self {
		self.selection(Selection::KeepLow(amount))
	}

	/// Drops the highest `amount` dice.
	#[must_use]
	pub fn drop_high(self, amount: u32) -> Self {
		self.selection(Selection::DropHigh(amount))
	}

	/// Drops the lowest `amount` dice.
	#[must_use]
	pub fn drop_low(self, amount: u32) -> Self {
		self.selection(Selection::DropLow(amount))
	}

	/// Sets a minimum subtotal.
	#[must_use]
	pub fn min(mut self, min: u32) -> Self {
		self.0.clamp = Some(Clamp::Min(min));
		self
	}

	/// Sets a maximum subtotal.
	#[must_use]
	pub fn max(mut self, max: u32) -> Self {
		self.0.clamp = Some(Clamp::Max(max));
		self
	}

	/// Appends an arithmetic modifier.
	#[must_use]
	pub fn modifier(mut self, op: Op, operand: u32) -> Self {
		self.0.modifiers.push(Modifier::new(op, operand));
		self
	}

	/// Sets the trailing continuation operator.
	#[must_use]
	pub fn continuation(mut self, op: Op) -> Self {
		self.0.continuation = Some(op);
		self
	}

	/// Sets the raw notation text instead of using the canonical notation.
	#[must_use]
	pub fn raw_text(mut self, text: impl Into<String>) -> Self {
		self.0.raw_text = text.into();
		self
	}

	/// Finalizes the group.
	#[must_use]
	pub fn build(mut self) -> DiceGroup {
		if self.0.raw_text.is_empty() {
			self.0.raw_text = self.0.to_string();
		}
		self.0
	}
}
