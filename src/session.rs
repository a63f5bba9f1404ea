//! Roll sessions: everything produced by rolling one piece of notation, and rendering it back as a transcript.

use std::fmt;

use tracing::debug;

use crate::{
	dice::{DiceGroup, Rolled, Roller},
	error::NotationError,
	rules::Rules,
};

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed description of the value, listing every individual die that was rolled (ideally, up to
	/// `list_limit` of them per group).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// Result of rolling every group in one piece of notation
///
/// # Examples
/// ```
/// use dicebag::{dice::roller::Iter as IterRoller, session::Describe, RollSession, Rules};
///
/// let mut roller = IterRoller::new([18, 4, 3, 1, 4, 2, 5, 6, 7, 1, 8, 2, 3, 4, 5, 6]);
/// let session = RollSession::roll("2d20kl1min5+2- 4d4d2+6+ 8d8+9", &mut roller, Rules::default())?;
///
/// assert_eq!(session.groups().len(), 3);
/// assert_eq!(session.subtotal(&session.results()[0]), 7.0);
/// assert_eq!(session.subtotal(&session.results()[1]), 13.0);
/// assert_eq!(session.subtotal(&session.results()[2]), 45.0);
/// assert_eq!(session.grand_total(), 65.0);
/// assert_eq!(
/// 	session.describe(None),
/// 	"2d20[~~18~~, **4**]kl1min5+2-4d4[**3**, ~~1~~, **4**, ~~2~~]d2+6+\
/// 	 8d8[**5**, **6**, **7**, **1**, **8**, **2**, **3**, **4**]+9 = 65"
/// );
/// # Ok::<(), dicebag::NotationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RollSession {
	/// Notation as supplied by the caller
	input: String,

	/// Rules the groups were validated and totalled under
	rules: Rules,

	/// Resolved groups, in notation order
	results: Vec<Rolled<'static>>,
}

impl RollSession {
	/// Parses a piece of notation and rolls every group in it.
	///
	/// # Errors
	/// If the notation is malformed, [`NotationError::Syntax`] is returned. If any group breaks one of the limits in
	/// `rules`, [`NotationError::Validation`] is returned and nothing is rolled.
	#[cfg(feature = "parse")]
	pub fn roll(notation: &str, roller: &mut impl Roller, rules: Rules) -> Result<Self, NotationError> {
		let groups = crate::parse::parse(notation)?;
		Self::from_groups(notation, groups, roller, rules)
	}

	/// Rolls a set of already-parsed groups. `input` is only used for error messages and [`Self::input()`].
	///
	/// Every group is validated before any of them are rolled, so a failure never consumes randomness.
	///
	/// # Errors
	/// If any group breaks one of the limits in `rules`, [`NotationError::Validation`] is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::{roller::Val as ValRoller, DiceGroup, Sides}, NotationError, RollSession, Rules};
	///
	/// let groups = vec![DiceGroup::new(101, Sides::Num(6))];
	/// let err = RollSession::from_groups("101d6", groups, &mut ValRoller(1), Rules::default()).unwrap_err();
	/// assert!(matches!(err, NotationError::Validation { .. }));
	/// assert!(err.to_string().starts_with("too many dice"));
	/// ```
	pub fn from_groups(
		input: &str,
		groups: impl IntoIterator<Item = DiceGroup>,
		roller: &mut impl Roller,
		rules: Rules,
	) -> Result<Self, NotationError> {
		let groups = groups.into_iter().collect::<Vec<_>>();
		let invalid = |reason| NotationError::Validation {
			input: input.to_owned(),
			reason,
		};

		for group in &groups {
			group.validate(&rules).map_err(invalid)?;
		}

		let results = groups
			.iter()
			.map(|group| roller.roll(group, &rules).map(Rolled::into_owned))
			.collect::<Result<Vec<_>, _>>()
			.map_err(invalid)?;

		let session = Self {
			input: input.to_owned(),
			rules,
			results,
		};
		debug!(
			input,
			subtotals = ?session.results.iter().map(|rolled| session.subtotal(rolled)).collect::<Vec<_>>(),
			total = session.grand_total(),
			"rolled session"
		);
		Ok(session)
	}

	/// Gets the notation as supplied by the caller.
	#[must_use]
	#[inline]
	pub fn input(&self) -> &str {
		&self.input
	}

	/// Gets the rules the session was rolled under.
	#[must_use]
	#[inline]
	pub const fn rules(&self) -> &Rules {
		&self.rules
	}

	/// Iterates over the parsed groups, in notation order.
	pub fn groups(&self) -> impl Iterator<Item = &DiceGroup> + ExactSizeIterator {
		self.results.iter().map(|rolled| rolled.group.as_ref())
	}

	/// Gets the resolved groups, in notation order.
	#[must_use]
	#[inline]
	pub fn results(&self) -> &[Rolled<'static>] {
		&self.results
	}

	/// Calculates the subtotal of one resolved group under the session's clamp order.
	#[must_use]
	pub fn subtotal(&self, rolled: &Rolled) -> f64 {
		rolled.total_with(self.rules.clamp_order)
	}

	/// Sums the subtotals of every group. Continuation operators don't affect this, they're only displayed.
	#[must_use]
	pub fn grand_total(&self) -> f64 {
		self.results.iter().map(|rolled| self.subtotal(rolled)).sum()
	}

	/// Rounds the grand total to the nearest integer for display.
	#[must_use]
	#[expect(
		clippy::cast_possible_truncation,
		reason = "Totals are bounded by the dice limits and modifier operands"
	)]
	pub fn rounded_total(&self) -> i64 {
		self.grand_total().round() as i64
	}
}

impl Describe for RollSession {
	/// Builds the annotated transcript of every group (see [`Rolled::describe()`]) followed by ` = <rounded total>`.
	///
	/// [`Rolled::describe()`]: crate::dice::Rolled#method.describe
	fn describe(&self, list_limit: Option<usize>) -> String {
		let groups = self
			.results
			.iter()
			.map(|rolled| rolled.describe(list_limit))
			.collect::<String>();
		format!("{groups} = {}", self.rounded_total())
	}
}

impl fmt::Display for RollSession {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}
