//! Abstractions for rolling [`DieRoll`]s using various means, and resolving whole [`DiceGroup`]s with them.

use std::{borrow::Cow, iter::Peekable};

#[cfg(feature = "fastrand")]
use fastrand::Rng;
use tracing::{debug, trace};

use super::{DiceGroup, DieRoll, Error, Rolled, Sides};
use crate::rules::Rules;

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die.
	#[must_use]
	fn roll_die(&mut self, sides: Sides) -> DieRoll;

	/// Validates a dice group, rolls it, and applies its selection to the rolls.
	///
	/// # Errors
	/// If the group violates any of the limits in `rules`, an error variant is returned before anything is rolled.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::{roller::{Iter as IterRoller, Roller}, DiceGroup, Sides}, rules::Rules};
	///
	/// let group = DiceGroup::builder().sides(Sides::Num(20)).advantage().build();
	/// let rolled = IterRoller::new([7, 13]).roll(&group, &Rules::default())?;
	/// assert_eq!(rolled.raw_rolls(), vec![7, 13]);
	/// assert_eq!(rolled.kept_rolls(), vec![13]);
	/// # Ok::<(), dicebag::dice::Error>(())
	/// ```
	fn roll<'g, 'r>(&mut self, group: &'g DiceGroup, rules: &Rules) -> Result<Rolled<'r>, Error>
	where
		'g: 'r,
	{
		group.validate(rules)?;

		// Roll the dice!
		let count = group.effective_count();
		let mut rolls = Vec::with_capacity(count as usize);
		for _ in 0..count {
			let roll = self.roll_die(group.sides);
			trace!(sides = %group.sides, val = roll.val, "rolled die");
			rolls.push(roll);
		}

		let mut rolled = Rolled {
			rolls,
			group: Cow::Borrowed(group),
		};
		if let Some(selection) = group.selection {
			selection.apply(&mut rolled);
		}

		debug!(
			group = %group.raw_text,
			raw = ?rolled.raw_rolls(),
			kept = ?rolled.kept_rolls(),
			"rolled dice group"
		);
		Ok(rolled)
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// Numeric dice roll uniformly between 1 and their number of sides, and fudge dice roll uniformly from -1, 0, and 1.
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use dicebag::{dice::{roller::{FastRand as FastRandRoller, Roller}, DiceGroup, Sides}, rules::Rules};
///
/// let mut roller = FastRandRoller::default();
///
/// let group = DiceGroup::new(4, Sides::Num(6));
/// let rolled = roller.roll(&group, &Rules::default())?;
/// assert!(rolled.raw_rolls().iter().all(|val| (1..=6).contains(val)));
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use dicebag::{dice::{roller::{FastRand as FastRandRoller, Roller}, DiceGroup, Sides}, rules::Rules};
///
/// let group = DiceGroup::new(4, Sides::Fudge);
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&group, &Rules::default())?;
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&group, &Rules::default())?;
/// assert_eq!(first, second);
/// assert!(first.raw_rolls().iter().all(|val| (-1..=1).contains(val)));
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone, Default)]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: Sides) -> DieRoll {
		let (min, max) = (sides.min_face(), sides.max_face());
		if max >= min {
			DieRoll::new(self.0.i32(min..=max))
		} else {
			DieRoll::new(0)
		}
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use dicebag::{dice::{roller::{Roller, Val as ValRoller}, DiceGroup, Sides}, rules::Rules};
///
/// let mut roller = ValRoller(42);
///
/// let group = DiceGroup::new(4, Sides::Num(6));
/// let rolled = roller.roll(&group, &Rules::default())?;
/// assert!(rolled.rolls.iter().all(|roll| roll.val == 42));
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub i32);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: Sides) -> DieRoll {
		DieRoll::new(self.0)
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use dicebag::{dice::{roller::{Max as MaxRoller, Roller}, DiceGroup, Sides}, rules::Rules};
///
/// let mut roller = MaxRoller;
///
/// let group = DiceGroup::new(4, Sides::Num(6));
/// let rolled = roller.roll(&group, &Rules::default())?;
/// assert!(rolled.rolls.iter().all(|roll| roll.val == 6));
///
/// let group = DiceGroup::new(2, Sides::Fudge);
/// let rolled = roller.roll(&group, &Rules::default())?;
/// assert!(rolled.rolls.iter().all(|roll| roll.val == 1));
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the highest face.
	#[inline]
	fn roll_die(&mut self, sides: Sides) -> DieRoll {
		DieRoll::new(sides.max_face())
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use dicebag::{dice::{roller::{Iter as IterRoller, Roller}, DiceGroup, Sides}, rules::Rules};
///
/// let mut roller = IterRoller::new(vec![2, 5, 1]);
/// let group = DiceGroup::new(3, Sides::Num(6));
/// let rolled = roller.roll(&group, &Rules::default())?;
/// assert_eq!(rolled.raw_rolls(), vec![2, 5, 1]);
/// assert!(!roller.can_roll());
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = i32>>(Peekable<I>);

impl<I: Iterator<Item = i32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = i32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: Sides) -> DieRoll {
		DieRoll::new(self.0.next().expect("iterator is finished"))
	}
}
