//! Keep/drop selections and their application to rolled dice.

use std::fmt;

use super::Rolled;

/// Which end of the sorted rolls a [`Selection`] works from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "There are only two ends")]
pub enum Side {
	/// Highest values
	High,

	/// Lowest values
	Low,
}

/// Rule for choosing which rolled dice of a group count towards its total
///
/// Amounts larger than the number of dice rolled are clamped to it, so keeping more dice than were rolled keeps all of
/// them, and dropping more dice than were rolled drops all of them.
///
/// # Examples
///
/// ## Keep highest 3 (`4d6k3`)
/// ```
/// use dicebag::{dice::{roller::{Iter as IterRoller, Roller}, DiceGroup, Sides}, rules::Rules};
///
/// let group = DiceGroup::builder().count(4).sides(Sides::Num(6)).keep_high(3).build();
/// let rolled = IterRoller::new([1, 6, 6, 3]).roll(&group, &Rules::default())?;
/// assert_eq!(rolled.kept_rolls(), vec![3, 6, 6]);
/// assert_eq!(rolled.sum(), 15);
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
///
/// ## Drop highest 1 (`3d8dh1`)
/// ```
/// use dicebag::{dice::{roller::{Iter as IterRoller, Roller}, DiceGroup, Sides}, rules::Rules};
///
/// let group = DiceGroup::builder().count(3).sides(Sides::Num(8)).drop_high(1).build();
/// let rolled = IterRoller::new([7, 2, 5]).roll(&group, &Rules::default())?;
/// assert_eq!(rolled.kept_rolls(), vec![2, 5]);
/// assert_eq!(rolled.dropped_rolls(), vec![7]);
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Unlikely to change, mirrors the notation")]
pub enum Selection {
	/// Keeps the single highest die. Notation: `@adv`
	Advantage,

	/// Keeps the single lowest die. Notation: `@dis`
	Disadvantage,

	/// Keeps the highest x dice, dropping the rest. Notation: `k<x>` or `kh<x>`
	KeepHigh(u32),

	/// Keeps the lowest x dice, dropping the rest. Notation: `kl<x>`
	KeepLow(u32),

	/// Drops the highest x dice, keeping the rest. Notation: `dh<x>`
	DropHigh(u32),

	/// Drops the lowest x dice, keeping the rest. Notation: `d<x>` or `dl<x>`
	DropLow(u32),
}

impl Selection {
	/// Gets the side of the sorted rolls the selection works from.
	#[must_use]
	pub const fn side(self) -> Side {
		match self {
			Self::Advantage | Self::KeepHigh(..) | Self::DropHigh(..) => Side::High,
			Self::Disadvantage | Self::KeepLow(..) | Self::DropLow(..) => Side::Low,
		}
	}

	/// Gets the number of dice the selection keeps or drops.
	#[must_use]
	pub const fn amount(self) -> u32 {
		match self {
			Self::Advantage | Self::Disadvantage => 1,
			Self::KeepHigh(amount) | Self::KeepLow(amount) | Self::DropHigh(amount) | Self::DropLow(amount) => amount,
		}
	}

	/// Indicates whether the selection names the dice to keep (as opposed to the dice to drop).
	#[must_use]
	pub const fn is_keep(self) -> bool {
		!matches!(self, Self::DropHigh(..) | Self::DropLow(..))
	}

	/// Picks the values to keep from values sorted in ascending order.
	#[must_use]
	pub fn kept(self, sorted: &[i32]) -> &[i32] {
		let len = sorted.len();
		let amount = usize::try_from(self.amount()).map_or(len, |amount| amount.min(len));

		match (self.is_keep(), self.side()) {
			(true, Side::High) => &sorted[len - amount..],
			(true, Side::Low) => &sorted[..amount],
			(false, Side::High) => &sorted[..len - amount],
			(false, Side::Low) => &sorted[amount..],
		}
	}

	/// Applies the selection to a set of rolled dice, marking every die that isn't kept as dropped.
	///
	/// Rolls are walked in roll order, so when several dice share a value the earliest ones are the ones kept.
	pub fn apply(self, rolled: &mut Rolled) {
		let mut sorted = rolled
			.rolls
			.iter()
			.filter(|roll| roll.is_kept())
			.map(|roll| roll.val)
			.collect::<Vec<_>>();
		sorted.sort_unstable();
		let mut to_keep = self.kept(&sorted).to_vec();

		for roll in rolled.rolls.iter_mut().filter(|roll| roll.is_kept()) {
			if let Some(pos) = to_keep.iter().position(|&val| val == roll.val) {
				to_keep.swap_remove(pos);
			} else {
				roll.drop(self);
			}
		}
	}
}

impl fmt::Display for Selection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Advantage => f.write_str("@adv"),
			Self::Disadvantage => f.write_str("@dis"),
			Self::KeepHigh(amount) => write!(f, "kh{amount}"),
			Self::KeepLow(amount) => write!(f, "kl{amount}"),
			Self::DropHigh(amount) => write!(f, "dh{amount}"),
			Self::DropLow(amount) => write!(f, "dl{amount}"),
		}
	}
}
