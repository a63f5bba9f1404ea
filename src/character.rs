//! Rolls used when creating or levelling up a character.

use std::{array, iter};

use tracing::debug;

use crate::{
	dice::{DiceGroup, Error, Rolled, Roller, Selection, Sides},
	rules::Rules,
};

/// Rolls six ability scores, each being `4d6` with the lowest die dropped, sorted in ascending order.
///
/// # Examples
/// ```
/// use dicebag::{character, dice::roller::Iter as IterRoller};
///
/// let mut roller = IterRoller::new([
/// 	6, 6, 6, 1, // 18
/// 	1, 1, 1, 1, // 3
/// 	3, 4, 5, 2, // 12
/// 	2, 2, 2, 6, // 10
/// 	5, 5, 1, 4, // 14
/// 	6, 1, 2, 3, // 11
/// ]);
/// assert_eq!(character::ability_scores(&mut roller), [3, 10, 11, 12, 14, 18]);
/// ```
#[must_use]
pub fn ability_scores(roller: &mut impl Roller) -> [i64; 6] {
	let group = DiceGroup::builder()
		.count(4)
		.sides(Sides::Num(6))
		.drop_low(1)
		.build();

	let mut scores: [i64; 6] = array::from_fn(|_| {
		let mut rolled = Rolled::from_group_and_rolls(&group, (0..4).map(|_| roller.roll_die(group.sides).val));
		Selection::DropLow(1).apply(&mut rolled);
		rolled.sum()
	});
	scores.sort_unstable();

	debug!(?scores, "rolled ability scores");
	scores
}

/// Rolls hit points for every level of a character, returning the hit points gained at each level.
///
/// The first level always gets the maximum of the hit die. Every further level rolls uniformly between just over half
/// the hit die and its maximum (`5..=10` for a d10). A hit die below 1 is treated as 1.
///
/// # Errors
/// If the level or hit die break the default [`Rules`] limits, an error variant is returned.
///
/// # Examples
/// ```
/// use dicebag::{character, dice::roller::{Iter as IterRoller, Val as ValRoller}};
///
/// // Rolls of 1 and 5 on the d5 spanning 4..=8
/// let hp = character::hit_points(&mut IterRoller::new([1, 5]), 3, 8)?;
/// assert_eq!(hp, vec![8, 4, 8]);
///
/// assert_eq!(character::hit_points(&mut ValRoller(1), 1, 12)?, vec![12]);
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
pub fn hit_points(roller: &mut impl Roller, level: u32, hit_die: u32) -> Result<Vec<u32>, Error> {
	let hit_die = hit_die.max(1);
	if level <= 1 {
		return Ok(vec![hit_die]);
	}

	let min_roll = (hit_die - 1) / 2 + 1;
	let group = DiceGroup::new(level - 1, Sides::Num(hit_die - min_roll + 1));
	let rolled = roller.roll(&group, &Rules::default())?;

	let hp = iter::once(hit_die)
		.chain(
			rolled
				.rolls
				.iter()
				.map(|roll| roll.val.unsigned_abs() + min_roll - 1),
		)
		.collect::<Vec<_>>();
	debug!(level, hit_die, ?hp, "rolled hit points");
	Ok(hp)
}
