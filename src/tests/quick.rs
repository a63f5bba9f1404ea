use crate::{
	dice::{
		roller::{Iter as IterRoller, Val as ValRoller},
		Error, Sides,
	},
	quick::{self, Edge},
	rules::Rules,
	session::Describe,
};

#[test]
fn plain_roll() {
	let roll = quick::roll(&mut IterRoller::new([4, 5]), 6, 2, 0, None, &Rules::default()).unwrap();
	assert_eq!(roll.sides(), Sides::Num(6));
	assert_eq!(roll.result(), 9);
	assert_eq!(roll.title(), "Rolled d6");
	assert_eq!(roll.describe(None), "Result: [**9**] = 9");
}

#[test]
fn negative_modifier() {
	let roll = quick::roll(&mut ValRoller(9), 10, 1, -1, None, &Rules::default()).unwrap();
	assert_eq!(roll.modifier(), -1);
	assert_eq!(roll.title(), "Rolled d10-1");
	assert_eq!(roll.to_string(), "Result: [**9**]-1 = 8");
}

#[test]
fn quantity_below_one_rolls_one() {
	let roll = quick::roll(&mut ValRoller(3), 8, 0, 0, None, &Rules::default()).unwrap();
	assert_eq!(roll.rolled().rolls.len(), 1);
	assert_eq!(roll.result(), 3);
}

#[test]
fn advantage() {
	let roll = quick::roll(&mut IterRoller::new([7, 13]), 20, 1, 2, Some(Edge::Advantage), &Rules::default()).unwrap();
	assert_eq!(roll.result(), 15);
	assert_eq!(roll.title(), "Rolled d20+2");
	assert_eq!(roll.describe(None), "Result: [~~7~~, **13**]+2 = 15");
}

#[test]
fn disadvantage_with_extra_dice() {
	let roll = quick::roll(
		&mut IterRoller::new([12, 3, 18]),
		20,
		3,
		0,
		Some(Edge::Disadvantage),
		&Rules::default(),
	)
	.unwrap();
	assert_eq!(roll.result(), 3);
	assert_eq!(roll.describe(None), "Result: [~~12~~, ~~18~~, **3**] = 3");
	assert_eq!(roll.describe(Some(1)), "Result: [~~12~~, 1 more..., **3**] = 3");
}

#[test]
fn limits_apply() {
	let err = quick::roll(&mut ValRoller(1), 20, 101, 0, None, &Rules::default()).unwrap_err();
	assert_eq!(err, Error::TooManyDice { count: 101, max: 100 });
	assert!(quick::roll(&mut ValRoller(1), 0, 1, 0, None, &Rules::default()).is_err());
}
