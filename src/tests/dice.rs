use crate::{
	dice::{
		roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, Roller, Val as ValRoller},
		DiceGroup, DieRoll, Error, Op, Rolled, Selection, Sides,
	},
	rules::{ClampOrder, Rules},
	session::Describe,
};

fn roll_with(group: &DiceGroup, vals: impl IntoIterator<Item = i32>) -> Rolled<'_> {
	IterRoller::new(vals.into_iter().collect::<Vec<_>>())
		.roll(group, &Rules::default())
		.unwrap()
}

#[test]
fn single_d20() {
	let group = DiceGroup::new(1, Sides::Num(20));
	let rolled = ValRoller(15).roll(&group, &Rules::default()).unwrap();
	assert_eq!(rolled.raw_rolls(), vec![15]);
	assert_eq!(rolled.kept_rolls(), vec![15]);
	assert_eq!(rolled.total(), 15.0);
}

#[test]
fn plain_dice_keep_roll_order() {
	let group = DiceGroup::new(3, Sides::Num(6));
	let rolled = roll_with(&group, [2, 5, 1]);
	assert_eq!(rolled.raw_rolls(), vec![2, 5, 1]);
	assert_eq!(rolled.kept_rolls(), vec![2, 5, 1]);
	assert!(rolled.dropped_rolls().is_empty());
	assert_eq!(rolled.sum(), 8);
	assert_eq!(rolled.total(), 8.0);
}

#[test]
fn keep_lowest() {
	let group = DiceGroup::builder().count(2).sides(Sides::Num(20)).keep_low(1).build();
	let rolled = roll_with(&group, [18, 4]);
	assert_eq!(rolled.raw_rolls(), vec![18, 4]);
	assert_eq!(rolled.kept_rolls(), vec![4]);
	assert_eq!(rolled.dropped_rolls(), vec![18]);
	assert_eq!(rolled.total(), 4.0);
}

#[test]
fn keep_highest_with_duplicates() {
	let group = DiceGroup::builder().count(4).sides(Sides::Num(6)).keep_high(3).build();
	let rolled = roll_with(&group, [1, 6, 6, 3]);
	assert_eq!(rolled.kept_rolls(), vec![3, 6, 6]);
	assert_eq!(rolled.dropped_rolls(), vec![1]);
	assert_eq!(rolled.rolls[0].dropped_by, Some(Selection::KeepHigh(3)));
	assert_eq!(rolled.total(), 15.0);
}

#[test]
fn earliest_duplicate_is_kept() {
	let group = DiceGroup::builder().count(3).sides(Sides::Num(6)).keep_high(1).build();
	let rolled = roll_with(&group, [5, 5, 2]);
	assert!(rolled.rolls[0].is_kept());
	assert!(rolled.rolls[1].is_dropped());
	assert!(rolled.rolls[2].is_dropped());
	assert_eq!(rolled.total(), 5.0);
}

#[test]
fn drop_lowest_and_highest() {
	let group = DiceGroup::builder().count(4).sides(Sides::Num(6)).drop_low(1).build();
	let rolled = roll_with(&group, [4, 1, 3, 6]);
	assert_eq!(rolled.kept_rolls(), vec![3, 4, 6]);
	assert_eq!(rolled.dropped_rolls(), vec![1]);

	let group = DiceGroup::builder().count(3).sides(Sides::Num(8)).drop_high(2).build();
	let rolled = roll_with(&group, [7, 2, 5]);
	assert_eq!(rolled.kept_rolls(), vec![2]);
	assert_eq!(rolled.dropped_rolls(), vec![5, 7]);
	assert!(rolled
		.rolls
		.iter()
		.filter(|roll| roll.is_dropped())
		.all(|roll| roll.dropped_by == Some(Selection::DropHigh(2))));
}

#[test]
fn selection_amount_beyond_dice_count() {
	let group = DiceGroup::builder().count(2).sides(Sides::Num(6)).keep_high(5).build();
	let rolled = roll_with(&group, [3, 4]);
	assert_eq!(rolled.kept_rolls(), vec![3, 4]);
	assert_eq!(rolled.total(), 7.0);

	let group = DiceGroup::builder().count(2).sides(Sides::Num(6)).drop_low(5).build();
	let rolled = roll_with(&group, [3, 4]);
	assert!(rolled.kept_rolls().is_empty());
	assert_eq!(rolled.dropped_rolls(), vec![3, 4]);
	assert_eq!(rolled.total(), 0.0);
}

#[test]
fn advantage_rolls_at_least_two() {
	let group = DiceGroup::builder().sides(Sides::Num(20)).advantage().build();
	assert_eq!(group.effective_count(), 2);
	let rolled = roll_with(&group, [3, 17]);
	assert_eq!(rolled.raw_rolls(), vec![3, 17]);
	assert_eq!(rolled.kept_rolls(), vec![17]);
	assert_eq!(rolled.rolls[0].dropped_by, Some(Selection::Advantage));
}

#[test]
fn disadvantage_with_more_dice() {
	let group = DiceGroup::builder().count(3).sides(Sides::Num(20)).disadvantage().build();
	assert_eq!(group.effective_count(), 3);
	let rolled = roll_with(&group, [12, 9, 15]);
	assert_eq!(rolled.kept_rolls(), vec![9]);
	assert_eq!(rolled.dropped_rolls(), vec![12, 15]);
}

#[test]
fn min_clamp_raises_subtotal() {
	let group = DiceGroup::builder().count(4).sides(Sides::Num(8)).min(20).build();
	let rolled = roll_with(&group, [1, 1, 1, 1]);
	assert_eq!(rolled.sum(), 4);
	assert_eq!(rolled.total(), 20.0);
}

#[test]
fn max_clamp_lowers_subtotal() {
	let group = DiceGroup::builder().count(2).sides(Sides::Num(6)).max(8).build();
	let rolled = roll_with(&group, [6, 5]);
	assert_eq!(rolled.total(), 8.0);
}

#[test]
fn clamp_order() {
	let group = DiceGroup::builder()
		.count(4)
		.sides(Sides::Num(8))
		.min(20)
		.modifier(Op::Add, 2)
		.build();
	let rolled = roll_with(&group, [1, 1, 1, 1]);
	assert_eq!(rolled.total_with(ClampOrder::BeforeModifiers), 22.0);
	assert_eq!(rolled.total_with(ClampOrder::AfterModifiers), 20.0);

	let group = DiceGroup::builder()
		.count(2)
		.sides(Sides::Num(6))
		.max(5)
		.modifier(Op::Mul, 3)
		.build();
	let rolled = roll_with(&group, [6, 6]);
	assert_eq!(rolled.total_with(ClampOrder::BeforeModifiers), 15.0);
	assert_eq!(rolled.total_with(ClampOrder::AfterModifiers), 5.0);
}

#[test]
fn modifiers_apply_left_to_right() {
	let group = DiceGroup::builder()
		.sides(Sides::Num(6))
		.modifier(Op::Add, 2)
		.modifier(Op::Mul, 3)
		.modifier(Op::Sub, 1)
		.build();
	let rolled = ValRoller(4).roll(&group, &Rules::default()).unwrap();
	assert_eq!(rolled.total(), 17.0);
}

#[test]
fn division_is_not_truncated() {
	let group = DiceGroup::builder().sides(Sides::Num(6)).modifier(Op::Div, 4).build();
	let rolled = ValRoller(3).roll(&group, &Rules::default()).unwrap();
	assert_eq!(rolled.total(), 0.75);
}

#[test]
fn fudge_dice() {
	let group = DiceGroup::new(4, Sides::Fudge);
	assert_eq!(group.raw_text, "4df");

	let rolled = MaxRoller.roll(&group, &Rules::default()).unwrap();
	assert_eq!(rolled.total(), 4.0);

	let rolled = roll_with(&group, [-1, 0, 1, -1]);
	assert_eq!(rolled.total(), -1.0);

	let mut roller = FastRandRoller::with_seed(0x5eed);
	for _ in 0..100 {
		let rolled = roller.roll(&group, &Rules::default()).unwrap();
		assert!(rolled.raw_rolls().iter().all(|val| (-1..=1).contains(val)));
	}
}

#[test]
fn all_dice_sides_occur() {
	let group = DiceGroup::new(100, Sides::Num(20));
	let mut roller = FastRandRoller::default();
	let mut vals = Vec::new();

	for _ in 0..100 {
		vals.extend(roller.roll(&group, &Rules::default()).unwrap().raw_rolls());
	}

	assert!(vals.iter().all(|val| (1..=20).contains(val)));
	for side in 1..=20 {
		assert!(vals.contains(&side));
	}
}

#[test]
fn seeded_rollers_repeat() {
	let group = DiceGroup::new(10, Sides::Num(100));
	let first = FastRandRoller::with_seed(42).roll(&group, &Rules::default()).unwrap();
	let second = FastRandRoller::with_seed(42).roll(&group, &Rules::default()).unwrap();
	assert_eq!(first.raw_rolls(), second.raw_rolls());
}

#[test]
fn validation_limits() {
	let rules = Rules::default();

	let err = DiceGroup::new(101, Sides::Num(6)).validate(&rules).unwrap_err();
	assert_eq!(err, Error::TooManyDice { count: 101, max: 100 });
	assert!(err.to_string().starts_with("too many dice"));

	let err = DiceGroup::new(1, Sides::Num(1001)).validate(&rules).unwrap_err();
	assert_eq!(err, Error::DiceTooLarge { sides: 1001, max: 1000 });
	assert!(err.to_string().starts_with("dice too large"));

	assert_eq!(DiceGroup::new(0, Sides::Num(6)).validate(&rules), Err(Error::NoDice));
	assert_eq!(DiceGroup::new(1, Sides::Num(0)).validate(&rules), Err(Error::NoSides));

	let group = DiceGroup::builder().modifier(Op::Div, 0).build();
	assert_eq!(group.validate(&rules), Err(Error::DivisionByZero));

	assert!(DiceGroup::new(100, Sides::Num(1000)).validate(&rules).is_ok());
	assert!(DiceGroup::new(100, Sides::Fudge).validate(&rules).is_ok());
}

#[test]
fn custom_limits() {
	let rules = Rules::default().with_max_dice(10).with_max_sides(20);
	assert!(DiceGroup::new(10, Sides::Num(20)).validate(&rules).is_ok());
	assert!(DiceGroup::new(11, Sides::Num(20)).validate(&rules).is_err());
	assert!(DiceGroup::new(10, Sides::Num(21)).validate(&rules).is_err());
}

#[test]
fn invalid_groups_are_not_rolled() {
	let group = DiceGroup::new(101, Sides::Num(6));
	let mut roller = IterRoller::new(Vec::<i32>::new());
	assert!(roller.roll(&group, &Rules::default()).is_err());
}

#[test]
fn canonical_notation() {
	let group = DiceGroup::builder()
		.count(2)
		.sides(Sides::Num(20))
		.keep_low(1)
		.min(5)
		.modifier(Op::Add, 2)
		.continuation(Op::Sub)
		.build();
	assert_eq!(group.to_string(), "2d20kl1min5+2-");

	let group = DiceGroup::builder().count(3).sides(Sides::Fudge).drop_high(1).max(2).build();
	assert_eq!(group.to_string(), "3dfdh1max2");
	assert_eq!(group.split_notation(), ("3df", "dh1max2"));

	assert_eq!(DiceGroup::default().to_string(), "1d20");
}

#[test]
fn split_notation_without_count() {
	let group = DiceGroup::builder().sides(Sides::Num(8)).raw_text("d8+").build();
	assert_eq!(group.split_notation(), ("d8", "+"));
}

#[test]
fn describe_group() {
	let group = DiceGroup::builder()
		.count(4)
		.sides(Sides::Num(6))
		.drop_low(1)
		.modifier(Op::Add, 1)
		.build();
	let rolled = roll_with(&group, [4, 1, 3, 6]);
	assert_eq!(rolled.describe(None), "4d6[**4**, ~~1~~, **3**, **6**]dl1+1");
	assert_eq!(rolled.describe(Some(2)), "4d6[**4**, ~~1~~, 2 more...]dl1+1");
	assert_eq!(rolled.to_string(), rolled.describe(None));
}

#[test]
fn into_owned_keeps_everything() {
	let group = DiceGroup::builder().count(2).sides(Sides::Num(20)).advantage().build();
	let rolled = roll_with(&group, [11, 19]);
	let owned = rolled.clone().into_owned();
	assert_eq!(owned, rolled);
}

#[test]
fn from_group_and_rolls_borrows_the_group() {
	let group = DiceGroup::builder().count(3).sides(Sides::Num(8)).keep_high(1).build();
	let rolled = Rolled::from_group_and_rolls(&group, [2, 7, 5]);
	assert_eq!(rolled.raw_rolls(), vec![2, 7, 5]);
	// Selections are only applied by a roller
	assert_eq!(rolled.kept_rolls(), vec![2, 5, 7]);
	assert!(rolled.dropped_rolls().is_empty());
	assert_eq!(rolled.into_owned().sum(), 14);
}

#[test]
#[should_panic(expected = "already been dropped")]
fn dropping_twice_panics() {
	let mut roll = DieRoll::new(3);
	roll.drop(Selection::KeepHigh(1));
	roll.drop(Selection::KeepHigh(1));
}
