//! Limits and evaluation policies that apply to every roll.

/// Order in which a group's clamp and its arithmetic modifiers are applied to the sum of its kept dice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "There are only two possible orderings")]
pub enum ClampOrder {
	/// Clamp the sum of the kept dice first, then apply the modifiers (`4d8min20+2` can never be below 22).
	#[default]
	BeforeModifiers,

	/// Apply the modifiers first, then clamp the result (`4d8min20+2` can never be below 20).
	AfterModifiers,
}

/// Limits and policies used when validating and resolving dice groups
///
/// # Examples
/// ```
/// use dicebag::rules::{ClampOrder, Rules};
///
/// let rules = Rules::default().with_max_dice(20).with_clamp_order(ClampOrder::AfterModifiers);
/// assert_eq!(rules.max_dice, 20);
/// assert_eq!(rules.max_sides, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct Rules {
	/// Maximum number of dice a single group may roll
	pub max_dice: u32,

	/// Maximum number of sides a numeric die may have
	pub max_sides: u32,

	/// Whether clamps are applied before or after modifiers
	pub clamp_order: ClampOrder,
}

impl Rules {
	/// Default maximum number of dice in one group.
	pub const DEFAULT_MAX_DICE: u32 = 100;

	/// Default maximum number of sides for a numeric die.
	pub const DEFAULT_MAX_SIDES: u32 = 1000;

	/// Creates the default rules.
	#[must_use]
	pub const fn new() -> Self {
		Self {
			max_dice: Self::DEFAULT_MAX_DICE,
			max_sides: Self::DEFAULT_MAX_SIDES,
			clamp_order: ClampOrder::BeforeModifiers,
		}
	}

	/// Replaces the maximum number of dice per group.
	#[must_use]
	pub const fn with_max_dice(mut self, max_dice: u32) -> Self {
		self.max_dice = max_dice;
		self
	}

	/// Replaces the maximum number of sides per die.
	#[must_use]
	pub const fn with_max_sides(mut self, max_sides: u32) -> Self {
		self.max_sides = max_sides;
		self
	}

	/// Replaces the clamp ordering policy.
	#[must_use]
	pub const fn with_clamp_order(mut self, clamp_order: ClampOrder) -> Self {
		self.clamp_order = clamp_order;
		self
	}
}

impl Default for Rules {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}
