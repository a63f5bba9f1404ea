use std::{io, process::ExitCode};

use ariadne::{Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand, ValueEnum};
use dicebag::{
	character,
	dice::roller::FastRand as FastRandRoller,
	parse::normalize,
	quick::{self, Edge},
	rules::{ClampOrder, Rules},
	session::Describe,
	NotationError, RollSession,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rolls tabletop dice notation
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
	/// Seed for the random number generator, to make rolls repeatable
	#[arg(long, global = true)]
	seed: Option<u64>,

	/// Maximum number of dice in a single group
	#[arg(long, global = true, default_value_t = Rules::DEFAULT_MAX_DICE)]
	max_dice: u32,

	/// Maximum number of sides for a die
	#[arg(long, global = true, default_value_t = Rules::DEFAULT_MAX_SIDES)]
	max_sides: u32,

	/// Apply min/max clamps after the arithmetic modifiers instead of before them
	#[arg(long, global = true)]
	clamp_after_modifiers: bool,

	#[command(subcommand)]
	command: Command,
}

impl Cli {
	fn rules(&self) -> Rules {
		let clamp_order = if self.clamp_after_modifiers {
			ClampOrder::AfterModifiers
		} else {
			ClampOrder::BeforeModifiers
		};
		Rules::new()
			.with_max_dice(self.max_dice)
			.with_max_sides(self.max_sides)
			.with_clamp_order(clamp_order)
	}
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Rolls dice notation such as "2d20kl1+4 + d6". Reads a line from stdin if no notation is given.
	Roll {
		/// Notation to roll (all arguments are joined, so it can be left unquoted)
		notation: Vec<String>,

		/// Maximum number of dice to list per group
		#[arg(long)]
		limit: Option<usize>,
	},

	/// Rolls a single kind of die with a flat modifier
	Quick {
		/// Number of sides on the die
		#[arg(long, default_value_t = 20)]
		sides: u32,

		/// Number of dice to roll
		#[arg(long, default_value_t = 1)]
		quantity: u32,

		/// Flat modifier to add to the result
		#[arg(long, default_value_t = 0, allow_negative_numbers = true)]
		modifier: i32,

		/// Roll with advantage or disadvantage
		#[arg(long, value_enum)]
		advantage: Option<EdgeArg>,
	},

	/// Rolls six ability scores (4d6, dropping the lowest)
	Stats,

	/// Rolls hit points for each level of a character
	Hp {
		/// Character level
		#[arg(long)]
		level: u32,

		/// Number of sides on the character's hit die
		#[arg(long)]
		hit_die: u32,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EdgeArg {
	/// Advantage
	Adv,

	/// Disadvantage
	Dis,
}

impl From<EdgeArg> for Edge {
	fn from(edge: EdgeArg) -> Self {
		match edge {
			EdgeArg::Adv => Self::Advantage,
			EdgeArg::Dis => Self::Disadvantage,
		}
	}
}

fn main() -> ExitCode {
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "dicebag=warn".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
		.init();

	let cli = Cli::parse();
	let rules = cli.rules();
	let mut roller = cli
		.seed
		.map_or_else(FastRandRoller::default, FastRandRoller::with_seed);

	match cli.command {
		Command::Roll { notation, limit } => {
			let input = if notation.is_empty() {
				match io::stdin().lines().next() {
					Some(Ok(line)) => line,
					Some(Err(err)) => {
						eprintln!("Unable to read notation: {err}");
						return ExitCode::FAILURE;
					}
					None => {
						eprintln!("No notation to roll");
						return ExitCode::FAILURE;
					}
				}
			} else {
				notation.join(" ")
			};

			match RollSession::roll(&input, &mut roller, rules) {
				Ok(session) => {
					println!("{}", session.describe(limit));
					ExitCode::SUCCESS
				}
				Err(err) => {
					report(&err);
					ExitCode::FAILURE
				}
			}
		}

		Command::Quick {
			sides,
			quantity,
			modifier,
			advantage,
		} => match quick::roll(&mut roller, sides, quantity, modifier, advantage.map(Edge::from), &rules) {
			Ok(roll) => {
				println!("{}", roll.title());
				println!("{}", roll.describe(Some(10)));
				ExitCode::SUCCESS
			}
			Err(err) => {
				eprintln!("{err}");
				ExitCode::FAILURE
			}
		},

		Command::Stats => {
			let scores = character::ability_scores(&mut roller);
			println!("{}", scores.map(|score| score.to_string()).join(", "));
			ExitCode::SUCCESS
		}

		Command::Hp { level, hit_die } => match character::hit_points(&mut roller, level, hit_die) {
			Ok(hp) => {
				let total = hp.iter().map(|&gained| u64::from(gained)).sum::<u64>();
				let levels = hp.iter().map(ToString::to_string).collect::<Vec<_>>();
				println!("{} (total {total})", levels.join(", "));
				ExitCode::SUCCESS
			}
			Err(err) => {
				eprintln!("{err}");
				ExitCode::FAILURE
			}
		},
	}
}

/// Prints an error to stderr, pointing at the offending position in the notation for syntax errors.
fn report(err: &NotationError) {
	let NotationError::Syntax { input, offset, details } = err else {
		eprintln!("{err}");
		return;
	};

	let normalized = normalize(input);
	let span = *offset..offset.saturating_add(1).min(normalized.len()).max(*offset);
	let printed = Report::build(ReportKind::Error, ("notation", span.clone()))
		.with_message(err.to_string())
		.with_label(Label::new(("notation", span)).with_message(details))
		.finish()
		.eprint(("notation", Source::from(normalized)));

	if printed.is_err() {
		eprintln!("{err}: {details}");
	}
}
