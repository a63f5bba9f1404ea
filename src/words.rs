//! English words for small numbers, as used when announcing dice faces ("three sixes", "forty two").

/// Words for zero through nineteen
const LOW_WORDS: [&str; 20] = [
	"zero",
	"one",
	"two",
	"three",
	"four",
	"five",
	"six",
	"seven",
	"eight",
	"nine",
	"ten",
	"eleven",
	"twelve",
	"thirteen",
	"fourteen",
	"fifteen",
	"sixteen",
	"seventeen",
	"eighteen",
	"nineteen",
];

/// Words for twenty through ninety
const TENS_WORDS: [&str; 8] = [
	"twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Error converting a number to words
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The number has more than two digits.
	#[error("{0} is too large to put into words (only 0 to 99 are supported)")]
	OutOfRange(u32),
}

/// Spells out a number from 0 to 99, optionally pluralizing the last word.
///
/// # Errors
/// If the number is 100 or above, [`Error::OutOfRange`] is returned.
///
/// # Examples
/// ```
/// use dicebag::words::number_words;
///
/// assert_eq!(number_words(3, false)?, "three");
/// assert_eq!(number_words(6, true)?, "sixes");
/// assert_eq!(number_words(42, false)?, "forty two");
/// assert_eq!(number_words(66, true)?, "sixty sixes");
/// assert_eq!(number_words(20, true)?, "twenties");
/// assert!(number_words(100, false).is_err());
/// # Ok::<(), dicebag::words::Error>(())
/// ```
pub fn number_words(num: u32, plural: bool) -> Result<String, Error> {
	let idx = usize::try_from(num).map_err(|_err| Error::OutOfRange(num))?;
	let (tens_word, last_word) = match idx {
		0..20 => (None, LOW_WORDS[idx]),
		20..100 if idx % 10 == 0 => (None, TENS_WORDS[idx / 10 - 2]),
		20..100 => (Some(TENS_WORDS[idx / 10 - 2]), LOW_WORDS[idx % 10]),
		_ => return Err(Error::OutOfRange(num)),
	};

	let last_word = if !plural {
		last_word.to_owned()
	} else if last_word == "six" {
		"sixes".to_owned()
	} else if let Some(stem) = last_word.strip_suffix('y') {
		format!("{stem}ies")
	} else {
		format!("{last_word}s")
	};

	Ok(match tens_word {
		Some(tens_word) => format!("{tens_word} {last_word}"),
		None => last_word,
	})
}
