//! Location phrase and horizon extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Horizon used when the message names none.
pub const DEFAULT_HORIZON_DAYS: u32 = 3;

/// Words that introduce a place.
const PREPOSITIONS: &[&str] = &[
    "in", "to", "at", "near", "around", "visiting", "from", "towards", "by", "for",
];

/// Words that end a location phrase.
const STOP_WORDS: &[&str] = &[
    "today", "tonight", "tomorrow", "next", "this", "over", "within", "during", "later", "now",
    "and", "or", "but", "if", "is", "will", "should", "what", "how",
];

/// Words that, right after a preposition, mean it was not introducing a
/// place ("safe to travel to ...").
const VERBS: &[&str] = &[
    "travel", "go", "visit", "be", "stay", "know", "see", "check", "expect", "head", "bring",
];

const ARTICLES: &[&str] = &["the", "a", "an"];

const CLAUSE_END: &[char] = &['?', '!', '.', ',', ';', ':'];

static HORIZON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,4}|one|two|three|four|five|six|seven|eight|nine|ten)[\s-]+(days?|weeks?)\b",
    )
    .expect("valid regex")
});

static TOMORROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btomorrow\b").expect("valid regex"));

static WEEK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(next|this|coming)\s+week\b|\bfortnight\b").expect("valid regex")
});

fn is_stop(lower: &str) -> bool {
    STOP_WORDS.contains(&lower)
        || PREPOSITIONS.contains(&lower)
        || lower.starts_with(|c: char| c.is_ascii_digit())
}

fn clean(raw: &str) -> &str {
    raw.trim_matches(|c: char| c == '"' || c == '\'' || CLAUSE_END.contains(&c))
}

/// Collects the phrase starting at `words[0]`, or `None` if the words do
/// not look like a place.
fn phrase_from(words: &[&str]) -> Option<String> {
    let mut phrase: Vec<&str> = Vec::new();

    for raw in words {
        let word = clean(raw);
        let lower = word.to_lowercase();

        if phrase.is_empty() && VERBS.contains(&lower.as_str()) {
            return None;
        }
        if is_stop(&lower) {
            break;
        }
        if !word.is_empty() && !(phrase.is_empty() && ARTICLES.contains(&lower.as_str())) {
            phrase.push(word);
        }
        if raw.ends_with(CLAUSE_END) {
            break;
        }
    }

    (!phrase.is_empty()).then(|| phrase.join(" "))
}

/// Extracts the place named after the first preposition that introduces
/// one.
///
/// The phrase runs until a time word, another preposition, a number, or
/// clause punctuation. Prepositions followed by a verb ("safe *to travel*")
/// or by nothing but an article are skipped.
#[must_use]
pub fn location_phrase(message: &str) -> Option<String> {
    let words: Vec<&str> = message.split_whitespace().collect();

    words.iter().enumerate().find_map(|(i, raw)| {
        if raw.ends_with(CLAUSE_END) {
            return None;
        }
        let lower = clean(raw).to_lowercase();
        if !PREPOSITIONS.contains(&lower.as_str()) {
            return None;
        }
        phrase_from(&words[i + 1..])
    })
}

fn number_word(word: &str) -> Option<u32> {
    let n = match word.to_lowercase().as_str() {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        other => return other.parse().ok(),
    };
    Some(n)
}

/// Extracts how many days ahead the message asks about.
///
/// "`<n>` day(s)" ⇒ n, "`<n>` week(s)" ⇒ 7n, "tomorrow" ⇒ 1,
/// "next/this week" ⇒ 7, "fortnight" ⇒ 14, otherwise
/// [`DEFAULT_HORIZON_DAYS`]. The value is not range-checked here.
#[must_use]
pub fn horizon_days(message: &str) -> u32 {
    if let Some(caps) = HORIZON_RE.captures(message)
        && let Some(n) = number_word(&caps[1])
    {
        return if caps[2].to_lowercase().starts_with("week") {
            n.saturating_mul(7)
        } else {
            n
        };
    }

    if TOMORROW_RE.is_match(message) {
        return 1;
    }

    if let Some(m) = WEEK_RE.find(message) {
        return if m.as_str().eq_ignore_ascii_case("fortnight") {
            14
        } else {
            7
        };
    }

    DEFAULT_HORIZON_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_after_preposition() {
        assert_eq!(
            location_phrase("What's the dengue risk in Woodlands?"),
            Some("Woodlands".to_string())
        );
        assert_eq!(
            location_phrase("air quality near Ang Mo Kio today"),
            Some("Ang Mo Kio".to_string())
        );
    }

    #[test]
    fn skips_prepositions_before_verbs() {
        assert_eq!(
            location_phrase("Is it safe to travel to Jurong East next week"),
            Some("Jurong East".to_string())
        );
    }

    #[test]
    fn skips_time_phrases() {
        assert_eq!(
            location_phrase("forecast for the next 3 days in Tampines"),
            Some("Tampines".to_string())
        );
        assert_eq!(
            location_phrase("risk in 5 days at Bedok"),
            Some("Bedok".to_string())
        );
    }

    #[test]
    fn stops_at_next_preposition() {
        assert_eq!(
            location_phrase("going from Bedok to Changi"),
            Some("Bedok".to_string())
        );
    }

    #[test]
    fn strips_leading_article() {
        assert_eq!(
            location_phrase("how is it in the Central Business District?"),
            Some("Central Business District".to_string())
        );
    }

    #[test]
    fn no_phrase_without_preposition() {
        assert_eq!(location_phrase("Bedok dengue"), None);
        assert_eq!(location_phrase("what is dengue?"), None);
        assert_eq!(location_phrase(""), None);
    }

    #[test]
    fn horizon_numbers_and_units() {
        assert_eq!(horizon_days("in 5 days"), 5);
        assert_eq!(horizon_days("a 10-day outlook"), 10);
        assert_eq!(horizon_days("over two weeks"), 14);
        assert_eq!(horizon_days("1 day ahead"), 1);
    }

    #[test]
    fn horizon_keywords() {
        assert_eq!(horizon_days("Bedok tomorrow"), 1);
        assert_eq!(horizon_days("next week in Yishun"), 7);
        assert_eq!(horizon_days("this week"), 7);
        assert_eq!(horizon_days("over the next fortnight"), 14);
    }

    #[test]
    fn explicit_count_beats_keywords() {
        assert_eq!(horizon_days("tomorrow and the 4 days after"), 4);
    }

    #[test]
    fn horizon_defaults() {
        assert_eq!(horizon_days("forecast for Bedok"), DEFAULT_HORIZON_DAYS);
        assert_eq!(horizon_days("0 days"), 0);
    }
}
