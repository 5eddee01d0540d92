//! Singular/plural conversion for regular English nouns.
//!
//! Each direction is an ordered rule table; the first pattern that matches
//! the whole word is applied and evaluation stops. Patterns ignore case and
//! captured text keeps its original case.

use std::sync::LazyLock;

use regex::Regex;

type RuleTable = Vec<(Regex, &'static str)>;

fn compile(rules: &[(&str, &'static str)]) -> RuleTable {
    rules
        .iter()
        .map(|&(pattern, replacement)| {
            let regex = Regex::new(pattern).expect("inflection rule patterns are valid");
            (regex, replacement)
        })
        .collect()
}

static SINGULAR_RULES: LazyLock<RuleTable> = LazyLock::new(|| {
    compile(&[
        (r"(?i)^(.*?us)$", "${1}"),
        (r"(?i)^(.*?[sxz])es$", "${1}"),
        (r"(?i)^(.*?[^aeioudgkprt]h)es$", "${1}"),
        (r"(?i)^(.*?[^aeiou])ies$", "${1}y"),
        (r"(?i)^(.*?)s$", "${1}"),
    ])
});

static PLURAL_RULES: LazyLock<RuleTable> = LazyLock::new(|| {
    compile(&[
        (r"(?i)^(.*?[sxz])$", "${1}es"),
        (r"(?i)^(.*?[^aeioudgkprt]h)$", "${1}es"),
        (r"(?i)^(.*?[^aeiou])y$", "${1}ies"),
    ])
});

fn apply_first(rules: &RuleTable, word: &str) -> Option<String> {
    rules
        .iter()
        .find(|(regex, _)| regex.is_match(word))
        .map(|(regex, replacement)| regex.replace(word, *replacement).into_owned())
}

/// Returns the singular form of `word`, or `word` unchanged if no rule applies.
#[must_use]
pub fn singular(word: &str) -> String {
    apply_first(&SINGULAR_RULES, word).unwrap_or_else(|| word.to_string())
}

/// Returns the plural form of `word`; words no rule covers get an `s`.
#[must_use]
pub fn plural(word: &str) -> String {
    apply_first(&PLURAL_RULES, word).unwrap_or_else(|| format!("{word}s"))
}

#[cfg(test)]
mod tests {
    use super::{plural, singular};

    #[test]
    fn plural_forms() {
        assert_eq!(plural("bus"), "buses");
        assert_eq!(plural("box"), "boxes");
        assert_eq!(plural("quiz"), "quizes");
        assert_eq!(plural("church"), "churches");
        assert_eq!(plural("party"), "parties");
        assert_eq!(plural("cat"), "cats");
    }

    #[test]
    fn h_after_excluded_letter_takes_plain_s() {
        assert_eq!(plural("month"), "months");
        assert_eq!(plural("laugh"), "laughs");
        assert_eq!(plural("oh"), "ohs");
    }

    #[test]
    fn y_after_vowel_takes_plain_s() {
        assert_eq!(plural("day"), "days");
        assert_eq!(plural("key"), "keys");
    }

    #[test]
    fn singular_forms() {
        assert_eq!(singular("buses"), "bus");
        assert_eq!(singular("boxes"), "box");
        assert_eq!(singular("churches"), "church");
        assert_eq!(singular("parties"), "party");
        assert_eq!(singular("cats"), "cat");
    }

    #[test]
    fn us_ending_is_already_singular() {
        assert_eq!(singular("bus"), "bus");
        assert_eq!(singular("status"), "status");
    }

    #[test]
    fn unmatched_singular_is_unchanged() {
        assert_eq!(singular("sheep"), "sheep");
        assert_eq!(singular(""), "");
    }

    #[test]
    fn regular_nouns_round_trip() {
        for word in ["box", "city", "bus", "church", "cat", "party", "dish"] {
            assert_eq!(singular(&plural(word)), word, "singular(plural({word}))");
        }
        for word in ["boxes", "cities", "buses", "churches", "cats"] {
            assert_eq!(plural(&singular(word)), word, "plural(singular({word}))");
        }
    }

    #[test]
    fn case_of_input_is_preserved() {
        assert_eq!(plural("Box"), "Boxes");
        assert_eq!(plural("CITY"), "CITies");
        assert_eq!(singular("CITIES"), "CITy");
        assert_eq!(singular("Cats"), "Cat");
        assert_eq!(singular("BOXES"), "BOX");
    }
}
