//! Plural forms of entity names.
//!
//! The emitter takes a [`Pluralizer`] by injection so tests and callers can
//! supply their own naming rules.

/// Produces the plural form of an entity name.
pub trait Pluralizer {
    /// Pluralizes `word`, keeping the casing of its leading letter.
    fn plural(&self, word: &str) -> String;
}

/// Words whose plural does not follow the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("datum", "data"),
    ("medium", "media"),
    ("criterion", "criteria"),
    ("analysis", "analyses"),
    ("crisis", "crises"),
    ("thesis", "theses"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("index", "indices"),
    ("quiz", "quizzes"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("wife", "wives"),
    ("knife", "knives"),
    ("half", "halves"),
    ("shelf", "shelves"),
    ("wolf", "wolves"),
    ("thief", "thieves"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("echo", "echoes"),
];

/// Words with no distinct plural.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "news",
    "metadata",
    "feedback",
];

/// English pluralization for PascalCase identifiers.
///
/// Only the last word of a compound name is inflected
/// (`OrganizationPerson` -> `OrganizationPeople`).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPluralizer;

impl EnglishPluralizer {
    pub const fn new() -> Self {
        Self
    }

    fn plural_word(word: &str) -> String {
        let lower = word.to_lowercase();

        if UNCOUNTABLE.contains(&lower.as_str()) {
            return lower;
        }
        if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
            return (*plural).to_string();
        }

        if let Some(stem) = lower.strip_suffix('y')
            && stem.chars().last().is_some_and(|c| !is_vowel(c))
        {
            return format!("{stem}ies");
        }

        if ["s", "x", "z", "ch", "sh"]
            .iter()
            .any(|suffix| lower.ends_with(suffix))
        {
            return format!("{lower}es");
        }

        format!("{lower}s")
    }
}

impl Pluralizer for EnglishPluralizer {
    fn plural(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }

        // Split before the last upper-case letter to find the final word.
        let split = word
            .char_indices()
            .filter(|(_, c)| c.is_uppercase())
            .map(|(i, _)| i)
            .last()
            .unwrap_or(0);
        let (head, last) = word.split_at(split);

        // All-caps tails (`UserURL`) just take an `s`.
        if last.chars().all(|c| !c.is_lowercase()) {
            return format!("{word}s");
        }

        let plural = Self::plural_word(last);
        format!("{head}{}", match_leading_case(last, &plural))
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn match_leading_case(original: &str, plural: &str) -> String {
    let upper = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = plural.chars();
    match chars.next() {
        Some(first) if upper => first.to_uppercase().chain(chars).collect(),
        Some(first) => std::iter::once(first).chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let p = EnglishPluralizer::new();
        assert_eq!(p.plural("User"), "Users");
        assert_eq!(p.plural("Category"), "Categories");
        assert_eq!(p.plural("Day"), "Days");
        assert_eq!(p.plural("Address"), "Addresses");
        assert_eq!(p.plural("Box"), "Boxes");
        assert_eq!(p.plural("Match"), "Matches");
        assert_eq!(p.plural("Wish"), "Wishes");
    }

    #[test]
    fn test_irregular_and_uncountable() {
        let p = EnglishPluralizer::new();
        assert_eq!(p.plural("Person"), "People");
        assert_eq!(p.plural("Child"), "Children");
        assert_eq!(p.plural("Sheep"), "Sheep");
        assert_eq!(p.plural("Leaf"), "Leaves");
    }

    #[test]
    fn test_compound_names() {
        let p = EnglishPluralizer::new();
        assert_eq!(p.plural("OrganizationPerson"), "OrganizationPeople");
        assert_eq!(p.plural("BlogCategory"), "BlogCategories");
        assert_eq!(p.plural("UserURL"), "UserURLs");
        assert_eq!(p.plural("APIKey"), "APIKeys");
        assert_eq!(p.plural("status"), "statuses");
    }

    #[test]
    fn test_deterministic() {
        let p = EnglishPluralizer::new();
        let first = p.plural("Person");
        for _ in 0..10 {
            assert_eq!(p.plural("Person"), first);
        }
    }
}
