use crate::domain::model::ProductDescriptor;
use crate::domain::ports::EquivalenceRules;
use crate::utils::error::Result;
use regex::Regex;

/// `digits[/digits+letters*]`, bounded so digits glued to letters (`INV240`, `1PH`)
/// are not treated as numbers.
const NUMERIC_PATTERN: &str = r"(?i)\b[0-9]+(?:/[0-9]+[A-Z]*)?\b";
const NUMERIC_TOKEN_PATTERN: &str = r"(?i)^[0-9]+(?:/[0-9]+[A-Z]*)?$";

/// Splits normalized text into manufacturer, series tokens and model.
#[derive(Debug, Clone)]
pub struct ComponentParser {
    numeric: Regex,
    numeric_token: Regex,
}

impl ComponentParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            numeric: Regex::new(NUMERIC_PATTERN)?,
            numeric_token: Regex::new(NUMERIC_TOKEN_PATTERN)?,
        })
    }

    pub fn parse<R: EquivalenceRules + ?Sized>(
        &self,
        text: &str,
        preferred_model: Option<&str>,
        rules: &R,
    ) -> ProductDescriptor {
        let words: Vec<&str> = text.split_whitespace().collect();
        let Some(first) = words.first() else {
            return ProductDescriptor::default();
        };

        let numbers = self.numeric_tokens(text);
        let model = select_model(&numbers, preferred_model);

        let series = words[1..]
            .iter()
            .filter(|word| model.is_empty() || !word.eq_ignore_ascii_case(&model))
            .filter(|word| !self.is_numeric_token(word))
            .filter(|word| !rules.is_stopword(word))
            .map(|word| word.to_uppercase())
            .collect();

        let descriptor = ProductDescriptor {
            manufacturer: first.to_uppercase(),
            series,
            model,
        };
        tracing::debug!("Parsed '{}' -> {:?}", text, descriptor);
        descriptor
    }

    /// Every numeric token in order of appearance.
    pub fn numeric_tokens<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.numeric.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn is_numeric_token(&self, word: &str) -> bool {
        self.numeric_token.is_match(word)
    }
}

/// Preferred model if present verbatim, else the first non-year number,
/// else the first number at all.
fn select_model(numbers: &[&str], preferred_model: Option<&str>) -> String {
    if let Some(preferred) = preferred_model.filter(|p| !p.is_empty()) {
        if numbers.contains(&preferred) {
            return preferred.to_string();
        }
    }

    numbers
        .iter()
        .find(|number| !is_calendar_year(number))
        .or_else(|| numbers.first())
        .map(|number| number.to_string())
        .unwrap_or_default()
}

/// Bare four-digit year in 2000..=2099.
pub fn is_calendar_year(token: &str) -> bool {
    token.len() == 4 && token.starts_with("20") && token.bytes().all(|b| b.is_ascii_digit())
}
