use crate::domain::ports::EquivalenceRules;

/// Translates known non-Latin names and words, drops everything outside
/// printable ASCII and collapses whitespace. Never fails.
pub fn normalize<R: EquivalenceRules + ?Sized>(text: &str, rules: &R) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut translated = text.to_string();
    for (from, to) in rules.transliterations() {
        if translated.contains(from.as_str()) {
            // Padded so a translated name never fuses with an adjacent token.
            translated = translated.replace(from.as_str(), &format!(" {} ", to));
        }
    }

    let printable: String = translated
        .chars()
        .map(|c| if is_printable_ascii(c) { c } else { ' ' })
        .collect();

    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_printable_ascii(c: char) -> bool {
    matches!(c, ' '..='~')
}
