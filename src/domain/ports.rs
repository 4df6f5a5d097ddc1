/// Read-only token tables consulted by the parser, gates and scorer.
///
/// Implementations must be cheap to share across threads; arbitration scores
/// candidates in parallel against the same rules.
pub trait EquivalenceRules: Send + Sync {
    /// Identical ignoring case, or members of the same synonym group.
    fn is_equivalent(&self, a: &str, b: &str) -> bool;

    /// Non-mandatory spec markers that earn partial credit when absent.
    fn is_optional(&self, token: &str) -> bool;

    /// Tokens equivalent to the product-type anchor (INV and its synonyms).
    fn type_markers(&self) -> &[String];

    /// Generic descriptive words dropped from parsed series.
    fn is_stopword(&self, token: &str) -> bool;

    /// Site noise that never counts as an extra word.
    fn is_noise_word(&self, token: &str) -> bool;

    /// Non-Latin manufacturer spellings and their canonical Latin names.
    fn transliterations(&self) -> &[(String, String)];

    fn is_type_marker(&self, token: &str) -> bool {
        self.type_markers()
            .iter()
            .any(|marker| self.is_equivalent(marker, token))
    }
}
