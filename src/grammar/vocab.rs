//! Token vocabulary for sequence models.
//!
//! A vocabulary is the sorted set of distinct tokens seen across a corpus of
//! measure grammars. Model output comes back as indices into it.

use serde::{Deserialize, Serialize};

/// Sorted, de-duplicated grammar tokens with index lookup both ways.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    values: Vec<String>,
}

impl Vocabulary {
    /// Every token of every measure, in order.
    pub fn corpus<S: AsRef<str>>(grammars: &[S]) -> Vec<String> {
        grammars
            .iter()
            .flat_map(|g| g.as_ref().split_whitespace())
            .map(str::to_string)
            .collect()
    }

    pub fn build<S: AsRef<str>>(grammars: &[S]) -> Self {
        let mut values = Self::corpus(grammars);
        values.sort();
        values.dedup();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.values
            .binary_search_by(|v| v.as_str().cmp(token))
            .ok()
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Indices for the tokens of one measure. Tokens outside the vocabulary
    /// are dropped.
    pub fn indices(&self, grammar: &str) -> Vec<usize> {
        grammar
            .split_whitespace()
            .filter_map(|t| self.index_of(t))
            .collect()
    }

    /// Join the tokens named by `indices` into a measure grammar. Unknown
    /// indices are dropped.
    pub fn to_grammar(&self, indices: &[usize]) -> String {
        let tokens: Vec<&str> = indices
            .iter()
            .filter_map(|&i| {
                let token = self.token(i);
                if token.is_none() {
                    log::debug!("index {i} is outside a vocabulary of {}", self.len());
                }
                token
            })
            .collect();
        tokens.join(" ")
    }
}

/// Rewrite every approach (`A`) or other (`X`) token after the first as a
/// chord tone (`C`), keeping its duration and interval term.
///
/// Generated sequences decode to more consonant lines this way.
pub fn chord_tones_only(grammar: &str) -> String {
    let tokens: Vec<String> = grammar
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| match token.strip_prefix(['A', 'X']) {
            Some(rest) if i > 0 => format!("C{rest}"),
            _ => token.to_string(),
        })
        .collect();
    tokens.join(" ")
}
