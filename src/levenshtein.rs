//! Levenshtein edit distance and the similarity derived from it.
//!
//! Distances count single-character insertions, deletions and substitutions,
//! each with cost 1. Strings are compared by Unicode scalar value, not byte.
//!
//! Similarity between two strings is `1 - distance / min(len_a, len_b)`.
//! A candidate satisfies a minimum similarity `S` exactly when its distance
//! is at most `floor((1 - S) * min(len_a, len_b))`, which lets the bounded
//! distance abandon the comparison as soon as a whole DP row exceeds it.

use std::cmp::min;

/// Slack for the float product in [`max_distance`].
const DISTANCE_EPSILON: f64 = 1e-6;

/// Unbounded edit distance between two strings.
///
/// Fills the whole `(len_a + 1) x (len_b + 1)` table in one flat buffer.
/// The query path never calls this; it is the reference the bounded
/// distance is checked and benchmarked against.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let width = b.len() + 1;

    let mut table: Vec<usize> = (0..width).collect();
    table.resize(width * (a.len() + 1), 0);

    for (i, &ca) in a.iter().enumerate() {
        let row = (i + 1) * width;
        table[row] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = table[row - width + j] + usize::from(ca != cb);
            let deletion = table[row - width + j + 1] + 1;
            let insertion = table[row + j] + 1;
            table[row + j + 1] = min(substitution, min(deletion, insertion));
        }
    }

    table[width * (a.len() + 1) - 1]
}

/// Edit distance between two character slices, abandoned once it must exceed `max_distance`.
///
/// Returns `None` as soon as every entry of a DP row is above `max_distance`,
/// since later rows can only grow from there. Only two rows are kept.
pub fn levenshtein_distance_bounded(a: &[char], b: &[char], max_distance: usize) -> Option<usize> {
    let len1 = a.len();
    let len2 = b.len();

    // The length difference alone is a lower bound on the distance.
    if len1.abs_diff(len2) > max_distance {
        return None;
    }
    if len1 == 0 || len2 == 0 {
        return Some(len1.max(len2));
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=len2 {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            curr_row[j] = min(
                min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost, // substitution
            );

            min_in_row = min(min_in_row, curr_row[j]);
        }

        if min_in_row > max_distance {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[len2];
    (distance <= max_distance).then_some(distance)
}

/// Largest distance that still reaches `min_similarity` for strings whose shorter length is `min_len`.
///
/// This is `floor((1 - min_similarity) * min_len)`.
pub fn max_distance(min_similarity: f32, min_len: usize) -> usize {
    let slack = (1.0 - f64::from(min_similarity)).max(0.0) * min_len as f64;
    (slack + DISTANCE_EPSILON).floor() as usize
}

/// Similarity for a distance between strings of lengths `len_a` and `len_b`.
///
/// Two empty strings are identical (1.0); an empty string against a
/// non-empty one scores 0.0. The value is negative when the distance exceeds
/// the shorter length.
///
/// Computed as the single quotient `(shorter - distance) / shorter`, so a
/// similarity equal to a fraction `n / d` rounds to the same `f32` as `n / d`.
pub fn similarity(distance: usize, len_a: usize, len_b: usize) -> f32 {
    let shorter = len_a.min(len_b);
    if shorter == 0 {
        return if len_a == len_b { 1.0 } else { 0.0 };
    }
    (shorter as f32 - distance as f32) / shorter as f32
}

/// Outcome of comparing a candidate against the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatch {
    /// Edit distance between query and candidate.
    pub distance: usize,
    /// Similarity in (0, 1].
    pub similarity: f32,
}

/// Compares one query against many candidates.
///
/// The query's characters are decoded once up front.
#[derive(Debug, Clone)]
pub struct LevenshteinMatcher {
    query: String,
    query_chars: Vec<char>,
}

impl LevenshteinMatcher {
    /// Create a new matcher for the given query string.
    pub fn new<S: Into<String>>(query: S) -> Self {
        let query = query.into();
        let query_chars = query.chars().collect();
        LevenshteinMatcher { query, query_chars }
    }

    /// Get the original query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Query length in characters.
    pub fn query_len(&self) -> usize {
        self.query_chars.len()
    }

    /// Full edit distance to a candidate.
    pub fn distance(&self, candidate: &str) -> usize {
        let candidate_chars: Vec<char> = candidate.chars().collect();
        levenshtein_distance_bounded(&self.query_chars, &candidate_chars, usize::MAX - 1)
            .unwrap_or(usize::MAX)
    }

    /// Compare with a candidate, accepting it iff its similarity reaches `min_similarity`.
    ///
    /// A similarity of zero never matches, even with `min_similarity` 0.
    pub fn similar(&self, candidate: &str, min_similarity: f32) -> Option<SimilarityMatch> {
        let candidate_chars: Vec<char> = candidate.chars().collect();
        let shorter = self.query_chars.len().min(candidate_chars.len());
        if shorter == 0 {
            return None;
        }

        // The slack in `max_distance` only sizes the abandon bound; the
        // similarity itself must still reach the minimum.
        let limit = max_distance(min_similarity, shorter).min(shorter - 1);
        let distance = levenshtein_distance_bounded(&self.query_chars, &candidate_chars, limit)?;
        let similarity = similarity(distance, self.query_chars.len(), candidate_chars.len());

        (similarity >= min_similarity).then_some(SimilarityMatch {
            distance,
            similarity,
        })
    }
}
