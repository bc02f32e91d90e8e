//! Fuzzy question matching.
//!
//! Similarity is the gestalt pattern-matching ratio: twice the number of
//! characters in the recursively found longest common blocks, divided by the
//! combined length of both strings.

use std::collections::HashMap;

/// Minimum ratio a candidate needs to count as a match.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Sequences at least this long drop characters that make up more than 1% of
/// them from block seeding.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Closest candidate to `input` scoring at least [`DEFAULT_CUTOFF`].
pub fn find_best_match<'a, S: AsRef<str>>(input: &str, candidates: &'a [S]) -> Option<&'a str> {
    find_best_match_with_cutoff(input, candidates, DEFAULT_CUTOFF)
}

/// Closest candidate to `input` scoring at least `cutoff`.
///
/// Among candidates with the same top score, the earliest one wins.
pub fn find_best_match_with_cutoff<'a, S: AsRef<str>>(
    input: &str,
    candidates: &'a [S],
    cutoff: f64,
) -> Option<&'a str> {
    let target: Vec<char> = input.chars().collect();
    let index = BlockIndex::new(&target);

    let mut best: Option<(f64, &'a str)> = None;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let seq: Vec<char> = candidate.chars().collect();
        let score = ratio(matching_chars(&seq, &target, &index), seq.len(), target.len());
        if score < cutoff {
            continue;
        }
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Similarity ratio between two strings, in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let index = BlockIndex::new(&b);
    ratio(matching_chars(&a, &b, &index), a.len(), b.len())
}

fn ratio(matches: usize, len_a: usize, len_b: usize) -> f64 {
    let total = len_a + len_b;
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}

/// Positions of each character in the second sequence.
struct BlockIndex {
    positions: HashMap<char, Vec<usize>>,
}

impl BlockIndex {
    fn new(b: &[char]) -> Self {
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            positions.entry(*c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            positions.retain(|_, js| js.len() <= limit);
        }

        Self { positions }
    }
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char], index: &BlockIndex) -> usize {
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, index, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Longest block `a[i..i+k] == b[j..j+k]` inside the given window.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
/// Blocks are seeded from the index only, then grown over any equal
/// neighbours, popular characters included.
fn longest_match(
    a: &[char],
    b: &[char],
    index: &BlockIndex,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // Length of the match ending at b[j] for the previous row of a.
    let mut run_ending: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(js) = index.positions.get(c) {
            for &j in js {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_ending.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        run_ending = next;
    }

    while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_k += 1;
    }
    while best_i + best_k < ahi && best_j + best_k < bhi && a[best_i + best_k] == b[best_j + best_k] {
        best_k += 1;
    }

    (best_i, best_j, best_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings() {
        assert!(approx(similarity("hello", "hello"), 1.0));
        assert!(approx(similarity("", ""), 1.0));
    }

    #[test]
    fn test_disjoint_strings() {
        assert!(approx(similarity("abc", "xyz"), 0.0));
        assert!(approx(similarity("abc", ""), 0.0));
    }

    #[test]
    fn test_known_ratios() {
        // "abcd" / "bcde": one block "bcd".
        assert!(approx(similarity("abcd", "bcde"), 0.75));
        // Blocks "ab" and "cd" around the inserted x.
        assert!(approx(similarity("abxcd", "abcd"), 8.0 / 9.0));
        assert!(approx(similarity("wat is your name", "what is your name"), 32.0 / 33.0));
    }

    #[test]
    fn test_typo_matches_closest_question() {
        let candidates = ["what is your name", "how old are you"];
        assert_eq!(
            find_best_match("wat is your name", &candidates),
            Some("what is your name")
        );
    }

    #[test]
    fn test_unrelated_text_has_no_match() {
        let candidates = ["what is your name", "how old are you"];
        assert_eq!(find_best_match("completely unrelated text", &candidates), None);
    }

    #[test]
    fn test_rephrased_question_matches() {
        let candidates = vec!["capital of france".to_string()];
        assert_eq!(
            find_best_match("whats the capital of france", &candidates),
            Some("capital of france")
        );
    }

    #[test]
    fn test_empty_candidates() {
        let candidates: [&str; 0] = [];
        assert_eq!(find_best_match("anything", &candidates), None);
    }

    #[test]
    fn test_picks_highest_score() {
        let candidates = ["how are you doing", "how are you"];
        assert_eq!(find_best_match("how are you", &candidates), Some("how are you"));
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let candidates = ["abcx", "abcy"];
        assert_eq!(find_best_match("abcz", &candidates), Some("abcx"));
        let reversed = ["abcy", "abcx"];
        assert_eq!(find_best_match("abcz", &reversed), Some("abcy"));
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        // ratio("abcd", "bcde") == 0.75 exactly.
        let candidates = ["abcd"];
        assert_eq!(
            find_best_match_with_cutoff("bcde", &candidates, 0.75),
            Some("abcd")
        );
        assert_eq!(find_best_match_with_cutoff("bcde", &candidates, 0.76), None);
    }

    #[test]
    fn test_unicode_counts_characters() {
        assert!(approx(similarity("café", "cafe"), 0.75));
    }

    const LONG_QUESTION: &str = "could you please remind me what the name of the small \
        coastal village was where we stayed during the summer holiday two years ago, the one \
        with the blue harbour, the old lighthouse and the bakery that sold those famous almond cakes";

    #[test]
    fn test_long_question_matches_itself() {
        assert!(LONG_QUESTION.chars().count() >= AUTOJUNK_MIN_LEN);
        assert!(approx(similarity(LONG_QUESTION, LONG_QUESTION), 1.0));
        assert_eq!(
            find_best_match(LONG_QUESTION, &[LONG_QUESTION]),
            Some(LONG_QUESTION)
        );
    }

    #[test]
    fn test_long_question_with_one_word_changed() {
        let variant = LONG_QUESTION.replace("cakes", "pastries");
        assert!(approx(similarity(&variant, LONG_QUESTION), 0.9720430107526882));
        let candidates = ["how old are you", LONG_QUESTION];
        assert_eq!(find_best_match(&variant, &candidates), Some(LONG_QUESTION));
    }

    #[test]
    fn test_blocks_grow_over_popular_characters() {
        let long_a = "ab".repeat(150);
        let long_b = format!("{}c", "ab".repeat(150));
        // Only "c" seeds in `long_b`; the shared prefix is recovered by growth.
        assert!(approx(similarity(&long_a, &long_b), 600.0 / 601.0));
        assert!(approx(similarity(&long_b, &long_a), 600.0 / 601.0));
    }
}
