//! Gestalt (Ratcliff/Obershelp) fuzzy string matching.
//!
//! The similarity of two sequences is `2 * M / T`, where `T` is the total
//! number of characters in both and `M` is the number of characters in
//! the matching blocks. Blocks are found by taking the longest common
//! contiguous run, then recursing into the pieces on either side of it.
//!
//! # Example
//!
//! ```
//! use segue_core::matcher::{get_close_matches, ratio};
//!
//! assert!((ratio("yesterday", "yesterdays") - 18.0 / 19.0).abs() < 1e-9);
//!
//! let titles = ["let it be", "hey jude", "yesterday"];
//! let found = get_close_matches("yesteday", &titles, 1, 0.7).unwrap();
//! assert_eq!(found, vec!["yesterday"]);
//! ```

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Queries at least this long get the popular-character heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A block of `size` equal characters starting at `a[a]` and `b[b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Compares many candidate strings against one fixed string.
///
/// The fixed string is the second sequence (`b`). Everything that depends
/// only on it, such as the character index, is computed once in
/// [`SequenceMatcher::new`] and reused for every candidate.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    b: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
    bcount: HashMap<char, usize>,
}

impl SequenceMatcher {
    #[must_use]
    pub fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        let mut bcount = HashMap::with_capacity(b2j.len());
        for (&c, indices) in &b2j {
            bcount.insert(c, indices.len());
        }

        // Very common characters in long sequences only produce noise
        // blocks; they may still extend a block but never seed one.
        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, indices| indices.len() <= ntest);
        }

        Self { b, b2j, bcount }
    }

    /// Similarity of `a` to the fixed sequence, in `[0, 1]`.
    pub fn ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        self.ratio_chars(&a)
    }

    fn ratio_chars(&self, a: &[char]) -> f64 {
        let matches: usize = self.matching_blocks_chars(a).iter().map(|m| m.size).sum();
        calculate_ratio(matches, a.len() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from character multisets.
    pub fn quick_ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        self.quick_ratio_chars(&a)
    }

    fn quick_ratio_chars(&self, a: &[char]) -> f64 {
        let mut avail: HashMap<char, usize> = HashMap::new();
        let mut matches = 0;
        for &c in a {
            let left = avail
                .entry(c)
                .or_insert_with(|| self.bcount.get(&c).copied().unwrap_or(0));
            if *left > 0 {
                *left -= 1;
                matches += 1;
            }
        }
        calculate_ratio(matches, a.len() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from lengths alone.
    pub fn real_quick_ratio(&self, a: &str) -> f64 {
        self.real_quick_ratio_len(a.chars().count())
    }

    fn real_quick_ratio_len(&self, la: usize) -> f64 {
        let lb = self.b.len();
        calculate_ratio(la.min(lb), la + lb)
    }

    /// Non-overlapping matching blocks between `a` and the fixed sequence,
    /// ordered by position, with adjacent blocks merged.
    pub fn matching_blocks(&self, a: &str) -> Vec<Match> {
        let a: Vec<char> = a.chars().collect();
        self.matching_blocks_chars(&a)
    }

    fn matching_blocks_chars(&self, a: &[char]) -> Vec<Match> {
        let mut queue = vec![(0, a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(a, alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }

        blocks.sort_unstable();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len());
        for m in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == m.a && last.b + last.size == m.b => {
                    last.size += m.size;
                }
                _ => merged.push(m),
            }
        }
        merged
    }

    /// Longest block of equal characters in `a[alo..ahi]` and
    /// `b[blo..bhi]`. Ties go to the block that starts earliest in `a`,
    /// then earliest in `b`.
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> Match {
        let b = &self.b;
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the longest block ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(indices) = self.b2j.get(c) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular characters were left out of the index, so grow the
        // block over any equal neighbours.
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Match {
            a: besti,
            b: bestj,
            size: bestsize,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / length as f64
}

/// Similarity ratio of two strings, in `[0, 1]`.
pub fn ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(b).ratio(a)
}

/// Rank `possibilities` by similarity to `word`.
///
/// Returns up to `n` `(index, score)` pairs for candidates scoring at
/// least `cutoff`, best first. Equal scores keep candidate order. An empty
/// `word` matches nothing.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `n` is zero or `cutoff` lies
/// outside `[0, 1]`.
pub fn rank_close_matches<S: AsRef<str>>(
    word: &str,
    possibilities: &[S],
    n: usize,
    cutoff: f64,
) -> Result<Vec<(usize, f64)>> {
    validate_arguments(n, cutoff)?;
    Ok(rank_checked(word, possibilities, n, cutoff))
}

pub(crate) fn validate_arguments(n: usize, cutoff: f64) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidArgument(format!(
            "match count must be > 0, got {n}"
        )));
    }
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(Error::InvalidArgument(format!(
            "cutoff must be in [0.0, 1.0], got {cutoff}"
        )));
    }
    Ok(())
}

/// [`rank_close_matches`] for arguments already known to be valid.
pub(crate) fn rank_checked<S: AsRef<str>>(
    word: &str,
    possibilities: &[S],
    n: usize,
    cutoff: f64,
) -> Vec<(usize, f64)> {
    if word.is_empty() {
        return Vec::new();
    }

    let matcher = SequenceMatcher::new(word);
    let mut scored = Vec::new();

    for (index, candidate) in possibilities.iter().enumerate() {
        let a: Vec<char> = candidate.as_ref().chars().collect();
        if matcher.real_quick_ratio_len(a.len()) < cutoff
            || matcher.quick_ratio_chars(&a) < cutoff
        {
            continue;
        }
        let score = matcher.ratio_chars(&a);
        if score >= cutoff {
            scored.push((index, score));
        }
    }

    scored.sort_by(|x, y| y.1.total_cmp(&x.1));
    scored.truncate(n);
    scored
}

/// The best `n` candidates scoring at least `cutoff` against `word`.
///
/// See [`rank_close_matches`] for ordering and errors.
pub fn get_close_matches<'a, S: AsRef<str>>(
    word: &str,
    possibilities: &'a [S],
    n: usize,
    cutoff: f64,
) -> Result<Vec<&'a str>> {
    Ok(rank_close_matches(word, possibilities, n, cutoff)?
        .into_iter()
        .map(|(index, _)| possibilities[index].as_ref())
        .collect())
}
