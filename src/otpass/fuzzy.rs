//! # Fuzzy Scoring
//!
//! Name resolution hinges on a single similarity number between 0 and 100, and the
//! resolver's fixed floor only makes sense against one specific metric. Swapping the
//! metric silently changes which account a query lands on, so the algorithm is pinned
//! here and nowhere else.
//!
//! ## The metric
//!
//! Scores come from a *weighted ratio* ([`wratio`]) built on Ratcliff/Obershelp
//! sequence matching (the "gestalt" matcher):
//!
//! 1. Both strings go through [`full_process`]: every non-word character becomes a
//!    space and the result is lowercased and trimmed; then Latin-1 supplement code
//!    points are dropped and the same replace/lowercase/trim runs again.
//! 2. [`ratio`] is `2·M / T` over Unicode scalar values, where `M` is the number of
//!    characters in matching blocks and `T` the combined length.
//! 3. When the lengths are similar (ratio of lengths below 1.5), the score is the best
//!    of the plain ratio and the token sort/set ratios scaled by 0.95.
//! 4. Otherwise the partial (best aligned substring) variants join in, scaled by 0.9,
//!    or by 0.6 when one string is more than eight times longer.
//!
//! Every intermediate score is rounded half-to-even.
//!
//! Examples that must hold: `gihtub`/`github` scores 83, `new york mets`/`new york
//! meats` scores 96 and `yankees`/`new york yankees` scores 90.

use std::collections::{BTreeSet, HashMap};

const UNBASE_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const LONG_PARTIAL_SCALE: f64 = 0.6;

/// Sequences at least this long get their most frequent elements pruned from the
/// match index.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Normalizes a string before scoring.
///
/// Separators are found before Latin-1 is stripped, so a no-break space still
/// splits words and `Ÿ` is lowercased into the stripped range.
pub fn full_process(s: &str) -> String {
    let words = words_lowercase(s);
    let ascii_ish: String = words
        .chars()
        .filter(|c| !('\u{80}'..='\u{ff}').contains(c))
        .collect();
    words_lowercase(&ascii_ish)
}

fn words_lowercase(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    replaced.to_lowercase().trim().to_string()
}

/// Best score of `query` across all `choices`, 0 when there are none.
pub fn best_score<'a, I>(query: &str, choices: I) -> u8
where
    I: IntoIterator<Item = &'a str>,
{
    let processed = full_process(query);
    choices
        .into_iter()
        .map(|choice| wratio(&processed, &full_process(choice)))
        .max()
        .unwrap_or(0)
}

/// Weighted ratio over already processed strings.
pub fn wratio(p1: &str, p2: &str) -> u8 {
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let base = f64::from(ratio(p1, p2));

    let len1 = p1.chars().count();
    let len2 = p2.chars().count();
    let len_ratio = len1.max(len2) as f64 / len1.min(len2) as f64;

    if len_ratio < 1.5 {
        let tsor = f64::from(token_sort_ratio(p1, p2)) * UNBASE_SCALE;
        let tser = f64::from(token_set_ratio(p1, p2)) * UNBASE_SCALE;
        return round_score(base.max(tsor).max(tser));
    }

    let partial_scale = if len_ratio > 8.0 {
        LONG_PARTIAL_SCALE
    } else {
        PARTIAL_SCALE
    };

    let partial = f64::from(partial_ratio(p1, p2)) * partial_scale;
    let ptsor = f64::from(partial_token_sort_ratio(p1, p2)) * UNBASE_SCALE * partial_scale;
    let ptser = f64::from(partial_token_set_ratio(p1, p2)) * UNBASE_SCALE * partial_scale;

    round_score(base.max(partial).max(ptsor).max(ptser))
}

/// Plain similarity of two strings.
pub fn ratio(s1: &str, s2: &str) -> u8 {
    if s1 == s2 {
        return 100;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }

    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    round_score(100.0 * sequence_ratio(&a, &b))
}

/// Similarity of the shorter string to its best aligned window in the longer one.
pub fn partial_ratio(s1: &str, s2: &str) -> u8 {
    if s1 == s2 {
        return 100;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }

    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() {
        (&a, &b)
    } else {
        (&b, &a)
    };

    let blocks = SequenceMatcher::new(shorter, longer).matching_blocks();

    let mut best = 0.0_f64;
    for block in blocks {
        let long_start = block.b.saturating_sub(block.a);
        let long_end = (long_start + shorter.len()).min(longer.len());
        let r = sequence_ratio(shorter, &longer[long_start..long_end]);
        if r > 0.995 {
            return 100;
        }
        best = best.max(r);
    }

    round_score(100.0 * best)
}

pub fn token_sort_ratio(p1: &str, p2: &str) -> u8 {
    ratio(&sorted_tokens(p1), &sorted_tokens(p2))
}

pub fn partial_token_sort_ratio(p1: &str, p2: &str) -> u8 {
    partial_ratio(&sorted_tokens(p1), &sorted_tokens(p2))
}

pub fn token_set_ratio(p1: &str, p2: &str) -> u8 {
    token_set(p1, p2, ratio)
}

pub fn partial_token_set_ratio(p1: &str, p2: &str) -> u8 {
    token_set(p1, p2, partial_ratio)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

// Compares the shared tokens against each side's shared+remaining tokens, so a query
// that is a token subset of a name scores as a full match.
fn token_set(p1: &str, p2: &str, scorer: fn(&str, &str) -> u8) -> u8 {
    if p1 == p2 {
        return 100;
    }
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let tokens1: BTreeSet<&str> = p1.split_whitespace().collect();
    let tokens2: BTreeSet<&str> = p2.split_whitespace().collect();

    let sect: Vec<&str> = tokens1.intersection(&tokens2).copied().collect();
    let diff1to2: Vec<&str> = tokens1.difference(&tokens2).copied().collect();
    let diff2to1: Vec<&str> = tokens2.difference(&tokens1).copied().collect();

    let sorted_sect = sect.join(" ");
    let combined_1to2 = format!("{} {}", sorted_sect, diff1to2.join(" "));
    let combined_2to1 = format!("{} {}", sorted_sect, diff2to1.join(" "));

    let sorted_sect = sorted_sect.trim();
    let combined_1to2 = combined_1to2.trim();
    let combined_2to1 = combined_2to1.trim();

    scorer(sorted_sect, combined_1to2)
        .max(scorer(sorted_sect, combined_2to1))
        .max(scorer(combined_1to2, combined_2to1))
}

fn round_score(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 100.0) as u8
}

fn sequence_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches: usize = SequenceMatcher::new(a, b)
        .matching_blocks()
        .iter()
        .map(|m| m.size)
        .sum();
    2.0 * matches as f64 / total as f64
}

/// A run of `size` equal elements at `a[a..]` and `b[b..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Block {
    a: usize,
    b: usize,
    size: usize,
}

struct SequenceMatcher<'s> {
    a: &'s [char],
    b: &'s [char],
    b2j: HashMap<char, Vec<usize>>,
}

impl<'s> SequenceMatcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, indices| indices.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` / `b[blo..bhi]`, earliest on ties.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len = HashMap::new();
            if let Some(indices) = self.b2j.get(&self.a[i]) {
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
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Pruned elements never seed a match but may still extend one.
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Block {
            a: besti,
            b: bestj,
            size: bestsize,
        }
    }

    /// Non-adjacent matching blocks in order, terminated by a zero-size sentinel at
    /// `(len(a), len(b))`.
    fn matching_blocks(&self) -> Vec<Block> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            if alo < block.a && blo < block.b {
                queue.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                queue.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
            blocks.push(block);
        }
        blocks.sort();

        let mut collapsed = Vec::with_capacity(blocks.len() + 1);
        let mut current = Block {
            a: 0,
            b: 0,
            size: 0,
        };
        for block in blocks {
            if current.a + current.size == block.a && current.b + current.size == block.b {
                current.size += block.size;
            } else {
                if current.size > 0 {
                    collapsed.push(current);
                }
                current = block;
            }
        }
        if current.size > 0 {
            collapsed.push(current);
        }

        collapsed.push(Block {
            a: la,
            b: lb,
            size: 0,
        });
        collapsed
    }
}
