// File: src/fuzzy/alignment.rs
//! Global sequence alignment (Needleman-Wunsch).
//!
//! The same routine is used twice: with the ±1 [`indicator`] cost to line up
//! alternate pronunciations while learning phoneme similarity, and with the
//! learned matrix as cost function to score phonetic similarity of phrases.

/// Default substitution cost: 1 for a match, -1 otherwise.
pub fn indicator<T: PartialEq>(a: &T, b: &T) -> f64 {
    if a == b {
        1.0
    } else {
        -1.0
    }
}

pub const DEFAULT_GAP_PENALTY: f64 = -1.0;

/// Full (|seq1|+1) x (|seq2|+1) score matrix.
/// Complexity: O(|seq1|·|seq2|) time and space.
fn score_matrix<T, F>(seq1: &[T], seq2: &[T], gap_penalty: f64, cost_fn: &F) -> Vec<Vec<f64>>
where
    F: Fn(&T, &T) -> f64,
{
    let mut mat = vec![vec![0.0; seq2.len() + 1]; seq1.len() + 1];
    for (i, row) in mat.iter_mut().enumerate() {
        row[0] = i as f64 * gap_penalty;
    }
    for j in 0..=seq2.len() {
        mat[0][j] = j as f64 * gap_penalty;
    }
    for (i, a) in seq1.iter().enumerate() {
        for (j, b) in seq2.iter().enumerate() {
            let diag = mat[i][j] + cost_fn(a, b);
            let up = mat[i][j + 1] + gap_penalty;
            let left = mat[i + 1][j] + gap_penalty;
            mat[i + 1][j + 1] = diag.max(up).max(left);
        }
    }
    mat
}

/// Score of the optimal global alignment of `seq1` and `seq2`.
pub fn align_score<T, F>(seq1: &[T], seq2: &[T], gap_penalty: f64, cost_fn: F) -> f64
where
    F: Fn(&T, &T) -> f64,
{
    score_matrix(seq1, seq2, gap_penalty, &cost_fn)[seq1.len()][seq2.len()]
}

/// Aligns two sequences, returning equal-length copies where `None` marks a gap.
///
/// The backtrace starts at the bottom-right cell and breaks ties in a fixed
/// order: diagonal, then up (element of `seq1` against a gap), then left.
/// This order decides which phoneme pairs are counted as swaps when the
/// similarity matrix is learned, so it must not change.
pub fn align<T, F>(
    seq1: &[T],
    seq2: &[T],
    gap_penalty: f64,
    cost_fn: F,
) -> (Vec<Option<T>>, Vec<Option<T>>)
where
    T: Clone,
    F: Fn(&T, &T) -> f64,
{
    let mat = score_matrix(seq1, seq2, gap_penalty, &cost_fn);
    let mut aligned1 = Vec::with_capacity(seq1.len() + seq2.len());
    let mut aligned2 = Vec::with_capacity(seq1.len() + seq2.len());
    let (mut i, mut j) = (seq1.len(), seq2.len());

    while i > 0 || j > 0 {
        let diag = i > 0 && j > 0 && mat[i][j] == mat[i - 1][j - 1] + cost_fn(&seq1[i - 1], &seq2[j - 1]);
        // The border rows only allow one direction.
        let up = i > 0 && (j == 0 || mat[i][j] == mat[i - 1][j] + gap_penalty);

        if diag {
            aligned1.push(Some(seq1[i - 1].clone()));
            aligned2.push(Some(seq2[j - 1].clone()));
            i -= 1;
            j -= 1;
        } else if up {
            aligned1.push(Some(seq1[i - 1].clone()));
            aligned2.push(None);
            i -= 1;
        } else {
            aligned1.push(None);
            aligned2.push(Some(seq2[j - 1].clone()));
            j -= 1;
        }
    }

    aligned1.reverse();
    aligned2.reverse();
    (aligned1, aligned2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(a: &[&str], b: &[&str]) -> f64 {
        align_score(a, b, DEFAULT_GAP_PENALTY, indicator)
    }

    #[test]
    fn identical_sequences_score_their_length() {
        assert_eq!(score(&["A", "B"], &["A", "B"]), 2.0);
    }

    #[test]
    fn single_mismatch() {
        assert_eq!(score(&["A"], &["B"]), -1.0);
    }

    #[test]
    fn deletion_costs_one_gap() {
        // Hand-computed matrix for ABC vs AC:
        //        -   A   C
        //   -    0  -1  -2
        //   A   -1   1   0
        //   B   -2   0   0
        //   C   -3  -1   1
        assert_eq!(score(&["A", "B", "C"], &["A", "C"]), 1.0);
        let (a, b) = align(&["A", "B", "C"], &["A", "C"], DEFAULT_GAP_PENALTY, indicator);
        assert_eq!(a, vec![Some("A"), Some("B"), Some("C")]);
        assert_eq!(b, vec![Some("A"), None, Some("C")]);
    }

    #[test]
    fn insertion_puts_gap_in_first_sequence() {
        let (a, b) = align(&["A", "C"], &["A", "B", "C"], DEFAULT_GAP_PENALTY, indicator);
        assert_eq!(a, vec![Some("A"), None, Some("C")]);
        assert_eq!(b, vec![Some("A"), Some("B"), Some("C")]);
    }

    #[test]
    fn ties_prefer_diagonal_over_gaps() {
        // mismatch (-1) ties with two half gaps (-0.5 - 0.5)
        let (a, b) = align(&["A"], &["B"], -0.5, indicator);
        assert_eq!(a, vec![Some("A")]);
        assert_eq!(b, vec![Some("B")]);
    }

    #[test]
    fn ties_prefer_up_over_left() {
        //        -   B   A
        //   -    0  -1  -2
        //   A   -1  -1   0
        //   B   -2   0  -1
        // The corner is reachable from above and from the left; up wins.
        let (a, b) = align(&["A", "B"], &["B", "A"], DEFAULT_GAP_PENALTY, indicator);
        assert_eq!(a, vec![None, Some("A"), Some("B")]);
        assert_eq!(b, vec![Some("B"), Some("A"), None]);
    }

    #[test]
    fn empty_against_sequence_is_all_gaps() {
        let empty: [&str; 0] = [];
        assert_eq!(score(&empty, &["A", "B"]), -2.0);
        let (a, b) = align(&empty, &["A", "B"], DEFAULT_GAP_PENALTY, indicator);
        assert_eq!(a, vec![None, None]);
        assert_eq!(b, vec![Some("A"), Some("B")]);

        let (a, b) = align(&["A"], &empty, DEFAULT_GAP_PENALTY, indicator);
        assert_eq!(a, vec![Some("A")]);
        assert_eq!(b, vec![None]);
    }

    #[test]
    fn custom_cost_function_is_used() {
        let always_two = |_: &&str, _: &&str| 2.0;
        assert_eq!(align_score(&["A", "B"], &["C", "D"], DEFAULT_GAP_PENALTY, always_two), 4.0);
    }
}
