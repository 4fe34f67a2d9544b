//! Comparison of matrices and species indices whose row numbering may differ.
//! Species rows are numbered by discovery order, so two correct stoichiometric
//! matrices of the same reaction set can differ by a row permutation.
use approx::abs_diff_eq;
use nalgebra::DMatrix;
use std::collections::{HashMap, HashSet};

/// True if `a` and `b` have the same shape and the same rows as a multiset
/// (every row of `a` matches exactly one row of `b`, duplicates counted).
pub fn same_rows(a: &DMatrix<f64>, b: &DMatrix<f64>) -> bool {
    match_rows(a, b, |x, y| x == y)
}

/// Same as `same_rows` but entries are compared with an absolute tolerance.
pub fn same_rows_eps(a: &DMatrix<f64>, b: &DMatrix<f64>, epsilon: f64) -> bool {
    match_rows(a, b, |x, y| abs_diff_eq!(x, y, epsilon = epsilon))
}

// pairs rows of `a` with rows of `b` one-to-one (augmenting paths), so a row that
// is within tolerance of several rows does not block a later row
fn match_rows<F>(a: &DMatrix<f64>, b: &DMatrix<f64>, eq: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    if a.shape() != b.shape() {
        return false;
    }
    let n = a.nrows();
    let candidates: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            (0..n)
                .filter(|&k| a.row(i).iter().zip(b.row(k).iter()).all(|(&x, &y)| eq(x, y)))
                .collect()
        })
        .collect();
    // owner[k] is the row of `a` currently paired with row k of `b`
    let mut owner: Vec<Option<usize>> = vec![None; n];
    for i in 0..n {
        let mut visited = vec![false; n];
        if !augment(i, &candidates, &mut owner, &mut visited) {
            return false;
        }
    }
    true
}

fn augment(
    i: usize,
    candidates: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &k in &candidates[i] {
        if visited[k] {
            continue;
        }
        visited[k] = true;
        let free = match owner[k] {
            None => true,
            Some(other) => augment(other, candidates, owner, visited),
        };
        if free {
            owner[k] = Some(i);
            return true;
        }
    }
    false
}

/// True if `x` and `y` have the same keys and the same values, each compared as a set.
/// Key-value pairs themselves may differ.
pub fn equivalent_dictionaries(x: &HashMap<String, usize>, y: &HashMap<String, usize>) -> bool {
    let keys_x: HashSet<&String> = x.keys().collect();
    let keys_y: HashSet<&String> = y.keys().collect();
    let values_x: HashSet<&usize> = x.values().collect();
    let values_y: HashSet<&usize> = y.values().collect();
    keys_x == keys_y && values_x == values_y
}
