//! Small utilities: combinations, permutations and centroids.

use nalgebra::{SVector, Vector4};

/// k-combinations of items (lexicographic).
pub(crate) fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k > n || k == 0 {
        return Vec::new();
    }
    let mut idxs: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    loop {
        out.push(idxs.iter().map(|&i| items[i]).collect());
        // rightmost index that can still advance
        let Some(i) = (0..k).rev().find(|&i| idxs[i] != i + n - k) else {
            break;
        };
        idxs[i] += 1;
        for j in i + 1..k {
            idxs[j] = idxs[j - 1] + 1;
        }
    }
    out
}

/// All 24 permutations of `[0, 1, 2, 3]` in lexicographic order.
pub(crate) fn permutations4() -> Vec<[usize; 4]> {
    let mut out = Vec::with_capacity(24);
    for a in 0..4 {
        for b in (0..4).filter(|&b| b != a) {
            for c in (0..4).filter(|&c| c != a && c != b) {
                let d = 6 - a - b - c;
                out.push([a, b, c, d]);
            }
        }
    }
    out
}

/// Number of inversions `i < j` with `p[i] > p[j]`.
pub(crate) fn inversions(p: &[usize]) -> usize {
    let mut count = 0;
    for i in 0..p.len() {
        for j in i + 1..p.len() {
            if p[i] > p[j] {
                count += 1;
            }
        }
    }
    count
}

pub(crate) fn centroid<const D: usize>(points: &[SVector<f64, D>]) -> SVector<f64, D> {
    let mut acc = SVector::<f64, D>::zeros();
    for p in points {
        acc += p;
    }
    if points.is_empty() {
        acc
    } else {
        acc / (points.len() as f64)
    }
}

/// Max-abs difference over paired rows.
pub(crate) fn max_abs_residual(a: &[Vector4<f64>], b: &[Vector4<f64>]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).amax())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_count_matches_binomial() {
        let items: Vec<usize> = (0..20).collect();
        assert_eq!(combinations(&items, 3).len(), 1140);
        assert_eq!(combinations(&items, 20).len(), 1);
        assert!(combinations(&items, 21).is_empty());
        let first = &combinations(&items, 3)[0];
        assert_eq!(first, &vec![0, 1, 2]);
    }

    #[test]
    fn permutations_are_lexicographic_and_unique() {
        let perms = permutations4();
        assert_eq!(perms.len(), 24);
        assert_eq!(perms[0], [0, 1, 2, 3]);
        assert_eq!(perms[23], [3, 2, 1, 0]);
        assert!(perms.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn inversion_counts() {
        assert_eq!(inversions(&[0, 1, 2, 3]), 0);
        assert_eq!(inversions(&[1, 0, 2, 3]), 1);
        assert_eq!(inversions(&[3, 2, 1, 0]), 6);
    }
}
