//! Iterative lexicographic permutation generation.
//!
//! # Algorithm
//!
//! Narayana Pandita's next-permutation step: find the longest non-increasing
//! suffix, swap its predecessor with the rightmost larger element, then
//! reverse the suffix. Starting from sorted input, repeated steps visit every
//! permutation exactly once in lexicographic order using `O(1)` extra memory.

/// Rearranges `items` into the next lexicographically greater permutation.
///
/// Returns `false` (and leaves `items` sorted ascending) when `items` was the
/// last permutation.
///
/// # Examples
///
/// ```
/// use u_tsptw::exact::next_permutation;
///
/// let mut v = [1, 2, 3];
/// assert!(next_permutation(&mut v));
/// assert_eq!(v, [1, 3, 2]);
///
/// let mut last = [3, 2, 1];
/// assert!(!next_permutation(&mut last));
/// assert_eq!(last, [1, 2, 3]);
/// ```
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }

    let mut i = n - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }

    let mut j = n - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// Lazy iterator over all permutations of a set, in lexicographic order.
///
/// The input is sorted on construction, so every arrangement is produced
/// exactly once; duplicates in the input collapse to distinct arrangements.
/// [`Permutations::restart`] rewinds to the first permutation.
///
/// # Examples
///
/// ```
/// use u_tsptw::exact::Permutations;
///
/// let all: Vec<Vec<char>> = Permutations::new(vec!['b', 'a']).collect();
/// assert_eq!(all, vec![vec!['a', 'b'], vec!['b', 'a']]);
/// ```
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    current: Vec<T>,
    pending: bool,
}

impl<T: Ord + Clone> Permutations<T> {
    /// Creates an iterator over the permutations of `items`.
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort();
        Self {
            current: items,
            pending: true,
        }
    }

    /// Rewinds to the first (sorted) permutation.
    pub fn restart(&mut self) {
        self.current.sort();
        self.pending = true;
    }
}

impl<T: Ord + Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if !self.pending {
            return None;
        }
        let out = self.current.clone();
        self.pending = next_permutation(&mut self.current);
        Some(out)
    }
}
