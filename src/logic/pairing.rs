//! Round-robin pairing: every team meets every other team once.

/// All unordered pairs `(items[i], items[j])` with `i < j`, in input order.
///
/// Fewer than two items yield no pairs.
pub fn round_robin_pairs<T: Copy>(items: &[T]) -> Vec<(T, T)> {
    let n = items.len();
    if n < 2 {
        return Vec::new();
    }
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for (i, &first) in items.iter().enumerate() {
        for &second in &items[i + 1..] {
            pairs.push((first, second));
        }
    }
    pairs
}
