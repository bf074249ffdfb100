pub mod test {
    use rand::prelude::*;

    /// Endless stream of short byte sequences over a tiny alphabet, so that
    /// consecutive samples share plenty of common runs.
    pub fn create_test_bytes(seed: u64) -> impl Iterator<Item = Vec<u8>> {
        let mut rng = StdRng::seed_from_u64(seed);

        std::iter::repeat_with(move || {
            let len = rng.random_range(0..10);
            let mut bytes = Vec::with_capacity(len);
            for _ in 0..len {
                bytes.push(rng.random_range(0..3) as u8);
            }
            bytes
        })
    }

    /// Endless stream of line sequences for text-level diffs.
    pub fn create_test_lines(seed: u64, max_lines: usize) -> impl Iterator<Item = Vec<String>> {
        let mut rng = StdRng::seed_from_u64(seed);

        std::iter::repeat_with(move || {
            let len = rng.random_range(0..=max_lines);
            (0..len)
                .map(|_| format!("line {}", rng.random_range(0..8)))
                .collect()
        })
    }
}
