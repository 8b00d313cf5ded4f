pub trait RandomPort: Send + Sync {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;

    /// Uniform integer in `min..=max`.
    fn pick_in_range(&self, min: i64, max: i64) -> i64;
}
