/// Limits used by the tabular profiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileOptions {
    /// Non-null values inspected by type inference (default 100).
    pub sample_size: usize,
    /// Frequency tables are only reported for columns with at most this many
    /// distinct values (default 1000).
    pub top_values_limit: usize,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            sample_size: 100,
            top_values_limit: 1000,
        }
    }
}

impl ProfileOptions {
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_top_values_limit(mut self, limit: usize) -> Self {
        self.top_values_limit = limit;
        self
    }
}
