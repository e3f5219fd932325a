//! Bake configuration.

/// Vertices handed to a worker per scheduling unit.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Encoding of the baked per-vertex normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Full 3D unit vector in tangent space.
    #[default]
    Tangent,
    /// Tangent-space vector packed to two components with
    /// [`smoothnormal_encode::encode`].
    Octahedral,
}

/// Settings for one bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BakeConfig {
    /// Output encoding.
    pub mode: OutputMode,
    /// Vertices per parallel batch. Zero is treated as one.
    pub batch_size: usize,
    /// Worker count for a dedicated pool. `None` runs on rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Tangent,
            batch_size: DEFAULT_BATCH_SIZE,
            threads: None,
        }
    }
}

impl BakeConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Batch size actually used for chunking.
    #[must_use]
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BakeConfig::default();
        assert_eq!(config.mode, OutputMode::Tangent);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let config = BakeConfig::default().with_batch_size(0);
        assert_eq!(config.effective_batch_size(), 1);
    }

    #[test]
    fn builders_chain() {
        let config = BakeConfig::default()
            .with_mode(OutputMode::Octahedral)
            .with_batch_size(7)
            .with_threads(2);
        assert_eq!(config.mode, OutputMode::Octahedral);
        assert_eq!(config.effective_batch_size(), 7);
        assert_eq!(config.threads, Some(2));
    }
}
