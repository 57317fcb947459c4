//! Configuration for decomposition.

/// Which unmatched clause seeds a new component when a partitioning pass
/// attaches nothing.
///
/// The choice only affects component order and the order of clauses within
/// components, never which clauses end up together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeedChoice {
    /// The last unmatched clause.
    #[default]
    Last,
    /// The first unmatched clause.
    First,
}

/// Configuration for [`Decomposer`](crate::Decomposer).
#[derive(Clone, Debug)]
pub struct DecomposeConfig {
    /// Remove constant clauses before partitioning.
    pub strip_constants: bool,

    /// Seeding tie-break for the partitioner.
    pub seed: SeedChoice,

    /// Reject inputs with more clauses than this (None = unlimited).
    pub max_clauses: Option<usize>,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            strip_constants: true,
            seed: SeedChoice::Last,
            max_clauses: None,
        }
    }
}

impl DecomposeConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that partitions every clause, constants
    /// included.
    #[must_use]
    pub fn keep_constants() -> Self {
        Self {
            strip_constants: false,
            ..Self::default()
        }
    }

    /// Builder method to enable/disable constant stripping.
    #[must_use]
    pub fn with_strip_constants(mut self, strip: bool) -> Self {
        self.strip_constants = strip;
        self
    }

    /// Builder method to set the seeding tie-break.
    #[must_use]
    pub fn with_seed(mut self, seed: SeedChoice) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to cap the number of input clauses.
    #[must_use]
    pub fn with_max_clauses(mut self, limit: usize) -> Self {
        self.max_clauses = Some(limit);
        self
    }
}
