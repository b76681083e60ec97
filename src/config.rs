//! Kernel configuration.

/// What `copy_out` does when the machine rejects a byte write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyOutPolicy {
    /// Stop at the first rejected byte and report an address fault.
    #[default]
    FailFast,
    /// Skip rejected bytes and keep writing the rest.
    BestEffort,
}

/// Tunables for a [`Kernel`](crate::Kernel) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Seed for the `RandomNum` generator. Zero is replaced by a fixed seed.
    pub random_seed: u64,
    /// Failure handling for kernel-to-user copies.
    pub copy_out: CopyOutPolicy,
}

impl KernelConfig {
    /// Seed used when none is given.
    pub const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Default seed and [`CopyOutPolicy::FailFast`].
    pub const fn new() -> Self {
        Self {
            random_seed: Self::DEFAULT_SEED,
            copy_out: CopyOutPolicy::FailFast,
        }
    }

    /// Replace the `RandomNum` seed.
    pub const fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Replace the copy-out failure policy.
    pub const fn with_copy_out(mut self, policy: CopyOutPolicy) -> Self {
        self.copy_out = policy;
        self
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::new()
    }
}
