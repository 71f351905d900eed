//! Configuration validation for splits

use crate::error::{Error, Result};

use super::{IterationExponent, ShareCount, Threshold};

/// Validated split configuration
///
/// Enforces `2 <= threshold <= share_count`. A threshold of 1 would hand the
/// whole secret to every share holder, and a threshold above the share count
/// could never be met. The iteration exponent defaults to 1 and shares are
/// non-extendable unless requested.
#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    threshold: Threshold,
    share_count: ShareCount,
    iteration_exponent: IterationExponent,
    extendable: bool,
}

impl SplitConfig {
    /// Creates a new split configuration
    ///
    /// # Errors
    /// Returns [`Error::DomainRange`] if threshold is below 2 or exceeds share count
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedsplit::domain::{SplitConfig, Threshold, ShareCount};
    ///
    /// // Valid: 2 <= threshold <= share_count
    /// let config = SplitConfig::new(
    ///     Threshold::new(3).unwrap(),
    ///     ShareCount::new(5).unwrap()
    /// ).unwrap();
    ///
    /// assert_eq!(*config.threshold(), 3);
    /// assert_eq!(*config.share_count(), 5);
    /// assert_eq!(*config.iteration_exponent(), 1);
    ///
    /// // Invalid: threshold > share_count
    /// let result = SplitConfig::new(
    ///     Threshold::new(5).unwrap(),
    ///     ShareCount::new(3).unwrap()
    /// );
    /// assert!(result.is_err());
    ///
    /// // Invalid: a single share would reveal the secret
    /// let result = SplitConfig::new(
    ///     Threshold::new(1).unwrap(),
    ///     ShareCount::new(3).unwrap()
    /// );
    /// assert!(result.is_err());
    /// ```
    pub fn new(threshold: Threshold, share_count: ShareCount) -> Result<Self> {
        if *threshold < 2 {
            return Err(Error::DomainRange(format!(
                "required parts must be at least 2 (got {})",
                *threshold
            )));
        }
        if *threshold > *share_count {
            return Err(Error::DomainRange(format!(
                "required parts {} cannot exceed overall parts {}",
                *threshold, *share_count
            )));
        }
        Ok(Self {
            threshold,
            share_count,
            iteration_exponent: IterationExponent::default(),
            extendable: false,
        })
    }

    /// Replaces the iteration exponent
    #[must_use]
    pub fn with_iteration_exponent(mut self, iteration_exponent: IterationExponent) -> Self {
        self.iteration_exponent = iteration_exponent;
        self
    }

    /// Marks the generated shares as extendable
    #[must_use]
    pub fn with_extendable(mut self, extendable: bool) -> Self {
        self.extendable = extendable;
        self
    }

    /// Gets the threshold value
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Gets the share count value
    #[must_use]
    pub fn share_count(&self) -> ShareCount {
        self.share_count
    }

    /// Gets the iteration exponent
    #[must_use]
    pub fn iteration_exponent(&self) -> IterationExponent {
        self.iteration_exponent
    }

    /// Whether shares are generated with the extendable flag
    #[must_use]
    pub fn extendable(&self) -> bool {
        self.extendable
    }
}
