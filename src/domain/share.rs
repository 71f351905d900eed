//! Share metadata and value

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::{Identifier, IterationExponent, MemberIndex, ShareCount, Threshold};
use crate::error::{Error, Result};

/// Parameters every share of one split must agree on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitParameters {
    pub identifier: Identifier,
    pub extendable: bool,
    pub iteration_exponent: IterationExponent,
    pub group_threshold: Threshold,
    pub group_count: ShareCount,
}

/// The metadata carried in front of every share value
///
/// Invariants checked at construction: `group_threshold <= group_count` and
/// `group_index < group_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareHeader {
    parameters: SplitParameters,
    group_index: MemberIndex,
    member_index: MemberIndex,
    member_threshold: Threshold,
}

impl ShareHeader {
    /// Creates a header for a share at `member_index` of group `group_index`
    ///
    /// # Errors
    /// Returns [`Error::InvalidFormat`] if the group threshold exceeds the group count
    /// or the group index does not address one of the groups
    pub fn new(
        parameters: SplitParameters,
        group_index: MemberIndex,
        member_index: MemberIndex,
        member_threshold: Threshold,
    ) -> Result<Self> {
        if *parameters.group_threshold > *parameters.group_count {
            return Err(Error::InvalidFormat(format!(
                "group threshold {} exceeds group count {}",
                *parameters.group_threshold, *parameters.group_count
            )));
        }
        if *group_index >= *parameters.group_count {
            return Err(Error::InvalidFormat(format!(
                "group index {} out of range for {} groups",
                *group_index, *parameters.group_count
            )));
        }
        Ok(Self {
            parameters,
            group_index,
            member_index,
            member_threshold,
        })
    }

    /// Gets the parameters shared by the whole split
    #[must_use]
    pub fn parameters(&self) -> SplitParameters {
        self.parameters
    }

    #[must_use]
    pub fn identifier(&self) -> Identifier {
        self.parameters.identifier
    }

    #[must_use]
    pub fn extendable(&self) -> bool {
        self.parameters.extendable
    }

    #[must_use]
    pub fn iteration_exponent(&self) -> IterationExponent {
        self.parameters.iteration_exponent
    }

    #[must_use]
    pub fn group_index(&self) -> MemberIndex {
        self.group_index
    }

    #[must_use]
    pub fn group_threshold(&self) -> Threshold {
        self.parameters.group_threshold
    }

    #[must_use]
    pub fn group_count(&self) -> ShareCount {
        self.parameters.group_count
    }

    #[must_use]
    pub fn member_index(&self) -> MemberIndex {
        self.member_index
    }

    #[must_use]
    pub fn member_threshold(&self) -> Threshold {
        self.member_threshold
    }
}

/// One share: header plus a value as long as the (encrypted) master secret
#[derive(Clone)]
pub struct Share {
    header: ShareHeader,
    value: Zeroizing<Vec<u8>>,
}

impl Share {
    /// Shortest share value in bytes (128-bit secrets)
    pub const MIN_VALUE_LEN: usize = 16;

    /// Creates a share
    ///
    /// # Errors
    /// Returns [`Error::InvalidFormat`] if the value is shorter than 16 bytes or of odd length
    pub fn new(header: ShareHeader, value: Zeroizing<Vec<u8>>) -> Result<Self> {
        if value.len() < Self::MIN_VALUE_LEN || value.len() % 2 != 0 {
            return Err(Error::InvalidFormat(format!(
                "share value must be an even number of bytes, at least {} (got {})",
                Self::MIN_VALUE_LEN,
                value.len()
            )));
        }
        Ok(Self { header, value })
    }

    /// Gets the share metadata
    #[must_use]
    pub fn header(&self) -> &ShareHeader {
        &self.header
    }

    /// Gets the share value
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl PartialEq for Share {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.value.len() == other.value.len()
            && bool::from(self.value().ct_eq(other.value()))
    }
}

impl Eq for Share {}

impl std::fmt::Debug for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Share")
            .field("header", &self.header)
            .field("value", &format_args!("<{} bytes>", self.value.len()))
            .finish()
    }
}
