//! Common type definitions shared across the probing components.

use std::fmt;

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// The region S3 treats as the default partition location.
    ///
    /// Bucket creation in this region must not carry a location constraint.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the default region.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the disposable bucket that hosts probe grants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BucketName(String);

impl BucketName {
    /// Create a new bucket name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the bucket name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The bucket every probe of a run is addressed to.
///
/// Holds no state beyond the name and the session region; it is built once
/// per run and passed by reference to every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketHandle {
    /// Bucket name.
    pub name: BucketName,
    /// Region inferred from the active session.
    pub region: AwsRegion,
}

impl BucketHandle {
    /// Create a handle for `name` in `region`.
    #[must_use]
    pub fn new(name: BucketName, region: AwsRegion) -> Self {
        Self { name, region }
    }
}

/// An email address to probe, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTarget(String);

impl ProbeTarget {
    /// Parse a raw input line into a target.
    ///
    /// Returns `None` for empty or whitespace-only input.
    ///
    /// # Examples
    ///
    /// ```
    /// use grantprobe_core::ProbeTarget;
    ///
    /// let target = ProbeTarget::parse("  alice@example.com\n").unwrap();
    /// assert_eq!(target.email(), "alice@example.com");
    /// assert!(ProbeTarget::parse(" \t ").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// The email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
