//! The `ApiVersion` value type for tagging and negotiating versioned
//! service endpoints.
//!
//! An API version is a partially-populated tuple of an optional calendar
//! group date, optional major/minor numbers, and an optional status label
//! ("Beta", "RC"). Values are immutable after construction and carry a
//! precomputed hash, so they are cheap to use as sort and map keys.

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::OnceLock;
use thiserror::Error;

/// Errors produced while constructing or parsing an API version.
///
/// The throwing APIs report the first violation encountered; the
/// non-throwing APIs (`try_parse` and friends) collapse all of these
/// into `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Generic syntax violation in version text.
    #[error("malformed version: {0:?}")]
    Malformed(String),
    /// Text is date-shaped (`dddd-dd-dd`) but not a valid calendar date,
    /// e.g. month 13. Distinguished so callers can diagnose precisely.
    #[error("malformed group version date: {0:?}")]
    MalformedGroupDate(String),
    /// A status label was rejected by the status validator.
    #[error("invalid version status: {0:?}")]
    InvalidStatus(String),
}

/// Default status validator: a non-empty ASCII alphanumeric token.
///
/// Rejects path and delimiter characters by construction. Callers with
/// looser requirements substitute their own predicate via
/// [`ApiVersion::try_new_with`].
pub fn is_valid_status(status: &str) -> bool {
    !status.is_empty() && status.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// An API version identifier.
///
/// Equality and ordering treat a missing minor as zero ("implied minor")
/// and compare status labels ASCII case-insensitively. A value with no
/// status sorts after the same value with one: `1.0-RC` < `1.0`.
#[derive(Clone)]
pub struct ApiVersion {
    group: Option<NaiveDate>,
    major: Option<u64>,
    minor: Option<u64>,
    status: Option<String>,
    // Computed once at construction; the value is immutable.
    hash: u64,
}

impl ApiVersion {
    /// A version with a major and minor number, e.g. `ApiVersion::new(1, 5)`.
    pub fn new(major: u64, minor: u64) -> Self {
        Self::assemble(None, Some(major), Some(minor), None)
    }

    /// A major-only version. The minor is implied zero for comparisons but
    /// stays absent for rendering.
    pub fn from_major(major: u64) -> Self {
        Self::assemble(None, Some(major), None, None)
    }

    /// A group-date-only version, e.g. `2017-01-01`.
    pub fn from_group(group: NaiveDate) -> Self {
        Self::assemble(Some(group), None, None, None)
    }

    /// A major.minor version with a status label.
    pub fn with_status(major: u64, minor: u64, status: &str) -> Result<Self, VersionError> {
        Self::try_new(None, Some(major), Some(minor), Some(status))
    }

    /// General constructor; validates the status with the default validator.
    ///
    /// A minor number without a major number is rejected, as is a status
    /// with no group and no major: no surface syntax can express either,
    /// so the constructor refuses to mint them. The all-absent neutral
    /// sentinel is reachable only through [`ApiVersion::neutral`].
    pub fn try_new(
        group: Option<NaiveDate>,
        major: Option<u64>,
        minor: Option<u64>,
        status: Option<&str>,
    ) -> Result<Self, VersionError> {
        Self::try_new_with(group, major, minor, status, is_valid_status)
    }

    /// General constructor with a substituted status validator.
    pub fn try_new_with(
        group: Option<NaiveDate>,
        major: Option<u64>,
        minor: Option<u64>,
        status: Option<&str>,
        validator: impl Fn(&str) -> bool,
    ) -> Result<Self, VersionError> {
        if minor.is_some() && major.is_none() {
            return Err(VersionError::Malformed(
                "minor version requires a major version".into(),
            ));
        }
        if status.is_some() && group.is_none() && major.is_none() {
            return Err(VersionError::Malformed(
                "status requires a group or major version".into(),
            ));
        }
        if let Some(status) = status
            && !validator(status)
        {
            return Err(VersionError::InvalidStatus(status.to_owned()));
        }
        Ok(Self::assemble(group, major, minor, status.map(str::to_owned)))
    }

    fn assemble(
        group: Option<NaiveDate>,
        major: Option<u64>,
        minor: Option<u64>,
        status: Option<String>,
    ) -> Self {
        let hash = precompute_hash(group, major, minor, status.as_deref());
        Self {
            group,
            major,
            minor,
            status,
            hash,
        }
    }

    /// The shared `1.0` default, constructed once per process.
    pub fn default_version() -> &'static ApiVersion {
        static DEFAULT: OnceLock<ApiVersion> = OnceLock::new();
        DEFAULT.get_or_init(|| ApiVersion::new(1, 0))
    }

    /// The shared neutral sentinel: applies to every version.
    ///
    /// All components are absent; it sorts before any concrete version.
    pub fn neutral() -> &'static ApiVersion {
        static NEUTRAL: OnceLock<ApiVersion> = OnceLock::new();
        NEUTRAL.get_or_init(|| ApiVersion::assemble(None, None, None, None))
    }

    /// True when every component is absent (the neutral sentinel shape).
    pub fn is_neutral(&self) -> bool {
        self.group.is_none() && self.major.is_none() && self.minor.is_none()
    }

    pub fn group(&self) -> Option<NaiveDate> {
        self.group
    }

    pub fn major(&self) -> Option<u64> {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    /// The minor number used for comparison and hashing: zero when absent.
    pub fn implied_minor(&self) -> u64 {
        self.minor.unwrap_or(0)
    }

    /// The status label, case-preserved as constructed.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Total order: group, then major, then implied minor,
    /// then status (absent status is the more mature release and sorts
    /// last; present statuses compare ASCII case-insensitively).
    pub fn compare(&self, other: &Self) -> Ordering {
        self.group
            .cmp(&other.group)
            .then_with(|| self.major.cmp(&other.major))
            .then_with(|| self.implied_minor().cmp(&other.implied_minor()))
            .then_with(|| cmp_status(self.status(), other.status()))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::default_version().clone()
    }
}

impl fmt::Debug for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiVersion")
            .field("group", &self.group)
            .field("major", &self.major)
            .field("minor", &self.minor)
            .field("status", &self.status)
            .finish()
    }
}

impl PartialEq for ApiVersion {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.group == other.group
            && self.major == other.major
            && self.implied_minor() == other.implied_minor()
            && status_eq(self.status(), other.status())
    }
}

impl Eq for ApiVersion {}

impl Hash for ApiVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for ApiVersion {
    /// The full delimited form: `[group][.major[.minor]][-status]`, with
    /// absent components omitted. An explicit minor of zero is rendered;
    /// an implied one is not.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(group) = self.group {
            write!(
                f,
                "{:04}-{:02}-{:02}",
                group.year(),
                group.month(),
                group.day()
            )?;
        }
        if let Some(major) = self.major {
            if self.group.is_some() {
                write!(f, ".")?;
            }
            write!(f, "{major}")?;
            if let Some(minor) = self.minor {
                write!(f, ".{minor}")?;
            }
        }
        if let Some(status) = &self.status {
            write!(f, "-{status}")?;
        }
        Ok(())
    }
}

fn precompute_hash(
    group: Option<NaiveDate>,
    major: Option<u64>,
    minor: Option<u64>,
    status: Option<&str>,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    group.hash(&mut hasher);
    major.hash(&mut hasher);
    minor.unwrap_or(0).hash(&mut hasher);
    if let Some(status) = status {
        for b in status.bytes() {
            hasher.write_u8(b.to_ascii_lowercase());
        }
    }
    hasher.finish()
}

fn status_eq(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

fn cmp_status(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        // No pre-release tag means the more mature release.
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a
            .bytes()
            .map(|c| c.to_ascii_lowercase())
            .cmp(b.bytes().map(|c| c.to_ascii_lowercase())),
    }
}
