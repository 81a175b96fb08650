#![allow(clippy::from_over_into)]

use crate::{SpecError, Version};
use semver::{Op, VersionReq};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// A caret requirement pinned to a single major version, for example `^1.0.0`.
/// Matches any version with the same major component, including `0.x`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "String", try_from = "String")]
pub struct MajorRange {
    pub major: u64,
}

impl MajorRange {
    pub const fn new(major: u64) -> Self {
        Self { major }
    }

    /// Parse a `^MAJOR.0.0` string. The shorter `^MAJOR` and `^MAJOR.0`
    /// forms are also accepted. Anything else is rejected.
    pub fn parse<T: AsRef<str>>(value: T) -> Result<Self, SpecError> {
        let value = value.as_ref().trim();
        let unsupported = || SpecError::UnsupportedRange(value.to_owned());

        if !value.starts_with('^') {
            return Err(unsupported());
        }

        let req = VersionReq::parse(value)?;

        let [comparator] = req.comparators.as_slice() else {
            return Err(unsupported());
        };

        if comparator.op != Op::Caret
            || !comparator.pre.is_empty()
            || comparator.minor.is_some_and(|minor| minor != 0)
            || comparator.patch.is_some_and(|patch| patch != 0)
        {
            return Err(unsupported());
        }

        Ok(Self::new(comparator.major))
    }

    pub fn matches(&self, version: &Version) -> bool {
        version.major == self.major
    }
}

/// Return the highest version that satisfies the range, or `None` when
/// the list is empty or nothing matches.
pub fn max_satisfying<'a, I>(versions: I, range: &MajorRange) -> Option<Version>
where
    I: IntoIterator<Item = &'a Version>,
{
    versions
        .into_iter()
        .filter(|version| range.matches(version))
        .max()
        .copied()
}

impl FromStr for MajorRange {
    type Err = SpecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for MajorRange {
    type Error = SpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Into<String> for MajorRange {
    fn into(self) -> String {
        self.to_string()
    }
}

impl Display for MajorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "^{}.0.0", self.major)
    }
}
