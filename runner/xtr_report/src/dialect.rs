//! Report dialect tags.

use std::fmt;
use std::str::FromStr;

/// Output format requested for a results document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// The untransformed tree as xUnit-style XML.
    Xunit,
    NUnitV2,
    NUnitV3,
    /// No preference; written as [`Dialect::Xunit`].
    #[default]
    Unspecified,
}

impl Dialect {
    /// The dialect actually written for this tag.
    pub fn resolve(self) -> Dialect {
        match self {
            Dialect::Unspecified => Dialect::Xunit,
            other => other,
        }
    }

    pub fn is_native(self) -> bool {
        self.resolve() == Dialect::Xunit
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Xunit => "xunit",
            Dialect::NUnitV2 => "nunitv2",
            Dialect::NUnitV3 => "nunitv3",
            Dialect::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised dialect name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown report dialect `{0}` (expected xunit, nunitv2 or nunitv3)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xunit" => Ok(Dialect::Xunit),
            "nunit2" | "nunitv2" => Ok(Dialect::NUnitV2),
            "nunit3" | "nunitv3" => Ok(Dialect::NUnitV3),
            "" | "unspecified" | "missing" => Ok(Dialect::Unspecified),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}
