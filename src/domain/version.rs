use crate::error::{DoveError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dot-separated version with an arbitrary number of components.
///
/// Components are kept as strings: only the ones targeted by [`Version::bump`]
/// must be numeric, everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Version {
    components: Vec<String>,
}

impl Version {
    /// Split a version string on `.` (e.g., "1.2.3" -> ["1", "2", "3"])
    pub fn parse(version: &str) -> Self {
        Version {
            components: version.split('.').map(str::to_string).collect(),
        }
    }

    /// Build a version from already separated components
    pub fn from_components(components: Vec<String>) -> Self {
        Version { components }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Increment the component at every listed position.
    ///
    /// Each occurrence counts, so `[2, 2]` raises the third component by two.
    pub fn bump(&self, positions: &[usize]) -> Result<Self> {
        let mut components = self.components.clone();
        for &position in positions {
            let slot = slot_mut(&mut components, position)?;
            let current = slot.parse::<u128>().map_err(|_| {
                DoveError::index_out_of_range(format!(
                    "component {} ('{}') is not a non-negative integer",
                    position, slot
                ))
            })?;
            let next = current.checked_add(1).ok_or_else(|| {
                DoveError::index_out_of_range(format!("component {} overflows", position))
            })?;
            *slot = next.to_string();
        }
        Ok(Version { components })
    }

    /// Set the component at every listed position to `0`
    pub fn reset(&self, positions: &[usize]) -> Result<Self> {
        let mut components = self.components.clone();
        for &position in positions {
            *slot_mut(&mut components, position)? = "0".to_string();
        }
        Ok(Version { components })
    }
}

fn slot_mut(components: &mut [String], position: usize) -> Result<&mut String> {
    let count = components.len();
    components.get_mut(position).ok_or_else(|| {
        DoveError::index_out_of_range(format!(
            "position {} is out of range for a version with {} component(s)",
            position, count
        ))
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

impl FromStr for Version {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Version::parse(s))
    }
}

impl From<String> for Version {
    fn from(value: String) -> Self {
        Version::parse(&value)
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.to_string()
    }
}
