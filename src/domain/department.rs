use serde::{Deserialize, Serialize};

/// Width department identifiers are zero-padded to.
pub const DEPARTMENT_ID_WIDTH: usize = 3;

/// Normalized department identifier, e.g. "007".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(String);

impl DepartmentId {
    /// Normalize raw operator input: trim it and left-pad with zeros to three
    /// characters. Longer identifiers are kept as they are.
    pub fn normalize(raw: &str) -> Self {
        Self(format!(
            "{:0>width$}",
            raw.trim(),
            width = DEPARTMENT_ID_WIDTH
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DepartmentId {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

/// An administrative unit (apartment, office) that owes common expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

impl Department {
    pub fn new(id: &str, name: impl Into<String>) -> Self {
        Self {
            id: DepartmentId::normalize(id),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pads_to_three_digits() {
        assert_eq!(DepartmentId::normalize("7").as_str(), "007");
        assert_eq!(DepartmentId::normalize("42").as_str(), "042");
        assert_eq!(DepartmentId::normalize("007").as_str(), "007");
    }

    #[test]
    fn test_normalize_trims_and_keeps_long_ids() {
        assert_eq!(DepartmentId::normalize(" 12 ").as_str(), "012");
        assert_eq!(DepartmentId::normalize("1204").as_str(), "1204");
    }

    #[test]
    fn test_short_and_padded_ids_are_equal() {
        assert_eq!(DepartmentId::from("7"), DepartmentId::from("007"));
    }
}
