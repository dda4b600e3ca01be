//! Enumerations shared by catalog and session records.
//!
//! Serialized names match the values stored in catalog and session documents
//! (`"Masculino"`, `"admin"`, ...).

use serde::{Deserialize, Serialize};

/// Target audience of a fragrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    Feminino,
    Masculino,
    #[default]
    Unissex,
}

impl Gender {
    /// All variants. Declaration order is alphabetical, so the derived `Ord`
    /// sorts genders the same way their names sort.
    pub const ALL: [Self; 3] = [Self::Feminino, Self::Masculino, Self::Unissex];

    /// The stored/display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Masculino => "Masculino",
            Self::Feminino => "Feminino",
            Self::Unissex => "Unissex",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid gender: {s}"))
    }
}

/// Role attached to a session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Shopper account.
    #[default]
    User,
    /// Full access to catalog management and site settings.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_serde_names() {
        assert_eq!(
            serde_json::to_string(&Gender::Feminino).unwrap(),
            "\"Feminino\""
        );
        let parsed: Gender = serde_json::from_str("\"Unissex\"").unwrap();
        assert_eq!(parsed, Gender::Unissex);
    }

    #[test]
    fn test_gender_from_str_ignores_case() {
        assert_eq!("masculino".parse::<Gender>().unwrap(), Gender::Masculino);
        assert!("outro".parse::<Gender>().is_err());
    }

    #[test]
    fn test_gender_ordering_is_alphabetical() {
        let mut genders = vec![Gender::Unissex, Gender::Masculino, Gender::Feminino];
        genders.sort();
        let names: Vec<_> = genders.iter().map(|g| g.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_role_roundtrip_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
