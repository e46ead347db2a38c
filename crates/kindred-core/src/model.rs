//! Node and edge records of a family-relationship dataset.
//!
//! Records arrive from an external, already-curated table. They are
//! immutable once loaded; metric annotations are attached later by the
//! reporter in a separate row type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RelationKind
// ---------------------------------------------------------------------------

/// The kind of family tie an edge records.
///
/// Parental edges keep the direction stored in the source table; `Spouse`
/// is symmetric regardless of the stored direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RelationKind {
    Mother,
    Father,
    Spouse,
}

impl RelationKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 3] = [Self::Mother, Self::Father, Self::Spouse];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mother => "mother",
            Self::Father => "father",
            Self::Spouse => "spouse",
        }
    }

    /// Whether a stored `a -> b` edge of this kind also implies `b -> a`.
    #[must_use]
    pub const fn is_symmetric(self) -> bool {
        matches!(self, Self::Spouse)
    }

    #[must_use]
    pub const fn is_parental(self) -> bool {
        matches!(self, Self::Mother | Self::Father)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a relation string is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation kind '{0}' (expected mother, father, or spouse)")]
pub struct UnknownRelation(pub String);

impl FromStr for RelationKind {
    type Err = UnknownRelation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mother" => Ok(Self::Mother),
            "father" => Ok(Self::Father),
            "spouse" => Ok(Self::Spouse),
            _ => Err(UnknownRelation(s.to_string())),
        }
    }
}

impl TryFrom<String> for RelationKind {
    type Error = UnknownRelation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A character in the family network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique name; the node id.
    pub name: String,
    /// Gender flag as recorded in the source table.
    #[serde(default, deserialize_with = "de::flag")]
    pub male: bool,
    #[serde(default, deserialize_with = "de::blank_as_none")]
    pub culture: Option<String>,
    #[serde(default, deserialize_with = "de::blank_as_none")]
    pub house: Option<String>,
    /// Popularity score in `[0, 1]`.
    #[serde(default)]
    pub popularity: f64,
    /// House grouping used for display.
    #[serde(default, alias = "house2")]
    pub house_group: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub shape: String,
}

impl Node {
    /// A node with only a name; all other attributes take their defaults.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            male: false,
            culture: None,
            house: None,
            popularity: 0.0,
            house_group: String::new(),
            color: String::new(),
            shape: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A directed family tie as stored in the edge table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(alias = "type")]
    pub relation: RelationKind,
    #[serde(default)]
    pub color: String,
    #[serde(default, alias = "lty")]
    pub line_style: String,
}

impl Edge {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, relation: RelationKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation,
            color: String::new(),
            line_style: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding shared by the csv and json loaders
// ---------------------------------------------------------------------------

mod de {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagRepr {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    /// Accept `true/false`, `1/0`, `1.0/0.0`, `yes/no`, `male/female`.
    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match FlagRepr::deserialize(d)? {
            FlagRepr::Bool(b) => Ok(b),
            FlagRepr::Int(i) => Ok(i != 0),
            FlagRepr::Float(f) => Ok(f != 0.0),
            FlagRepr::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "male" | "m" => Ok(true),
                "0" | "false" | "no" | "female" | "f" | "" => Ok(false),
                other => Err(D::Error::custom(format!("invalid gender flag '{other}'"))),
            },
        }
    }

    /// Empty strings and the `NA` marker become `None`.
    pub fn blank_as_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") {
                None
            } else {
                Some(trimmed.to_string())
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_kind_parses_case_insensitively() {
        assert_eq!("Mother".parse::<RelationKind>(), Ok(RelationKind::Mother));
        assert_eq!(" FATHER ".parse::<RelationKind>(), Ok(RelationKind::Father));
        assert_eq!("spouse".parse::<RelationKind>(), Ok(RelationKind::Spouse));
        assert!("cousin".parse::<RelationKind>().is_err());
    }

    #[test]
    fn only_spouse_is_symmetric() {
        assert!(RelationKind::Spouse.is_symmetric());
        assert!(!RelationKind::Mother.is_symmetric());
        assert!(RelationKind::Father.is_parental());
        assert!(!RelationKind::Spouse.is_parental());
    }

    #[test]
    fn node_json_accepts_numeric_flag_and_na_culture() {
        let node: Node = serde_json::from_str(
            r#"{"name":"Arlan","male":1,"culture":"NA","house":"House Vey","popularity":0.4,"house2":"Vey"}"#,
        )
        .expect("parse node");
        assert!(node.male);
        assert_eq!(node.culture, None);
        assert_eq!(node.house.as_deref(), Some("House Vey"));
        assert_eq!(node.house_group, "Vey");
    }

    #[test]
    fn edge_json_accepts_type_and_lty_aliases() {
        let edge: Edge = serde_json::from_str(
            r##"{"source":"Bera","target":"Arlan","type":"father","color":"#1f78b4","lty":"solid"}"##,
        )
        .expect("parse edge");
        assert_eq!(edge.relation, RelationKind::Father);
        assert_eq!(edge.line_style, "solid");
    }
}
