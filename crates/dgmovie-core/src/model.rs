//! Movie graph records.
//!
//! Field names map one-to-one onto Dgraph predicates. Empty values are left
//! out of the JSON so a fresh record only sends what it actually carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A film node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(rename = "name@en", default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "name@de", default, skip_serializing_if = "String::is_empty")]
    pub name_de: String,

    #[serde(rename = "name@tr", default, skip_serializing_if = "String::is_empty")]
    pub name_tr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_release_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre: Vec<Genre>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starring: Vec<Starring>,

    #[serde(rename = "director.film", default, skip_serializing_if = "Vec::is_empty")]
    pub director: Vec<Director>,

    #[serde(rename = "actor.film", default, skip_serializing_if = "Vec::is_empty")]
    pub actor: Vec<Actor>,
}

/// A genre node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(rename = "name@en", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// A performance: one actor playing one character in one film.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Starring {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(rename = "performance.actor", default, skip_serializing_if = "Vec::is_empty")]
    pub actor: Vec<Actor>,

    #[serde(rename = "performance.character", default, skip_serializing_if = "Vec::is_empty")]
    pub character: Vec<Character>,

    #[serde(rename = "performance.film", default, skip_serializing_if = "Vec::is_empty")]
    pub film: Vec<Movie>,
}

/// An actor node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(rename = "name@en", default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "performance.film", default, skip_serializing_if = "Vec::is_empty")]
    pub film: Vec<Movie>,
}

/// A director node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Director {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(rename = "name@en", default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "performance.film", default, skip_serializing_if = "Vec::is_empty")]
    pub film: Vec<Movie>,
}

/// A character node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(rename = "name@en", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Root of the read-back query response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRoot {
    #[serde(default)]
    pub me: Vec<Movie>,
}

impl Genre {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Actor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Director {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Character {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Starring {
    /// A performance linking one actor to one character.
    pub fn role(actor: impl Into<String>, character: impl Into<String>) -> Self {
        Self {
            actor: vec![Actor::named(actor)],
            character: vec![Character::named(character)],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_omitted() {
        let movie = Movie {
            name: "Drama".to_string(),
            ..Movie::default()
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json, serde_json::json!({ "name@en": "Drama" }));
    }

    #[test]
    fn test_predicate_names() {
        let movie = Movie {
            uid: "0x1".to_string(),
            name_de: "Alles wird gut".to_string(),
            director: vec![Director::named("Ömer Vargi")],
            starring: vec![Starring::role("Cem Yılmaz", "Altan Camli")],
            ..Movie::default()
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["uid"], "0x1");
        assert_eq!(json["name@de"], "Alles wird gut");
        assert_eq!(json["director.film"][0]["name@en"], "Ömer Vargi");
        assert_eq!(json["starring"][0]["performance.actor"][0]["name@en"], "Cem Yılmaz");
        assert_eq!(json["starring"][0]["performance.character"][0]["name@en"], "Altan Camli");
    }

    #[test]
    fn test_missing_fields_default() {
        let movie: Movie = serde_json::from_str(r#"{"uid":"0x2a"}"#).unwrap();
        assert_eq!(movie.uid, "0x2a");
        assert!(movie.name.is_empty());
        assert!(movie.initial_release_date.is_none());
        assert!(movie.starring.is_empty());
    }
}
