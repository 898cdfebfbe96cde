use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// One exported page: the games on the page plus everything they link to.
///
/// Entries stay raw JSON here; reconciliation decodes each one and fails on
/// the first that isn't a well-formed entity.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub data: Vec<Value>,
    #[serde(default)]
    pub included: Vec<Value>,
}

/// A parsed document together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub source: PathBuf,
    pub document: Document,
}

/// A normalized record as exported: type tag, id, attributes and links.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub attributes: Value,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl Entity {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Entity::deserialize(value)
    }

    /// Decode the attribute mapping into a typed view
    pub fn attributes<'a, T: Deserialize<'a>>(&'a self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.attributes)
    }

    /// Id of a to-one relationship, if present and non-null
    pub fn related_one(&self, name: &str) -> Option<&str> {
        match self.relationships.get(name)?.data.as_ref()? {
            Linkage::One(target) => Some(target.id.as_str()),
            Linkage::Many(_) => None,
        }
    }

    /// Ids of a to-many relationship (empty when absent or null)
    pub fn related_many(&self, name: &str) -> Vec<&str> {
        match self.relationships.get(name).and_then(|r| r.data.as_ref()) {
            Some(Linkage::Many(targets)) => targets.iter().map(|t| t.id.as_str()).collect(),
            Some(Linkage::One(target)) => vec![target.id.as_str()],
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    One(ResourceRef),
    Many(Vec<ResourceRef>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Unsigned(u64),
}

/// Ids are strings in most places but numbers in a few (user ids, column
/// indices). Both compare by their decimal string form.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameAttributes {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameLevelAttributes {
    /// Division code, e.g. "10U", "U8C" or a birth year like "2014"
    pub game_level: String,
    #[serde(default)]
    pub schedule_name: String,
    pub labels: LabelTable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentAttributes {
    #[serde(deserialize_with = "deserialize_id")]
    pub external_game_id: String,
    pub status: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub official_label_col: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRoleAttributes {
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserAttributes {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Maps an assignment's label column to a role name ("Referee", "AR", ...)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelTable {
    List(Vec<Option<String>>),
    Map(HashMap<String, Option<String>>),
}

impl LabelTable {
    pub fn get(&self, column: &str) -> Option<&str> {
        match self {
            LabelTable::List(labels) => {
                let index: usize = column.parse().ok()?;
                labels.get(index)?.as_deref()
            }
            LabelTable::Map(labels) => labels.get(column)?.as_deref(),
        }
    }
}
