use super::MetadataKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A record fetched from the store, restricted to the requested projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub entity: String,
    pub id: Uuid,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EntityRecord {
    pub fn new(entity: impl Into<String>, id: Uuid) -> Self {
        Self {
            entity: entity.into(),
            id,
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.attributes.get(name).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.attributes.get(name).and_then(Value::as_i64)
    }

    pub fn is_managed(&self) -> Option<bool> {
        self.get_bool("ismanaged")
    }

    /// Copy of this record holding only the projected attributes.
    /// An empty projection keeps every attribute.
    pub fn project(&self, projection: &[&str]) -> EntityRecord {
        if projection.is_empty() {
            return self.clone();
        }
        let attributes = self
            .attributes
            .iter()
            .filter(|(name, _)| projection.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        EntityRecord {
            entity: self.entity.clone(),
            id: self.id,
            attributes,
        }
    }
}

/// Schema-level description of a structural component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    pub kind: MetadataKind,
    pub metadata_id: Uuid,
    /// Logical name for entities, attributes and option sets; schema name for relationships
    pub name: String,
    #[serde(default)]
    pub is_managed: Option<bool>,
    /// Owning entity of an attribute
    #[serde(default)]
    pub entity_logical_name: Option<String>,
    /// `OneToManyRelationship` / `ManyToManyRelationship`
    #[serde(default)]
    pub relationship_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let record = EntityRecord::new("workflow", Uuid::nil())
            .with_attribute("name", "Approve")
            .with_attribute("statecode", 1)
            .with_attribute("ismanaged", true);

        assert_eq!(record.get_str("name"), Some("Approve"));
        assert_eq!(record.get_i64("statecode"), Some(1));
        assert_eq!(record.is_managed(), Some(true));
        assert_eq!(record.get_str("missing"), None);
        assert_eq!(record.get_bool("name"), None);
    }

    #[test]
    fn test_project_keeps_only_requested_attributes() {
        let record = EntityRecord::new("workflow", Uuid::nil())
            .with_attribute("name", "Approve")
            .with_attribute("xaml", "<Activity/>");

        let projected = record.project(&["name"]);
        assert_eq!(projected.attributes.len(), 1);
        assert!(projected.get_str("xaml").is_none());

        let everything = record.project(&[]);
        assert_eq!(everything.attributes.len(), 2);
    }
}
