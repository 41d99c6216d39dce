use super::{ComponentKind, ComponentRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A deployable grouping of components
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionRef {
    pub id: Uuid,
    pub unique_name: String,
}

impl SolutionRef {
    pub fn new(id: Uuid, unique_name: impl Into<String>) -> Self {
        Self {
            id,
            unique_name: unique_name.into(),
        }
    }

    /// Placeholder for a solution id the store could not resolve.
    pub fn unresolved(id: Uuid) -> Self {
        Self {
            id,
            unique_name: String::new(),
        }
    }
}

impl fmt::Display for SolutionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unique_name)
    }
}

/// Uniform, read-only projection of a component.
///
/// `display_name`, `logical_name` and `is_managed` are all `None` when the
/// component a dependency record points at can no longer be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    #[serde(rename = "ref")]
    pub component: ComponentRef,
    pub display_name: Option<String>,
    pub logical_name: Option<String>,
    pub is_managed: Option<bool>,
    pub containing_solutions: Vec<SolutionRef>,
}

impl ComponentDescriptor {
    /// Descriptor for a component whose details could not be retrieved.
    pub fn unresolved(component: ComponentRef, containing_solutions: Vec<SolutionRef>) -> Self {
        Self {
            component,
            display_name: None,
            logical_name: None,
            is_managed: None,
            containing_solutions,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.component.kind
    }

    pub fn id(&self) -> Uuid {
        self.component.id
    }

    pub fn is_resolved(&self) -> bool {
        self.display_name.is_some()
    }
}

impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{}: {}", self.component.kind, name),
            None => write!(f, "{}: <unresolved {}>", self.component.kind, self.component.id),
        }
    }
}

/// Membership row linking a component to a solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionComponent {
    pub id: Uuid,
    pub solution_id: Uuid,
    pub object_id: Uuid,
    pub kind: ComponentKind,
    #[serde(default)]
    pub root_solution_component_id: Option<Uuid>,
}

impl SolutionComponent {
    pub fn component(&self) -> ComponentRef {
        ComponentRef::new(self.kind, self.object_id)
    }
}

/// One entry of a delete plan produced by the graph walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentForDelete {
    pub descriptor: ComponentDescriptor,
    pub solution_component_id: Option<Uuid>,
    pub depth: usize,
    pub parent: Option<ComponentRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_descriptor_has_no_details() {
        let component = ComponentRef::new(ComponentKind::PluginType, Uuid::new_v4());
        let descriptor = ComponentDescriptor::unresolved(component, vec![]);
        assert!(!descriptor.is_resolved());
        assert!(descriptor.is_managed.is_none());
        assert!(descriptor.to_string().contains("<unresolved"));
    }

    #[test]
    fn test_descriptor_serializes_ref_field() {
        let component = ComponentRef::new(ComponentKind::Workflow, Uuid::nil());
        let descriptor = ComponentDescriptor {
            component,
            display_name: Some("Approve order".to_string()),
            logical_name: Some("workflow".to_string()),
            is_managed: Some(false),
            containing_solutions: vec![SolutionRef::new(Uuid::nil(), "Core")],
        };
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["ref"]["kind"], 29);
        assert_eq!(json["displayName"], "Approve order");
        assert_eq!(json["containingSolutions"][0]["uniqueName"], "Core");
    }
}
