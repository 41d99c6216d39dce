use crate::component_cleanup::domain::{
    ComponentDescriptor, ComponentKind, ComponentRef, DependencyEdge, DependencyRecord,
    MetadataKind, SchemaMetadata, SolutionRef,
};
use crate::ports::outbound::{ComponentStore, StoreResult};
use crate::shared::Result;
use uuid::Uuid;

/// Display details shared by every kind-specific lookup
struct Details {
    display_name: String,
    logical_name: Option<String>,
    is_managed: Option<bool>,
}

/// Resolves `(kind, id)` pairs into uniform [`ComponentDescriptor`]s.
///
/// Lookups that fail because the object is gone produce an unresolved
/// descriptor instead of an error. Inject a caching store so repeated
/// visits during a walk are served from memory.
pub struct ComponentDescriptorResolver<S> {
    store: S,
}

impl<S: ComponentStore> ComponentDescriptorResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn resolve(&self, component: ComponentRef) -> Result<ComponentDescriptor> {
        let containing_solutions = self.containing_solutions(component.id)?;

        match self.details(component) {
            Ok(details) => Ok(ComponentDescriptor {
                component,
                display_name: Some(details.display_name),
                logical_name: details.logical_name,
                is_managed: details.is_managed,
                containing_solutions,
            }),
            Err(err) if err.is_not_found() => Ok(ComponentDescriptor::unresolved(
                component,
                containing_solutions,
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolves both endpoints and base solutions of a dependency record.
    pub fn resolve_edge(&self, record: &DependencyRecord) -> Result<DependencyEdge> {
        Ok(DependencyEdge {
            dependency_id: record.dependency_id,
            kind: record.kind,
            dependent: self.resolve(record.dependent)?,
            dependent_solution: self.resolve_solution(record.dependent_base_solution_id)?,
            required: self.resolve(record.required)?,
            required_solution: self.resolve_solution(record.required_base_solution_id)?,
        })
    }

    pub fn resolve_solution(&self, solution_id: Uuid) -> Result<SolutionRef> {
        match self.store.fetch_solution(solution_id) {
            Ok(solution) => Ok(solution),
            Err(err) if err.is_not_found() => Ok(SolutionRef::unresolved(solution_id)),
            Err(err) => Err(err.into()),
        }
    }

    fn containing_solutions(&self, object_id: Uuid) -> Result<Vec<SolutionRef>> {
        match self.store.solutions_containing(object_id) {
            Ok(solutions) => Ok(solutions),
            Err(err) if err.is_not_found() => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn details(&self, component: ComponentRef) -> StoreResult<Details> {
        if let Some(kind) = component.kind.metadata_kind() {
            let metadata = self.store.fetch_metadata(kind, component.id)?;
            return Ok(Self::metadata_details(metadata));
        }

        let Some(binding) = component.kind.record_binding() else {
            return Ok(Details {
                display_name: component.to_string(),
                logical_name: None,
                is_managed: None,
            });
        };

        let mut projection = vec![binding.name_attribute, "ismanaged"];
        if component.kind == ComponentKind::SystemForm {
            projection.push("type");
        }
        let record = self
            .store
            .fetch_record(component.kind, component.id, &projection)?;

        let name = record
            .get_str(binding.name_attribute)
            .map(str::to_string)
            .unwrap_or_else(|| component.to_string());
        let display_name = match component.kind {
            ComponentKind::SystemForm => {
                format!("{} ({})", name, form_type_name(record.get_i64("type")))
            }
            ComponentKind::RibbonCustomization => format!("Ribbon {}", name),
            _ => name,
        };

        Ok(Details {
            display_name,
            logical_name: Some(binding.entity.to_string()),
            is_managed: record.is_managed(),
        })
    }

    fn metadata_details(metadata: SchemaMetadata) -> Details {
        let display_name = match metadata.kind {
            MetadataKind::Attribute => format!(
                "{} ({})",
                metadata.name,
                metadata.entity_logical_name.as_deref().unwrap_or("?")
            ),
            MetadataKind::Relationship => format!(
                "{} ({})",
                metadata.name,
                metadata.relationship_type.as_deref().unwrap_or("Relationship")
            ),
            MetadataKind::Entity | MetadataKind::OptionSet => metadata.name.clone(),
        };
        Details {
            display_name,
            logical_name: Some(metadata.name),
            is_managed: metadata.is_managed,
        }
    }
}

fn form_type_name(code: Option<i64>) -> String {
    match code {
        Some(0) => "Dashboard".to_string(),
        Some(2) => "Main".to_string(),
        Some(5) => "Mobile".to_string(),
        Some(6) => "QuickView".to_string(),
        Some(7) => "QuickCreate".to_string(),
        Some(11) => "Card".to_string(),
        Some(12) => "MainInteractionCentric".to_string(),
        Some(other) => format!("Type {}", other),
        None => "Unknown".to_string(),
    }
}
