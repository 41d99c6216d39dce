use super::cascading_deleter::DeletionContext;
use crate::component_cleanup::domain::{
    ComponentKind, ComponentRef, DeletionOutcome, EntityRecord, MetadataKind, PreservationReason,
    SchemaMetadata,
};
use crate::component_cleanup::policies::CompositeFlowPolicy;
use crate::ports::outbound::{ComponentStore, OperationLogger, StateChange, StoreResult};
use crate::shared::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Workflow state/status pair for a definition back in draft
const WORKFLOW_DRAFT: StateChange = StateChange {
    state: 0,
    status: 1,
};
const WORKFLOW_STATE_ACTIVATED: i64 = 1;
const WORKFLOW_CATEGORY_BUSINESS_PROCESS_FLOW: i64 = 4;

/// Final deletion step for one component kind.
///
/// Called once everything blocking the component has been processed. With
/// `unmanaged_only`, managed structural components and workflows are
/// filtered out before their blockers and never reach a strategy.
pub trait DeletionStrategy<S, L>: Send + Sync {
    fn delete(
        &self,
        component: &ComponentRef,
        context: &mut DeletionContext<'_, S, L>,
    ) -> Result<DeletionOutcome>;
}

/// Maps component kinds to their deletion strategy.
///
/// Kinds without a registered strategy are reported as unsupported.
pub struct StrategyRegistry<S, L> {
    strategies: HashMap<ComponentKind, Box<dyn DeletionStrategy<S, L>>>,
    fallback: UnsupportedKindStrategy,
}

impl<S: ComponentStore, L: OperationLogger> StrategyRegistry<S, L> {
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: UnsupportedKindStrategy,
        }
    }

    /// Registry with a strategy for every kind this crate knows how to delete
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(ComponentKind::Entity, Box::new(StructuralTypeStrategy));
        registry.register(ComponentKind::EntityRelationship, Box::new(RelationshipStrategy));
        registry.register(ComponentKind::OptionSet, Box::new(OptionSetStrategy));
        registry.register(
            ComponentKind::Workflow,
            Box::new(ProcessDefinitionStrategy::new()),
        );
        registry.register(
            ComponentKind::SdkMessageProcessingStep,
            Box::new(RecordStrategy::protecting_hidden()),
        );
        for kind in [
            ComponentKind::Role,
            ComponentKind::SavedQuery,
            ComponentKind::Report,
            ComponentKind::EmailTemplate,
            ComponentKind::ContractTemplate,
            ComponentKind::KbArticleTemplate,
            ComponentKind::MailMergeTemplate,
            ComponentKind::SystemForm,
            ComponentKind::WebResource,
            ComponentKind::ConnectionRole,
            ComponentKind::CustomControl,
            ComponentKind::FieldSecurityProfile,
            ComponentKind::PluginType,
            ComponentKind::PluginAssembly,
            ComponentKind::SdkMessageProcessingStepImage,
            ComponentKind::ServiceEndpoint,
            ComponentKind::Sla,
        ] {
            registry.register(kind, Box::new(RecordStrategy::plain()));
        }
        registry
    }

    pub fn register(&mut self, kind: ComponentKind, strategy: Box<dyn DeletionStrategy<S, L>>) {
        self.strategies.insert(kind, strategy);
    }

    pub fn strategy_for(&self, kind: ComponentKind) -> &dyn DeletionStrategy<S, L> {
        match self.strategies.get(&kind) {
            Some(strategy) => strategy.as_ref(),
            None => &self.fallback,
        }
    }

    pub fn supports(&self, kind: ComponentKind) -> bool {
        self.strategies.contains_key(&kind)
    }
}

fn tolerate_missing<T>(result: StoreResult<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn fetch_metadata<S: ComponentStore, L: OperationLogger>(
    context: &DeletionContext<'_, S, L>,
    kind: MetadataKind,
    component: &ComponentRef,
) -> Result<Option<SchemaMetadata>> {
    tolerate_missing(context.store().fetch_metadata(kind, component.id))
}

/// Deletes a custom entity type through its logical name
pub struct StructuralTypeStrategy;

impl<S: ComponentStore, L: OperationLogger> DeletionStrategy<S, L> for StructuralTypeStrategy {
    fn delete(
        &self,
        component: &ComponentRef,
        context: &mut DeletionContext<'_, S, L>,
    ) -> Result<DeletionOutcome> {
        let Some(metadata) = fetch_metadata(context, MetadataKind::Entity, component)? else {
            return Ok(context.missing(component));
        };
        if !context.should_process(&format!("Delete entity {}", metadata.name)) {
            return Ok(DeletionOutcome::WhatIf);
        }

        context.store().delete_structural_type(&metadata.name)?;
        context
            .logger()
            .information(&format!("Deleted entity {}", metadata.name));
        Ok(DeletionOutcome::Deleted { deactivated: false })
    }
}

/// Deletes a relationship by schema name.
///
/// Blockers are queried a second time right before the delete.
pub struct RelationshipStrategy;

impl<S: ComponentStore, L: OperationLogger> DeletionStrategy<S, L> for RelationshipStrategy {
    fn delete(
        &self,
        component: &ComponentRef,
        context: &mut DeletionContext<'_, S, L>,
    ) -> Result<DeletionOutcome> {
        let Some(metadata) = fetch_metadata(context, MetadataKind::Relationship, component)?
        else {
            return Ok(context.missing(component));
        };
        context.logger().verbose(&format!(
            "Checking dependencies for {} {}",
            metadata.relationship_type.as_deref().unwrap_or("relationship"),
            metadata.name
        ));
        context.clear_blockers(component)?;

        if !context.should_process(&format!("Delete relationship {}", metadata.name)) {
            return Ok(DeletionOutcome::WhatIf);
        }
        context.store().delete_relationship(&metadata.name)?;
        context
            .logger()
            .information(&format!("Deleted relationship {}", metadata.name));
        Ok(DeletionOutcome::Deleted { deactivated: false })
    }
}

/// Deletes a global option set by name
pub struct OptionSetStrategy;

impl<S: ComponentStore, L: OperationLogger> DeletionStrategy<S, L> for OptionSetStrategy {
    fn delete(
        &self,
        component: &ComponentRef,
        context: &mut DeletionContext<'_, S, L>,
    ) -> Result<DeletionOutcome> {
        let Some(metadata) = fetch_metadata(context, MetadataKind::OptionSet, component)? else {
            return Ok(context.missing(component));
        };
        if !context.should_process(&format!("Delete option set {}", metadata.name)) {
            return Ok(DeletionOutcome::WhatIf);
        }

        context.store().delete_option_set(&metadata.name)?;
        context
            .logger()
            .information(&format!("Deleted option set {}", metadata.name));
        Ok(DeletionOutcome::Deleted { deactivated: false })
    }
}

/// Deletes workflow definitions.
///
/// Activated definitions are put back in draft first. Business process
/// flows are never deleted: their backing entity is cascaded and the
/// definition emptied of composite activities instead.
pub struct ProcessDefinitionStrategy {
    composite_flow: CompositeFlowPolicy,
}

impl ProcessDefinitionStrategy {
    pub fn new() -> Self {
        Self {
            composite_flow: CompositeFlowPolicy::new(),
        }
    }

    fn preserve_flow<S: ComponentStore, L: OperationLogger>(
        &self,
        component: &ComponentRef,
        definition: &EntityRecord,
        context: &mut DeletionContext<'_, S, L>,
    ) -> Result<DeletionOutcome> {
        let name = definition.get_str("name").unwrap_or_default().to_string();

        match definition.get_str("uniquename") {
            Some(unique_name) => {
                match tolerate_missing(
                    context
                        .store()
                        .fetch_metadata_by_name(MetadataKind::Entity, unique_name),
                )? {
                    Some(entity) => {
                        context.logger().verbose(&format!(
                            "Checking dependencies for entity {} backing business process flow {}",
                            entity.name, name
                        ));
                        context.cascade(ComponentRef::new(
                            ComponentKind::Entity,
                            entity.metadata_id,
                        ))?;
                    }
                    None => context.logger().warning(&format!(
                        "Entity {} backing business process flow {} could not be found",
                        unique_name, name
                    )),
                }
            }
            None => context.logger().warning(&format!(
                "Business process flow {} has no unique name; its entity is left in place",
                name
            )),
        }

        if context.should_process(&format!(
            "Remove composite activities from business process flow {}",
            name
        )) {
            if let Some(xaml) = definition.get_str("xaml") {
                let stripped = self.composite_flow.strip_composite_activities(xaml)?;
                let mut attributes = Map::new();
                attributes.insert("xaml".to_string(), Value::String(stripped));
                context
                    .store()
                    .update_record(component.kind, component.id, attributes)?;
            }
            context.logger().information(&format!(
                "Business process flow {} cannot be deleted and was emptied instead",
                name
            ));
        }

        Ok(DeletionOutcome::Preserved {
            reason: PreservationReason::CompositeFlow,
        })
    }
}

impl Default for ProcessDefinitionStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ComponentStore, L: OperationLogger> DeletionStrategy<S, L> for ProcessDefinitionStrategy {
    fn delete(
        &self,
        component: &ComponentRef,
        context: &mut DeletionContext<'_, S, L>,
    ) -> Result<DeletionOutcome> {
        let Some(definition) = tolerate_missing(context.store().fetch_record(
            component.kind,
            component.id,
            &["name", "uniquename", "statecode", "category", "xaml"],
        ))?
        else {
            return Ok(context.missing(component));
        };
        let name = definition.get_str("name").unwrap_or_default().to_string();

        let mut deactivated = false;
        if definition.get_i64("statecode") == Some(WORKFLOW_STATE_ACTIVATED) {
            context
                .logger()
                .verbose(&format!("Workflow {} is activated", name));
            if context.should_process(&format!("Deactivate workflow {}", name)) {
                context
                    .store()
                    .set_state(component.kind, component.id, WORKFLOW_DRAFT)?;
                deactivated = true;
            }
        }

        if definition.get_i64("category") == Some(WORKFLOW_CATEGORY_BUSINESS_PROCESS_FLOW) {
            return self.preserve_flow(component, &definition, context);
        }

        if !context.should_process(&format!("Delete workflow {}", name)) {
            return Ok(DeletionOutcome::WhatIf);
        }
        context.store().delete(component.kind, component.id)?;
        context
            .logger()
            .information(&format!("Deleted workflow {}", name));
        Ok(DeletionOutcome::Deleted { deactivated })
    }
}

/// Deletes a plain record-backed component.
///
/// With `protect_hidden`, records flagged hidden are system-owned and left
/// in place.
pub struct RecordStrategy {
    protect_hidden: bool,
}

impl RecordStrategy {
    pub fn plain() -> Self {
        Self {
            protect_hidden: false,
        }
    }

    pub fn protecting_hidden() -> Self {
        Self {
            protect_hidden: true,
        }
    }
}

impl<S: ComponentStore, L: OperationLogger> DeletionStrategy<S, L> for RecordStrategy {
    fn delete(
        &self,
        component: &ComponentRef,
        context: &mut DeletionContext<'_, S, L>,
    ) -> Result<DeletionOutcome> {
        let name_attribute = component
            .kind
            .record_binding()
            .map(|binding| binding.name_attribute)
            .unwrap_or("name");
        let Some(record) = tolerate_missing(context.store().fetch_record(
            component.kind,
            component.id,
            &[name_attribute, "ismanaged", "ishidden"],
        ))?
        else {
            return Ok(context.missing(component));
        };
        let description = format!(
            "{} {}",
            component.kind,
            record.get_str(name_attribute).unwrap_or_default()
        );

        if self.protect_hidden && record.get_bool("ishidden") == Some(true) {
            context
                .logger()
                .information(&format!("Leaving hidden {} in place", description));
            return Ok(DeletionOutcome::Preserved {
                reason: PreservationReason::Protected,
            });
        }
        if context.managed_filter().skips(record.is_managed()) {
            return Ok(context.skip_managed(&description));
        }
        if !context.should_process(&format!("Delete {}", description)) {
            return Ok(DeletionOutcome::WhatIf);
        }

        context.store().delete(component.kind, component.id)?;
        context
            .logger()
            .information(&format!("Deleted {}", description));
        Ok(DeletionOutcome::Deleted { deactivated: false })
    }
}

/// Fallback for kinds without a registered strategy
pub struct UnsupportedKindStrategy;

impl<S: ComponentStore, L: OperationLogger> DeletionStrategy<S, L> for UnsupportedKindStrategy {
    fn delete(
        &self,
        component: &ComponentRef,
        context: &mut DeletionContext<'_, S, L>,
    ) -> Result<DeletionOutcome> {
        context.logger().warning(&format!(
            "Cannot delete {}: deleting components of type {} is not supported",
            component, component.kind
        ));
        Ok(DeletionOutcome::Unsupported)
    }
}
