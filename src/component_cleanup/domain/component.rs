use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of a solution component, carrying the platform's numeric code.
///
/// Kinds that the platform knows about but this crate has no special
/// handling for are kept as `Other(code)` so they round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ComponentKind {
    Entity,
    Attribute,
    OptionSet,
    EntityRelationship,
    Role,
    SavedQuery,
    Workflow,
    Report,
    EmailTemplate,
    ContractTemplate,
    KbArticleTemplate,
    MailMergeTemplate,
    RibbonCustomization,
    SystemForm,
    WebResource,
    SiteMap,
    ConnectionRole,
    CustomControl,
    FieldSecurityProfile,
    PluginType,
    PluginAssembly,
    SdkMessageProcessingStep,
    SdkMessageProcessingStepImage,
    ServiceEndpoint,
    Sla,
    SdkMessage,
    Other(i32),
}

/// Metadata-backed (structural) component families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    Entity,
    Attribute,
    Relationship,
    OptionSet,
}

/// Where a record-backed component lives in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordBinding {
    /// Store-level entity name, e.g. `workflow`
    pub entity: &'static str,
    /// Attribute holding the human readable name
    pub name_attribute: &'static str,
}

const KNOWN_KINDS: &[(ComponentKind, i32, &str)] = &[
    (ComponentKind::Entity, 1, "Entity"),
    (ComponentKind::Attribute, 2, "Attribute"),
    (ComponentKind::OptionSet, 9, "OptionSet"),
    (ComponentKind::EntityRelationship, 10, "EntityRelationship"),
    (ComponentKind::Role, 20, "Role"),
    (ComponentKind::SavedQuery, 26, "SavedQuery"),
    (ComponentKind::Workflow, 29, "Workflow"),
    (ComponentKind::Report, 31, "Report"),
    (ComponentKind::EmailTemplate, 36, "EmailTemplate"),
    (ComponentKind::ContractTemplate, 37, "ContractTemplate"),
    (ComponentKind::KbArticleTemplate, 38, "KbArticleTemplate"),
    (ComponentKind::MailMergeTemplate, 39, "MailMergeTemplate"),
    (ComponentKind::RibbonCustomization, 50, "RibbonCustomization"),
    (ComponentKind::SystemForm, 60, "SystemForm"),
    (ComponentKind::WebResource, 61, "WebResource"),
    (ComponentKind::SiteMap, 62, "SiteMap"),
    (ComponentKind::ConnectionRole, 63, "ConnectionRole"),
    (ComponentKind::CustomControl, 66, "CustomControl"),
    (ComponentKind::FieldSecurityProfile, 70, "FieldSecurityProfile"),
    (ComponentKind::PluginType, 90, "PluginType"),
    (ComponentKind::PluginAssembly, 91, "PluginAssembly"),
    (ComponentKind::SdkMessageProcessingStep, 92, "SdkMessageProcessingStep"),
    (
        ComponentKind::SdkMessageProcessingStepImage,
        93,
        "SdkMessageProcessingStepImage",
    ),
    (ComponentKind::ServiceEndpoint, 95, "ServiceEndpoint"),
    (ComponentKind::Sla, 152, "Sla"),
    (ComponentKind::SdkMessage, 201, "SdkMessage"),
];

impl ComponentKind {
    pub fn code(self) -> i32 {
        match self {
            ComponentKind::Other(code) => code,
            known => KNOWN_KINDS
                .iter()
                .find(|(kind, _, _)| *kind == known)
                .map(|(_, code, _)| *code)
                .unwrap_or_default(),
        }
    }

    pub fn from_code(code: i32) -> Self {
        KNOWN_KINDS
            .iter()
            .find(|(_, known_code, _)| *known_code == code)
            .map(|(kind, _, _)| *kind)
            .unwrap_or(ComponentKind::Other(code))
    }

    /// Structural kinds are resolved and deleted through schema metadata
    /// rather than as plain records.
    pub fn metadata_kind(self) -> Option<MetadataKind> {
        match self {
            ComponentKind::Entity => Some(MetadataKind::Entity),
            ComponentKind::Attribute => Some(MetadataKind::Attribute),
            ComponentKind::EntityRelationship => Some(MetadataKind::Relationship),
            ComponentKind::OptionSet => Some(MetadataKind::OptionSet),
            _ => None,
        }
    }

    pub fn is_structural(self) -> bool {
        self.metadata_kind().is_some()
    }

    pub fn record_binding(self) -> Option<RecordBinding> {
        let (entity, name_attribute) = match self {
            ComponentKind::Role => ("role", "name"),
            ComponentKind::SavedQuery => ("savedquery", "name"),
            ComponentKind::Workflow => ("workflow", "name"),
            ComponentKind::Report => ("report", "name"),
            ComponentKind::EmailTemplate => ("template", "title"),
            ComponentKind::ContractTemplate => ("contracttemplate", "name"),
            ComponentKind::KbArticleTemplate => ("kbarticletemplate", "title"),
            ComponentKind::MailMergeTemplate => ("mailmergetemplate", "name"),
            ComponentKind::RibbonCustomization => ("ribboncustomization", "entity"),
            ComponentKind::SystemForm => ("systemform", "name"),
            ComponentKind::WebResource => ("webresource", "name"),
            ComponentKind::SiteMap => ("sitemap", "sitemapnameunique"),
            ComponentKind::ConnectionRole => ("connectionrole", "name"),
            ComponentKind::CustomControl => ("customcontrol", "name"),
            ComponentKind::FieldSecurityProfile => ("fieldsecurityprofile", "name"),
            ComponentKind::PluginType => ("plugintype", "name"),
            ComponentKind::PluginAssembly => ("pluginassembly", "name"),
            ComponentKind::SdkMessageProcessingStep => ("sdkmessageprocessingstep", "name"),
            ComponentKind::SdkMessageProcessingStepImage => {
                ("sdkmessageprocessingstepimage", "name")
            }
            ComponentKind::ServiceEndpoint => ("serviceendpoint", "name"),
            ComponentKind::Sla => ("sla", "name"),
            ComponentKind::SdkMessage => ("sdkmessage", "name"),
            _ => return None,
        };
        Some(RecordBinding {
            entity,
            name_attribute,
        })
    }
}

impl From<i32> for ComponentKind {
    fn from(code: i32) -> Self {
        ComponentKind::from_code(code)
    }
}

impl From<ComponentKind> for i32 {
    fn from(kind: ComponentKind) -> Self {
        kind.code()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Other(code) => write!(f, "ComponentType({})", code),
            known => {
                let name = KNOWN_KINDS
                    .iter()
                    .find(|(kind, _, _)| kind == known)
                    .map(|(_, _, name)| *name)
                    .unwrap_or("Unknown");
                write!(f, "{}", name)
            }
        }
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i32>() {
            return Ok(ComponentKind::from_code(code));
        }
        KNOWN_KINDS
            .iter()
            .find(|(_, _, name)| name.eq_ignore_ascii_case(trimmed))
            .map(|(kind, _, _)| *kind)
            .ok_or_else(|| {
                format!(
                    "Invalid component kind: {}. Use a kind name (e.g. 'Workflow') or its numeric code",
                    s
                )
            })
    }
}

/// Identity of a component: the pair `(kind, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    pub kind: ComponentKind,
    pub id: Uuid,
}

impl ComponentRef {
    pub fn new(kind: ComponentKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}
