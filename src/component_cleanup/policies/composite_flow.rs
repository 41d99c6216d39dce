use crate::shared::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Writer};

/// Namespace that activity references in process definitions are bound to
pub const ACTIVITIES_NAMESPACE: &str = "clr-namespace:Microsoft.Xrm.Sdk.Workflow.Activities;assembly=Microsoft.Xrm.Sdk.Workflow, Version=8.0.0.0, Culture=neutral, PublicKeyToken=31bf3856ad364e35";

/// Assembly-qualified name of the composite activity that embeds a
/// business process flow in its host definition
pub const COMPOSITE_ACTIVITY: &str = "Microsoft.Crm.Workflow.Activities.ActionComposite, Microsoft.Crm.Workflow, Version=8.0.0.0, Culture=neutral, PublicKeyToken=31bf3856ad364e35";

const ACTIVITY_REFERENCE: &[u8] = b"ActivityReference";
const ASSEMBLY_QUALIFIED_NAME: &str = "AssemblyQualifiedName";

/// Rewrites a business process flow definition so it no longer embeds
/// composite activities.
///
/// Flows of this kind cannot be deleted while their composite activities
/// are present, so the definition is emptied and the record kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompositeFlowPolicy;

impl CompositeFlowPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Returns `definition` with every composite activity reference and its
    /// subtree removed. Everything else is written back unchanged.
    pub fn strip_composite_activities(&self, definition: &str) -> Result<String> {
        let mut reader = NsReader::from_str(definition);
        let mut writer = Writer::new(Vec::new());
        let mut skipped_depth = 0usize;

        loop {
            let (namespace, event) = reader.read_resolved_event()?;

            if skipped_depth > 0 {
                match event {
                    Event::Start(_) => skipped_depth += 1,
                    Event::End(_) => skipped_depth -= 1,
                    Event::Eof => break,
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(ref start) if Self::is_composite(&namespace, start)? => {
                    skipped_depth = 1;
                }
                Event::Empty(ref start) if Self::is_composite(&namespace, start)? => {}
                Event::Eof => break,
                other => writer.write_event(other)?,
            }
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn is_composite(namespace: &ResolveResult, element: &BytesStart) -> Result<bool> {
        let in_activities_namespace = matches!(
            namespace,
            ResolveResult::Bound(ns) if ns.as_ref() == ACTIVITIES_NAMESPACE.as_bytes()
        );
        if !in_activities_namespace || element.local_name().as_ref() != ACTIVITY_REFERENCE {
            return Ok(false);
        }

        Ok(element
            .try_get_attribute(ASSEMBLY_QUALIFIED_NAME)?
            .is_some_and(|attribute| attribute.value.as_ref() == COMPOSITE_ACTIVITY.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(body: &str) -> String {
        format!(
            r#"<Activity xmlns="http://schemas.microsoft.com/netfx/2009/xaml/activities" xmlns:mxswa="{}"><Sequence>{}</Sequence></Activity>"#,
            ACTIVITIES_NAMESPACE, body
        )
    }

    #[test]
    fn test_composite_reference_subtree_is_removed() {
        let input = definition(&format!(
            r#"<mxswa:ActivityReference AssemblyQualifiedName="{}"><mxswa:ActivityReference.Arguments><x>1</x></mxswa:ActivityReference.Arguments></mxswa:ActivityReference><Keep/>"#,
            COMPOSITE_ACTIVITY
        ));

        let output = CompositeFlowPolicy::new()
            .strip_composite_activities(&input)
            .unwrap();

        assert_eq!(output, definition("<Keep/>"));
    }

    #[test]
    fn test_empty_composite_reference_is_removed() {
        let input = definition(&format!(
            r#"<mxswa:ActivityReference AssemblyQualifiedName="{}"/>"#,
            COMPOSITE_ACTIVITY
        ));

        let output = CompositeFlowPolicy::new()
            .strip_composite_activities(&input)
            .unwrap();

        assert_eq!(output, definition(""));
    }

    #[test]
    fn test_other_activity_references_are_kept() {
        let input = definition(
            r#"<mxswa:ActivityReference AssemblyQualifiedName="Microsoft.Crm.Workflow.Activities.StageComposite"><y/></mxswa:ActivityReference>"#,
        );

        let output = CompositeFlowPolicy::new()
            .strip_composite_activities(&input)
            .unwrap();

        assert_eq!(output, input);
    }

    #[test]
    fn test_reference_in_other_namespace_is_kept() {
        let input = format!(
            r#"<Activity xmlns:other="urn:other"><other:ActivityReference AssemblyQualifiedName="{}"/></Activity>"#,
            COMPOSITE_ACTIVITY
        );

        let output = CompositeFlowPolicy::new()
            .strip_composite_activities(&input)
            .unwrap();

        assert_eq!(output, input);
    }

    #[test]
    fn test_malformed_definition_is_an_error() {
        let result = CompositeFlowPolicy::new().strip_composite_activities("<Activity><Open></Activity>");
        assert!(result.is_err());
    }
}
