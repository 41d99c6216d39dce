use crate::component_cleanup::domain::{
    ComponentDescriptor, ComponentForDelete, DeletionEntry, DeletionReport, DependencyEdge,
    SolutionRef,
};
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T: Serialize> {
    generated_at: String,
    tool: Tool,
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct PlanBody<'a> {
    components: &'a [ComponentForDelete],
}

#[derive(Debug, Serialize)]
struct EdgesBody<'a> {
    dependencies: &'a [DependencyEdge],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportBody<'a> {
    removed_count: usize,
    entries: &'a [DeletionEntry],
}

#[derive(Debug, Serialize)]
struct ComponentsBody<'a> {
    solution: &'a SolutionRef,
    components: &'a [ComponentDescriptor],
}

/// JsonFormatter adapter for machine-readable output
///
/// Every document carries a generation timestamp and the tool version next
/// to its payload.
pub struct JsonFormatter {
    generated_at: Option<String>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { generated_at: None }
    }

    /// Formatter that stamps documents with a fixed time (for reproducible output)
    pub fn with_timestamp(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: Some(generated_at.into()),
        }
    }

    fn render<T: Serialize>(&self, body: T) -> Result<String> {
        let envelope = Envelope {
            generated_at: self
                .generated_at
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            tool: Tool {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            body,
        };
        let mut json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| anyhow::anyhow!("Failed to serialize output to JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format_plan(&self, plan: &[ComponentForDelete]) -> Result<String> {
        self.render(PlanBody { components: plan })
    }

    fn format_edges(&self, edges: &[DependencyEdge]) -> Result<String> {
        self.render(EdgesBody {
            dependencies: edges,
        })
    }

    fn format_report(&self, report: &DeletionReport) -> Result<String> {
        self.render(ReportBody {
            removed_count: report.removed_count(),
            entries: report.entries(),
        })
    }

    fn format_components(
        &self,
        solution: &SolutionRef,
        components: &[ComponentDescriptor],
    ) -> Result<String> {
        self.render(ComponentsBody {
            solution,
            components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_cleanup::domain::{ComponentKind, ComponentRef, DeletionOutcome};
    use uuid::Uuid;

    #[test]
    fn test_report_json_shape() {
        let component = ComponentRef::new(ComponentKind::Workflow, Uuid::nil());
        let mut report = DeletionReport::new();
        report.record(component, DeletionOutcome::Deleted { deactivated: true });
        let formatter = JsonFormatter::with_timestamp("2026-01-01T00:00:00Z");

        let output = formatter.format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["generatedAt"], "2026-01-01T00:00:00Z");
        assert_eq!(value["tool"]["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(value["removedCount"], 1);
        assert_eq!(value["entries"][0]["outcome"], "deleted");
        assert_eq!(value["entries"][0]["deactivated"], true);
        assert_eq!(value["entries"][0]["component"]["kind"], 29);
    }

    #[test]
    fn test_components_json_shape() {
        let solution = SolutionRef::new(Uuid::nil(), "Core");
        let descriptor = ComponentDescriptor {
            component: ComponentRef::new(ComponentKind::WebResource, Uuid::nil()),
            display_name: Some("new_/scripts/form.js".to_string()),
            logical_name: Some("webresource".to_string()),
            is_managed: Some(false),
            containing_solutions: vec![solution.clone()],
        };

        let output = JsonFormatter::new()
            .format_components(&solution, &[descriptor])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["solution"]["uniqueName"], "Core");
        assert_eq!(value["components"][0]["displayName"], "new_/scripts/form.js");
        assert_eq!(value["components"][0]["ref"]["kind"], 61);
        assert!(value["generatedAt"].as_str().unwrap().ends_with('Z'));
    }
}
