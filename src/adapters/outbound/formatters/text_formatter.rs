use crate::component_cleanup::domain::{
    ComponentDescriptor, ComponentForDelete, DeletionOutcome, DeletionReport, DependencyEdge,
    SolutionRef,
};
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// TextFormatter adapter for human-readable listings
///
/// Colours are only emitted when `colored` is set, so output written to a
/// file or pipe stays plain.
pub struct TextFormatter {
    colored: bool,
}

impl TextFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn name_of(descriptor: &ComponentDescriptor) -> String {
        match &descriptor.display_name {
            Some(name) => name.clone(),
            None => format!("<unresolved {}>", descriptor.component.id),
        }
    }

    fn managed_marker(descriptor: &ComponentDescriptor) -> &'static str {
        match descriptor.is_managed {
            Some(true) => " [managed]",
            _ => "",
        }
    }

    fn outcome(&self, outcome: &DeletionOutcome) -> String {
        let label = outcome.to_string();
        if !self.colored {
            return label;
        }
        match outcome {
            DeletionOutcome::Deleted { .. } => label.green().to_string(),
            DeletionOutcome::Preserved { .. } | DeletionOutcome::WhatIf => {
                label.cyan().to_string()
            }
            DeletionOutcome::SkippedManaged => label.yellow().to_string(),
            DeletionOutcome::Missing | DeletionOutcome::Unsupported => {
                label.red().to_string()
            }
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.colored {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn unresolved(&self, text: String, resolved: bool) -> String {
        if self.colored && !resolved {
            text.dimmed().to_string()
        } else {
            text
        }
    }
}

impl ResultFormatter for TextFormatter {
    fn format_plan(&self, plan: &[ComponentForDelete]) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{}", self.heading(&format!("{} component(s) to delete", plan.len())))?;
        for item in plan {
            let descriptor = &item.descriptor;
            let line = format!(
                "{}- {} {}{}",
                "  ".repeat(item.depth),
                descriptor.component.kind,
                Self::name_of(descriptor),
                Self::managed_marker(descriptor)
            );
            writeln!(out, "{}", self.unresolved(line, descriptor.is_resolved()))?;
        }
        Ok(out)
    }

    fn format_edges(&self, edges: &[DependencyEdge]) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{}", self.heading(&format!("{} dependency(ies)", edges.len())))?;
        for edge in edges {
            let resolved = edge.dependent.is_resolved() && edge.required.is_resolved();
            let line = format!(
                "- {} {} ({}) requires {} {} ({})",
                edge.dependent.component.kind,
                Self::name_of(&edge.dependent),
                edge.dependent_solution,
                edge.required.component.kind,
                Self::name_of(&edge.required),
                edge.required_solution
            );
            writeln!(out, "{}", self.unresolved(line, resolved))?;
        }
        Ok(out)
    }

    fn format_report(&self, report: &DeletionReport) -> Result<String> {
        let mut out = String::new();
        writeln!(
            out,
            "{}",
            self.heading(&format!(
                "{} of {} component(s) removed",
                report.removed_count(),
                report.len()
            ))
        )?;
        for entry in report.entries() {
            writeln!(out, "- {}: {}", entry.component, self.outcome(&entry.outcome))?;
        }
        Ok(out)
    }

    fn format_components(
        &self,
        solution: &SolutionRef,
        components: &[ComponentDescriptor],
    ) -> Result<String> {
        let mut out = String::new();
        writeln!(
            out,
            "{}",
            self.heading(&format!(
                "Solution {}: {} component(s)",
                solution.unique_name,
                components.len()
            ))
        )?;
        for descriptor in components {
            let line = format!(
                "- {} {}{}",
                descriptor.component.kind,
                Self::name_of(descriptor),
                Self::managed_marker(descriptor)
            );
            writeln!(out, "{}", self.unresolved(line, descriptor.is_resolved()))?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_cleanup::domain::{ComponentKind, ComponentRef};
    use uuid::Uuid;

    fn descriptor(kind: ComponentKind, name: Option<&str>) -> ComponentDescriptor {
        ComponentDescriptor {
            component: ComponentRef::new(kind, Uuid::nil()),
            display_name: name.map(str::to_string),
            logical_name: None,
            is_managed: Some(true),
            containing_solutions: Vec::new(),
        }
    }

    #[test]
    fn test_plan_indents_by_depth() {
        let plan = vec![
            ComponentForDelete {
                descriptor: descriptor(ComponentKind::PluginAssembly, Some("Contoso.Plugins")),
                solution_component_id: None,
                depth: 0,
                parent: None,
            },
            ComponentForDelete {
                descriptor: descriptor(ComponentKind::SdkMessageProcessingStep, None),
                solution_component_id: None,
                depth: 1,
                parent: None,
            },
        ];

        let output = TextFormatter::new(false).format_plan(&plan).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "2 component(s) to delete");
        assert_eq!(lines[1], "- PluginAssembly Contoso.Plugins [managed]");
        assert_eq!(
            lines[2],
            format!("  - SdkMessageProcessingStep <unresolved {}> [managed]", Uuid::nil())
        );
    }

    #[test]
    fn test_report_lists_outcomes() {
        let mut report = DeletionReport::new();
        let component = ComponentRef::new(ComponentKind::Role, Uuid::nil());
        report.record(component, DeletionOutcome::SkippedManaged);

        let output = TextFormatter::new(false).format_report(&report).unwrap();

        assert!(output.starts_with("0 of 1 component(s) removed"));
        assert!(output.contains(&format!("- Role {}: skipped (managed)", Uuid::nil())));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let mut report = DeletionReport::new();
        report.record(
            ComponentRef::new(ComponentKind::Role, Uuid::nil()),
            DeletionOutcome::Deleted { deactivated: false },
        );

        let plain = TextFormatter::new(false).format_report(&report).unwrap();
        let colored = TextFormatter::new(true).format_report(&report).unwrap();

        assert!(!plain.contains('\u{1b}'));
        assert!(colored.contains('\u{1b}'));
    }
}
