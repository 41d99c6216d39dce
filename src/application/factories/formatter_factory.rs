use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ResultFormatter;

/// Factory for creating result formatters
///
/// Belongs in the application layer as it selects infrastructure adapters
/// based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format to create a formatter for
    /// * `colored` - Whether text output may carry terminal colours
    ///
    /// # Examples
    /// ```
    /// use solution_pruner::application::dto::OutputFormat;
    /// use solution_pruner::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, false);
    /// ```
    pub fn create(format: OutputFormat, colored: bool) -> Box<dyn ResultFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Text => Box::new(TextFormatter::new(colored)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_cleanup::domain::SolutionRef;
    use uuid::Uuid;

    #[test]
    fn test_create_json_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Json, true);
        let output = formatter
            .format_components(&SolutionRef::new(Uuid::nil(), "Core"), &[])
            .unwrap();
        assert!(output.trim_start().starts_with('{'));
    }

    #[test]
    fn test_create_text_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Text, false);
        let output = formatter
            .format_components(&SolutionRef::new(Uuid::nil(), "Core"), &[])
            .unwrap();
        assert_eq!(output, "Solution Core: 0 component(s)\n");
    }
}
