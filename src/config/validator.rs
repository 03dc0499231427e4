use super::parser::ParsedRules;
use std::collections::HashSet;

/// Flags configuration mistakes that parse fine but can never take effect
pub struct RulesValidator {
    /// Top-level keys recognized in a rules document
    known_fields: HashSet<&'static str>,
}

impl RulesValidator {
    /// Create a new validator with the known rule fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = ["excluded_directories", "excluded_files"]
            .into_iter()
            .collect();

        Self { known_fields }
    }

    /// Collect warnings for a parsed rules document
    ///
    /// Unknown top-level keys are usually typos that silently disable a list.
    /// Rule entries containing a path separator never match, because rules
    /// are compared against bare entry names.
    #[must_use]
    pub fn validate(&self, parsed: &ParsedRules) -> Vec<String> {
        let mut warnings = Vec::new();

        for key in &parsed.keys {
            if !self.known_fields.contains(key.as_str()) {
                warnings.push(format!("Unknown configuration field: {key}"));
            }
        }

        let mut pathlike: Vec<&String> = parsed
            .rules
            .excluded_directories()
            .iter()
            .chain(parsed.rules.excluded_files())
            .filter(|name| name.contains('/') || name.contains('\\'))
            .collect();
        pathlike.sort();

        for name in pathlike {
            warnings.push(format!(
                "Rule '{name}' contains a path separator and will never match an entry name"
            ));
        }

        warnings
    }
}

impl Default for RulesValidator {
    fn default() -> Self {
        Self::new()
    }
}
