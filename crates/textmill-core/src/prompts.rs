//! Named system prompts for the transform buttons.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt library parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("no prompt named {0:?}")]
    Unknown(String),
}

const BUILTIN_PROMPTS: &str = r#"
montaigne: >
  You are a literary essayist in the tradition of Montaigne. Rewrite the text
  as a reflective personal essay. Keep the author's ideas but let the prose
  wander through digressions and return. Respond with JSON of the form
  {"headline": "...", "essay": "..."}.

simplify: >
  Rewrite the text so a reader at grade {grade} can follow it. Keep every
  fact. Use at most {count} sentences. Respond with JSON of the form
  {"transformed": "..."}.

post: >
  Turn the text into a short social media post with an attention-grabbing
  first line. Respond with JSON of the form
  {"headline": "...", "social": "...", "linkedin": "..."}.
"#;

/// Library of named system prompts, loaded from YAML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PromptLibrary {
    prompts: HashMap<String, String>,
}

impl PromptLibrary {
    pub fn from_yaml(text: &str) -> Result<Self, PromptError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Prompts shipped with the app.
    pub fn builtin() -> Self {
        Self::from_yaml(BUILTIN_PROMPTS).unwrap_or_else(|err| {
            log::error!("builtin prompt library failed to parse: {err}");
            Self::default()
        })
    }

    pub fn get(&self, name: &str) -> Result<&str, PromptError> {
        self.prompts
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| PromptError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prompts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

/// Substitute `{name}` placeholders in a prompt template.
///
/// Unknown placeholders are left in the text verbatim, as are braces that
/// never close. JSON examples inside prompts survive because their braced
/// content does not match any value name.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match values.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_library_parses() {
        let library = PromptLibrary::builtin();
        assert!(!library.is_empty());
        assert!(library.get("montaigne").is_ok());
        assert!(library.get("simplify").is_ok());
        assert!(library.get("post").is_ok());
    }

    #[test]
    fn unknown_prompt_errors_with_its_name() {
        let library = PromptLibrary::builtin();
        let err = library.get("haiku").unwrap_err();
        assert!(matches!(err, PromptError::Unknown(name) if name == "haiku"));
    }

    #[test]
    fn yaml_mapping_loads_as_prompts() {
        let library = PromptLibrary::from_yaml("greet: hello there\n").unwrap();
        assert_eq!(library.get("greet").unwrap(), "hello there");
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn template_fills_known_placeholders() {
        let filled = fill_template(
            "grade {grade}, at most {count} sentences",
            &[("grade", "5"), ("count", "3")],
        );
        assert_eq!(filled, "grade 5, at most 3 sentences");
    }

    #[test]
    fn template_leaves_unknown_placeholders() {
        let filled = fill_template(r#"{"transformed": "..."} uses {grade}"#, &[("grade", "5")]);
        assert_eq!(filled, r#"{"transformed": "..."} uses 5"#);
    }

    #[test]
    fn unclosed_brace_survives() {
        assert_eq!(fill_template("open { brace", &[]), "open { brace");
    }
}
