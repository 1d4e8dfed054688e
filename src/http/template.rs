//! The single page, rendered with Handlebars

use crate::recommend::Recommendation;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde_json::json;

const INDEX: &str = "index";

const INDEX_TEMPLATE: &str = r#"<!doctype html>
<title>Healthcare Recommender</title>
<h1>Neo4j Healthcare System</h1>
<form method=post>
  <label>Patient Name: <input name=patient_name></label>
  <button>Recommend</button>
</form>
{{#if recommendations}}
  <h2>Recommendations for {{patient}}</h2>
  <ul>
  {{#each recommendations}}
    <li>{{name}} (Dosage: {{dosage}}) - Efficacy: {{predicted_efficacy}}</li>
  {{/each}}
  </ul>
{{/if}}
"#;

/// Compiled page templates. Values are HTML-escaped on render.
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(INDEX, INDEX_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// The form alone, or the form followed by a patient's list.
    /// An empty list renders like no list at all.
    pub fn index(
        &self,
        patient: Option<&str>,
        recommendations: Option<&[Recommendation]>,
    ) -> Result<String, RenderError> {
        let data = json!({
            "patient": patient,
            "recommendations": recommendations,
        });
        self.handlebars.render(INDEX, &data)
    }
}
