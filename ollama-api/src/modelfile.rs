//! Modelfile construction.
//!
//! A Modelfile is the recipe the server builds a model from: a base model plus
//! parameters, prompts, adapters and a license. Pass the rendered text to
//! [`Ollama::create_model`](crate::Ollama::create_model).
//!
//! ```rust,ignore
//! let modelfile = ModelfileBuilder::new("llama3")
//!     .parameter("temperature", 1)
//!     .system("You are Mario from Super Mario Bros.")
//!     .build()?;
//! client.create_model("mario", &modelfile).await?;
//! ```

use std::fmt::Display;

use crate::error::{Result, require_text};

const STOP: &str = "stop";

/// Builder for Modelfile text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelfileBuilder {
    from: String,
    parameters: Vec<(String, String)>,
    system: Option<String>,
    template: Option<String>,
    adapter: Option<String>,
    license: Option<String>,
}

impl ModelfileBuilder {
    /// Starts a Modelfile from a base model name or a path to model weights.
    #[must_use]
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            ..Default::default()
        }
    }

    /// Adds a `PARAMETER`.
    ///
    /// Setting the same name again replaces the earlier value, except for
    /// `stop`: every stop sequence gets its own line.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl Display) -> Self {
        let name = name.into();
        let value = value.to_string();
        let slot = if name == STOP {
            None
        } else {
            self.parameters.iter_mut().find(|(n, _)| *n == name)
        };
        match slot {
            Some(slot) => slot.1 = value,
            None => self.parameters.push((name, value)),
        }
        self
    }

    /// Adds a stop sequence. May be called repeatedly.
    #[must_use]
    pub fn stop(self, sequence: impl Display) -> Self {
        self.parameter(STOP, sequence)
    }

    /// Sets the `SYSTEM` prompt.
    #[must_use]
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the full prompt `TEMPLATE`.
    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Sets the (Q)LoRA `ADAPTER` to apply to the base model.
    #[must_use]
    pub fn adapter(mut self, adapter: impl Into<String>) -> Self {
        self.adapter = Some(adapter.into());
        self
    }

    /// Sets the `LICENSE` text.
    #[must_use]
    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Renders the Modelfile.
    ///
    /// Empty optional sections are left out.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the base model or a
    /// parameter name is empty.
    pub fn build(&self) -> Result<String> {
        require_text(&self.from, "from")?;

        let mut out = format!("FROM {}", self.from);
        for (name, value) in &self.parameters {
            require_text(name, "parameter name")?;
            out.push_str(&format!("\nPARAMETER {name} {value}"));
        }
        if let Some(system) = non_empty(self.system.as_deref()) {
            out.push_str(&format!("\nSYSTEM \"\"\"{system}\"\"\""));
        }
        if let Some(template) = non_empty(self.template.as_deref()) {
            out.push_str(&format!("\nTEMPLATE \"\"\"{template}\"\"\""));
        }
        if let Some(adapter) = non_empty(self.adapter.as_deref()) {
            out.push_str(&format!("\nADAPTER {adapter}"));
        }
        if let Some(license) = non_empty(self.license.as_deref()) {
            out.push_str(&format!("\nLICENSE \"\"\"{license}\"\"\""));
        }
        Ok(out)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
