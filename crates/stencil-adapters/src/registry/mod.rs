//! MiniJinja-backed template registry.
//!
//! One [`Environment`] per delimiter [`Syntax`]: infrastructure and SQL
//! templates share the `{{ }}` environment, UI templates live in the `[[ ]]`
//! one. Every environment carries the same helper namespace.

mod helpers;

use std::collections::HashMap;

use minijinja::{AutoEscape, Environment, syntax::SyntaxConfig};
use stencil_core::{
    application::{ApplicationError, ports::TemplateRegistry},
    domain::{RenderModel, Syntax, TemplateKey},
    error::StencilResult,
};
use tracing::{debug, instrument};

/// Template registry parsing and rendering through MiniJinja.
#[derive(Default)]
pub struct MiniJinjaRegistry {
    environments: Vec<(Syntax, Environment<'static>)>,
    /// Which environment each key was parsed into.
    keys: HashMap<TemplateKey, usize>,
}

impl MiniJinjaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn environment_for(&mut self, key: &TemplateKey, syntax: &Syntax) -> StencilResult<usize> {
        if let Some(index) = self.environments.iter().position(|(s, _)| s == syntax) {
            return Ok(index);
        }

        let config = SyntaxConfig::builder()
            .block_delimiters(syntax.block.0.clone(), syntax.block.1.clone())
            .variable_delimiters(syntax.variable.0.clone(), syntax.variable.1.clone())
            .comment_delimiters(syntax.comment.0.clone(), syntax.comment.1.clone())
            .build()
            .map_err(|e| ApplicationError::TemplateParse {
                template: key.to_string(),
                reason: format!("invalid delimiters: {e}"),
            })?;

        let mut env = Environment::new();
        env.set_syntax(config);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        helpers::register_builtins(&mut env);

        debug!(variable = %syntax.variable.0, "created template environment");
        self.environments.push((syntax.clone(), env));
        Ok(self.environments.len() - 1)
    }
}

impl TemplateRegistry for MiniJinjaRegistry {
    #[instrument(skip(self, syntax, source), fields(template = %key))]
    fn register(&mut self, key: TemplateKey, syntax: &Syntax, source: String) -> StencilResult<()> {
        let index = self.environment_for(&key, syntax)?;
        let (_, env) = &mut self.environments[index];
        env.add_template_owned(key.to_string(), source)
            .map_err(|e| ApplicationError::TemplateParse {
                template: key.to_string(),
                reason: e.to_string(),
            })?;

        // A key re-registered under another syntax must not render stale text.
        if let Some(previous) = self.keys.insert(key.clone(), index) {
            if previous != index {
                self.environments[previous].1.remove_template(&key.to_string());
            }
        }
        Ok(())
    }

    fn contains(&self, key: &TemplateKey) -> bool {
        self.keys.contains_key(key)
    }

    fn render(&self, key: &TemplateKey, model: &RenderModel) -> StencilResult<String> {
        let name = key.to_string();
        let env = self
            .keys
            .get(key)
            .and_then(|&index| self.environments.get(index))
            .map(|(_, env)| env)
            .ok_or_else(|| ApplicationError::RenderingFailed {
                template: name.clone(),
                reason: "template is not registered".into(),
            })?;

        let rendering_failed = |e: minijinja::Error| ApplicationError::RenderingFailed {
            template: name.clone(),
            reason: format!("{e:#}"),
        };
        let template = env.get_template(&name).map_err(rendering_failed)?;
        let output = template
            .render(helpers::context(model))
            .map_err(rendering_failed)?;
        Ok(output)
    }
}
