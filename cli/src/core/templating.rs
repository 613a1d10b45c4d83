//! # pforge Boilerplate Templating
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Forge generates two files for every new project when the template does not
//! already provide them: `.gitignore` and `README.md`. Their content is fixed
//! text with a handful of variables (project name, template name, creation
//! date), rendered here with the Tera engine.
//!
//! Copied template files are never rendered; only these two built-in
//! boilerplate sources go through Tera.
//!
//! ## Examples
//!
//! ```rust
//! let context = BoilerplateContext::new("my-app", "base");
//! let readme = templating::render_readme(&context)?;
//! assert!(readme.starts_with("# my-app"));
//! ```
//!
use crate::core::error::{ForgeError, Result};
use anyhow::anyhow;
use serde::Serialize;
use tera::Tera;
use tracing::debug;

const GITIGNORE_TEMPLATE: &str = r#"# Claude Code
.claude/settings.local.json
.mcp.local.json

# Python
__pycache__/
*.py[cod]
*$py.class
*.so
.Python
venv/
venv_linux/
ENV/
env/
.venv

# IDEs
.vscode/
.idea/
*.swp
*.swo
*~

# OS
.DS_Store
Thumbs.db
"#;

const README_TEMPLATE: &str = r#"# {{ project_name }}

Project created with pforge using the `{{ template_name }}` template on {{ created_on }}.

## Getting Started

1. Review and customize `CLAUDE.md` for project-specific guidelines
2. Explore available commands in `.claude/commands/`
3. Configure MCP servers if needed (see `.mcp.json`)
4. Check `ai_docs/` for reference documentation

## Development

[Add your development instructions here]

## Testing

[Add your testing instructions here]

## License

[Add your license here]
"#;

/// Variables available to the boilerplate templates.
#[derive(Serialize, Debug, Clone)]
pub struct BoilerplateContext {
    pub project_name: String,
    pub template_name: String,
    /// Creation date, `YYYY-MM-DD`.
    pub created_on: String,
}

impl BoilerplateContext {
    /// Builds a context stamped with today's local date.
    pub fn new(project_name: &str, template_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            template_name: template_name.to_string(),
            created_on: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Renders the generated `.gitignore`.
pub fn render_gitignore(context: &BoilerplateContext) -> Result<String> {
    render("gitignore", GITIGNORE_TEMPLATE, context)
}

/// Renders the generated `README.md`.
pub fn render_readme(context: &BoilerplateContext) -> Result<String> {
    render("README.md", README_TEMPLATE, context)
}

fn render(label: &str, source: &str, context: &BoilerplateContext) -> Result<String> {
    let tera_context = tera::Context::from_serialize(context).map_err(|e| {
        anyhow!(ForgeError::Template { source: e })
            .context("Failed to create Tera context from boilerplate variables")
    })?;
    let rendered = Tera::one_off(source, &tera_context, false).map_err(|e| {
        anyhow!(ForgeError::Template { source: e })
            .context(format!("Tera rendering failed for generated {}", label))
    })?;
    debug!("Rendered generated {} ({} bytes)", label, rendered.len());
    Ok(rendered)
}
