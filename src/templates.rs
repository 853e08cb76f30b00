//! # Templates Module
//!
//! The built-in boilerplate templates, compiled into the binary, and the
//! lookup from a file path to the template that applies to it.
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use boilersuite::templates::TemplateMap;
//!
//! # fn main() -> anyhow::Result<()> {
//! let templates = TemplateMap::builtin("example")?;
//!
//! assert!(templates.template_for(Path::new("cmd/main.go")).is_some());
//! assert!(templates.template_for(Path::new("Dockerfile.linux")).is_some());
//! assert!(templates.template_for(Path::new("README.md")).is_none());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::template::Template;

/// Built-in template sources, keyed by the category they apply to.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
  ("go", include_str!("../boilerplate-templates/boilerplate.go.boilertmpl")),
  ("sh", include_str!("../boilerplate-templates/boilerplate.sh.boilertmpl")),
  ("bash", include_str!("../boilerplate-templates/boilerplate.bash.boilertmpl")),
  ("py", include_str!("../boilerplate-templates/boilerplate.py.boilertmpl")),
  ("mk", include_str!("../boilerplate-templates/boilerplate.mk.boilertmpl")),
  ("Makefile", include_str!("../boilerplate-templates/boilerplate.Makefile.boilertmpl")),
  ("Dockerfile", include_str!("../boilerplate-templates/boilerplate.Dockerfile.boilertmpl")),
];

/// Templates keyed by category.
///
/// A category is either a file extension (`go`) or a file name prefix
/// (`Dockerfile`, which also covers `Dockerfile.linux`).
#[derive(Debug, Clone, Default)]
pub struct TemplateMap {
  templates: HashMap<String, Template>,
}

impl TemplateMap {
  /// Loads the built-in templates for the given author.
  ///
  /// # Errors
  ///
  /// Returns an error if any built-in template is invalid. This is fatal:
  /// every verdict for that category would be meaningless.
  pub fn builtin(expected_author: &str) -> Result<Self> {
    Self::from_sources(BUILTIN_TEMPLATES.iter().copied(), expected_author)
  }

  /// Loads templates from `(category, source)` pairs.
  pub fn from_sources<'a>(
    sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    expected_author: &str,
  ) -> Result<Self> {
    let mut templates = HashMap::new();

    for (category, raw) in sources {
      let template =
        Template::new(raw, category, expected_author).with_context(|| format!("invalid template {category:?}"))?;
      debug!("Loaded template for {category:?} ({:?})", template.header_skip());
      templates.insert(category.to_string(), template);
    }

    if templates.is_empty() {
      anyhow::bail!("found no templates");
    }

    Ok(Self { templates })
  }

  /// Returns the template for the given path, if any.
  ///
  /// The suffix after the last dot of the file name is tried first, then the
  /// part of the file name before the first dot.
  pub fn template_for(&self, path: &Path) -> Option<&Template> {
    let name = path.file_name()?.to_str()?;

    let extension = name.rsplit_once('.').map_or("", |(_, ext)| ext);
    if let Some(template) = self.templates.get(extension) {
      return Some(template);
    }

    let prefix = name.split('.').next().unwrap_or(name);
    self.templates.get(prefix)
  }

  /// Categories with a template, sorted.
  pub fn categories(&self) -> Vec<&str> {
    let mut categories: Vec<&str> = self.templates.keys().map(String::as_str).collect();
    categories.sort_unstable();
    categories
  }

  pub fn len(&self) -> usize {
    self.templates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.templates.is_empty()
  }
}
