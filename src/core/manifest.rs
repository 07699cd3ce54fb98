//! Graph manifest parsing and validation
//!
//! A manifest declares entities and their dependencies in TOML, plus a few
//! settings for how the graph is used:
//!
//! ```toml
//! [settings]
//! naturalize = true
//! tech = "css"
//!
//! [[entity]]
//! block = "button"
//! elem = "text"
//! depends_on = [{ block = "button" }]
//! links = [{ block = "icon", tech = "svg" }]
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::bem_graph::BemGraph;
use crate::core::entity::{EntityDescriptor, EntityName, RawModValue};
use crate::error::{EntityError, ManifestError};

/// Pattern for block, element and modifier names
const NAME_PATTERN: &str = r"^[a-zA-Z0-9][a-zA-Z0-9-]*$";
/// Pattern for technology names (`css`, `bemhtml.js`)
const TECH_PATTERN: &str = r"^[a-zA-Z0-9][a-zA-Z0-9.-]*$";

/// Graph declaration document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphManifest {
    /// Usage settings
    #[serde(default)]
    pub settings: Settings,

    /// Declared entities, in document order
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityDecl>,
}

/// Manifest settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Add default edges from entity names after loading
    #[serde(default)]
    pub naturalize: bool,

    /// Technology callers should resolve for (see [`GraphManifest::tech`]);
    /// the built graph does not apply it on its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
}

/// Reference to an entity (flat BEM fields plus technology)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityRef {
    pub block: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_val: Option<RawModValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
}

impl EntityRef {
    pub fn entity(&self) -> Result<EntityName, EntityError> {
        EntityName::try_from(EntityDescriptor {
            block: self.block.clone(),
            elem: self.elem.clone(),
            modifier: None,
            mod_name: self.mod_name.clone(),
            mod_val: self.mod_val.clone(),
        })
    }

    fn validate(&self, at: &str, name_re: &Regex, tech_re: &Regex, errors: &mut Vec<String>) {
        let names = [
            ("block", Some(&self.block)),
            ("elem", self.elem.as_ref()),
            ("mod_name", self.mod_name.as_ref()),
        ];
        for (field, value) in names {
            if let Some(value) = value {
                if !name_re.is_match(value) {
                    errors.push(format!("{at}.{field} '{value}' is not a valid name"));
                }
            }
        }

        if let Some(RawModValue::Str(value)) = &self.mod_val {
            if !name_re.is_match(value) {
                errors.push(format!("{at}.mod_val '{value}' is not a valid modifier value"));
            }
        }

        if let Some(tech) = &self.tech {
            if !tech_re.is_match(tech) {
                errors.push(format!("{at}.tech '{tech}' is not a valid technology"));
            }
        }

        if let Err(e) = self.entity() {
            errors.push(format!("{at}: {e}"));
        }
    }
}

/// Declared entity with its dependencies
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityDecl {
    pub block: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_val: Option<RawModValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,

    /// Strong (ordered) dependencies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<EntityRef>,

    /// Weak (unordered) dependencies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<EntityRef>,
}

impl EntityDecl {
    /// The declared vertex itself, without its dependencies
    pub fn vertex(&self) -> EntityRef {
        EntityRef {
            block: self.block.clone(),
            elem: self.elem.clone(),
            mod_name: self.mod_name.clone(),
            mod_val: self.mod_val.clone(),
            tech: self.tech.clone(),
        }
    }
}

impl GraphManifest {
    /// Load manifest from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|source| ManifestError::Parse { source })
    }

    /// Serialize manifest to TOML string
    pub fn to_toml(&self) -> Result<String, ManifestError> {
        toml::to_string_pretty(self).map_err(|source| ManifestError::Serialize { source })
    }

    /// Technology callers should pass to `dependencies_of`
    pub fn tech(&self) -> Option<&str> {
        self.settings.tech.as_deref()
    }

    /// Validate the manifest and report all errors
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let name_re = Regex::new(NAME_PATTERN).map_err(|e| vec![format!("Invalid regex: {e}")])?;
        let tech_re = Regex::new(TECH_PATTERN).map_err(|e| vec![format!("Invalid regex: {e}")])?;
        let mut errors = Vec::new();

        if let Some(tech) = &self.settings.tech {
            if !tech_re.is_match(tech) {
                errors.push(format!("settings.tech '{tech}' is not a valid technology"));
            }
        }

        for (i, decl) in self.entities.iter().enumerate() {
            let at = format!("entity[{i}]");
            decl.vertex().validate(&at, &name_re, &tech_re, &mut errors);
            for (j, dep) in decl.depends_on.iter().enumerate() {
                dep.validate(&format!("{at}.depends_on[{j}]"), &name_re, &tech_re, &mut errors);
            }
            for (j, link) in decl.links.iter().enumerate() {
                link.validate(&format!("{at}.links[{j}]"), &name_re, &tech_re, &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the declared graph
    ///
    /// Vertices and edges are added in document order; the graph is
    /// naturalized afterwards when `settings.naturalize` is set.
    pub fn build_graph(&self) -> Result<BemGraph, ManifestError> {
        self.validate()
            .map_err(|errors| ManifestError::Invalid { errors })?;

        let mut graph = BemGraph::new();
        for decl in &self.entities {
            let mut vertex = graph.vertex(decl.vertex().entity()?, decl.tech.as_deref());
            for dep in &decl.depends_on {
                vertex = vertex.depends_on(dep.entity()?, dep.tech.as_deref());
            }
            for link in &decl.links {
                vertex = vertex.link_with(link.entity()?, link.tech.as_deref());
            }
        }

        if self.settings.naturalize {
            graph.naturalize();
        }

        tracing::debug!(
            "Built graph with {} vertices from manifest",
            graph.mixed_graph().vertex_count()
        );

        Ok(graph)
    }
}
