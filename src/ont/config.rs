//! Profiles and feature controls
//!
//! An [`OntConfig`] is a value owned by the model's personality. It selects an
//! [`OntProfile`] (which decides the default of every [`OntControl`]) and may
//! override single controls. It can be written as YAML or JSON:
//!
//! ```yaml
//! profile: OWL2-QL
//! controls:
//!   owl-class-disjoint-with: false
//! ```

use super::error::{OntError, OntResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown config format: {0}")]
    UnknownFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Ontology language profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OntProfile {
    #[default]
    #[serde(rename = "OWL2-FULL")]
    Owl2Full,
    #[serde(rename = "OWL2-DL")]
    Owl2Dl,
    #[serde(rename = "OWL2-QL")]
    Owl2Ql,
    #[serde(rename = "OWL2-RL")]
    Owl2Rl,
    #[serde(rename = "OWL1")]
    Owl1,
    #[serde(rename = "RDFS")]
    Rdfs,
}

impl OntProfile {
    pub fn name(&self) -> &'static str {
        match self {
            OntProfile::Owl2Full => "OWL2-FULL",
            OntProfile::Owl2Dl => "OWL2-DL",
            OntProfile::Owl2Ql => "OWL2-QL",
            OntProfile::Owl2Rl => "OWL2-RL",
            OntProfile::Owl1 => "OWL1",
            OntProfile::Rdfs => "RDFS",
        }
    }

    pub fn is_owl(&self) -> bool {
        !matches!(self, OntProfile::Rdfs)
    }

    /// Default value of a control under this profile
    pub fn default_control(&self, control: OntControl) -> bool {
        use OntControl::*;
        use OntProfile::*;
        match (self, control) {
            (_, UseDirectPredicateFastPath) => true,
            (Rdfs, _) => false,
            (Owl2Full | Owl2Dl | Owl2Rl, _) => true,
            (Owl2Ql, Owl2ClassHasKey | Owl2QualifiedCardinality | Owl2PropertyChain | OwlIndividualSameAs) => {
                false
            }
            (Owl2Ql, _) => true,
            (Owl1, OwlClassDisjointWith | OwlClassEquivalent | OwlIndividualSameAs) => true,
            (Owl1, _) => false,
        }
    }
}

impl fmt::Display for OntProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Switchable capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OntControl {
    /// `owl:disjointWith` between classes
    OwlClassDisjointWith,
    /// `owl:equivalentClass`
    OwlClassEquivalent,
    /// `owl:hasKey`
    Owl2ClassHasKey,
    /// qualified cardinality restrictions (`owl:onClass`)
    Owl2QualifiedCardinality,
    /// `owl:propertyChainAxiom`
    Owl2PropertyChain,
    /// new named individuals also get `rdf:type owl:NamedIndividual`
    Owl2NamedIndividualDeclaration,
    /// `owl:sameAs` between individuals
    OwlIndividualSameAs,
    /// asymmetric, reflexive and irreflexive properties, `owl:propertyDisjointWith`
    /// and negative property assertions
    Owl2PropertyAxioms,
    /// direct hierarchy queries read the graph's direct predicate when it has one
    UseDirectPredicateFastPath,
}

impl OntControl {
    pub fn all() -> [OntControl; 9] {
        [
            OntControl::OwlClassDisjointWith,
            OntControl::OwlClassEquivalent,
            OntControl::Owl2ClassHasKey,
            OntControl::Owl2QualifiedCardinality,
            OntControl::Owl2PropertyChain,
            OntControl::Owl2NamedIndividualDeclaration,
            OntControl::OwlIndividualSameAs,
            OntControl::Owl2PropertyAxioms,
            OntControl::UseDirectPredicateFastPath,
        ]
    }
}

/// Model configuration: a profile plus per-control overrides
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OntConfig {
    pub profile: OntProfile,
    pub controls: IndexMap<OntControl, bool>,
}

impl OntConfig {
    pub fn new(profile: OntProfile) -> Self {
        Self {
            profile,
            controls: IndexMap::new(),
        }
    }

    /// Override one control
    pub fn with(mut self, control: OntControl, enabled: bool) -> Self {
        self.controls.insert(control, enabled);
        self
    }

    pub fn is_enabled(&self, control: OntControl) -> bool {
        self.controls
            .get(&control)
            .copied()
            .unwrap_or_else(|| self.profile.default_control(control))
    }

    /// Fails with `Unsupported` when `control` is off
    pub fn check_feature(&self, control: OntControl, feature: &str) -> OntResult<()> {
        if self.is_enabled(control) {
            return Ok(());
        }
        Err(OntError::Unsupported(format!(
            "Feature {} is disabled. Profile {}",
            feature, self.profile
        )))
    }

    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(ConfigError::UnknownFormat(path.display().to_string())),
        }
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
