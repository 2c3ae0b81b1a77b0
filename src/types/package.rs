//! Strategy package definitions (catalog data)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::error::CatalogError;

/// One sub-requirement of a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRule {
    /// Key within the package (e.g. "outlets")
    pub name: String,
    pub display_name: String,
    /// Tags whose totals count toward this component
    pub tags: Vec<String>,
    /// Aggregated strength needed for full coverage
    pub min_required: f64,
    /// Relative importance within the package
    pub weight: f64,
}

impl ComponentRule {
    pub fn new(
        name: &str,
        display_name: &str,
        tags: &[&str],
        min_required: f64,
        weight: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            min_required,
            weight,
        }
    }
}

/// A named deck strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDefinition {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub components: Vec<ComponentRule>,
    /// Tag pairs that combine well. Not used by scoring.
    #[serde(default)]
    pub synergy_pairs: Vec<(String, String)>,
    /// Tags that actively work against this plan
    #[serde(default)]
    pub conflict_tags: BTreeSet<String>,
}

impl PackageDefinition {
    pub fn new(name: &str, display_name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
            components: Vec::new(),
            synergy_pairs: Vec::new(),
            conflict_tags: BTreeSet::new(),
        }
    }

    pub fn component(mut self, rule: ComponentRule) -> Self {
        self.components.push(rule);
        self
    }

    pub fn synergy_pair(mut self, a: &str, b: &str) -> Self {
        self.synergy_pairs.push((a.to_string(), b.to_string()));
        self
    }

    pub fn conflicts(mut self, tags: &[&str]) -> Self {
        self.conflict_tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    /// Union of every component's tags
    pub fn relevant_tags(&self) -> BTreeSet<&str> {
        self.components
            .iter()
            .flat_map(|c| c.tags.iter().map(String::as_str))
            .collect()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyPackageName);
        }
        if self.components.is_empty() {
            return Err(CatalogError::NoComponents(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for rule in &self.components {
            if !seen.insert(rule.name.as_str()) {
                return Err(CatalogError::DuplicateComponent {
                    package: self.name.clone(),
                    component: rule.name.clone(),
                });
            }
            if rule.tags.is_empty() {
                return Err(CatalogError::NoTags {
                    package: self.name.clone(),
                    component: rule.name.clone(),
                });
            }
            if !rule.min_required.is_finite() || rule.min_required < 0.0 {
                return Err(CatalogError::InvalidMinRequired {
                    package: self.name.clone(),
                    component: rule.name.clone(),
                    value: rule.min_required,
                });
            }
            if !rule.weight.is_finite() || rule.weight <= 0.0 {
                return Err(CatalogError::InvalidWeight {
                    package: self.name.clone(),
                    component: rule.name.clone(),
                    value: rule.weight,
                });
            }
        }
        Ok(())
    }
}

/// Validated, ordered, read-only set of packages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PackageDefinition>", into = "Vec<PackageDefinition>")]
pub struct PackageCatalog {
    packages: Vec<PackageDefinition>,
}

impl PackageCatalog {
    /// Validate and wrap package definitions. Catalog order is kept and
    /// breaks score ties during primary selection.
    pub fn new(packages: Vec<PackageDefinition>) -> Result<Self, CatalogError> {
        if packages.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut names = HashSet::new();
        for pkg in &packages {
            pkg.validate()?;
            if !names.insert(pkg.name.as_str()) {
                return Err(CatalogError::DuplicatePackage(pkg.name.clone()));
            }
        }

        Ok(Self { packages })
    }

    /// Wrap packages known to be valid
    pub(crate) fn from_trusted(packages: Vec<PackageDefinition>) -> Self {
        Self { packages }
    }

    pub fn packages(&self) -> &[PackageDefinition] {
        &self.packages
    }

    pub fn get(&self, name: &str) -> Option<&PackageDefinition> {
        self.packages.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl TryFrom<Vec<PackageDefinition>> for PackageCatalog {
    type Error = CatalogError;

    fn try_from(packages: Vec<PackageDefinition>) -> Result<Self, Self::Error> {
        Self::new(packages)
    }
}

impl From<PackageCatalog> for Vec<PackageDefinition> {
    fn from(catalog: PackageCatalog) -> Self {
        catalog.packages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str) -> PackageDefinition {
        PackageDefinition::new(name, name, "test")
            .component(ComponentRule::new("a", "A", &["tag_a"], 2.0, 1.0))
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = PackageCatalog::new(vec![pkg("one"), pkg("two")]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("two").is_some());
        assert!(catalog.get("three").is_none());
    }

    #[test]
    fn test_negative_min_required_rejected() {
        let bad = PackageDefinition::new("bad", "Bad", "test")
            .component(ComponentRule::new("a", "A", &["tag_a"], -1.0, 1.0));
        let err = PackageCatalog::new(vec![bad]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidMinRequired { .. }));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let bad = PackageDefinition::new("bad", "Bad", "test")
            .component(ComponentRule::new("a", "A", &["tag_a"], 1.0, 0.0));
        assert!(matches!(
            PackageCatalog::new(vec![bad]),
            Err(CatalogError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(PackageCatalog::new(vec![]), Err(CatalogError::Empty));
        assert_eq!(
            PackageCatalog::new(vec![pkg("x"), pkg("x")]),
            Err(CatalogError::DuplicatePackage("x".into()))
        );
        assert_eq!(
            PackageCatalog::new(vec![PackageDefinition::new("empty", "Empty", "")]),
            Err(CatalogError::NoComponents("empty".into()))
        );

        let dup = pkg("dup").component(ComponentRule::new("a", "A again", &["t"], 1.0, 1.0));
        assert!(matches!(
            PackageCatalog::new(vec![dup]),
            Err(CatalogError::DuplicateComponent { .. })
        ));

        let no_tags = PackageDefinition::new("nt", "NT", "")
            .component(ComponentRule::new("a", "A", &[], 1.0, 1.0));
        assert!(matches!(
            PackageCatalog::new(vec![no_tags]),
            Err(CatalogError::NoTags { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[{
            "name": "bad", "display_name": "Bad", "description": "",
            "components": [{"name": "a", "display_name": "A", "tags": ["x"],
                            "min_required": -3, "weight": 1.0}]
        }]"#;
        assert!(serde_json::from_str::<PackageCatalog>(json).is_err());
    }

    #[test]
    fn test_relevant_tags_union() {
        let p = pkg("p").component(ComponentRule::new("b", "B", &["tag_b", "tag_a"], 1.0, 1.0));
        let tags: Vec<_> = p.relevant_tags().into_iter().collect();
        assert_eq!(tags, vec!["tag_a", "tag_b"]);
    }
}
