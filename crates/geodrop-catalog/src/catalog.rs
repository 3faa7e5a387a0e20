//! Validated target catalog

use crate::{CatalogError, CatalogFile, ValidationConfig};
use geodrop_domain::traits::TargetProvider;
use geodrop_domain::{RadiiError, Target, TargetId};
use std::path::Path;

/// An ordered, validated set of targets owned by the caller
///
/// Every target in a catalog has a valid location and well-formed radii.
/// Removing a claimed target and re-running classification is how the caller
/// retires an airdrop; the engine never edits the set.
#[derive(Debug, Clone, Default)]
pub struct TargetCatalog {
    targets: Vec<Target>,
    config: ValidationConfig,
}

impl TargetCatalog {
    /// Create an empty catalog with the given validation rules
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            targets: Vec::new(),
            config,
        }
    }

    /// Build a catalog from targets, validating each in order
    pub fn from_targets(targets: Vec<Target>, config: ValidationConfig) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(config);
        for target in targets {
            catalog.insert(target)?;
        }
        Ok(catalog)
    }

    /// Parse and validate a TOML catalog with default rules
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        Self::from_toml_str_with(contents, ValidationConfig::default())
    }

    /// Parse and validate a TOML catalog
    pub fn from_toml_str_with(contents: &str, config: ValidationConfig) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        let defaults = file.defaults;
        let targets = file
            .targets
            .into_iter()
            .map(|spec| spec.into_target(&defaults))
            .collect();
        Self::from_targets(targets, config)
    }

    /// Load and validate a TOML catalog file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Self::from_file_with(path, ValidationConfig::default())
    }

    /// Load a TOML catalog file under custom validation rules
    pub fn from_file_with<P: AsRef<Path>>(path: P, config: ValidationConfig) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str_with(&contents, config)?;
        tracing::info!("Loaded {} targets from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Validate and append a target
    pub fn insert(&mut self, target: Target) -> Result<(), CatalogError> {
        self.validate(&target)?;
        tracing::debug!("Catalog accepted target {}", target.id);
        self.targets.push(target);
        Ok(())
    }

    /// Remove a target (e.g. after a successful claim)
    pub fn remove(&mut self, id: &TargetId) -> Result<Target, CatalogError> {
        let position = self
            .targets
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| CatalogError::UnknownTarget(id.clone()))?;
        tracing::debug!("Catalog removed target {}", id);
        Ok(self.targets.remove(position))
    }

    /// Look up a target by id
    pub fn get(&self, id: &TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| &t.id == id)
    }

    /// Targets in catalog order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Number of targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the catalog holds no targets
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Check a target against the catalog's rules and existing entries
    fn validate(&self, target: &Target) -> Result<(), CatalogError> {
        // 1. Location
        target
            .location
            .validate()
            .map_err(|source| CatalogError::InvalidCoordinate {
                target_id: target.id.clone(),
                source,
            })?;

        // 2. Radii
        self.validate_radii(target)?;

        // 3. Uniqueness
        if self.targets.iter().any(|t| t.id == target.id) {
            return Err(CatalogError::DuplicateId(target.id.clone()));
        }
        if self.config.reject_duplicate_locations {
            if let Some(existing) = self.targets.iter().find(|t| t.location == target.location) {
                return Err(CatalogError::DuplicateLocation {
                    target_id: target.id.clone(),
                    existing_id: existing.id.clone(),
                });
            }
        }

        Ok(())
    }

    fn validate_radii(&self, target: &Target) -> Result<(), CatalogError> {
        let radii = target.radii;
        radii.check().map_err(|e| match e {
            RadiiError::Inverted { nearby_m, claimable_m } => CatalogError::RadiusInvariant {
                target_id: target.id.clone(),
                nearby_m,
                claimable_m,
            },
            invalid @ RadiiError::Invalid { .. } => CatalogError::InvalidRadius {
                target_id: target.id.clone(),
                reason: invalid.to_string(),
            },
        })?;

        if radii.nearby_m > self.config.max_nearby_m {
            return Err(CatalogError::InvalidRadius {
                target_id: target.id.clone(),
                reason: format!(
                    "nearby radius {} exceeds the maximum of {}",
                    radii.nearby_m, self.config.max_nearby_m
                ),
            });
        }

        Ok(())
    }
}

impl TargetProvider for TargetCatalog {
    type Error = std::convert::Infallible;

    fn targets(&self) -> Result<Vec<Target>, Self::Error> {
        Ok(self.targets.clone())
    }
}
