//! Registered drop targets of one editing surface.

use std::collections::BTreeMap;

use wbs_model::{SchemaPath, SchemaTarget};

use crate::error::SurfaceError;

/// Targets in registration order, indexed by path.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<SchemaTarget>,
    by_path: BTreeMap<SchemaPath, usize>,
}

impl TargetRegistry {
    /// Register targets. Paths must be unique.
    pub fn new(targets: Vec<SchemaTarget>) -> Result<Self, SurfaceError> {
        let mut by_path = BTreeMap::new();
        for (idx, target) in targets.iter().enumerate() {
            if by_path.insert(target.path.clone(), idx).is_some() {
                return Err(SurfaceError::DuplicateTarget(target.path.clone()));
            }
        }
        Ok(Self { targets, by_path })
    }

    pub fn get(&self, path: &SchemaPath) -> Option<&SchemaTarget> {
        self.by_path.get(path).map(|&idx| &self.targets[idx])
    }

    pub fn contains(&self, path: &SchemaPath) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaTarget> {
        self.targets.iter()
    }

    pub fn as_slice(&self) -> &[SchemaTarget] {
        &self.targets
    }

    pub fn required(&self) -> impl Iterator<Item = &SchemaTarget> {
        self.targets.iter().filter(|target| target.is_required)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
