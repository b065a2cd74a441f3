//! Entity registry backed by JSON descriptor files
//!
//! Descriptors live at `<data_dir>/entities/entity_<name>.json`, one file
//! per entity. A malformed file fails the whole load.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event};

use super::errors::{OrmError, OrmResult};
use super::schema::EntitySchema;

/// In-memory registry of entity descriptors, loadable from disk.
pub struct EntityRegistry {
    entity_dir: PathBuf,
    entities: HashMap<String, Arc<EntitySchema>>,
}

impl EntityRegistry {
    /// Creates an empty registry rooted at `<data_dir>/entities/`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            entity_dir: data_dir.join("entities"),
            entities: HashMap::new(),
        }
    }

    pub fn entity_dir(&self) -> &Path {
        &self.entity_dir
    }

    /// Loads every `.json` descriptor in the entity directory.
    ///
    /// A missing directory is not an error: there is simply nothing to load.
    /// A file naming an entity that is already registered fails the load.
    pub fn load_all(&mut self) -> OrmResult<()> {
        if !self.entity_dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(&self.entity_dir).map_err(|e| {
            OrmError::entity_malformed(
                self.entity_dir.display().to_string(),
                format!("Failed to read entity directory: {}", e),
            )
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                OrmError::entity_malformed(
                    self.entity_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            self.load_entity_file(&path)?;
        }

        let count = self.entities.len().to_string();
        log_event_with_fields(Event::EntitiesLoaded, &[("count", count.as_str())]);
        Ok(())
    }

    fn load_entity_file(&mut self, path: &Path) -> OrmResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            OrmError::entity_malformed(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let entity: EntitySchema = serde_json::from_str(&content).map_err(|e| {
            OrmError::entity_malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        entity
            .validate_structure()
            .map_err(|e| OrmError::entity_malformed(path.display().to_string(), e))?;

        if self.entities.contains_key(&entity.name) {
            return Err(OrmError::entity_immutable(&entity.name));
        }

        self.entities.insert(entity.name.clone(), Arc::new(entity));
        Ok(())
    }

    /// Registers a descriptor directly. Names are write-once.
    pub fn register(&mut self, entity: EntitySchema) -> OrmResult<Arc<EntitySchema>> {
        entity
            .validate_structure()
            .map_err(|e| OrmError::entity_malformed("<in-memory>", e))?;

        if self.entities.contains_key(&entity.name) {
            return Err(OrmError::entity_immutable(&entity.name));
        }

        let entity = Arc::new(entity);
        self.entities.insert(entity.name.clone(), Arc::clone(&entity));
        Ok(entity)
    }

    /// Gets a descriptor by entity name.
    pub fn get(&self, name: &str) -> Option<Arc<EntitySchema>> {
        self.entities.get(name).cloned()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn all_entities(&self) -> impl Iterator<Item = &Arc<EntitySchema>> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Writes a descriptor to the entity directory.
    pub fn save_entity(&self, entity: &EntitySchema) -> OrmResult<PathBuf> {
        let path = self.entity_dir.join(format!("entity_{}.json", entity.name));

        if path.exists() {
            return Err(OrmError::entity_immutable(&entity.name));
        }

        fs::create_dir_all(&self.entity_dir).map_err(|e| {
            OrmError::entity_malformed(
                self.entity_dir.display().to_string(),
                format!("Failed to create entity directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(entity).map_err(|e| {
            OrmError::entity_malformed(
                path.display().to_string(),
                format!("Failed to serialize entity: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            OrmError::entity_malformed(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orm::errors::OrmErrorCode;
    use crate::orm::schema::{PropertyDef, Table};
    use tempfile::TempDir;

    fn article() -> EntitySchema {
        EntitySchema::new(
            "Article",
            Table::new("article", ["id", "name"]),
            vec![PropertyDef::column("id"), PropertyDef::column("name")],
        )
    }

    #[test]
    fn test_register_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = EntityRegistry::new(temp_dir.path());

        registry.register(article()).unwrap();

        let entity = registry.get("Article").unwrap();
        assert_eq!(entity.table.name, "article");
    }

    #[test]
    fn test_register_twice_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = EntityRegistry::new(temp_dir.path());

        registry.register(article()).unwrap();
        let err = registry.register(article()).unwrap_err();
        assert_eq!(err.code(), OrmErrorCode::QkEntityImmutable);
    }

    #[test]
    fn test_register_invalid_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = EntityRegistry::new(temp_dir.path());

        let broken = EntitySchema::new("Broken", Table::new("", ["id"]), vec![]);
        let err = registry.register(broken).unwrap_err();
        assert_eq!(err.code(), OrmErrorCode::QkEntityMalformed);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let registry = EntityRegistry::new(temp_dir.path());
        registry.save_entity(&article()).unwrap();

        let mut reloaded = EntityRegistry::new(temp_dir.path());
        reloaded.load_all().unwrap();

        assert!(reloaded.exists("Article"));
        assert_eq!(*reloaded.get("Article").unwrap(), article());
    }

    #[test]
    fn test_malformed_file_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        let registry = EntityRegistry::new(temp_dir.path());
        fs::create_dir_all(registry.entity_dir()).unwrap();
        fs::write(registry.entity_dir().join("entity_bad.json"), "{ not json").unwrap();

        let mut registry = registry;
        let err = registry.load_all().unwrap_err();
        assert_eq!(err.code(), OrmErrorCode::QkEntityMalformed);
    }

    #[test]
    fn test_loaded_file_cannot_replace_registered_entity() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = EntityRegistry::new(temp_dir.path());
        registry.register(article()).unwrap();

        let mut impostor = article();
        impostor.table = Table::new("other", ["id", "name"]);
        fs::create_dir_all(registry.entity_dir()).unwrap();
        fs::write(
            registry.entity_dir().join("entity_x.json"),
            serde_json::to_string(&impostor).unwrap(),
        )
        .unwrap();

        let err = registry.load_all().unwrap_err();
        assert_eq!(err.code(), OrmErrorCode::QkEntityImmutable);
        assert_eq!(registry.get("Article").unwrap().table.name, "article");
    }

    #[test]
    fn test_duplicate_names_across_files_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let writer = EntityRegistry::new(temp_dir.path());
        writer.save_entity(&article()).unwrap();

        let mut copy = article();
        copy.table = Table::new("other", ["id", "name"]);
        fs::write(
            writer.entity_dir().join("entity_Article_copy.json"),
            serde_json::to_string(&copy).unwrap(),
        )
        .unwrap();

        let mut registry = EntityRegistry::new(temp_dir.path());
        let err = registry.load_all().unwrap_err();
        assert_eq!(err.code(), OrmErrorCode::QkEntityImmutable);
        assert_eq!(err.entity(), Some("Article"));
    }

    #[test]
    fn test_load_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = EntityRegistry::new(temp_dir.path());

        assert!(registry.load_all().is_ok());
        assert_eq!(registry.entity_count(), 0);
    }
}
