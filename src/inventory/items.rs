//! Item definitions shared by every inventory.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;
use serde::Deserialize;

/// Immutable catalog entry. Slots hold shared references to these.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
}

fn default_max_stack() -> u32 {
    1
}

/// All known items, keyed by id.
#[derive(Resource, Debug, Default, Clone)]
pub struct ItemCatalog {
    items: HashMap<String, Arc<ItemDefinition>>,
}

impl ItemCatalog {
    pub fn from_definitions(definitions: Vec<ItemDefinition>) -> Self {
        let items = definitions
            .into_iter()
            .map(|definition| (definition.id.clone(), Arc::new(definition)))
            .collect();
        Self { items }
    }

    pub fn get(&self, id: &str) -> Option<Arc<ItemDefinition>> {
        self.items.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    #[test]
    fn catalog_hands_out_shared_definitions() {
        let definitions: Vec<ItemDefinition> = parse_ron(
            "items.ron",
            r#"[
                (id: "potion", name: "Potion", max_stack: 5),
                (id: "key", name: "Rusty Key"),
            ]"#,
        )
        .unwrap();
        let catalog = ItemCatalog::from_definitions(definitions);

        assert_eq!(catalog.len(), 2);
        let a = catalog.get("potion").unwrap();
        let b = catalog.get("potion").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(catalog.get("key").unwrap().max_stack, 1);
        assert!(catalog.get("sword").is_none());
    }
}
