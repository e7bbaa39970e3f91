//! The immutable event catalog.
//!
//! Built once from an ABI document, read-only afterwards: there is no API to
//! add or remove events after construction. Share it across threads by
//! reference or behind an `Arc`.

use logabi_core::{
    error::CatalogError,
    event::{EventDefinition, EventLookup},
    fingerprint::event_selector,
    B256,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::json::parse_events;

/// Selector → event definition map plus name-based diagnostics.
#[derive(Debug, Clone, Default)]
pub struct AbiCatalog {
    /// Distinct events in declaration order
    events: Vec<EventDefinition>,
    /// Selector → index into `events` (non-anonymous only)
    by_selector: HashMap<B256, usize>,
    /// Declared name → indices into `events` (all overloads, anonymous included)
    by_name: HashMap<String, Vec<usize>>,
    /// The single anonymous event, if exactly one is declared
    anonymous: Option<usize>,
}

impl AbiCatalog {
    /// Build a catalog from JSON ABI text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_json_with_hasher(json, event_selector)
    }

    /// Build a catalog, hashing signatures with `hasher` instead of keccak256.
    pub fn from_json_with_hasher(
        json: &str,
        hasher: impl Fn(&str) -> B256,
    ) -> Result<Self, CatalogError> {
        let mut definitions = Vec::new();
        for (index, event) in parse_events(json)? {
            definitions.push(event.to_definition(index, &hasher)?);
        }
        Self::from_definitions(definitions)
    }

    /// Build a catalog from already-constructed definitions.
    ///
    /// Identical definitions are deduplicated. Two different events sharing
    /// a selector fail with [`CatalogError::DuplicateSignatureHash`]. A
    /// definition that repeats a parameter name fails with
    /// [`CatalogError::MalformedAbiEntry`], indexed by its position in
    /// `definitions`.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = EventDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        let mut anonymous: Vec<usize> = Vec::new();

        for (index, def) in definitions.into_iter().enumerate() {
            if let Some(name) = repeated_param(&def) {
                return Err(CatalogError::MalformedAbiEntry {
                    index,
                    reason: format!("event '{}' declares parameter '{name}' twice", def.name),
                });
            }

            if def.anonymous {
                if anonymous.iter().any(|&i| catalog.events[i] == def) {
                    continue;
                }
                debug!("catalog: registered anonymous event {}", def.signature());
                anonymous.push(catalog.push(def));
                continue;
            }

            if let Some(&existing) = catalog.by_selector.get(&def.selector()) {
                let first = &catalog.events[existing];
                if *first == def {
                    debug!("catalog: skipping duplicate declaration of {}", def.signature());
                    continue;
                }
                return Err(CatalogError::DuplicateSignatureHash {
                    selector: def.selector(),
                    first: first.signature().to_string(),
                    second: def.signature().to_string(),
                });
            }

            debug!(
                "catalog: registered {} under {}",
                def.signature(),
                def.selector()
            );
            let selector = def.selector();
            let idx = catalog.push(def);
            catalog.by_selector.insert(selector, idx);
        }

        match anonymous.as_slice() {
            [] => {}
            [only] => catalog.anonymous = Some(*only),
            many => warn!(
                "catalog: {} anonymous events declared, none will be used for fallback matching",
                many.len()
            ),
        }

        Ok(catalog)
    }

    fn push(&mut self, def: EventDefinition) -> usize {
        let idx = self.events.len();
        self.by_name.entry(def.name.clone()).or_default().push(idx);
        self.events.push(def);
        idx
    }

    /// Look up a non-anonymous event by selector.
    pub fn get(&self, selector: &B256) -> Option<&EventDefinition> {
        self.by_selector.get(selector).map(|&i| &self.events[i])
    }

    /// All events declared under `name` (overloads included).
    pub fn by_name(&self, name: &str) -> Vec<&EventDefinition> {
        self.by_name
            .get(name)
            .map(|ids| ids.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default()
    }

    /// Canonical signatures declared under `name`.
    pub fn signatures(&self, name: &str) -> Vec<&str> {
        self.by_name(name).into_iter().map(|e| e.signature()).collect()
    }

    /// The anonymous event used for fallback matching, if any.
    pub fn anonymous_event(&self) -> Option<&EventDefinition> {
        self.anonymous.map(|i| &self.events[i])
    }

    /// Every distinct event, in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &EventDefinition> {
        self.events.iter()
    }

    /// Number of distinct events (anonymous included).
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn repeated_param(def: &EventDefinition) -> Option<&str> {
    let mut seen = HashSet::new();
    def.inputs
        .iter()
        .map(|p| p.name.as_str())
        .find(|name| !seen.insert(*name))
}

impl EventLookup for AbiCatalog {
    fn by_selector(&self, selector: &B256) -> Option<&EventDefinition> {
        self.get(selector)
    }

    fn anonymous(&self) -> Option<&EventDefinition> {
        self.anonymous_event()
    }
}
