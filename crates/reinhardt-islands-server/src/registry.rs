//! Component module cache.
//!
//! The registry plays the part of a process-wide module cache, made explicit
//! and injectable. Each canonical key owns its own slot lock, so
//! evict-then-load for one identifier is a single atomic step while other
//! identifiers resolve concurrently.
//!
//! ## Lock order
//!
//! The slot map lock is only held long enough to look up, insert or prune a
//! slot and is never acquired while a slot lock is held. Pruning inspects a
//! slot under the map lock only when the map holds the sole reference to it,
//! so that inspection never waits.
//!
//! ## Slot lifetime
//!
//! A slot lives only while it caches a module or a resolution is using it.
//! Failed loads, [`ComponentRegistry::invalidate`] and
//! [`ComponentRegistry::clear`] drop empty slots, so identifiers that never
//! resolve leave nothing behind.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ResolutionResult;
use crate::module::{ComponentLoader, Module, ModuleKey};

type Slot = Arc<Mutex<Option<Module>>>;

/// Cache of loaded component modules, keyed by canonical identifier.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
	slots: Mutex<HashMap<ModuleKey, Slot>>,
}

impl ComponentRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	fn slot(&self, key: &ModuleKey) -> Slot {
		self.slots.lock().entry(key.clone()).or_default().clone()
	}

	fn existing_slot(&self, key: &ModuleKey) -> Option<Slot> {
		self.slots.lock().get(key).cloned()
	}

	fn all_slots(&self) -> Vec<Slot> {
		self.slots.lock().values().cloned().collect()
	}

	/// Drops the slot for `key` if it is empty and unused.
	fn prune(&self, key: &ModuleKey) {
		let mut slots = self.slots.lock();
		if slots.get(key).is_some_and(is_vacant) {
			slots.remove(key);
		}
	}

	fn prune_all(&self) {
		self.slots.lock().retain(|_, slot| !is_vacant(slot));
	}

	/// Returns the cached module for `key`, if loaded.
	pub fn get(&self, key: &ModuleKey) -> Option<Module> {
		let slot = self.existing_slot(key)?;
		let entry = slot.lock();
		entry.clone()
	}

	/// Returns `true` if a module is cached for `key`.
	pub fn contains(&self, key: &ModuleKey) -> bool {
		self.get(key).is_some()
	}

	/// Returns the cached module, loading and caching it on a miss.
	pub fn get_or_load(
		&self,
		key: &ModuleKey,
		loader: &dyn ComponentLoader,
	) -> ResolutionResult<Module> {
		let slot = self.slot(key);
		let result = {
			let mut entry = slot.lock();
			if let Some(module) = entry.as_ref() {
				return Ok(module.clone());
			}
			loader.load(key).inspect(|module| {
				tracing::debug!(module = %key, "cached component module");
				*entry = Some(module.clone());
			})
		};

		drop(slot);
		if result.is_err() {
			self.prune(key);
		}
		result
	}

	/// Evicts any cached module for `key` and loads it afresh, atomically.
	///
	/// If loading fails the entry stays evicted.
	pub fn reload(&self, key: &ModuleKey, loader: &dyn ComponentLoader) -> ResolutionResult<Module> {
		let slot = self.slot(key);
		let result = {
			let mut entry = slot.lock();
			if entry.take().is_some() {
				tracing::debug!(module = %key, "evicted component module");
			}
			loader.load(key).inspect(|module| *entry = Some(module.clone()))
		};

		drop(slot);
		if result.is_err() {
			self.prune(key);
		}
		result
	}

	/// Evicts the cached module for `key`, returning whether one was cached.
	pub fn invalidate(&self, key: &ModuleKey) -> bool {
		let Some(slot) = self.existing_slot(key) else {
			return false;
		};
		let evicted = slot.lock().take().is_some();
		drop(slot);
		self.prune(key);
		if evicted {
			tracing::debug!(module = %key, "evicted component module");
		}
		evicted
	}

	/// Returns the number of cached modules.
	pub fn len(&self) -> usize {
		self.all_slots()
			.iter()
			.filter(|slot| slot.lock().is_some())
			.count()
	}

	/// Returns `true` if no module is cached.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Evicts every cached module.
	pub fn clear(&self) {
		for slot in self.all_slots() {
			slot.lock().take();
		}
		self.prune_all();
	}

	#[cfg(test)]
	fn slot_count(&self) -> usize {
		self.slots.lock().len()
	}
}

fn is_vacant(slot: &Slot) -> bool {
	Arc::strong_count(slot) == 1 && slot.lock().is_none()
}
