//! Configuration utilities for the ECS and your game.

use semver::Version;

/// This struct represents general configuration of the ECS.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    enable_validation: bool,
    entity_capacity: usize,
    system_capacity: usize,
}

pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
lazy_static::lazy_static! {
    pub static ref ENGINE_VERSION: Version =
        Version::parse(ENGINE_VERSION_STR).unwrap_or_else(|_| Version::new(0, 0, 0));
}

impl Config {
    /// Creates new configuration with given name, version and validation usage.
    pub const fn new(name: String, version: Version, enable_validation: bool) -> Self {
        Self {
            name,
            version,
            enable_validation,
            entity_capacity: 0,
            system_capacity: 0,
        }
    }

    /// Reserves space for at least `capacity` entities up front.
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.entity_capacity = capacity;
        self
    }

    /// Reserves space for at least `capacity` systems up front.
    pub fn with_system_capacity(mut self, capacity: usize) -> Self {
        self.system_capacity = capacity;
        self
    }

    /// Name of your game.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of your game.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// If the ECS checks its own consistency after every frame (useful for debugging).
    pub fn enable_validation(&self) -> bool {
        self.enable_validation
    }

    /// Count of entities to reserve space for.
    pub fn entity_capacity(&self) -> usize {
        self.entity_capacity
    }

    /// Count of systems to reserve space for.
    pub fn system_capacity(&self) -> usize {
        self.system_capacity
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            "Hello World".to_string(),
            Version::new(0, 0, 0),
            cfg!(debug_assertions),
        )
    }
}
