//! Profile registry.
//!
//! Holds compiled profiles together with the vocabulary set they were
//! compiled against. The registry is built once, single-threaded, and then
//! shared read-only (`&ProfileRegistry` or `Arc<ProfileRegistry>`).

use std::collections::HashMap;
use std::path::PathBuf;

use mms_model::{ProfileDefinition, Vocabularies};
use mms_transform::{Engine, MappingProfile, ProfileError};

use crate::error::{RegistryError, Result};
use crate::loader::{builtin_definitions, builtin_vocabularies, insert_table, load_directory};
use crate::paths::profiles_dir_from_env;

/// Configuration for building a registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Register the embedded profiles and vocabularies.
    pub include_builtin: bool,
    /// Directory of extra `*.json` profiles and `*.csv` vocabularies.
    pub profiles_dir: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            profiles_dir: None,
        }
    }
}

impl RegistryConfig {
    /// Built-in profiles plus `MMS_PROFILES_DIR`, when set.
    pub fn from_env() -> Self {
        Self {
            profiles_dir: profiles_dir_from_env(),
            ..Self::default()
        }
    }

    /// Override the profiles directory (a CLI flag wins over the environment).
    #[must_use]
    pub fn with_profiles_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.profiles_dir = dir;
        }
        self
    }
}

/// Compiled profiles indexed by id and marketplace.
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    vocabularies: Vocabularies,
    /// Registration order.
    profiles: Vec<MappingProfile>,
    by_id: HashMap<String, usize>,
}

impl ProfileRegistry {
    /// Empty registry over the given vocabularies.
    pub fn new(vocabularies: Vocabularies) -> Self {
        Self {
            vocabularies,
            profiles: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Registry with every embedded vocabulary and profile.
    pub fn builtin() -> Result<Self> {
        Self::load(&RegistryConfig::default())
    }

    /// Build a registry from configuration.
    ///
    /// Embedded data is registered first (when enabled), then the directory's
    /// vocabularies, then its profiles in file-name order.
    pub fn load(config: &RegistryConfig) -> Result<Self> {
        let mut vocabularies = if config.include_builtin {
            builtin_vocabularies()?
        } else {
            Vocabularies::new()
        };

        let (extra_tables, extra_profiles) = match &config.profiles_dir {
            Some(dir) => {
                let contents = load_directory(dir)?;
                (contents.vocabularies, contents.profiles)
            }
            None => (Vec::new(), Vec::new()),
        };
        for table in extra_tables {
            let source_name = format!("{}.csv", table.name());
            insert_table(&mut vocabularies, table, &source_name)?;
        }

        let mut registry = Self::new(vocabularies);
        if config.include_builtin {
            for definition in builtin_definitions()? {
                let source_name = format!("built-in profile {}", definition.id);
                registry.register_definition(definition, &source_name)?;
            }
        }
        for (file_name, definition) in extra_profiles {
            registry.register_definition(definition, &file_name)?;
        }

        tracing::info!(
            profiles = registry.len(),
            marketplaces = registry.marketplaces().len(),
            vocabularies = registry.vocabularies.len(),
            "Profile registry initialized"
        );
        Ok(registry)
    }

    /// Compile `definition` against this registry's vocabularies and register it.
    pub fn register_definition(
        &mut self,
        definition: ProfileDefinition,
        source_name: &str,
    ) -> Result<&MappingProfile> {
        let profile = MappingProfile::compile(definition, &self.vocabularies).map_err(|source| {
            RegistryError::InvalidProfile {
                source_name: source_name.to_string(),
                source,
            }
        })?;
        self.register(profile)
    }

    /// Register a compiled profile. Ids are unique, and every vocabulary
    /// table the profile translates through must be held by this registry.
    pub fn register(&mut self, profile: MappingProfile) -> Result<&MappingProfile> {
        if self.by_id.contains_key(profile.id()) {
            return Err(RegistryError::DuplicateProfileId {
                id: profile.id().to_string(),
            });
        }
        self.check_vocabularies(&profile)?;
        tracing::debug!(
            id = %profile.id(),
            marketplace = %profile.marketplace(),
            fields = profile.mappings().len(),
            "Registered profile"
        );
        let index = self.profiles.len();
        self.by_id.insert(profile.id().to_string(), index);
        self.profiles.push(profile);
        Ok(&self.profiles[index])
    }

    fn check_vocabularies(&self, profile: &MappingProfile) -> Result<()> {
        for mapping in profile.mappings() {
            let Some(table) = mapping.options.vocabulary() else {
                continue;
            };
            if !self.vocabularies.contains(table) {
                return Err(RegistryError::InvalidProfile {
                    source_name: format!("profile {}", profile.id()),
                    source: ProfileError::UnknownVocabulary {
                        profile: profile.id().to_string(),
                        field: mapping.target_field.clone(),
                        table: table.to_string(),
                    },
                });
            }
        }
        Ok(())
    }

    pub fn get_by_id(&self, id: &str) -> Result<&MappingProfile> {
        self.by_id
            .get(id)
            .map(|&index| &self.profiles[index])
            .ok_or_else(|| RegistryError::ProfileNotFound { id: id.to_string() })
    }

    /// All profiles for a marketplace in registration order.
    ///
    /// Marketplace names match ASCII case-insensitively.
    pub fn get_by_marketplace(&self, marketplace: &str) -> Result<Vec<&MappingProfile>> {
        let wanted = marketplace.trim();
        let matches: Vec<&MappingProfile> = self
            .profiles
            .iter()
            .filter(|profile| profile.marketplace().eq_ignore_ascii_case(wanted))
            .collect();
        if matches.is_empty() {
            return Err(RegistryError::MarketplaceNotFound {
                marketplace: marketplace.to_string(),
            });
        }
        Ok(matches)
    }

    /// Distinct marketplace names in first-registration order.
    pub fn marketplaces(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for profile in &self.profiles {
            let name = profile.marketplace();
            if !names.iter().any(|seen| seen.eq_ignore_ascii_case(name)) {
                names.push(name);
            }
        }
        names
    }

    /// All profiles in registration order.
    pub fn profiles(&self) -> &[MappingProfile] {
        &self.profiles
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    /// An engine bound to this registry's vocabularies.
    pub fn engine(&self) -> Engine<'_> {
        Engine::new(&self.vocabularies)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
