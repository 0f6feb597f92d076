use std::fs;
use std::path::{Path, PathBuf};

use mms_model::{
    FieldMappingDef, ProfileDefinition, ProfileMetadata, Vocabularies, VocabularyTable,
};
use mms_profiles::{ProfileRegistry, RegistryConfig, RegistryError};
use mms_transform::{MappingProfile, ProfileError};

fn temp_profiles_dir(tag: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("mms_profiles_{tag}_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn cleanup_dir(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

fn profile(id: &str, marketplace: &str) -> MappingProfile {
    let definition = ProfileDefinition {
        id: id.to_string(),
        name: id.to_string(),
        marketplace: marketplace.to_string(),
        mappings: vec![FieldMappingDef::new("product_name", "title", "toString").required()],
        metadata: ProfileMetadata {
            version: "1.0".to_string(),
            required_fields: vec!["title".to_string()],
            ..ProfileMetadata::default()
        },
    };
    MappingProfile::compile(definition, &Vocabularies::new()).unwrap()
}

#[test]
fn register_rejects_duplicate_ids() {
    let mut registry = ProfileRegistry::new(Vocabularies::new());
    registry.register(profile("a", "naver")).unwrap();
    let err = registry.register(profile("a", "coupang")).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateProfileId { ref id } if id == "a"));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get_by_id("a").unwrap().marketplace(), "naver");
}

#[test]
fn register_rejects_profiles_using_vocabularies_the_registry_lacks() {
    let mut colours = Vocabularies::new();
    colours
        .insert(VocabularyTable::from_pairs("colour", [("black", "블랙")]))
        .unwrap();
    let definition = ProfileDefinition {
        id: "colours".to_string(),
        name: "Colours".to_string(),
        marketplace: "naver".to_string(),
        mappings: vec![
            FieldMappingDef::new("product_name", "title", "toString").required(),
            FieldMappingDef::new("colour", "색상", "toCategory").with_option("categoryMap", "colour"),
        ],
        metadata: ProfileMetadata {
            version: "1.0".to_string(),
            ..ProfileMetadata::default()
        },
    };
    let compiled = MappingProfile::compile(definition, &colours).unwrap();

    let mut registry = ProfileRegistry::new(Vocabularies::new());
    let err = registry.register(compiled.clone()).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InvalidProfile {
            source: ProfileError::UnknownVocabulary { ref field, ref table, .. },
            ..
        } if field == "색상" && table == "colour"
    ));
    assert!(registry.is_empty());

    let mut registry = ProfileRegistry::new(colours);
    registry.register(compiled).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn lookups_report_misses() {
    let mut registry = ProfileRegistry::new(Vocabularies::new());
    assert!(registry.is_empty());
    registry.register(profile("a", "naver")).unwrap();

    assert!(matches!(
        registry.get_by_id("b"),
        Err(RegistryError::ProfileNotFound { .. })
    ));
    let err = registry.get_by_marketplace("gmarket").unwrap_err();
    assert_eq!(err.to_string(), "no profiles registered for marketplace 'gmarket'");
}

#[test]
fn marketplace_lookup_keeps_registration_order_and_ignores_case() {
    let mut registry = ProfileRegistry::new(Vocabularies::new());
    registry.register(profile("n2", "naver")).unwrap();
    registry.register(profile("c1", "coupang")).unwrap();
    registry.register(profile("n1", "Naver")).unwrap();

    let ids: Vec<&str> = registry
        .get_by_marketplace("NAVER")
        .unwrap()
        .iter()
        .map(|p| p.id())
        .collect();
    assert_eq!(ids, ["n2", "n1"]);
    assert_eq!(registry.marketplaces(), ["naver", "coupang"]);
}

#[test]
fn loads_extra_profiles_and_vocabularies_from_directory() {
    let dir = temp_profiles_dir("extra");
    fs::write(
        dir.join("colour.csv"),
        "canonical,localized\nblack,블랙\nwhite,화이트\n",
    )
    .unwrap();
    fs::write(
        dir.join("gmarket.json"),
        r#"{
            "id": "gmarket-basic",
            "name": "Gmarket",
            "marketplace": "gmarket",
            "mappings": [
                { "sourceField": "product_name", "targetField": "상품명", "transformer": "toString", "required": true },
                { "sourceField": "colour", "targetField": "색상", "transformer": "toCategory", "options": { "categoryMap": "colour" } }
            ],
            "metadata": { "version": "1.0", "requiredFields": ["상품명"] }
        }"#,
    )
    .unwrap();
    fs::write(dir.join("README.txt"), "ignored").unwrap();

    let config = RegistryConfig::default().with_profiles_dir(Some(dir.clone()));
    let registry = ProfileRegistry::load(&config).unwrap();

    assert_eq!(registry.len(), 6);
    assert_eq!(registry.profiles().last().unwrap().id(), "gmarket-basic");
    assert!(registry.vocabularies().contains("colour"));
    assert_eq!(registry.get_by_marketplace("gmarket").unwrap().len(), 1);

    cleanup_dir(&dir);
}

#[test]
fn directory_only_registry_skips_builtins() {
    let dir = temp_profiles_dir("only");
    fs::write(
        dir.join("a.json"),
        r#"{"id": "only", "name": "Only", "marketplace": "x",
            "mappings": [{"sourceField": "a", "targetField": "A", "transformer": "toNumber"}],
            "metadata": {"version": "2"}}"#,
    )
    .unwrap();

    let config = RegistryConfig {
        include_builtin: false,
        profiles_dir: Some(dir.clone()),
    };
    let registry = ProfileRegistry::load(&config).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(registry.vocabularies().is_empty());

    cleanup_dir(&dir);
}

#[test]
fn invalid_directory_profile_names_the_file() {
    let dir = temp_profiles_dir("invalid");
    fs::write(
        dir.join("broken.json"),
        r#"{"id": "broken", "name": "Broken", "marketplace": "x",
            "mappings": [{"sourceField": "a", "targetField": "A", "transformer": "toMagic"}],
            "metadata": {"version": "1"}}"#,
    )
    .unwrap();

    let config = RegistryConfig::default().with_profiles_dir(Some(dir.clone()));
    let err = ProfileRegistry::load(&config).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidProfile { ref source_name, .. } if source_name == "broken.json"));

    cleanup_dir(&dir);
}

#[test]
fn directory_profile_cannot_shadow_a_builtin_id() {
    let dir = temp_profiles_dir("shadow");
    fs::write(
        dir.join("naver.json"),
        r#"{"id": "naver-smartstore", "name": "Mine", "marketplace": "naver",
            "mappings": [{"sourceField": "a", "targetField": "A", "transformer": "toString"}],
            "metadata": {"version": "1"}}"#,
    )
    .unwrap();

    let config = RegistryConfig::default().with_profiles_dir(Some(dir.clone()));
    let err = ProfileRegistry::load(&config).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateProfileId { .. }));

    cleanup_dir(&dir);
}

#[test]
fn missing_directory_is_an_error() {
    let config = RegistryConfig::default()
        .with_profiles_dir(Some(PathBuf::from("/definitely/not/a/profiles/dir")));
    assert!(matches!(
        ProfileRegistry::load(&config),
        Err(RegistryError::DirectoryNotFound { .. })
    ));
}

#[test]
fn flag_directory_wins_over_environment_value() {
    let base = RegistryConfig {
        include_builtin: true,
        profiles_dir: Some(PathBuf::from("/from/env")),
    };
    let kept = base.clone().with_profiles_dir(None);
    assert_eq!(kept.profiles_dir, Some(PathBuf::from("/from/env")));
    let overridden = base.with_profiles_dir(Some(PathBuf::from("/from/flag")));
    assert_eq!(overridden.profiles_dir, Some(PathBuf::from("/from/flag")));
}
