use std::{collections::HashSet, thread};

use crate::{
    provider::{IdKind, Provider},
    providers,
    registry::{self, Registry},
};

const SEQUENTIAL: usize = 10_000;
const THREADS: usize = 8;
const PER_THREAD: usize = 10_000;

/// Every compiled provider with its default config, in install order.
fn all_providers() -> Vec<Provider> {
    let mut all = Vec::new();
    #[cfg(feature = "cuid2")]
    all.push(providers::cuid2::provider(Default::default()).unwrap());
    #[cfg(feature = "nanoid")]
    all.push(providers::nanoid::provider(Default::default()).unwrap());
    #[cfg(feature = "shortid")]
    all.push(providers::shortid::provider(Default::default()).unwrap());
    #[cfg(feature = "sonyflake")]
    all.push(providers::sonyflake::provider(Default::default()).unwrap());
    #[cfg(feature = "snowflake")]
    all.push(providers::snowflake::provider(Default::default()).unwrap());
    #[cfg(feature = "xid")]
    all.push(providers::xid::provider().unwrap());
    #[cfg(feature = "ksuid")]
    all.push(providers::ksuid::provider().unwrap());
    #[cfg(feature = "uuid")]
    {
        use providers::uuid;
        all.push(uuid::provider_v1().unwrap());
        all.push(uuid::provider_v6().unwrap());
        all.push(uuid::provider_v7().unwrap());
        all.push(uuid::provider_v4(uuid::NAME_V4).unwrap());
        all.push(uuid::provider_v4(uuid::NAME).unwrap());
    }
    #[cfg(feature = "ulid")]
    all.push(providers::ulid::provider(Default::default()).unwrap());
    all.push(providers::number::provider(Default::default()).unwrap());
    all
}

fn local_registry() -> Registry {
    let registry = Registry::new();
    for provider in all_providers() {
        registry.register(provider);
    }
    registry
}

fn names_of<T: IdKind>(registry: &Registry) -> Vec<String> {
    registry
        .names()
        .into_iter()
        .filter(|name| registry.get::<T>(name).is_some())
        .collect()
}

fn assert_sequential_unique<T>(registry: &Registry)
where
    T: IdKind + Eq + std::hash::Hash + core::fmt::Debug,
{
    for name in names_of::<T>(registry) {
        let generator = registry.get::<T>(&name).unwrap();
        let mut seen = HashSet::with_capacity(SEQUENTIAL);
        for _ in 0..SEQUENTIAL {
            let id = generator.generate();
            assert!(generator.validate(&id), "{name}: {id:?} does not validate");
            assert!(seen.insert(id), "{name}: duplicate id");
        }
    }
}

fn assert_concurrent_unique<T>(registry: &Registry)
where
    T: IdKind + Eq + std::hash::Hash + Send,
{
    for name in names_of::<T>(registry) {
        let generator = registry.get::<T>(&name).unwrap();
        let batches: Vec<Vec<T>> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let generator = generator.clone();
                    s.spawn(move || (0..PER_THREAD).map(|_| generator.generate()).collect::<Vec<T>>())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut seen = HashSet::with_capacity(THREADS * PER_THREAD);
        for id in batches.into_iter().flatten() {
            assert!(seen.insert(id), "{name}: duplicate id across threads");
        }
    }
}

#[test]
fn string_ids_validate_and_are_unique() {
    assert_sequential_unique::<String>(&local_registry());
}

#[test]
fn number_ids_validate_and_are_unique() {
    assert_sequential_unique::<i64>(&local_registry());
}

#[test]
fn string_ids_are_unique_across_threads() {
    assert_concurrent_unique::<String>(&local_registry());
}

#[test]
fn number_ids_are_unique_across_threads() {
    assert_concurrent_unique::<i64>(&local_registry());
}

#[test]
fn handles_report_their_registered_name() {
    let registry = local_registry();
    for name in registry.names() {
        let provider = registry.provider(&name).unwrap();
        assert_eq!(provider.name(), name);
        if let Some(generator) = registry.get::<String>(&name) {
            assert_eq!(generator.name(), name);
        }
        if let Some(generator) = registry.get::<i64>(&name) {
            assert_eq!(generator.name(), name);
        }
    }
}

#[test]
fn declared_width_matches_output() {
    let registry = local_registry();
    for name in names_of::<String>(&registry) {
        let generator = registry.get::<String>(&name).unwrap();
        let Some(width) = generator.width() else {
            continue;
        };
        for _ in 0..100 {
            assert_eq!(generator.generate().chars().count(), width, "{name}");
        }
    }
}

#[test]
fn foreign_strings_are_rejected() {
    let registry = local_registry();
    for name in names_of::<String>(&registry) {
        assert!(!registry.validate(&name, ""), "{name} accepted an empty id");
        assert!(
            !registry.validate(&name, "not-a-valid-id-of-this-family"),
            "{name} accepted a foreign id"
        );
    }
}

#[test]
fn time_ordered_providers_sort_in_generation_order() {
    let registry = local_registry();
    let sortable_strings = [
        "ulid", "uuid-v6", "uuid-v7", "ksuid", "xid", "snowflake",
    ];
    for name in sortable_strings {
        let Some(generator) = registry.get::<String>(name) else {
            continue;
        };
        let ids: Vec<String> = (0..SEQUENTIAL).map(|_| generator.generate()).collect();
        if name == "snowflake" {
            let numbers: Vec<i64> = ids.iter().map(|id| id.parse().unwrap()).collect();
            assert!(numbers.is_sorted_by(|a, b| a < b), "{name}");
        } else {
            assert!(ids.is_sorted_by(|a, b| a < b), "{name}");
        }
    }

    for name in ["snowflake", "sonyflake", "number"] {
        let Some(generator) = registry.get::<i64>(name) else {
            continue;
        };
        let ids: Vec<i64> = (0..SEQUENTIAL).map(|_| generator.generate()).collect();
        assert!(ids.is_sorted_by(|a, b| a < b), "{name}");
    }
}

#[test]
fn capabilities_match_the_provider_table() {
    let registry = local_registry();
    let expected: &[(&str, bool, bool)] = &[
        #[cfg(feature = "ulid")]
        ("ulid", true, false),
        #[cfg(feature = "uuid")]
        ("uuid", true, false),
        #[cfg(feature = "xid")]
        ("xid", true, false),
        #[cfg(feature = "ksuid")]
        ("ksuid", true, false),
        #[cfg(feature = "nanoid")]
        ("nanoid", true, false),
        #[cfg(feature = "shortid")]
        ("shortid", true, false),
        #[cfg(feature = "snowflake")]
        ("snowflake", true, true),
        #[cfg(feature = "sonyflake")]
        ("sonyflake", false, true),
        #[cfg(feature = "cuid2")]
        ("cuid2", true, false),
        ("number", true, true),
    ];
    for &(name, string, number) in expected {
        assert_eq!(registry.get::<String>(name).is_some(), string, "{name}");
        assert_eq!(registry.get::<i64>(name).is_some(), number, "{name}");
    }
}

#[cfg(feature = "uuid")]
#[test]
fn uuid_alias_cross_validates() {
    let registry = local_registry();
    let v4 = registry.get::<String>("uuid-v4").unwrap().generate();
    let alias = registry.get::<String>("uuid").unwrap().generate();
    assert!(registry.validate("uuid", &v4));
    assert!(registry.validate("uuid-v4", &alias));
    assert_eq!(::uuid::Uuid::parse_str(&alias).unwrap().get_version_num(), 4);
}

#[cfg(feature = "snowflake")]
#[test]
fn snowflake_vends_positive_numbers_and_strings() {
    let registry = local_registry();
    let number = registry.get::<i64>("snowflake").unwrap();
    assert!(number.generate() > 0);
    let string = registry.get::<String>("snowflake").unwrap();
    assert!(string.generate().parse::<i64>().unwrap() > 0);
}

#[cfg(feature = "ulid")]
#[test]
fn ulid_has_no_number_form() {
    let registry = local_registry();
    assert!(registry.get::<i64>("ulid").is_none());
}

#[test]
fn sizes_are_reported_in_bits() {
    let registry = local_registry();
    let expected: &[(&str, u32)] = &[
        #[cfg(feature = "ulid")]
        ("ulid", 128),
        #[cfg(feature = "uuid")]
        ("uuid-v7", 128),
        #[cfg(feature = "xid")]
        ("xid", 96),
        #[cfg(feature = "ksuid")]
        ("ksuid", 160),
        #[cfg(feature = "nanoid")]
        ("nanoid", 126),
        #[cfg(feature = "shortid")]
        ("shortid", 0),
        #[cfg(feature = "snowflake")]
        ("snowflake", 64),
        #[cfg(feature = "sonyflake")]
        ("sonyflake", 63),
        #[cfg(feature = "cuid2")]
        ("cuid2", 0),
        ("number", 64),
    ];
    for &(name, size) in expected {
        assert_eq!(registry.provider(name).unwrap().size(), size, "{name}");
    }
}

#[test]
fn install_all_registers_every_provider_and_ends_on_ulid() {
    providers::install_all();
    let local = local_registry();
    for name in local.names() {
        assert!(registry::contains(&name), "{name} missing from the global registry");
    }
    #[cfg(feature = "ulid")]
    assert_eq!(registry::default_name().as_deref(), Some("ulid"));
    let default = registry::default::<String>().unwrap();
    assert!(registry::validate(default.name(), &default.generate()));
}

#[cfg(feature = "serde")]
#[test]
fn configs_deserialize_with_defaults() {
    #[cfg(feature = "snowflake")]
    {
        let config: providers::snowflake::SnowflakeConfig =
            serde_json::from_str(r#"{"node_id": 12}"#).unwrap();
        assert_eq!(config.node_id, Some(12));
        assert!(providers::snowflake::provider(config).is_ok());
    }
    #[cfg(feature = "shortid")]
    {
        let config: providers::shortid::ShortIdConfig =
            serde_json::from_str(r#"{"worker": 4, "seed": 7}"#).unwrap();
        assert_eq!(config.worker, Some(4));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.alphabet, None);
    }
    #[cfg(feature = "ulid")]
    {
        let config: providers::ulid::UlidConfig = serde_json::from_str("{}").unwrap();
        assert!(config.monotonic);
    }
    #[cfg(feature = "nanoid")]
    {
        let config: providers::nanoid::NanoIdConfig =
            serde_json::from_str(r#"{"alphabet": "0123456789"}"#).unwrap();
        assert_eq!(config.size, providers::nanoid::DEFAULT_SIZE);
        assert_eq!(config.alphabet.as_deref(), Some("0123456789"));
    }
}
