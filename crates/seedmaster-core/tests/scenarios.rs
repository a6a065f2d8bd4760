//! Integration tests exercising each policy end to end through a parsed TOML
//! config and a handful of registrations, rather than unit-testing a single
//! policy method in isolation.

use seedmaster_core::{EngineId, EventData, PolicyRegistry, Seed, SeedMaster};

fn master_from_toml(text: &str) -> SeedMaster {
    let tree: toml::Value = text.parse().expect("valid toml fixture");
    SeedMaster::new(PolicyRegistry::new().build(&tree).expect("policy builds"))
}

#[test]
fn auto_increment_three_engines_get_sequential_distinct_seeds() {
    let mut master = master_from_toml(
        "policy = \"autoIncrement\"\nbaseSeed = 100\ncheckRange = false\n",
    );
    let a = EngineId::module("modA", "");
    let b = EngineId::module("modB", "x");
    let c = EngineId::module("modB", "y");

    assert_eq!(master.get_seed(&a).unwrap(), Seed::new(100));
    assert_eq!(master.get_seed(&b).unwrap(), Seed::new(101));
    assert_eq!(master.get_seed(&c).unwrap(), Seed::new(102));

    // Re-querying returns the same values.
    assert_eq!(master.get_seed(&a).unwrap(), Seed::new(100));
    assert_eq!(master.get_seed(&b).unwrap(), Seed::new(101));
    assert_eq!(master.get_seed(&c).unwrap(), Seed::new(102));
}

#[test]
fn linear_mapping_rejects_the_third_engine_past_max_unique_engines() {
    let mut master = master_from_toml(
        "policy = \"linearMapping\"\nnJob = 5\nmaxUniqueEngines = 2\ncheckRange = true\n",
    );
    let a = EngineId::module("modA", "");
    let b = EngineId::module("modB", "");
    let c = EngineId::module("modC", "");

    assert_eq!(master.get_seed(&a).unwrap(), Seed::new(10));
    assert_eq!(master.get_seed(&b).unwrap(), Seed::new(11));
    let err = master.get_seed(&c).unwrap_err();
    assert_eq!(err.error_code(), "S1004");
}

#[test]
fn pre_defined_seed_looks_up_each_engine_and_errors_on_the_unlisted_one() {
    let mut master = master_from_toml("policy = \"preDefinedSeed\"\nmodA = 7\n[modB]\nx = 9\n");
    assert_eq!(master.get_seed(&EngineId::module("modA", "")).unwrap(), Seed::new(7));
    assert_eq!(master.get_seed(&EngineId::module("modB", "x")).unwrap(), Seed::new(9));
    let err = master.get_seed(&EngineId::module("modB", "y")).unwrap_err();
    assert_eq!(err.error_code(), "S1005");
}

#[test]
fn per_event_timestamp_hash_is_deterministic_and_timestamp_sensitive() {
    let mut master = master_from_toml("policy = \"perEvent\"\n");
    let id = EngineId::module("M", "i");

    let event = |timestamp, is_time_valid| EventData::new(1, 2, 3, timestamp, is_time_valid, "P", "M");

    let v1 = master.get_event_seed(&event(12345, true), &id).unwrap();
    master.on_new_event();
    let v1_again = master.get_event_seed(&event(12345, true), &id).unwrap();
    assert_eq!(v1, v1_again);

    master.on_new_event();
    let v2 = master.get_event_seed(&event(12346, true), &id).unwrap();
    assert_ne!(v1, v2);

    master.on_new_event();
    let err = master.get_event_seed(&event(12345, false), &id).unwrap_err();
    assert_eq!(err.error_code(), "S4001");
}

/// A unique-yielding policy never lets two distinct engines share a
/// configured seed.
#[test]
fn auto_increment_never_collides_across_many_engines() {
    let mut master = master_from_toml(
        "policy = \"autoIncrement\"\nbaseSeed = 0\ncheckRange = false\n",
    );
    let mut seen = std::collections::HashSet::new();
    for i in 0..200 {
        let id = EngineId::module(format!("mod{i}"), "");
        let seed = master.get_seed(&id).unwrap();
        assert!(seen.insert(seed), "seed {seed} reused at engine {i}");
    }
}

/// A frozen engine's current seed never moves and its reseed is always a
/// no-op.
#[test]
fn frozen_engine_is_immune_to_further_policy_driven_reseeding() {
    let mut master = master_from_toml(
        "policy = \"autoIncrement\"\nbaseSeed = 0\ncheckRange = false\n",
    );
    let id = EngineId::module("modA", "");
    master.register_new_seeder(&id, None).unwrap();
    master.freeze_seed(&id, Seed::new(999)).unwrap();

    for _ in 0..5 {
        assert_eq!(master.get_current_seed(&id), Seed::new(999));
        assert_eq!(master.reseed(&id).unwrap(), Seed::INVALID);
    }
}
