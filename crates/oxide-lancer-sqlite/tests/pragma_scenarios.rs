//! Scenario tests for PRAGMA generation.

mod common;
use common::*;

use oxide_lancer_core::ast::PragmaBody;
use oxide_lancer_sqlite::pragma::MIN_BUSY_TIMEOUT;
use oxide_lancer_sqlite::{Pragma, PragmaError, PragmaGenerator, PragmaOptions, Randomly};
use regex::Regex;

const SAMPLES: u64 = 1000;

fn samples(pragma: Pragma) -> impl Iterator<Item = oxide_lancer_core::Query> {
    (0..SAMPLES).map(move |seed| {
        PragmaGenerator::generate_pragma(pragma, &mut Randomly::seeded(seed))
    })
}

#[test]
fn busy_timeout_with_forced_value() {
    let re = Regex::new(r"^PRAGMA (main\.|temp\.)?busy_timeout = (\d+);$").unwrap();
    for seed in 0..100 {
        // schema coin, attach-value coin, use-zero coin
        let mut r = ScriptedRandomness::new(seed).coins([seed % 2 == 0, true, false]);
        let query = PragmaGenerator::generate_pragma(Pragma::BusyTimeout, &mut r);
        let caps = re
            .captures(&query.sql)
            .unwrap_or_else(|| panic!("unexpected statement {}", query.sql));
        let value: i64 = caps[2].parse().unwrap();
        assert!(value >= MIN_BUSY_TIMEOUT, "{}", query.sql);
        assert!(query.expected_errors.is_empty());
    }
}

#[test]
fn busy_timeout_clamps_small_draws() {
    let mut r = ScriptedRandomness::new(0)
        .coins([false, true, false])
        .integers([-5]);
    let query = PragmaGenerator::generate_pragma(Pragma::BusyTimeout, &mut r);
    assert_eq!(query.sql, "PRAGMA busy_timeout = 10000;");
    assert!(r.exhausted());
}

#[test]
fn busy_timeout_non_zero_values_are_large() {
    for query in samples(Pragma::BusyTimeout) {
        if let Some(value) = integer_value(&query) {
            assert!(value == 0 || value >= MIN_BUSY_TIMEOUT, "{}", query.sql);
        }
    }
}

#[test]
fn wal_checkpoint_always_calls_with_a_mode() {
    let re = Regex::new(r"^PRAGMA wal_checkpoint\((PASSIVE|FULL|RESTART|TRUNCATE)\);$").unwrap();
    for query in samples(Pragma::WalCheckpoint) {
        assert!(re.is_match(&query.sql), "{}", query.sql);
        assert_eq!(
            query.expected_errors.iter().collect::<Vec<_>>(),
            vec!["database table is locked"]
        );
    }
}

#[test]
fn journal_mode_is_never_off() {
    let modes = ["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL"];
    for query in samples(Pragma::JournalMode) {
        if let Some(mode) = word_value(&query) {
            assert!(modes.contains(&mode.as_str()), "{}", query.sql);
        }
        assert!(!query.sql.contains("OFF"), "{}", query.sql);
        assert!(query.is_expected_error("cannot change into wal mode from within a transaction"));
    }
}

#[test]
fn secure_delete_stays_in_domain() {
    for query in samples(Pragma::SecureDelete) {
        if let Some(mode) = word_value(&query) {
            assert!(["true", "false", "FAST"].contains(&mode.as_str()), "{}", query.sql);
        }
    }
}

#[test]
fn soft_heap_limit_is_zero_or_positive() {
    for query in samples(Pragma::SoftHeapLimit) {
        if let Some(value) = integer_value(&query) {
            assert!(value >= 0, "{}", query.sql);
        }
    }
}

#[test]
fn scripted_decisions_are_drawn_in_order() {
    // schema coin, value coin, schema pick, zero coin, value
    let mut r = ScriptedRandomness::new(0)
        .coins([true, true, false])
        .indices([1])
        .integers([77]);
    let query = PragmaGenerator::generate_pragma(Pragma::CacheSize, &mut r);
    assert_eq!(query.sql, "PRAGMA temp.cache_size = 77;");
    assert!(r.exhausted());

    let mut r = ScriptedRandomness::new(0).coins([false, true]).indices([1]);
    let query = PragmaGenerator::generate_pragma(Pragma::AutomaticIndex, &mut r);
    assert_eq!(query.sql, "PRAGMA automatic_index = false;");
    assert!(r.exhausted());
}

#[test]
fn value_coin_false_leaves_value_off() {
    let mut r = ScriptedRandomness::new(0).coins([false, false]);
    let query = PragmaGenerator::generate_pragma(Pragma::BusyTimeout, &mut r);
    assert_eq!(query.sql, "PRAGMA busy_timeout;");
    assert!(r.exhausted());
}

#[test]
fn cache_spill_variants_share_a_keyword() {
    let mut r = ScriptedRandomness::new(0).coins([false, true]).indices([0]);
    let query = PragmaGenerator::generate_pragma(Pragma::CacheSpillEnabled, &mut r);
    assert_eq!(query.sql, "PRAGMA cache_spill = true;");

    let mut r = ScriptedRandomness::new(0).coins([false, true]).integers([-3]);
    let query = PragmaGenerator::generate_pragma(Pragma::CacheSpillSize, &mut r);
    assert_eq!(query.sql, "PRAGMA cache_spill = -3;");
}

#[test]
fn integrity_check_errors_do_not_depend_on_call_form() {
    let mut r = ScriptedRandomness::new(0).coins([false]).integers([42]);
    let call = PragmaGenerator::generate_pragma(Pragma::IntegrityCheck, &mut r);
    assert_eq!(call.sql, "PRAGMA integrity_check(42);");

    let mut r = ScriptedRandomness::new(0)
        .coins([true, true, false])
        .indices([0]);
    let plain = PragmaGenerator::generate_pragma(Pragma::IntegrityCheck, &mut r);
    assert_eq!(plain.sql, "PRAGMA main.integrity_check;");

    assert_eq!(call.expected_errors, plain.expected_errors);
    assert_eq!(call.expected_errors.len(), 7);
    assert!(call.is_expected_error("malformed JSON"));
}

#[test]
fn incremental_vacuum_call_form() {
    let mut r = ScriptedRandomness::new(0).coins([false]).integers([-1]);
    let query = PragmaGenerator::generate_pragma(Pragma::IncrementalVacuum, &mut r);
    assert_eq!(query.sql, "PRAGMA incremental_vacuum(-1);");
    assert!(query.is_expected_error("JSON path error"));
}

#[test]
fn every_pragma_round_trips_through_the_parser() {
    for pragma in Pragma::ALL {
        for query in samples(pragma).take(100) {
            let stmt = parse(&query);
            assert_eq!(stmt.name, pragma.keyword(), "{}", query.sql);
            assert_eq!(format!("{stmt};"), query.sql);
            if let Some(schema) = &stmt.schema {
                assert!(schema == "main" || schema == "temp", "{}", query.sql);
            }
            if matches!(stmt.body, PragmaBody::Call(_)) {
                assert!(stmt.schema.is_none(), "{}", query.sql);
            }
        }
    }
}

#[test]
fn generated_statements_parse_and_stay_in_enabled_set() {
    let generator = PragmaGenerator::default();
    let mut r = Randomly::seeded(2024);
    for _ in 0..SAMPLES {
        let query = generator.generate(&mut r);
        assert!(query.sql.ends_with(';'));
        let stmt = parse(&query);
        assert!(
            generator.enabled().iter().any(|p| p.keyword() == stmt.name),
            "{}",
            query.sql
        );
    }
}

#[test]
fn restricted_options_only_yield_enabled_pragmas() {
    let options = PragmaOptions::only([Pragma::Stats, Pragma::Threads]);
    let generator = PragmaGenerator::new(options).unwrap();
    let mut r = Randomly::seeded(5);
    for _ in 0..200 {
        let name = parse(&generator.generate(&mut r)).name;
        assert!(name == "stats" || name == "threads", "{name}");
    }
}

#[test]
fn options_from_json() {
    let json = serde_json::to_string(&PragmaOptions::default()).unwrap();
    assert!(json.contains("\"cache_spill_enabled\""));
    assert!(json.contains("\"wal_checkpoint\""));

    let options: PragmaOptions =
        serde_json::from_str(r#"{"enabled": ["optimize", "journal_mode"]}"#).unwrap();
    assert_eq!(options.enabled, vec![Pragma::Optimize, Pragma::JournalMode]);

    let defaulted: PragmaOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(defaulted, PragmaOptions::default());

    assert!(serde_json::from_str::<PragmaOptions>(r#"{"enabled": ["temp_store"]}"#).is_err());
}

#[test]
fn invalid_options_are_rejected() {
    let empty: PragmaOptions = serde_json::from_str(r#"{"enabled": []}"#).unwrap();
    assert_eq!(
        PragmaGenerator::new(empty).unwrap_err(),
        PragmaError::EmptyDirectiveSet
    );

    let err = "writable_schema".parse::<Pragma>().unwrap_err();
    assert!(err.to_string().contains("never generated"), "{err}");
}
