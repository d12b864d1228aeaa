//! Randomized PRAGMA statements.
//!
//! Each generated statement changes one `SQLite` setting (or runs one
//! maintenance pragma) and carries the error fragments that are a
//! documented outcome of running it. Directives that destabilize the
//! test database are never generated; see [`Pragma::EXCLUDED`].
//!
//! ```rust
//! use oxide_lancer_sqlite::{PragmaGenerator, Randomly};
//!
//! let generator = PragmaGenerator::default();
//! let mut randomness = Randomly::seeded(7);
//! let query = generator.generate(&mut randomness);
//! assert!(query.sql.starts_with("PRAGMA "));
//! assert!(query.sql.ends_with(';'));
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use oxide_lancer_core::ast::{PragmaBody, PragmaStatement, PragmaValue};
use oxide_lancer_core::{ExpectedErrors, Query};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PragmaError, Result};
use crate::random::Randomness;

/// Lower bound for a non-zero `busy_timeout`, in milliseconds.
pub const MIN_BUSY_TIMEOUT: i64 = 10_000;

const SCHEMAS: [&str; 2] = ["main", "temp"];
const BOOLEANS: [&str; 2] = ["true", "false"];
const AUTO_VACUUM_MODES: [&str; 3] = ["NONE", "FULL", "INCREMENTAL"];
// OFF can corrupt the database when an index creation fails.
const JOURNAL_MODES: [&str; 5] = ["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL"];
const LOCKING_MODES: [&str; 2] = ["NORMAL", "EXCLUSIVE"];
const SECURE_DELETE_MODES: [&str; 3] = ["true", "false", "FAST"];
const CHECKPOINT_MODES: [&str; 4] = ["PASSIVE", "FULL", "RESTART", "TRUNCATE"];

/// Errors the JSON functions may raise while a check or vacuum
/// re-evaluates expressions stored in the schema.
const JSON_ERRORS: [&str; 7] = [
    "malformed JSON",
    "JSON cannot hold BLOB values",
    "json_object() labels must be TEXT",
    "requires an even number of arguments",
    "needs an odd number of arguments",
    "overflow",
    "JSON path error",
];

/// A PRAGMA the generator can emit.
///
/// `cache_spill` appears twice: once set to a boolean, once to a page
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pragma {
    ApplicationId,
    AutoVacuum,
    AutomaticIndex,
    BusyTimeout,
    CacheSize,
    CacheSpillEnabled,
    CacheSpillSize,
    CellSizeCheck,
    CheckpointFullfsync,
    DefaultCacheSize,
    DeferForeignKeys,
    ForeignKeys,
    IgnoreCheckConstraints,
    IncrementalVacuum,
    IntegrityCheck,
    JournalMode,
    JournalSizeLimit,
    LegacyFileFormat,
    LockingMode,
    MmapSize,
    Optimize,
    RecursiveTriggers,
    ReverseUnorderedSelects,
    SecureDelete,
    ShortColumnNames,
    ShrinkMemory,
    SoftHeapLimit,
    Stats,
    Threads,
    WalAutocheckpoint,
    WalCheckpoint,
}

impl Pragma {
    /// Every generated pragma.
    pub const ALL: [Self; 31] = [
        Self::ApplicationId,
        Self::AutoVacuum,
        Self::AutomaticIndex,
        Self::BusyTimeout,
        Self::CacheSize,
        Self::CacheSpillEnabled,
        Self::CacheSpillSize,
        Self::CellSizeCheck,
        Self::CheckpointFullfsync,
        Self::DefaultCacheSize,
        Self::DeferForeignKeys,
        Self::ForeignKeys,
        Self::IgnoreCheckConstraints,
        Self::IncrementalVacuum,
        Self::IntegrityCheck,
        Self::JournalMode,
        Self::JournalSizeLimit,
        Self::LegacyFileFormat,
        Self::LockingMode,
        Self::MmapSize,
        Self::Optimize,
        Self::RecursiveTriggers,
        Self::ReverseUnorderedSelects,
        Self::SecureDelete,
        Self::ShortColumnNames,
        Self::ShrinkMemory,
        Self::SoftHeapLimit,
        Self::Stats,
        Self::Threads,
        Self::WalAutocheckpoint,
        Self::WalCheckpoint,
    ];

    /// Pragmas that are never generated, with the reason.
    pub const EXCLUDED: [(&'static str, &'static str); 7] = [
        (
            "case_sensitive_like",
            "conflicts with the LIKE optimization",
        ),
        (
            "legacy_alter_table",
            "does not work well with ALTER TABLE",
        ),
        ("temp_store", "deletes all existing temporary tables"),
        (
            "encoding",
            "attached databases must use the encoding of the main database",
        ),
        (
            "writable_schema",
            "ALTER TABLE can leave a malformed schema behind",
        ),
        ("vdbe_addoptrace", "debug builds only, floods the console"),
        ("vdbe_listing", "debug builds only, floods the console"),
    ];

    /// The configuration name, as accepted by [`FromStr`] and serde.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationId => "application_id",
            Self::AutoVacuum => "auto_vacuum",
            Self::AutomaticIndex => "automatic_index",
            Self::BusyTimeout => "busy_timeout",
            Self::CacheSize => "cache_size",
            Self::CacheSpillEnabled => "cache_spill_enabled",
            Self::CacheSpillSize => "cache_spill_size",
            Self::CellSizeCheck => "cell_size_check",
            Self::CheckpointFullfsync => "checkpoint_fullfsync",
            Self::DefaultCacheSize => "default_cache_size",
            Self::DeferForeignKeys => "defer_foreign_keys",
            Self::ForeignKeys => "foreign_keys",
            Self::IgnoreCheckConstraints => "ignore_check_constraints",
            Self::IncrementalVacuum => "incremental_vacuum",
            Self::IntegrityCheck => "integrity_check",
            Self::JournalMode => "journal_mode",
            Self::JournalSizeLimit => "journal_size_limit",
            Self::LegacyFileFormat => "legacy_file_format",
            Self::LockingMode => "locking_mode",
            Self::MmapSize => "mmap_size",
            Self::Optimize => "optimize",
            Self::RecursiveTriggers => "recursive_triggers",
            Self::ReverseUnorderedSelects => "reverse_unordered_selects",
            Self::SecureDelete => "secure_delete",
            Self::ShortColumnNames => "short_column_names",
            Self::ShrinkMemory => "shrink_memory",
            Self::SoftHeapLimit => "soft_heap_limit",
            Self::Stats => "stats",
            Self::Threads => "threads",
            Self::WalAutocheckpoint => "wal_autocheckpoint",
            Self::WalCheckpoint => "wal_checkpoint",
        }
    }

    /// The pragma name as written in SQL.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::CacheSpillEnabled | Self::CacheSpillSize => "cache_spill",
            other => other.as_str(),
        }
    }

    /// Error fragments that running this pragma may legitimately produce.
    #[must_use]
    pub const fn benign_errors(&self) -> &'static [&'static str] {
        match self {
            Self::IntegrityCheck | Self::IncrementalVacuum => &JSON_ERRORS,
            Self::JournalMode => &["from within a transaction"],
            Self::WalCheckpoint => &["database table is locked"],
            _ => &[],
        }
    }

    /// Draws the value to assign, or `None` if this pragma takes none.
    fn draw_value<R: Randomness>(self, r: &mut R) -> Option<PragmaValue> {
        let value = match self {
            Self::ApplicationId
            | Self::CacheSpillSize
            | Self::MmapSize
            | Self::Threads
            | Self::WalAutocheckpoint => PragmaValue::Integer(r.non_cached_integer()),
            Self::AutoVacuum => word(*r.pick(&AUTO_VACUUM_MODES)),
            Self::AutomaticIndex
            | Self::CacheSpillEnabled
            | Self::CellSizeCheck
            | Self::CheckpointFullfsync
            | Self::DeferForeignKeys
            | Self::ForeignKeys
            | Self::IgnoreCheckConstraints
            | Self::LegacyFileFormat
            | Self::RecursiveTriggers
            | Self::ReverseUnorderedSelects
            | Self::ShortColumnNames => word(*r.pick(&BOOLEANS)),
            Self::BusyTimeout => zero_or(r, |r| r.non_cached_integer().max(MIN_BUSY_TIMEOUT)),
            Self::CacheSize | Self::JournalSizeLimit => zero_or(r, R::non_cached_integer),
            Self::DefaultCacheSize => PragmaValue::Integer(r.integer()),
            Self::JournalMode => word(*r.pick(&JOURNAL_MODES)),
            Self::LockingMode => word(*r.pick(&LOCKING_MODES)),
            Self::SecureDelete => word(*r.pick(&SECURE_DELETE_MODES)),
            Self::SoftHeapLimit => zero_or(r, R::positive_integer),
            Self::IncrementalVacuum
            | Self::IntegrityCheck
            | Self::Optimize
            | Self::ShrinkMemory
            | Self::Stats
            | Self::WalCheckpoint => return None,
        };
        Some(value)
    }
}

impl fmt::Display for Pragma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pragma {
    type Err = PragmaError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(pragma) = Self::ALL.iter().find(|p| p.as_str().eq_ignore_ascii_case(s)) {
            return Ok(*pragma);
        }
        let excluded = Self::EXCLUDED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s));
        Err(excluded.map_or_else(
            || PragmaError::Unknown(String::from(s)),
            |&(name, reason)| PragmaError::Excluded {
                name: String::from(name),
                reason,
            },
        ))
    }
}

fn word(w: &str) -> PragmaValue {
    PragmaValue::Keyword(String::from(w))
}

/// A coin decides between zero and the drawn value.
fn zero_or<R: Randomness>(r: &mut R, draw: impl FnOnce(&mut R) -> i64) -> PragmaValue {
    if r.coin() {
        PragmaValue::Integer(0)
    } else {
        PragmaValue::Integer(draw(r))
    }
}

/// Which pragmas the generator may choose from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PragmaOptions {
    pub enabled: Vec<Pragma>,
}

impl Default for PragmaOptions {
    fn default() -> Self {
        Self {
            enabled: Pragma::ALL.to_vec(),
        }
    }
}

impl PragmaOptions {
    /// Options enabling exactly the given pragmas.
    #[must_use]
    pub fn only(pragmas: impl IntoIterator<Item = Pragma>) -> Self {
        Self {
            enabled: pragmas.into_iter().collect(),
        }
    }

    /// Checks that at least one pragma is enabled and none twice.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDirectiveSet` or `DuplicateDirective`.
    pub fn validate(&self) -> Result<()> {
        if self.enabled.is_empty() {
            return Err(PragmaError::EmptyDirectiveSet);
        }
        let mut seen = HashSet::with_capacity(self.enabled.len());
        for pragma in &self.enabled {
            if !seen.insert(*pragma) {
                return Err(PragmaError::DuplicateDirective(*pragma));
            }
        }
        Ok(())
    }
}

/// Generates PRAGMA statements from the enabled set.
#[derive(Debug, Clone)]
pub struct PragmaGenerator {
    enabled: Vec<Pragma>,
}

impl Default for PragmaGenerator {
    fn default() -> Self {
        Self {
            enabled: Pragma::ALL.to_vec(),
        }
    }
}

impl PragmaGenerator {
    /// Creates a generator from validated options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options do not validate.
    pub fn new(options: PragmaOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            enabled: options.enabled,
        })
    }

    /// The pragmas this generator chooses from.
    #[must_use]
    pub fn enabled(&self) -> &[Pragma] {
        &self.enabled
    }

    /// Picks an enabled pragma uniformly and generates a statement for it.
    pub fn generate<R: Randomness>(&self, r: &mut R) -> Query {
        let pragma = *r.pick(&self.enabled);
        Self::generate_pragma(pragma, r)
    }

    /// Generates a statement for the given pragma.
    pub fn generate_pragma<R: Randomness>(pragma: Pragma, r: &mut R) -> Query {
        let statement = match pragma {
            Pragma::IncrementalVacuum | Pragma::IntegrityCheck => {
                if r.coin() {
                    assignment_form(pragma, r)
                } else {
                    call_form(pragma, PragmaValue::Integer(r.integer()))
                }
            }
            Pragma::WalCheckpoint => call_form(pragma, word(*r.pick(&CHECKPOINT_MODES))),
            _ => assignment_form(pragma, r),
        };
        let sql = format!("{statement};");
        debug!(pragma = %pragma, sql = %sql, "generated pragma");

        let expected_errors: ExpectedErrors = pragma.benign_errors().iter().copied().collect();
        Query::new(sql, expected_errors)
    }
}

/// `PRAGMA [schema.]name [= value]`. Draws the schema coin, then the value
/// coin, then the schema, then consults the value rule once.
fn assignment_form<R: Randomness>(pragma: Pragma, r: &mut R) -> PragmaStatement {
    let qualify = r.coin();
    let attach_value = r.coin();
    let schema = if qualify {
        Some(String::from(*r.pick(&SCHEMAS)))
    } else {
        None
    };
    let body = attach_value
        .then(|| pragma.draw_value(r))
        .flatten()
        .map_or(PragmaBody::Query, PragmaBody::Assign);
    PragmaStatement {
        schema,
        name: String::from(pragma.keyword()),
        body,
    }
}

fn call_form(pragma: Pragma, value: PragmaValue) -> PragmaStatement {
    PragmaStatement {
        schema: None,
        name: String::from(pragma.keyword()),
        body: PragmaBody::Call(Some(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Randomly;

    fn samples(pragma: Pragma, n: u64) -> impl Iterator<Item = Query> {
        (0..n).map(move |seed| {
            PragmaGenerator::generate_pragma(pragma, &mut Randomly::seeded(seed))
        })
    }

    #[test]
    fn test_keyword_and_name() {
        assert_eq!(Pragma::CacheSpillEnabled.keyword(), "cache_spill");
        assert_eq!(Pragma::CacheSpillSize.keyword(), "cache_spill");
        assert_eq!(Pragma::CacheSpillSize.as_str(), "cache_spill_size");
        assert_eq!(Pragma::WalCheckpoint.keyword(), "wal_checkpoint");
        assert_eq!(Pragma::DeferForeignKeys.to_string(), "defer_foreign_keys");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("busy_timeout".parse::<Pragma>(), Ok(Pragma::BusyTimeout));
        assert_eq!("STATS".parse::<Pragma>(), Ok(Pragma::Stats));
        assert!(matches!(
            "temp_store".parse::<Pragma>(),
            Err(PragmaError::Excluded { ref name, .. }) if name == "temp_store"
        ));
        assert_eq!(
            "no_such_pragma".parse::<Pragma>(),
            Err(PragmaError::Unknown(String::from("no_such_pragma")))
        );
    }

    #[test]
    fn test_all_names_parse_back() {
        for pragma in Pragma::ALL {
            assert_eq!(pragma.as_str().parse::<Pragma>(), Ok(pragma));
        }
        for (name, _) in Pragma::EXCLUDED {
            assert!(Pragma::ALL.iter().all(|p| p.keyword() != name));
        }
    }

    #[test]
    fn test_options_validate() {
        assert!(PragmaOptions::default().validate().is_ok());
        assert_eq!(
            PragmaOptions::only([]).validate(),
            Err(PragmaError::EmptyDirectiveSet)
        );
        assert_eq!(
            PragmaOptions::only([Pragma::Stats, Pragma::Threads, Pragma::Stats]).validate(),
            Err(PragmaError::DuplicateDirective(Pragma::Stats))
        );
        assert!(PragmaGenerator::new(PragmaOptions::only([])).is_err());
    }

    #[test]
    fn test_every_statement_ends_with_semicolon() {
        let generator = PragmaGenerator::default();
        let mut r = Randomly::seeded(11);
        for _ in 0..500 {
            let query = generator.generate(&mut r);
            assert!(query.sql.starts_with("PRAGMA "), "{}", query.sql);
            assert!(query.sql.ends_with(';'), "{}", query.sql);
        }
    }

    #[test]
    fn test_no_value_pragmas() {
        for pragma in [Pragma::Optimize, Pragma::ShrinkMemory, Pragma::Stats] {
            for query in samples(pragma, 100) {
                assert!(!query.sql.contains('='), "{}", query.sql);
                assert!(!query.sql.contains('('), "{}", query.sql);
            }
        }
    }

    #[test]
    fn test_keyword_values_stay_in_their_domain() {
        let cases: [(Pragma, &[&str]); 6] = [
            (Pragma::AutoVacuum, &AUTO_VACUUM_MODES),
            (Pragma::ForeignKeys, &BOOLEANS),
            (Pragma::JournalMode, &JOURNAL_MODES),
            (Pragma::LockingMode, &LOCKING_MODES),
            (Pragma::SecureDelete, &SECURE_DELETE_MODES),
            (Pragma::CacheSpillEnabled, &BOOLEANS),
        ];
        let mut r = Randomly::seeded(17);
        for (pragma, domain) in cases {
            for _ in 0..50 {
                match pragma.draw_value(&mut r) {
                    Some(PragmaValue::Keyword(w)) => {
                        assert!(domain.contains(&w.as_str()), "{pragma}: {w}");
                    }
                    other => panic!("{pragma}: {other:?}"),
                }
            }
        }
        for query in samples(Pragma::WalCheckpoint, 50) {
            let mode = query
                .sql
                .trim_start_matches("PRAGMA wal_checkpoint(")
                .trim_end_matches(");");
            assert!(CHECKPOINT_MODES.contains(&mode), "{}", query.sql);
        }
    }

    #[test]
    fn test_call_forms_are_unqualified() {
        for query in samples(Pragma::IntegrityCheck, 200) {
            if query.sql.contains('(') {
                assert!(query.sql.starts_with("PRAGMA integrity_check("), "{}", query.sql);
            }
        }
    }

    #[test]
    fn test_benign_errors() {
        for query in samples(Pragma::IncrementalVacuum, 20) {
            assert_eq!(query.expected_errors.len(), 7);
            assert!(query.is_expected_error("integer overflow"));
        }
        for query in samples(Pragma::JournalMode, 20) {
            assert!(query.expected_errors.contains("from within a transaction"));
        }
        for query in samples(Pragma::Threads, 20) {
            assert!(query.expected_errors.is_empty());
        }
    }
}
