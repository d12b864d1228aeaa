//! # oxide-lancer-sqlite
//!
//! `SQLite`-specific pieces of the oracle built on `oxide-lancer-core`.
//!
//! - **[PRAGMA] generation**: [`PragmaGenerator`] emits one randomized
//!   configuration or maintenance pragma per call, together with the
//!   error messages `SQLite` documents for it. Some pragmas are never
//!   generated because they corrupt or reset the test database; they are
//!   listed in [`Pragma::EXCLUDED`].
//! - **Expected-value traces**: [`trace`] prints an annotated expression
//!   tree one node per line, so a flagged query can be checked against
//!   what the oracle predicted for each sub-expression.
//! - **Randomness**: every decision is drawn through [`Randomness`].
//!   [`Randomly`] is the seeded production source; each worker thread
//!   owns its own.
//!
//! [PRAGMA]: https://www.sqlite.org/pragma.html
//!
//! ## Example
//!
//! ```rust
//! use oxide_lancer_sqlite::{Pragma, PragmaGenerator, PragmaOptions, Randomly};
//!
//! let options = PragmaOptions::only([Pragma::WalCheckpoint]);
//! let generator = PragmaGenerator::new(options).unwrap();
//! let query = generator.generate(&mut Randomly::seeded(1));
//!
//! assert!(query.sql.starts_with("PRAGMA wal_checkpoint("));
//! assert!(query.is_expected_error("database table is locked"));
//! ```

pub mod error;
pub mod pragma;
pub mod random;
pub mod trace;

pub use error::{PragmaError, Result};
pub use pragma::{Pragma, PragmaGenerator, PragmaOptions};
pub use random::{Randomly, Randomness};
pub use trace::{trace, trace_select};
