#![allow(dead_code)]

use std::collections::VecDeque;

use oxide_lancer_core::ast::{PragmaStatement, PragmaValue};
use oxide_lancer_core::{Parser, Query};
use oxide_lancer_sqlite::{Randomly, Randomness};
use rand_chacha::ChaCha8Rng;

/// Randomness that replays scripted decisions first and falls back to a
/// seeded source once a queue runs dry.
pub struct ScriptedRandomness {
    coins: VecDeque<bool>,
    indices: VecDeque<usize>,
    integers: VecDeque<i64>,
    fallback: Randomly<ChaCha8Rng>,
}

impl ScriptedRandomness {
    pub fn new(seed: u64) -> Self {
        Self {
            coins: VecDeque::new(),
            indices: VecDeque::new(),
            integers: VecDeque::new(),
            fallback: Randomly::seeded(seed),
        }
    }

    pub fn coins(mut self, coins: impl IntoIterator<Item = bool>) -> Self {
        self.coins.extend(coins);
        self
    }

    pub fn indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn integers(mut self, integers: impl IntoIterator<Item = i64>) -> Self {
        self.integers.extend(integers);
        self
    }

    /// True once every scripted decision has been consumed.
    pub fn exhausted(&self) -> bool {
        self.coins.is_empty() && self.indices.is_empty() && self.integers.is_empty()
    }
}

impl Randomness for ScriptedRandomness {
    fn coin(&mut self) -> bool {
        self.coins.pop_front().unwrap_or_else(|| self.fallback.coin())
    }

    fn index(&mut self, len: usize) -> usize {
        match self.indices.pop_front() {
            Some(i) => {
                assert!(i < len, "scripted index {i} out of range 0..{len}");
                i
            }
            None => self.fallback.index(len),
        }
    }

    fn integer(&mut self) -> i64 {
        self.integers
            .pop_front()
            .unwrap_or_else(|| self.fallback.integer())
    }

    fn non_cached_integer(&mut self) -> i64 {
        self.integers
            .pop_front()
            .unwrap_or_else(|| self.fallback.non_cached_integer())
    }

    fn positive_integer(&mut self) -> i64 {
        self.integers
            .pop_front()
            .unwrap_or_else(|| self.fallback.positive_integer())
    }
}

pub fn parse(query: &Query) -> PragmaStatement {
    let sql = &query.sql;
    Parser::new(sql)
        .parse_pragma()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn integer_value(query: &Query) -> Option<i64> {
    match parse(query).value() {
        Some(PragmaValue::Integer(n)) => Some(*n),
        None => None,
        Some(other) => panic!("Expected an integer in {}, got {other:?}", query.sql),
    }
}

pub fn word_value(query: &Query) -> Option<String> {
    match parse(query).value() {
        Some(PragmaValue::Keyword(w)) => Some(w.clone()),
        None => None,
        Some(other) => panic!("Expected a word in {}, got {other:?}", query.sql),
    }
}
