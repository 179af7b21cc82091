//! # flowgen-core
//!
//! Core library for flowgen: pseudo-random branch names and commit messages
//! built from fixed vocabularies, and the single-line text mutation that each
//! synthetic commit applies.
//!
//! Nothing in this crate spawns processes. Randomness is injected through
//! [`RandomSource`], so every generator and mutation can be replayed in tests.

pub mod branch_name;
pub mod buffer;
pub mod config;
pub mod error;
pub mod generator;
pub mod mutator;
pub mod random;
pub mod vocabulary;

pub use branch_name::BranchName;
pub use buffer::TextBuffer;
pub use config::{CONFIG_FILE, Config, GitBackend};
pub use error::{Error, Result};
pub use generator::{CountRange, GeneratorConfig, NameGenerator, NamePattern};
pub use mutator::{LineChange, LineMutator, Mutation, mutate, mutation_targets};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use vocabulary::Vocabulary;
