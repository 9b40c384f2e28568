//! # pathcards-core
//!
//! The deterministic pattern search and card extraction engine - THE LOGIC.
//!
//! Given an immutable pathway graph, this crate locates matches of eight
//! mechanism archetypes and turns each match into structured, grounded
//! cards describing the inferred mechanism.
//!
//! ## Pipeline
//!
//! `GraphModel` -> `Searcher(pattern)` -> matches -> `CardExtractor` (uses
//! `Grounder`) -> cards -> `CardStore` -> JSON. The same matches also project
//! onto a `SifNetwork` of gene-level triples.
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no network dependencies, no logging backend
//! - Deterministic: BTreeMap/BTreeSet only, sorted enumeration everywhere
//! - Read-only model: nothing mutates the graph once it is built
//! - Closed: node kinds and constraints are closed enums

// =============================================================================
// MODULES
// =============================================================================

pub mod archetype;
pub mod blacklist;
pub mod card;
pub mod constraint;
pub mod delta;
pub mod extract;
pub mod graph;
pub mod grounding;
pub mod miner;
pub mod pattern;
pub mod primitives;
pub mod search;
pub mod sif;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ControlType, EntityFeature, EntityKind, InteractionKind, NodeId, NodeKind, NodeType,
    PathcardsError, ReferenceKind, SequenceLocation, Xref,
};

// =============================================================================
// RE-EXPORTS: Graph and Search
// =============================================================================

pub use blacklist::Blacklist;
pub use constraint::{Constraint, EvalContext, Evaluation, Side, Traversal};
pub use graph::{Direction, EdgeRecord, GraphModel, ModelDocument, ModelStats, Node, Relation};
pub use pattern::{Match, Pattern, Step};
pub use search::Searcher;

// =============================================================================
// RE-EXPORTS: Archetypes and Extraction
// =============================================================================

pub use archetype::{Archetype, CardShape, MoleculePair, PatternBuilder};
pub use card::{
    Card, CardId, EntityDescription, EntityType, ExtractedInformation, FeatureRecord,
    InteractionType, Locations, ModificationRecord, Participant,
};
pub use delta::{LocationDelta, Modification, ModificationDelta, map_modification_term};
pub use extract::CardExtractor;
pub use grounding::Grounder;
pub use miner::{ArchetypeReport, CardMiner, MiningReport};
pub use sif::{SifNetwork, SifRelation, SifTriple};
pub use store::{CardStore, GroundingStats};
