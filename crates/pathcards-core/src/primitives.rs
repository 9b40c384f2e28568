//! # Innate Primitives
//!
//! Hardcoded constants of the extraction engine.
//!
//! These are compiled into the binary and are immutable at runtime:
//! reserved vocabulary terms, evidence markers, cross-reference database keys
//! and computational bounds.

/// Pseudo modification term marking an entity state as active.
pub const ACTIVE_TERM: &str = "residue modification, active";

/// Pseudo modification term marking an entity state as inactive.
pub const INACTIVE_TERM: &str = "residue modification, inactive";

/// Comments starting with this marker were superseded and are not evidence.
pub const REPLACED_MARKER: &str = "REPLACED";

/// Comments containing this token carry drawing layout, not evidence.
pub const LAYOUT_MARKER: &str = "@Layout@";

/// Cross-reference database key for HGNC gene symbols (lower case).
pub const HGNC_SYMBOL_DB: &str = "hgnc symbol";

/// Cross-reference database key for PubChem compounds (lower case).
pub const PUBCHEM_COMPOUND_DB: &str = "pubchem-compound";

/// Substring identifying a UniProt resource URI.
pub const UNIPROT_URI_MARKER: &str = "uniprot";

/// Name returned when an entity has no name at all.
pub const NULL_NAME: &str = "null";

/// Maximum traversal depth for "zero-or-more" closures.
///
/// - All traversals must be computationally bounded.
/// - Real containment hierarchies are a handful of levels deep.
pub const MAX_TRAVERSAL_DEPTH: usize = 100;

/// Default small molecule released in an exchange.
pub const DEFAULT_EXCHANGE_OLD: &str = "GDP";

/// Default small molecule taken up in an exchange.
pub const DEFAULT_EXCHANGE_NEW: &str = "GTP";

/// Substring table normalizing modification terms, checked in order.
pub const MODIFICATION_VOCABULARY: &[(&str, &str)] = &[
    ("phospho", "Phosphorylation"),
    ("acetyl", "Acetylation"),
    ("farnesyl", "Farnesylation"),
    ("glyco", "Glycosylation"),
    ("hydroxy", "Hydroxylation"),
    ("methyl", "Methylation"),
    ("ribosyl", "Ribosylation"),
    ("sumoyl", "Sumoylation"),
    ("ubiq", "Ubiquitination"),
];
