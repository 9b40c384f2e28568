//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::Settings;
use pathcards_core::{
    Archetype, Blacklist, CardMiner, CardStore, GraphModel, MiningReport, ModelDocument,
    PathcardsError, PatternBuilder, SifNetwork,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum model document size (500 MB).
///
/// Whole-database exports are large, but a model is parsed into memory at
/// once.
const MAX_MODEL_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Maximum blacklist size (16 MB).
const MAX_BLACKLIST_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), PathcardsError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| PathcardsError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(PathcardsError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path to a canonical regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, PathcardsError> {
    let canonical = path.canonicalize().map_err(|e| {
        PathcardsError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(PathcardsError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, PathcardsError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        PathcardsError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(PathcardsError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| PathcardsError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn write_file(path: &Path, data: &str) -> Result<(), PathcardsError> {
    std::fs::write(path, data)
        .map_err(|e| PathcardsError::IoError(format!("Write '{}': {}", path.display(), e)))
}

fn print_json(value: &serde_json::Value) -> Result<(), PathcardsError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| PathcardsError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// INPUT LOADING
// =============================================================================

/// Read a model document and build the graph.
pub fn load_model(path: &Path) -> Result<GraphModel, PathcardsError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_MODEL_FILE_SIZE)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| PathcardsError::IoError(format!("Read file: {}", e)))?;
    let doc: ModelDocument = serde_json::from_slice(&contents).map_err(|e| {
        PathcardsError::SerializationError(format!(
            "Invalid model document '{}': {}",
            path.display(),
            e
        ))
    })?;

    let model = GraphModel::from(doc);
    let stats = model.stats();
    tracing::info!(
        "Loaded {:?}: {} entities, {} references, {} interactions, {} edges",
        validated_path,
        stats.entities,
        stats.references,
        stats.interactions,
        stats.edges
    );
    if stats.dropped_edges > 0 {
        tracing::warn!(
            "Dropped {} edges with unknown endpoints or derived relations",
            stats.dropped_edges
        );
    }
    if stats.duplicate_nodes > 0 {
        tracing::warn!("Ignored {} duplicate node URIs", stats.duplicate_nodes);
    }
    Ok(model)
}

/// Read a blacklist file; no path means an empty blacklist.
pub fn load_blacklist(path: Option<&Path>) -> Result<Blacklist, PathcardsError> {
    let Some(path) = path else {
        return Ok(Blacklist::new());
    };
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_BLACKLIST_FILE_SIZE)?;

    let text = std::fs::read_to_string(&validated_path)
        .map_err(|e| PathcardsError::IoError(format!("Read file: {}", e)))?;
    let blacklist = Blacklist::parse(&text);
    tracing::info!("Blacklist {:?}: {} entries", validated_path, blacklist.len());
    Ok(blacklist)
}

fn miner<'a>(settings: &Settings, model: &'a GraphModel, blacklist: &'a Blacklist) -> CardMiner<'a> {
    CardMiner::new(model, blacklist)
        .with_builder(PatternBuilder::new(settings.exchange.clone()))
        .with_archetypes(settings.archetypes.iter().copied())
}

fn log_report(report: &MiningReport) {
    for entry in &report.archetypes {
        tracing::info!(
            "{}: {} matches, {} cards",
            entry.archetype,
            entry.matches,
            entry.cards
        );
    }
    tracing::info!("Total: {} matches, {} cards", report.matches, report.cards);
}

// =============================================================================
// EXTRACT COMMAND
// =============================================================================

/// Mine the model and write the cards, plus SIF when asked.
pub fn cmd_extract(
    settings: &Settings,
    model_path: &Path,
    output: &Path,
    sif_output: Option<&Path>,
    json_mode: bool,
) -> Result<(), PathcardsError> {
    let validated_output = validate_output_path(output)?;
    let validated_sif = sif_output.map(validate_output_path).transpose()?;

    let model = load_model(model_path)?;
    let blacklist = load_blacklist(settings.blacklist.as_deref())?;

    let mut store = CardStore::new();
    let mut sif = SifNetwork::new();
    let report = miner(settings, &model, &blacklist)
        .mine(&mut store, validated_sif.is_some().then_some(&mut sif))?;
    log_report(&report);

    let data = if settings.pretty {
        store.to_json()?
    } else {
        store.to_json_compact()?
    };
    write_file(&validated_output, &data)?;
    if let Some(path) = &validated_sif {
        write_file(path, &sif.to_tsv())?;
    }

    let stats = store.grounding_stats();
    if json_mode {
        return print_json(&serde_json::json!({
            "output": validated_output.to_string_lossy(),
            "sif": validated_sif.as_ref().map(|p| p.to_string_lossy()),
            "report": report,
            "grounding": stats,
            "sif_triples": validated_sif.as_ref().map(|_| sif.len()),
        }));
    }

    println!("Extracted {} cards to {:?}", store.len(), validated_output);
    if let Some(path) = &validated_sif {
        println!("Wrote {} SIF triples to {:?}", sif.len(), path);
    }
    println!();
    println!("Grounding");
    println!("=========");
    println!("Cards:               {}", stats.cards);
    println!("Ungrounded cards:    {}", stats.ungrounded_cards);
    println!("Grounded entities:   {}", stats.grounded_entities);
    println!("Ungrounded entities: {}", stats.ungrounded_entities);

    Ok(())
}

// =============================================================================
// SIF COMMAND
// =============================================================================

/// Mine the model and write only the triples.
pub fn cmd_sif(
    settings: &Settings,
    model_path: &Path,
    output: &Path,
    json_mode: bool,
) -> Result<(), PathcardsError> {
    let validated_output = validate_output_path(output)?;
    let model = load_model(model_path)?;
    let blacklist = load_blacklist(settings.blacklist.as_deref())?;

    // cards are only needed to pick the triple relation
    let mut store = CardStore::new();
    let mut sif = SifNetwork::new();
    let report = miner(settings, &model, &blacklist).mine(&mut store, Some(&mut sif))?;
    log_report(&report);

    write_file(&validated_output, &sif.to_tsv())?;

    if json_mode {
        return print_json(&serde_json::json!({
            "output": validated_output.to_string_lossy(),
            "triples": sif.len(),
        }));
    }
    println!("Wrote {} SIF triples to {:?}", sif.len(), validated_output);
    Ok(())
}

// =============================================================================
// PATTERNS COMMAND
// =============================================================================

/// List every archetype with its labels and steps.
pub fn cmd_patterns(settings: &Settings, json_mode: bool) -> Result<(), PathcardsError> {
    let builder = PatternBuilder::new(settings.exchange.clone());
    let patterns = builder.build_all()?;

    if json_mode {
        let listing: Vec<serde_json::Value> = patterns
            .iter()
            .map(|(archetype, pattern)| {
                serde_json::json!({
                    "name": archetype.name(),
                    "source": archetype.source_label(),
                    "target": archetype.target_label(),
                    "labels": pattern.labels(),
                    "steps": pattern
                        .steps()
                        .iter()
                        .map(|step| pattern.describe_step(step))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        return print_json(&serde_json::Value::Array(listing));
    }

    for (archetype, pattern) in &patterns {
        print_pattern(*archetype, pattern);
    }
    Ok(())
}

fn print_pattern(archetype: Archetype, pattern: &pathcards_core::Pattern) {
    println!("{}", archetype);
    println!(
        "  {} -> {} ({} labels)",
        archetype.source_label(),
        archetype.target_label(),
        pattern.labels().len()
    );
    for (index, step) in pattern.steps().iter().enumerate() {
        println!("  {:>2}. {}", index.saturating_add(1), pattern.describe_step(step));
    }
    println!();
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show model statistics.
pub fn cmd_status(model_path: &Path, json_mode: bool) -> Result<(), PathcardsError> {
    let model = load_model(model_path)?;
    let stats = model.stats();

    if json_mode {
        return print_json(&serde_json::json!({
            "model": model_path.to_string_lossy(),
            "nodes": model.len(),
            "stats": stats,
        }));
    }

    println!("pathcards Model Status");
    println!("======================");
    println!("Model: {:?}", model_path);
    println!();
    println!("Nodes:         {}", model.len());
    println!("Entities:      {}", stats.entities);
    println!("References:    {}", stats.references);
    println!("Interactions:  {}", stats.interactions);
    println!("Edges:         {}", stats.edges);
    println!("Dropped edges: {}", stats.dropped_edges);
    println!("Duplicates:    {}", stats.duplicate_nodes);

    Ok(())
}
