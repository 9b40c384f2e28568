//! # Archetype Scenario Tests
//!
//! End-to-end runs of the miner over small hand-built pathway models, one
//! module per mechanism family.

use pathcards_core::primitives::{ACTIVE_TERM, INACTIVE_TERM};
use pathcards_core::{
    Archetype, Blacklist, Card, CardMiner, CardStore, ControlType, EntityFeature, EntityKind,
    GraphModel, InteractionKind, ModelDocument, Node, NodeKind, PatternBuilder, ReferenceKind,
    Relation, Searcher, SequenceLocation,
};
use serde_json::Value;

// =============================================================================
// MODEL HELPERS
// =============================================================================

fn reference(doc: &mut ModelDocument, uri: &str, name: &str) {
    doc.add_node(uri, NodeKind::Reference(ReferenceKind::Protein))
        .with_standard_name(name);
}

fn protein<'d>(doc: &'d mut ModelDocument, uri: &str, name: &str, reference: &str) -> &'d mut Node {
    doc.add_edge(uri, Relation::EntityReference, reference);
    let node = doc.add_node(uri, NodeKind::Entity(EntityKind::Protein));
    node.with_display_name(name);
    node
}

fn molecule<'d>(doc: &'d mut ModelDocument, uri: &str, name: &str) -> &'d mut Node {
    let node = doc.add_node(uri, NodeKind::Entity(EntityKind::SmallMolecule));
    node.with_name(name);
    node
}

fn complex(doc: &mut ModelDocument, uri: &str, components: &[&str]) {
    doc.add_node(uri, NodeKind::Entity(EntityKind::Complex));
    for component in components {
        doc.add_edge(uri, Relation::Component, component);
    }
}

fn control(
    doc: &mut ModelDocument,
    uri: &str,
    control_type: ControlType,
    controller: &str,
    controlled: &str,
) {
    doc.add_node(
        uri,
        NodeKind::Interaction(InteractionKind::Control(control_type)),
    );
    doc.add_edge(uri, Relation::Controller, controller);
    doc.add_edge(uri, Relation::Controlled, controlled);
}

fn conversion<'d>(
    doc: &'d mut ModelDocument,
    uri: &str,
    inputs: &[&str],
    outputs: &[&str],
) -> &'d mut Node {
    for input in inputs {
        doc.add_edge(uri, Relation::Input, input);
    }
    for output in outputs {
        doc.add_edge(uri, Relation::Output, output);
    }
    doc.add_node(uri, NodeKind::Interaction(InteractionKind::Conversion))
}

fn mine(model: &GraphModel, archetypes: &[Archetype]) -> Vec<Card> {
    let blacklist = Blacklist::new();
    let mut store = CardStore::new();
    CardMiner::new(model, &blacklist)
        .with_archetypes(archetypes.iter().copied())
        .mine(&mut store, None)
        .expect("mine");
    store.cards().to_vec()
}

fn json(card: &Card) -> Value {
    serde_json::to_value(card).expect("serialize card")
}

/// MDM2 controls dephosphorylation of TP53.
fn dephosphorylation(control_type: ControlType) -> GraphModel {
    let mut doc = ModelDocument::new();
    reference(&mut doc, "http://identifiers.org/uniprot/Q00987", "MDM2");
    reference(&mut doc, "http://identifiers.org/uniprot/P04637", "TP53");
    protein(
        &mut doc,
        "urn:mdm2",
        "MDM2",
        "http://identifiers.org/uniprot/Q00987",
    );
    protein(
        &mut doc,
        "urn:tp53-p",
        "TP53",
        "http://identifiers.org/uniprot/P04637",
    )
    .with_feature(EntityFeature::modification("O-phospho-L-serine"));
    protein(
        &mut doc,
        "urn:tp53",
        "TP53",
        "http://identifiers.org/uniprot/P04637",
    );
    control(&mut doc, "urn:ctrl", control_type, "urn:mdm2", "urn:conv");
    conversion(&mut doc, "urn:conv", &["urn:tp53-p"], &["urn:tp53"])
        .with_comment("Ref: PMID:12345")
        .with_comment("REPLACED: old text")
        .with_comment("x=10 @Layout@ y=20");
    GraphModel::from(doc)
}

// =============================================================================
// STATE CHANGE
// =============================================================================

mod state_change {
    use super::*;

    #[test]
    fn removed_phosphorylation_without_position() {
        let model = dephosphorylation(ControlType::Activation);
        let cards = mine(&model, &Archetype::ALL);

        assert_eq!(cards.len(), 1);
        let card = json(&cards[0]);
        let info = &card["extracted_information"];
        assert_eq!(info["interaction_type"], "removes_modification");
        assert_eq!(info["modifications"][0]["modification_type"], "Phosphorylation");
        assert!(info["modifications"][0].get("position").is_none());
        assert_eq!(card["card_id"], "1");
    }

    #[test]
    fn participants_are_grounded() {
        let model = dephosphorylation(ControlType::Activation);
        let cards = mine(&model, &[Archetype::ControlsStateChange]);

        let card = json(&cards[0]);
        let info = &card["extracted_information"];
        assert_eq!(info["participant_a"]["identifier"], "Uniprot:Q00987");
        assert_eq!(info["participant_b"]["identifier"], "Uniprot:P04637");
        assert!(cards[0].is_grounded());
    }

    #[test]
    fn evidence_skips_replaced_and_layout_comments() {
        let model = dephosphorylation(ControlType::Activation);
        let cards = mine(&model, &[Archetype::ControlsStateChange]);

        assert_eq!(cards[0].evidence, vec!["Ref: PMID:12345".to_string()]);
        assert_eq!(
            cards[0].model_elements,
            vec!["urn:ctrl".to_string(), "urn:conv".to_string()]
        );
    }

    #[test]
    fn inhibition_swaps_gained_and_lost() {
        let model = dephosphorylation(ControlType::Inhibition);
        let cards = mine(&model, &[Archetype::ControlsStateChange]);

        assert_eq!(cards.len(), 1);
        assert_eq!(
            json(&cards[0])["extracted_information"]["interaction_type"],
            "adds_modification"
        );
    }

    fn activity_model(control_type: ControlType) -> GraphModel {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:ras-ref", "HRAS");
        reference(&mut doc, "urn:gap-ref", "NF1");
        protein(&mut doc, "urn:gap", "NF1", "urn:gap-ref");
        protein(&mut doc, "urn:ras-a", "HRAS", "urn:ras-ref")
            .with_feature(EntityFeature::modification(ACTIVE_TERM));
        protein(&mut doc, "urn:ras-b", "HRAS", "urn:ras-ref")
            .with_feature(EntityFeature::modification(INACTIVE_TERM));
        control(&mut doc, "urn:ctrl", control_type, "urn:gap", "urn:conv");
        conversion(&mut doc, "urn:conv", &["urn:ras-a"], &["urn:ras-b"]);
        GraphModel::from(doc)
    }

    #[test]
    fn active_to_inactive_decreases_activity() {
        let cards = mine(
            &activity_model(ControlType::Activation),
            &[Archetype::ControlsStateChange],
        );

        assert_eq!(cards.len(), 1);
        let info = &json(&cards[0])["extracted_information"];
        assert_eq!(info["interaction_type"], "decreases_activity");
        assert!(info.get("modifications").is_none());
    }

    #[test]
    fn inhibiting_control_flips_activity() {
        let cards = mine(
            &activity_model(ControlType::Inhibition),
            &[Archetype::ControlsStateChange],
        );
        assert_eq!(cards.len(), 1);
        assert_eq!(
            json(&cards[0])["extracted_information"]["interaction_type"],
            "increases_activity"
        );
    }

    #[test]
    fn identical_states_emit_nothing() {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:k-ref", "KIN");
        reference(&mut doc, "urn:s-ref", "SUB");
        protein(&mut doc, "urn:kin", "KIN", "urn:k-ref");
        protein(&mut doc, "urn:s1", "SUB", "urn:s-ref")
            .with_feature(EntityFeature::modification_at("O-phospho-L-serine", 15))
            .with_location("cytoplasm");
        protein(&mut doc, "urn:s2", "SUB", "urn:s-ref")
            .with_feature(EntityFeature::modification_at("O-phospho-L-serine", 15))
            .with_location("cytoplasm");
        control(&mut doc, "urn:ctrl", ControlType::Activation, "urn:kin", "urn:conv");
        conversion(&mut doc, "urn:conv", &["urn:s1"], &["urn:s2"]);
        let model = GraphModel::from(doc);

        let blacklist = Blacklist::new();
        let mut store = CardStore::new();
        let report = CardMiner::new(&model, &blacklist)
            .with_archetypes([Archetype::ControlsStateChange])
            .mine(&mut store, None)
            .expect("mine");
        assert_eq!(report.matches, 1);
        assert_eq!(report.cards, 0);
    }

    #[test]
    fn translocation_lists_locations() {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:tf-ref", "NFKB1");
        reference(&mut doc, "urn:kin-ref", "IKBKB");
        protein(&mut doc, "urn:kin", "IKBKB", "urn:kin-ref");
        protein(&mut doc, "urn:tf-cyto", "NFKB1", "urn:tf-ref").with_location("cytoplasm");
        protein(&mut doc, "urn:tf-nuc", "NFKB1", "urn:tf-ref").with_location("nucleus");
        control(&mut doc, "urn:ctrl", ControlType::Activation, "urn:kin", "urn:conv");
        conversion(&mut doc, "urn:conv", &["urn:tf-cyto"], &["urn:tf-nuc"]);
        let cards = mine(&GraphModel::from(doc), &[Archetype::ControlsStateChange]);

        assert_eq!(cards.len(), 1);
        let info = &json(&cards[0])["extracted_information"];
        assert_eq!(info["interaction_type"], "translocation");
        assert_eq!(info["from_location"], "cytoplasm");
        assert_eq!(info["to_location"], "nucleus");
    }

    #[test]
    fn completeness_over_controllers_and_substrates() {
        // two controllers, two substrates changing in one conversion: 2 x 2
        let mut doc = ModelDocument::new();
        for (r, name) in [("urn:r1", "A"), ("urn:r2", "B"), ("urn:rc1", "C1"), ("urn:rc2", "C2")] {
            reference(&mut doc, r, name);
        }
        protein(&mut doc, "urn:c1", "C1", "urn:rc1");
        protein(&mut doc, "urn:c2", "C2", "urn:rc2");
        protein(&mut doc, "urn:a-in", "A", "urn:r1");
        protein(&mut doc, "urn:a-out", "A", "urn:r1")
            .with_feature(EntityFeature::modification("phosphorylated residue"));
        protein(&mut doc, "urn:b-in", "B", "urn:r2");
        protein(&mut doc, "urn:b-out", "B", "urn:r2")
            .with_feature(EntityFeature::modification("acetylated residue"));
        control(&mut doc, "urn:ctrl1", ControlType::Activation, "urn:c1", "urn:conv");
        control(&mut doc, "urn:ctrl2", ControlType::Activation, "urn:c2", "urn:conv");
        conversion(
            &mut doc,
            "urn:conv",
            &["urn:a-in", "urn:b-in"],
            &["urn:a-out", "urn:b-out"],
        );
        let model = GraphModel::from(doc);

        let pattern = PatternBuilder::default()
            .build(Archetype::ControlsStateChange)
            .expect("pattern");
        let blacklist = Blacklist::new();
        let matches = Searcher::new(&model, &blacklist).search(&pattern);
        assert_eq!(matches.len(), 4);
    }

    #[test]
    fn repeated_searches_agree() {
        let model = dephosphorylation(ControlType::Activation);
        let blacklist = Blacklist::new();
        let searcher = Searcher::new(&model, &blacklist);
        for (_, pattern) in PatternBuilder::default().build_all().expect("patterns") {
            assert_eq!(searcher.search(&pattern), searcher.search(&pattern));
        }

        let first = mine(&model, &Archetype::ALL);
        let second = mine(&model, &Archetype::ALL);
        assert_eq!(first, second);
    }
}

// =============================================================================
// STATE CHANGE VARIANTS
// =============================================================================

mod state_change_variants {
    use super::*;

    #[test]
    fn controller_that_is_also_participant() {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:k-ref", "PLK1");
        reference(&mut doc, "urn:s-ref", "CDC25C");
        protein(&mut doc, "urn:kin", "PLK1", "urn:k-ref");
        protein(&mut doc, "urn:sub", "CDC25C", "urn:s-ref");
        protein(&mut doc, "urn:sub-p", "CDC25C", "urn:s-ref")
            .with_feature(EntityFeature::modification_at("O-phospho-L-serine", 198));
        conversion(
            &mut doc,
            "urn:conv",
            &["urn:kin", "urn:sub"],
            &["urn:kin", "urn:sub-p"],
        );
        let cards = mine(
            &GraphModel::from(doc),
            &[Archetype::ControlsStateChangeButIsParticipant],
        );

        assert_eq!(cards.len(), 1);
        let info = &json(&cards[0])["extracted_information"];
        assert_eq!(info["interaction_type"], "adds_modification");
        assert_eq!(info["participant_a"]["entity_text"], "PLK1");
        assert_eq!(info["modifications"][0]["position"], "198");
        assert_eq!(cards[0].model_elements, vec!["urn:conv".to_string()]);
    }

    fn relay_model() -> ModelDocument {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:ac-ref", "ADCY1");
        reference(&mut doc, "urn:pka-ref", "PRKACA");
        doc.add_node("urn:camp-ref", NodeKind::Reference(ReferenceKind::SmallMolecule));
        protein(&mut doc, "urn:ac", "ADCY1", "urn:ac-ref");
        molecule(&mut doc, "urn:atp", "ATP");
        molecule(&mut doc, "urn:camp", "cAMP");
        doc.add_edge("urn:camp", Relation::EntityReference, "urn:camp-ref");
        protein(&mut doc, "urn:pka", "PRKACA", "urn:pka-ref");
        protein(&mut doc, "urn:pka-p", "PRKACA", "urn:pka-ref").with_feature(
            EntityFeature::Modification {
                term: "O-phospho-L-threonine".to_string(),
                location: Some(SequenceLocation::Site(197)),
            },
        );
        control(&mut doc, "urn:ctrl-up", ControlType::Activation, "urn:ac", "urn:conv-up");
        conversion(&mut doc, "urn:conv-up", &["urn:atp"], &["urn:camp"]);
        control(&mut doc, "urn:ctrl", ControlType::Activation, "urn:camp", "urn:conv");
        conversion(&mut doc, "urn:conv", &["urn:pka"], &["urn:pka-p"]);
        doc
    }

    #[test]
    fn relay_through_small_molecule() {
        let model = GraphModel::from(relay_model());
        let cards = mine(&model, &[Archetype::ControlsStateChangeThroughSmallMolecule]);

        assert_eq!(cards.len(), 1);
        let info = &json(&cards[0])["extracted_information"];
        assert_eq!(info["participant_a"]["entity_text"], "ADCY1");
        assert_eq!(info["participant_b"]["entity_text"], "PRKACA");
        assert_eq!(info["interaction_type"], "adds_modification");
        assert_eq!(cards[0].model_elements.len(), 4);
    }

    #[test]
    fn blacklisted_relay_is_ignored() {
        let model = GraphModel::from(relay_model());
        let blacklist: Blacklist = ["urn:camp-ref"].into_iter().collect();
        let pattern = PatternBuilder::default()
            .build(Archetype::ControlsStateChangeThroughSmallMolecule)
            .expect("pattern");

        assert!(Searcher::new(&model, &blacklist).search(&pattern).is_empty());
        assert_eq!(
            Searcher::new(&model, &Blacklist::new()).search(&pattern).len(),
            1
        );
    }

    #[test]
    fn relay_that_is_also_consumed_is_not_a_relay() {
        let mut doc = relay_model();
        doc.add_edge("urn:conv-up", Relation::Input, "urn:camp");
        let model = GraphModel::from(doc);
        let cards = mine(&model, &[Archetype::ControlsStateChangeThroughSmallMolecule]);
        assert!(cards.is_empty());
    }
}

// =============================================================================
// BINDING AND EXPRESSION
// =============================================================================

mod binding_and_expression {
    use super::*;

    #[test]
    fn symmetric_pair_matches_once() {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:x-ref", "X");
        reference(&mut doc, "urn:y-ref", "Y");
        protein(&mut doc, "urn:x", "X", "urn:x-ref");
        protein(&mut doc, "urn:y", "Y", "urn:y-ref");
        complex(&mut doc, "urn:xy", &["urn:x", "urn:y"]);
        conversion(&mut doc, "urn:assembly", &["urn:x", "urn:y"], &["urn:xy"])
            .with_comment("Binding assay");
        let model = GraphModel::from(doc);

        let pattern = PatternBuilder::default()
            .build(Archetype::Binding)
            .expect("pattern");
        let blacklist = Blacklist::new();
        assert_eq!(Searcher::new(&model, &blacklist).search(&pattern).len(), 1);

        let cards = mine(&model, &[Archetype::Binding]);
        assert_eq!(cards.len(), 1);
        let info = &json(&cards[0])["extracted_information"];
        assert_eq!(info["interaction_type"], "binds");
        assert_eq!(info["participant_a"]["entity_text"], "X");
        assert_eq!(info["participant_b"]["entity_text"], "Y");
        assert_eq!(cards[0].evidence, vec!["Binding assay".to_string()]);
    }

    #[test]
    fn repressed_expression() {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:tf-ref", "TP53");
        reference(&mut doc, "urn:target-ref", "MDM2");
        protein(&mut doc, "urn:tf", "TP53", "urn:tf-ref");
        protein(&mut doc, "urn:product", "MDM2", "urn:target-ref");
        control(&mut doc, "urn:ctrl", ControlType::Inhibition, "urn:tf", "urn:tr");
        doc.add_node(
            "urn:tr",
            NodeKind::Interaction(InteractionKind::TemplateReaction),
        );
        doc.add_edge("urn:tr", Relation::Product, "urn:product");
        let cards = mine(&GraphModel::from(doc), &[Archetype::Expression]);

        assert_eq!(cards.len(), 1);
        let info = &json(&cards[0])["extracted_information"];
        assert_eq!(info["interaction_type"], "decreases");
        assert_eq!(info["participant_b"]["entity_text"], "MDM2");
        assert_eq!(
            cards[0].model_elements,
            vec!["urn:ctrl".to_string(), "urn:tr".to_string()]
        );
    }
}

// =============================================================================
// SMALL MOLECULE EXCHANGE
// =============================================================================

mod exchange {
    use super::*;

    #[test]
    fn gef_exchanges_gdp_for_gtp() {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:sos-ref", "SOS1");
        reference(&mut doc, "urn:ras-ref", "HRAS");
        protein(&mut doc, "urn:sos", "SOS1", "urn:sos-ref");
        protein(&mut doc, "urn:ras", "HRAS", "urn:ras-ref");
        molecule(&mut doc, "urn:gdp", "GDP");
        molecule(&mut doc, "urn:gtp", "GTP");
        complex(&mut doc, "urn:ras-gdp", &["urn:ras", "urn:gdp"]);
        complex(&mut doc, "urn:ras-gtp", &["urn:ras", "urn:gtp"]);
        control(&mut doc, "urn:ctrl", ControlType::Activation, "urn:sos", "urn:conv");
        conversion(&mut doc, "urn:conv", &["urn:ras-gdp"], &["urn:ras-gtp"]);
        let cards = mine(
            &GraphModel::from(doc),
            &[Archetype::ControlsSmallMoleculeExchange],
        );

        assert_eq!(cards.len(), 1);
        let info = &json(&cards[0])["extracted_information"];
        assert_eq!(info["interaction_type"], "increases_activity");
        assert_eq!(info["participant_a"]["entity_text"], "SOS1");
        assert_eq!(info["participant_b"]["entity_text"], "HRAS");
    }

    #[test]
    fn gap_triggered_inactivation() {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:gap-ref", "NF1");
        reference(&mut doc, "urn:ras-ref", "HRAS");
        protein(&mut doc, "urn:gap", "NF1", "urn:gap-ref");
        protein(&mut doc, "urn:ras-on", "HRAS", "urn:ras-ref")
            .with_feature(EntityFeature::modification(ACTIVE_TERM));
        protein(&mut doc, "urn:ras-off", "HRAS", "urn:ras-ref")
            .with_feature(EntityFeature::modification(INACTIVE_TERM));
        molecule(&mut doc, "urn:gtp", "GTP");
        molecule(&mut doc, "urn:gdp", "GDP");
        complex(&mut doc, "urn:cx-in", &["urn:ras-on"]);
        complex(&mut doc, "urn:cx-out", &["urn:ras-off"]);
        control(&mut doc, "urn:ctrl", ControlType::Activation, "urn:gap", "urn:conv");
        conversion(
            &mut doc,
            "urn:conv",
            &["urn:gtp", "urn:cx-in"],
            &["urn:gdp", "urn:cx-out"],
        );
        let cards = mine(
            &GraphModel::from(doc),
            &[Archetype::ControlsSmallMoleculeActivation],
        );

        assert_eq!(cards.len(), 1);
        let info = &json(&cards[0])["extracted_information"];
        assert_eq!(info["interaction_type"], "decreases_activity");
        assert_eq!(info["participant_a"]["entity_text"], "NF1");
        assert_eq!(info["participant_b"]["entity_text"], "HRAS");
    }

    #[test]
    fn proteins_trade_nucleotides() {
        // A:GTP + B:GDP -> A:GDP + B:GTP
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:a-ref", "RAB5A");
        reference(&mut doc, "urn:b-ref", "RABGEF1");
        protein(&mut doc, "urn:a", "RAB5A", "urn:a-ref");
        protein(&mut doc, "urn:b", "RABGEF1", "urn:b-ref");
        molecule(&mut doc, "urn:gtp", "GTP");
        molecule(&mut doc, "urn:gdp", "GDP");
        complex(&mut doc, "urn:a-gtp", &["urn:a", "urn:gtp"]);
        complex(&mut doc, "urn:b-gdp", &["urn:b", "urn:gdp"]);
        complex(&mut doc, "urn:a-gdp", &["urn:a", "urn:gdp"]);
        complex(&mut doc, "urn:b-gtp", &["urn:b", "urn:gtp"]);
        conversion(
            &mut doc,
            "urn:conv",
            &["urn:a-gtp", "urn:b-gdp"],
            &["urn:a-gdp", "urn:b-gtp"],
        );
        let cards = mine(&GraphModel::from(doc), &[Archetype::ExchangesSmallMolecules]);

        assert_eq!(cards.len(), 1);
        let info = &json(&cards[0])["extracted_information"];
        assert_eq!(info["interaction_type"], "increases_activity");
        assert_eq!(info["participant_a"]["entity_text"], "RAB5A");
        assert_eq!(info["participant_b"]["entity_text"], "RABGEF1");
        assert_eq!(cards[0].model_elements, vec!["urn:conv".to_string()]);
    }

    #[test]
    fn exchange_molecules_follow_builder() {
        let mut doc = ModelDocument::new();
        reference(&mut doc, "urn:k-ref", "K");
        reference(&mut doc, "urn:p-ref", "P");
        protein(&mut doc, "urn:k", "K", "urn:k-ref");
        protein(&mut doc, "urn:p", "P", "urn:p-ref");
        molecule(&mut doc, "urn:adp", "ADP");
        molecule(&mut doc, "urn:atp", "ATP");
        complex(&mut doc, "urn:p-adp", &["urn:p", "urn:adp"]);
        complex(&mut doc, "urn:p-atp", &["urn:p", "urn:atp"]);
        control(&mut doc, "urn:ctrl", ControlType::Activation, "urn:k", "urn:conv");
        conversion(&mut doc, "urn:conv", &["urn:p-adp"], &["urn:p-atp"]);
        let model = GraphModel::from(doc);
        let blacklist = Blacklist::new();

        let default_pattern = PatternBuilder::default()
            .build(Archetype::ControlsSmallMoleculeExchange)
            .expect("pattern");
        assert!(Searcher::new(&model, &blacklist).search(&default_pattern).is_empty());

        let atp_pattern = PatternBuilder::new(pathcards_core::MoleculePair {
            old: "ADP".to_string(),
            new: "ATP".to_string(),
        })
        .build(Archetype::ControlsSmallMoleculeExchange)
        .expect("pattern");
        assert_eq!(Searcher::new(&model, &blacklist).search(&atp_pattern).len(), 1);
    }
}
