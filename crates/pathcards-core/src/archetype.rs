//! # Mechanism Archetypes
//!
//! The eight hand-authored patterns the miner runs, composed purely from the
//! constraint library. Adding an archetype means composing existing
//! constraints here; the searcher does not change.
//!
//! Each [`Archetype`] also names the labels the card extractor reads: the
//! source and target participants, the mediator interactions (evidence and
//! model elements) and the control nodes whose polarity sets the sign.

use crate::primitives::{DEFAULT_EXCHANGE_NEW, DEFAULT_EXCHANGE_OLD};
use crate::{
    Constraint, Direction, NodeType, PathcardsError, Pattern, Relation, Side, Traversal,
};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ARCHETYPES
// =============================================================================

/// The closed set of mechanism archetypes, in mining order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Archetype {
    ControlsStateChange,
    ControlsStateChangeButIsParticipant,
    ControlsStateChangeThroughSmallMolecule,
    Binding,
    Expression,
    ControlsSmallMoleculeExchange,
    ExchangesSmallMolecules,
    ControlsSmallMoleculeActivation,
}

/// How the extractor turns a match of an archetype into cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardShape {
    /// Before/after differencing of the changed entity.
    StateChange,
    Binding,
    Expression,
    /// Single activity card signed by the controls.
    Exchange,
    /// Single activity card from one protein to the other.
    Transfer,
    /// Single activity card signed by the differential activity label.
    Activation,
}

impl Archetype {
    /// Mining order.
    pub const ALL: [Archetype; 8] = [
        Self::ControlsStateChange,
        Self::ControlsStateChangeButIsParticipant,
        Self::ControlsStateChangeThroughSmallMolecule,
        Self::Binding,
        Self::Expression,
        Self::ControlsSmallMoleculeExchange,
        Self::ExchangesSmallMolecules,
        Self::ControlsSmallMoleculeActivation,
    ];

    /// Stable kebab-case name, used as the pattern name and on the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ControlsStateChange => "controls-state-change",
            Self::ControlsStateChangeButIsParticipant => "controls-state-change-but-is-participant",
            Self::ControlsStateChangeThroughSmallMolecule => {
                "controls-state-change-through-small-molecule"
            }
            Self::Binding => "binding",
            Self::Expression => "expression",
            Self::ControlsSmallMoleculeExchange => "controls-small-molecule-exchange",
            Self::ExchangesSmallMolecules => "exchanges-small-molecules",
            Self::ControlsSmallMoleculeActivation => "controls-small-molecule-activation",
        }
    }

    #[must_use]
    pub const fn shape(self) -> CardShape {
        match self {
            Self::ControlsStateChange
            | Self::ControlsStateChangeButIsParticipant
            | Self::ControlsStateChangeThroughSmallMolecule => CardShape::StateChange,
            Self::Binding => CardShape::Binding,
            Self::Expression => CardShape::Expression,
            Self::ControlsSmallMoleculeExchange => CardShape::Exchange,
            Self::ExchangesSmallMolecules => CardShape::Transfer,
            Self::ControlsSmallMoleculeActivation => CardShape::Activation,
        }
    }

    /// Label of participant A.
    #[must_use]
    pub const fn source_label(self) -> &'static str {
        match self {
            Self::ControlsStateChangeThroughSmallMolecule => "upper controller PE",
            Self::Binding => "PE1",
            Self::Expression => "TF PE",
            Self::ExchangesSmallMolecules => "Protein A",
            _ => "controller PE",
        }
    }

    /// Label of participant B.
    #[must_use]
    pub const fn target_label(self) -> &'static str {
        match self {
            Self::Binding => "PE2",
            Self::Expression => "product ER",
            Self::ControlsSmallMoleculeExchange => "input SPE",
            Self::ExchangesSmallMolecules => "Protein B",
            _ => "changed ER",
        }
    }

    /// Interaction labels whose ids and comments back a card.
    #[must_use]
    pub const fn mediator_labels(self) -> &'static [&'static str] {
        match self {
            Self::ControlsStateChangeButIsParticipant
            | Self::Binding
            | Self::ExchangesSmallMolecules => &["Conversion"],
            Self::ControlsStateChangeThroughSmallMolecule => {
                &["upper Control", "upper Conversion", "Control", "Conversion"]
            }
            Self::Expression => &["Control", "TempReac"],
            _ => &["Control", "Conversion"],
        }
    }

    /// Control labels whose polarities multiply into the control sign.
    #[must_use]
    pub const fn control_labels(self) -> &'static [&'static str] {
        match self {
            Self::ControlsStateChangeButIsParticipant
            | Self::Binding
            | Self::ExchangesSmallMolecules => &[],
            Self::ControlsStateChangeThroughSmallMolecule => &["upper Control", "Control"],
            _ => &["Control"],
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = PathcardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| PathcardsError::ConfigError(format!("unknown archetype '{}'", s)))
    }
}

/// Labels of the before/after states read by state-change differencing.
pub mod state_labels {
    pub const INPUT_SIMPLE: &str = "input simple PE";
    pub const INPUT_WRAPPER: &str = "input PE";
    pub const OUTPUT_SIMPLE: &str = "output simple PE";
    pub const OUTPUT_WRAPPER: &str = "output PE";
}

// =============================================================================
// PATTERN BUILDER
// =============================================================================

/// Small molecules swapped by the exchange archetypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculePair {
    /// Released (e.g. GDP).
    pub old: String,
    /// Taken up (e.g. GTP).
    pub new: String,
}

impl Default for MoleculePair {
    fn default() -> Self {
        Self {
            old: DEFAULT_EXCHANGE_OLD.to_string(),
            new: DEFAULT_EXCHANGE_NEW.to_string(),
        }
    }
}

/// Composes the archetype patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternBuilder {
    pub exchange: MoleculePair,
}

impl PatternBuilder {
    #[must_use]
    pub fn new(exchange: MoleculePair) -> Self {
        Self { exchange }
    }

    /// Build the pattern of one archetype.
    pub fn build(&self, archetype: Archetype) -> Result<Pattern, PathcardsError> {
        match archetype {
            Archetype::ControlsStateChange => controls_state_change(),
            Archetype::ControlsStateChangeButIsParticipant => {
                controls_state_change_but_is_participant()
            }
            Archetype::ControlsStateChangeThroughSmallMolecule => {
                controls_state_change_through_small_molecule()
            }
            Archetype::Binding => binding(),
            Archetype::Expression => expression(),
            Archetype::ControlsSmallMoleculeExchange => {
                controls_small_molecule_exchange(&self.exchange)
            }
            Archetype::ExchangesSmallMolecules => exchanges_small_molecules(&self.exchange),
            Archetype::ControlsSmallMoleculeActivation => {
                controls_small_molecule_activation(&self.exchange)
            }
        }
    }

    /// Build every archetype, in mining order.
    pub fn build_all(&self) -> Result<Vec<(Archetype, Pattern)>, PathcardsError> {
        Archetype::ALL
            .into_iter()
            .map(|a| self.build(a).map(|p| (a, p)))
            .collect()
    }
}

// =============================================================================
// CONSTRAINT SHORTHANDS
// =============================================================================

fn hop(relation: Relation, direction: Direction) -> Traversal {
    Traversal::new(relation, direction)
}

/// Entity -> the controls it is the controller of.
fn pe_to_control() -> Constraint {
    Constraint::Relation(hop(Relation::Controller, Direction::Backward).to(NodeType::Control))
}

/// Control -> controlled conversion, through controls of controls.
fn control_to_conversion() -> Constraint {
    Constraint::Relation(
        hop(Relation::Controlled, Direction::Forward)
            .closure()
            .to(NodeType::Conversion),
    )
}

fn control_to_template_reaction() -> Constraint {
    Constraint::Relation(
        hop(Relation::Controlled, Direction::Forward)
            .closure()
            .to(NodeType::TemplateReaction),
    )
}

/// Entity -> conversions it takes part in.
fn participates_in_conversion() -> Constraint {
    Constraint::Relation(hop(Relation::Participant, Direction::Backward).to(NodeType::Conversion))
}

fn participant() -> Constraint {
    Constraint::Relation(hop(Relation::Participant, Direction::Forward))
}

fn input() -> Constraint {
    Constraint::Relation(hop(Relation::Input, Direction::Forward))
}

fn output() -> Constraint {
    Constraint::Relation(hop(Relation::Output, Direction::Forward))
}

fn product() -> Constraint {
    Constraint::Relation(hop(Relation::Product, Direction::Forward))
}

fn pe_to_er() -> Constraint {
    Constraint::Relation(hop(Relation::EntityReference, Direction::Forward))
}

/// Reference -> itself and its specific member references.
fn linked_er() -> Constraint {
    Constraint::LinkToSpecific(Some(NodeType::EntityReference))
}

/// Complex -> nested components.
fn complex_members() -> Constraint {
    Constraint::Relation(hop(Relation::Component, Direction::Forward).closure())
}

fn link_to_specific() -> Constraint {
    Constraint::LinkToSpecific(None)
}

fn of_type(node_type: NodeType) -> Constraint {
    Constraint::Type(node_type)
}

fn equal(expected: bool) -> Constraint {
    Constraint::Equal(expected)
}

fn other_side() -> Constraint {
    Constraint::ConversionSide(Side::OtherSide)
}

// =============================================================================
// PATTERNS
// =============================================================================

/// Input and output states of one molecule across "Conversion", linked
/// through a common entity reference to "changed ER".
fn state_change(p: &mut Pattern) -> Result<(), PathcardsError> {
    use state_labels::{INPUT_SIMPLE, INPUT_WRAPPER, OUTPUT_SIMPLE, OUTPUT_WRAPPER};

    p.add(input(), &["Conversion", INPUT_WRAPPER])?
        .add(link_to_specific(), &[INPUT_WRAPPER, INPUT_SIMPLE])?
        .add(of_type(NodeType::SequenceEntity), &[INPUT_SIMPLE])?
        .add(pe_to_er(), &[INPUT_SIMPLE, "changed generic ER"])?
        .add(other_side(), &[INPUT_WRAPPER, "Conversion", OUTPUT_WRAPPER])?
        .add(equal(false), &[INPUT_WRAPPER, OUTPUT_WRAPPER])?
        .add(link_to_specific(), &[OUTPUT_WRAPPER, OUTPUT_SIMPLE])?
        .add(pe_to_er(), &[OUTPUT_SIMPLE, "changed generic ER"])?
        .add(linked_er(), &["changed generic ER", "changed ER"])?;
    Ok(())
}

fn controls_state_change() -> Result<Pattern, PathcardsError> {
    let mut p = Pattern::new(
        Archetype::ControlsStateChange.name(),
        NodeType::PhysicalEntity,
        "controller PE",
    );
    p.add(pe_to_control(), &["controller PE", "Control"])?
        .add(control_to_conversion(), &["Control", "Conversion"])?;
    state_change(&mut p)?;
    Ok(p)
}

fn controls_state_change_but_is_participant() -> Result<Pattern, PathcardsError> {
    let mut p = Pattern::new(
        Archetype::ControlsStateChangeButIsParticipant.name(),
        NodeType::PhysicalEntity,
        "controller PE",
    );
    p.add(participates_in_conversion(), &["controller PE", "Conversion"])?
        .add(input(), &["Conversion", "controller PE"])?
        .add(output(), &["Conversion", "controller PE"])?;
    state_change(&mut p)?;
    p.add(equal(false), &["controller PE", "input PE"])?
        .add(equal(false), &["controller PE", "output PE"])?;
    Ok(p)
}

fn controls_state_change_through_small_molecule() -> Result<Pattern, PathcardsError> {
    let mut p = Pattern::new(
        Archetype::ControlsStateChangeThroughSmallMolecule.name(),
        NodeType::PhysicalEntity,
        "upper controller PE",
    );
    let relay_is_also_consumed =
        Constraint::chain(vec![other_side(), link_to_specific()])?;

    p.add(pe_to_control(), &["upper controller PE", "upper Control"])?
        .add(control_to_conversion(), &["upper Control", "upper Conversion"])?
        .add(
            Constraint::not(participant()),
            &["upper Conversion", "upper controller PE"],
        )?
        .add(
            Constraint::Relation(hop(Relation::Output, Direction::Forward).skipping_ubiquitous()),
            &["upper Conversion", "controller PE"],
        )?
        .add(of_type(NodeType::SmallMolecule), &["controller PE"])?
        .add(
            Constraint::not(relay_is_also_consumed),
            &["controller PE", "upper Conversion", "controller PE"],
        )?
        .add(pe_to_control(), &["controller PE", "Control"])?
        .add(control_to_conversion(), &["Control", "Conversion"])?
        .add(equal(false), &["upper Conversion", "Conversion"])?;
    state_change(&mut p)?;
    p.add(of_type(NodeType::SequenceEntityReference), &["changed ER"])?;
    Ok(p)
}

fn binding() -> Result<Pattern, PathcardsError> {
    let mut p = Pattern::new(Archetype::Binding.name(), NodeType::PhysicalEntity, "PE1");
    p.add(participates_in_conversion(), &["PE1", "Conversion"])?
        .add(
            Constraint::ConversionSide(Side::SameSide),
            &["PE1", "Conversion", "PE2"],
        )?
        .add(Constraint::CanonicalOrder, &["PE1", "PE2"])?
        .add(other_side(), &["PE1", "Conversion", "Complex"])?
        .add(of_type(NodeType::Complex), &["Complex"])?
        .add(complex_members(), &["Complex", "PE1"])?
        .add(complex_members(), &["Complex", "PE2"])?;
    Ok(p)
}

fn expression() -> Result<Pattern, PathcardsError> {
    let mut p = Pattern::new(Archetype::Expression.name(), NodeType::PhysicalEntity, "TF PE");
    p.add(pe_to_control(), &["TF PE", "Control"])?
        .add(control_to_template_reaction(), &["Control", "TempReac"])?
        .add(product(), &["TempReac", "product PE"])?
        .add(link_to_specific(), &["product PE", "product SPE"])?
        .add(of_type(NodeType::SequenceEntity), &["product SPE"])?
        .add(pe_to_er(), &["product SPE", "product generic ER"])?
        .add(linked_er(), &["product generic ER", "product ER"])?;
    Ok(p)
}

fn controls_small_molecule_exchange(pair: &MoleculePair) -> Result<Pattern, PathcardsError> {
    let mut p = Pattern::new(
        Archetype::ControlsSmallMoleculeExchange.name(),
        NodeType::PhysicalEntity,
        "controller PE",
    );
    p.add(pe_to_control(), &["controller PE", "Control"])?
        .add(control_to_conversion(), &["Control", "Conversion"])?
        .add(Constraint::not(participant()), &["Conversion", "controller PE"])?
        .add(input(), &["Conversion", "input PE"])?
        .add(of_type(NodeType::Complex), &["input PE"])?
        .add(
            Constraint::ContainsNamedComponent(pair.old.clone()),
            &["input PE"],
        )?
        .add(complex_members(), &["input PE", "input SPE"])?
        .add(of_type(NodeType::Protein), &["input SPE"])?
        .add(other_side(), &["input PE", "Conversion", "output PE"])?
        .add(equal(false), &["input PE", "output PE"])?
        .add(of_type(NodeType::Complex), &["output PE"])?
        .add(
            Constraint::ContainsNamedComponent(pair.new.clone()),
            &["output PE"],
        )?
        .add(complex_members(), &["output PE", "input SPE"])?;
    Ok(p)
}

fn exchanges_small_molecules(pair: &MoleculePair) -> Result<Pattern, PathcardsError> {
    let mut p = Pattern::new(
        Archetype::ExchangesSmallMolecules.name(),
        NodeType::Conversion,
        "Conversion",
    );
    let holds = |name: &str| Constraint::ContainsNamedComponent(name.to_string());

    p.add(input(), &["Conversion", "input Complex1"])?
        .add(of_type(NodeType::Complex), &["input Complex1"])?
        .add(input(), &["Conversion", "input Complex2"])?
        .add(of_type(NodeType::Complex), &["input Complex2"])?
        .add(equal(false), &["input Complex1", "input Complex2"])?
        .add(holds(&pair.new), &["input Complex1"])?
        .add(holds(&pair.old), &["input Complex2"])?
        .add(complex_members(), &["input Complex1", "Protein A"])?
        .add(complex_members(), &["input Complex2", "Protein B"])?
        .add(of_type(NodeType::Protein), &["Protein A"])?
        .add(of_type(NodeType::Protein), &["Protein B"])?
        .add(other_side(), &["input Complex1", "Conversion", "output Complex1"])?
        .add(of_type(NodeType::Complex), &["output Complex1"])?
        .add(equal(false), &["input Complex1", "output Complex1"])?
        .add(equal(false), &["input Complex2", "output Complex1"])?
        .add(holds(&pair.old), &["output Complex1"])?
        .add(complex_members(), &["output Complex1", "Protein A"])?
        .add(other_side(), &["input Complex1", "Conversion", "output Complex2"])?
        .add(of_type(NodeType::Complex), &["output Complex2"])?
        .add(equal(false), &["output Complex1", "output Complex2"])?
        .add(equal(false), &["input Complex1", "output Complex2"])?
        .add(equal(false), &["input Complex2", "output Complex2"])?
        .add(holds(&pair.new), &["output Complex2"])?
        .add(complex_members(), &["output Complex2", "Protein B"])?;
    Ok(p)
}

fn controls_small_molecule_activation(pair: &MoleculePair) -> Result<Pattern, PathcardsError> {
    let mut p = Pattern::new(
        Archetype::ControlsSmallMoleculeActivation.name(),
        NodeType::PhysicalEntity,
        "controller PE",
    );
    p.add(pe_to_control(), &["controller PE", "Control"])?
        .add(control_to_conversion(), &["Control", "Conversion"])?
        .add(Constraint::not(participant()), &["Conversion", "controller PE"])?
        .add(input(), &["Conversion", "input SM"])?
        .add(of_type(NodeType::SmallMolecule), &["input SM"])?
        .add(Constraint::HasName(pair.new.clone()), &["input SM"])?
        .add(input(), &["Conversion", "input PE"])?
        .add(equal(false), &["input PE", "input SM"])?
        .add(link_to_specific(), &["input PE", "input SPE"])?
        .add(complex_members(), &["input PE", "input SPE"])?
        .add(of_type(NodeType::Protein), &["input SPE"])?
        .add(other_side(), &["input PE", "Conversion", "output SM"])?
        .add(of_type(NodeType::SmallMolecule), &["output SM"])?
        .add(Constraint::HasName(pair.old.clone()), &["output SM"])?
        .add(other_side(), &["input PE", "Conversion", "output PE"])?
        .add(equal(false), &["output SM", "output PE"])?
        .add(equal(false), &["input PE", "output PE"])?
        .add(link_to_specific(), &["output PE", "output SPE"])?
        .add(
            Constraint::DifferentialActivityLabel(None),
            &["input SPE", "output SPE"],
        )?
        .add(pe_to_er(), &["input SPE", "changed ER"])?
        .add(pe_to_er(), &["output SPE", "changed ER"])?;
    Ok(p)
}

// =============================================================================
// TESTS
// =============================================================================
