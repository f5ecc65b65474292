//! Event-handler variant recipes.
//!
//! Each recipe describes one event-handler surface form as data: which word
//! order family it applies to, its priority offset from the base priority,
//! the sequence of slots it is built from, and the conditions under which it
//! makes sense. The generator interprets the table; adding a variant means
//! adding a row.
//!
//! Offsets rank the more specific forms above the more generic ones, so that
//! a two-role form is tried before a one-role form whose prefix it shares.
//!
//! | family       | variant                    | shape                                           | offset |
//! |--------------|----------------------------|-------------------------------------------------|--------|
//! | verb-final   | two-role, event first      | event evM role1 m1 role2 m2 verb                | +55    |
//! | verb-final   | compact                    | event fused-evM dest? patient pM verb           | +52    |
//! | verb-final   | event first                | event evM dest? patient pM verb                 | +50    |
//! | verb-final   | temporal                   | event poss? temporal patient pM verb            | +49    |
//! | verb-final   | event only                 | event evM verb                                  | +48    |
//! | verb-final   | two-role, destination first| dest dM event evM patient pM verb               | +48    |
//! | verb-final   | patient first              | patient pM event evM verb                       | +45    |
//! | verb-final   | patient + destination first| patient pM dest dM event evM verb               | +40    |
//! | verb-initial | two-role, event first      | evM event verb role1 role2                      | +55    |
//! | verb-initial | event first                | evM event verb patient dest?                    | +50    |
//! | verb-initial | negated event              | evM neg event verb patient dest?                | +48    |
//! | verb-initial | two-role, verb first       | verb role1 role2 evM event                      | +48    |
//! | verb-initial | verb first                 | verb patient dest? evM event                    | +45    |
//! | verb-initial | proclitic                  | conj event verb patient dest?                   | +45    |

use polyglot_grammar::WordOrder;

use crate::pattern::PatternVariant;

/// Verb-final (SOV) or verb-initial (SVO, VSO) languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    VerbFinal,
    VerbInitial,
}

impl From<WordOrder> for Family {
    fn from(order: WordOrder) -> Self {
        if order.is_verb_final() {
            Family::VerbFinal
        } else {
            Family::VerbInitial
        }
    }
}

/// How the event clause is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventForm {
    /// The event with the event marker on its declared side.
    Marked,
    /// The event with the fused single-token spelling of a multi-word marker.
    Compact,
    /// The event preceded by the negation marker, then marked.
    Negated,
    /// The bare event, introduced by a conjunction slot instead of a marker.
    Bare,
}

/// Which schema role a role slot binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// The patient, or the first ordered role when there is no patient.
    Primary,
    /// The destination, when it is not the primary.
    Secondary,
    /// The first of exactly two required roles, in word order.
    First,
    /// The second of exactly two required roles, in word order.
    Second,
    /// Of two required roles, the destination (else the second).
    Lead,
    /// Of two required roles, the one `Lead` did not take.
    Trail,
}

/// Whether a role slot follows the schema or is forced to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Declared,
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Verb,
    Event(EventForm),
    /// The event, an optional possessive and a temporal particle.
    Temporal,
    /// A conjunction proclitic.
    Conjunction,
    Role(Pick, Presence),
}

/// A condition a recipe needs from the schema or the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    HasPrimary,
    HasSecondary,
    /// No secondary role, or an optional one.
    SecondaryOmissible,
    /// The secondary role's marker differs from the event marker.
    DistinctSecondaryMarker,
    CompactEventMarker,
    TemporalMarkers,
    NegationMarker,
    ProcliticPrefixes,
    TwoRequiredRoles,
}

#[derive(Debug, Clone, Copy)]
pub struct Recipe {
    pub variant: PatternVariant,
    pub family: Family,
    pub offset: i32,
    pub slots: &'static [Slot],
    pub requires: &'static [Requirement],
    /// The primary role is left out and filled with the implicit patient.
    pub implicit_primary: bool,
}

use EventForm::*;
use Family::*;
use Pick::*;
use Presence::*;
use Requirement::*;
use Slot::{Conjunction, Event, Role, Temporal, Verb};

pub const RECIPES: &[Recipe] = &[
    Recipe {
        variant: PatternVariant::TwoRoleEventFirst,
        family: VerbFinal,
        offset: 55,
        slots: &[Event(Marked), Role(First, Required), Role(Second, Required), Verb],
        requires: &[TwoRequiredRoles],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::CompactEvent,
        family: VerbFinal,
        offset: 52,
        slots: &[Event(Compact), Role(Secondary, Declared), Role(Primary, Declared), Verb],
        requires: &[CompactEventMarker],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::EventFirst,
        family: VerbFinal,
        offset: 50,
        slots: &[Event(Marked), Role(Secondary, Declared), Role(Primary, Declared), Verb],
        requires: &[],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::Temporal,
        family: VerbFinal,
        offset: 49,
        slots: &[Temporal, Role(Primary, Declared), Verb],
        requires: &[TemporalMarkers],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::EventOnly,
        family: VerbFinal,
        offset: 48,
        slots: &[Event(Marked), Verb],
        requires: &[HasPrimary],
        implicit_primary: true,
    },
    Recipe {
        variant: PatternVariant::TwoRoleDestinationFirst,
        family: VerbFinal,
        offset: 48,
        slots: &[Role(Lead, Required), Event(Marked), Role(Trail, Required), Verb],
        requires: &[TwoRequiredRoles],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::PatientFirst,
        family: VerbFinal,
        offset: 45,
        slots: &[Role(Primary, Declared), Event(Marked), Verb],
        requires: &[HasPrimary, SecondaryOmissible],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::PatientDestinationFirst,
        family: VerbFinal,
        offset: 40,
        slots: &[
            Role(Primary, Declared),
            Role(Secondary, Required),
            Event(Marked),
            Verb,
        ],
        requires: &[HasPrimary, HasSecondary, DistinctSecondaryMarker],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::TwoRoleEventFirst,
        family: VerbInitial,
        offset: 55,
        slots: &[Event(Marked), Verb, Role(First, Required), Role(Second, Required)],
        requires: &[TwoRequiredRoles],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::EventFirst,
        family: VerbInitial,
        offset: 50,
        slots: &[Event(Marked), Verb, Role(Primary, Declared), Role(Secondary, Declared)],
        requires: &[],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::NegatedEvent,
        family: VerbInitial,
        offset: 48,
        slots: &[Event(Negated), Verb, Role(Primary, Declared), Role(Secondary, Declared)],
        requires: &[NegationMarker],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::TwoRoleVerbFirst,
        family: VerbInitial,
        offset: 48,
        slots: &[Verb, Role(First, Required), Role(Second, Required), Event(Marked)],
        requires: &[TwoRequiredRoles],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::VerbFirst,
        family: VerbInitial,
        offset: 45,
        slots: &[Verb, Role(Primary, Declared), Role(Secondary, Declared), Event(Marked)],
        requires: &[],
        implicit_primary: false,
    },
    Recipe {
        variant: PatternVariant::Proclitic,
        family: VerbInitial,
        offset: 45,
        slots: &[
            Conjunction,
            Event(Bare),
            Verb,
            Role(Primary, Declared),
            Role(Secondary, Declared),
        ],
        requires: &[ProcliticPrefixes],
        implicit_primary: false,
    },
];

/// The recipes that apply to `word_order`, highest offset first.
pub fn recipes_for(word_order: WordOrder) -> impl Iterator<Item = &'static Recipe> {
    let family = Family::from(word_order);
    RECIPES.iter().filter(move |recipe| recipe.family == family)
}
