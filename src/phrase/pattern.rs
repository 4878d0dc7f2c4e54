//! Candidate term grammar as a deterministic automaton
//!
//! Over the alphabet N (noun), P (prefix), J (adjective), D (adverb) and
//! S (suffix), a span is a complete candidate when its category string
//! matches one of
//!
//! ```text
//! N N+  |  (P|J) (N|D|S)+ N+  |  P N+ S
//! ```
//!
//! and is still extensible when it is a prefix of such a string, which
//! reduces to `N+ | (P|J) (N|D|S)*`. Both tests are anchored to the whole
//! span; the automaton below answers them one category at a time.

use crate::nlp::pos::Category;

/// State reached after consuming the categories of a span.
///
/// Every state is a live (partial-match) state; a category that leaves the
/// grammar yields `None` from [`PatternState::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternState {
    /// Nothing consumed yet
    #[default]
    Start,
    /// `N`
    Noun,
    /// `N N+`
    NounRun,
    /// `J`
    Adjective,
    /// `P`
    Prefix,
    /// `P N+` with a single noun
    PrefixNoun,
    /// `P N N+`
    PrefixNouns,
    /// `P N+ S`
    PrefixNounsSuffix,
    /// `(P|J) X` with exactly one modifier-or-noun, other than `P N`
    Lead,
    /// `(P|J) (N|D|S)+ N`, at least two symbols after the head
    Compound,
    /// `(P|J) (N|D|S)+` ending in D or S, not `P N+ S`
    Open,
}

impl PatternState {
    /// Advance by one category, or `None` if the span leaves the grammar.
    pub fn step(self, category: Category) -> Option<PatternState> {
        use Category as C;
        use PatternState as S;

        let next = match (self, category) {
            (_, C::Other) => return None,

            (S::Start, C::Noun) => S::Noun,
            (S::Start, C::Prefix) => S::Prefix,
            (S::Start, C::Adjective) => S::Adjective,

            (S::Noun | S::NounRun, C::Noun) => S::NounRun,

            (S::Adjective, C::Noun | C::Adverb | C::Suffix) => S::Lead,

            (S::Prefix, C::Noun) => S::PrefixNoun,
            (S::Prefix, C::Adverb | C::Suffix) => S::Lead,

            (S::PrefixNoun | S::PrefixNouns, C::Noun) => S::PrefixNouns,
            (S::PrefixNoun | S::PrefixNouns, C::Suffix) => S::PrefixNounsSuffix,
            (S::PrefixNoun | S::PrefixNouns, C::Adverb) => S::Open,

            (S::Lead | S::Compound | S::Open | S::PrefixNounsSuffix, C::Noun) => S::Compound,
            (S::Lead | S::Compound | S::Open | S::PrefixNounsSuffix, C::Adverb | C::Suffix) => {
                S::Open
            }

            _ => return None,
        };

        Some(next)
    }

    /// Whether the consumed span is a complete candidate term
    pub fn is_complete(self) -> bool {
        matches!(
            self,
            PatternState::NounRun
                | PatternState::PrefixNouns
                | PatternState::PrefixNounsSuffix
                | PatternState::Compound
        )
    }

    /// Whether any category has been consumed
    pub fn is_started(self) -> bool {
        self != PatternState::Start
    }
}

/// Outcome of feeding one category to a [`PatternAutomaton`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The span is a complete candidate and may keep growing
    Complete,
    /// The span is a valid prefix of a candidate
    Partial,
    /// The span left the grammar
    Rejected,
}

/// Incremental recognizer for growing spans.
#[derive(Debug, Clone, Default)]
pub struct PatternAutomaton {
    state: PatternState,
}

impl PatternAutomaton {
    /// Create an automaton at the start state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> PatternState {
        self.state
    }

    /// Feed one category.
    ///
    /// On rejection the automaton stays in its previous state; call
    /// [`PatternAutomaton::reset`] before starting a new span.
    pub fn feed(&mut self, category: Category) -> Transition {
        match self.state.step(category) {
            Some(next) => {
                self.state = next;
                if next.is_complete() {
                    Transition::Complete
                } else {
                    Transition::Partial
                }
            }
            None => Transition::Rejected,
        }
    }

    /// Return to the start state
    pub fn reset(&mut self) {
        self.state = PatternState::Start;
    }
}

/// Run a whole category string through the automaton
fn run(categories: &[Category]) -> Option<PatternState> {
    categories
        .iter()
        .try_fold(PatternState::Start, |state, &cat| state.step(cat))
}

/// Whether the whole category string is a complete candidate term.
pub fn is_full_match(categories: &[Category]) -> bool {
    run(categories).is_some_and(PatternState::is_complete)
}

/// Whether the whole category string is a complete candidate or a prefix
/// of one. The empty string is not a match.
pub fn is_partial_match(categories: &[Category]) -> bool {
    run(categories).is_some_and(PatternState::is_started)
}
