//! Propositional formula and command syntax trees.
//!
//! Produced by the recursive-descent parser in [`crate::grammar`] and consumed
//! by the proof engine. Every category is a closed sum type:
//!   - [`Formula`]: negation, conjunction, disjunction, implication, ⟂, atoms
//!   - [`Command`]: one line of user input (premise, assumption, box, rule, ...)
//!   - [`Input`]: one element of a rule's input chain (line, box, inline formula)
//!   - [`Rule`]: the 17 inference rules, each with its fixed wire name
//!
//! Formulas own their children, so structural equality and deep copy are the
//! derived `PartialEq` and `Clone`.

use std::fmt;

use crate::printer::{write_formula, Notation};

// ─── Formulas ────────────────────────────────────────────────────

/// A propositional formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// ¬A
    Not(Box<Formula>),
    /// A ∧ B
    And(Box<Formula>, Box<Formula>),
    /// A ∨ B
    Or(Box<Formula>, Box<Formula>),
    /// A → B
    Implies(Box<Formula>, Box<Formula>),
    /// ⟂
    Contradiction,
    /// Propositional variable
    Atom(String),
}

impl Formula {
    /// Atom with the given name. The name is only checked in debug builds;
    /// use [`Formula::try_atom`] for names that did not come from the lexer.
    pub fn atom(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(is_atom_name(&name), "invalid atom name {:?}", name);
        Formula::Atom(name)
    }

    /// Atom with the given name, or `None` unless the name is a non-empty
    /// run of ASCII letters.
    pub fn try_atom(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        is_atom_name(&name).then_some(Formula::Atom(name))
    }

    pub fn not(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Formula, right: Formula) -> Self {
        Formula::Implies(Box::new(left), Box::new(right))
    }

    /// Binding strength used by the printers. Atoms, ⟂ and negations bind
    /// tightest; conjunction and disjunction share one level.
    pub fn precedence(&self) -> u8 {
        match self {
            Formula::Implies(..) => 1,
            Formula::And(..) | Formula::Or(..) => 2,
            Formula::Not(_) | Formula::Contradiction | Formula::Atom(_) => 3,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Formula::And(..) | Formula::Or(..) | Formula::Implies(..)
        )
    }
}

fn is_atom_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic())
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_formula(f, self, &Notation::WIRE)
    }
}

// ─── Rules ───────────────────────────────────────────────────────

/// Inference rules of the calculus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    NotIntro,
    NotElim,
    AndIntro,
    AndElim1,
    AndElim2,
    OrIntro1,
    OrIntro2,
    OrElim,
    ImpliesIntro,
    ImpliesElim,
    ContradictionElim,
    DoubleNotIntro,
    DoubleNotElim,
    ModusTollens,
    ProofByContradiction,
    ExcludedMiddle,
    Copy,
}

impl Rule {
    pub const ALL: [Rule; 17] = [
        Rule::NotIntro,
        Rule::NotElim,
        Rule::AndIntro,
        Rule::AndElim1,
        Rule::AndElim2,
        Rule::OrIntro1,
        Rule::OrIntro2,
        Rule::OrElim,
        Rule::ImpliesIntro,
        Rule::ImpliesElim,
        Rule::ContradictionElim,
        Rule::DoubleNotIntro,
        Rule::DoubleNotElim,
        Rule::ModusTollens,
        Rule::ProofByContradiction,
        Rule::ExcludedMiddle,
        Rule::Copy,
    ];

    /// The rule's name on the command line.
    pub fn name(self) -> &'static str {
        use crate::syntax::*;
        match self {
            Rule::NotIntro => NOT_INTRO,
            Rule::NotElim => NOT_ELIM,
            Rule::AndIntro => AND_INTRO,
            Rule::AndElim1 => AND_ELIM_1,
            Rule::AndElim2 => AND_ELIM_2,
            Rule::OrIntro1 => OR_INTRO_1,
            Rule::OrIntro2 => OR_INTRO_2,
            Rule::OrElim => OR_ELIM,
            Rule::ImpliesIntro => IMPLIES_INTRO,
            Rule::ImpliesElim => IMPLIES_ELIM,
            Rule::ContradictionElim => CONTRADICTION_ELIM,
            Rule::DoubleNotIntro => DOUBLE_NOT_INTRO,
            Rule::DoubleNotElim => DOUBLE_NOT_ELIM,
            Rule::ModusTollens => MODUS_TOLLENS,
            Rule::ProofByContradiction => PROOF_BY_CONTRADICTION,
            Rule::ExcludedMiddle => EXCLUDED_MIDDLE,
            Rule::Copy => COPY,
        }
    }

    pub fn from_name(name: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Commands ────────────────────────────────────────────────────

/// One element of a rule's input chain. Line indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(usize),
    Box { start: usize, end: usize },
    Formula(Formula),
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Line(n) => write!(f, "{}", n + 1),
            Input::Box { start, end } => write!(f, "{}-{}", start + 1, end + 1),
            Input::Formula(form) => write!(f, "{}", form),
        }
    }
}

/// `apply <rule> <inputs>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub rule: Rule,
    pub inputs: Vec<Input>,
}

impl Application {
    pub fn new(rule: Rule, inputs: Vec<Input>) -> Self {
        Self { rule, inputs }
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule.name())?;
        for (i, input) in self.inputs.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, input)?;
        }
        Ok(())
    }
}

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Presume(Formula),
    Assume(Formula),
    Open,
    Close,
    Apply(Application),
    Undo,
    /// Render the proof under the given document name
    Export(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::syntax::keyword;
        match self {
            Command::Presume(form) => write!(f, "{} {}", keyword::PRESUME, form),
            Command::Assume(form) => write!(f, "{} {}", keyword::ASSUME, form),
            Command::Open => f.write_str(keyword::OPEN),
            Command::Close => f.write_str(keyword::CLOSE),
            Command::Apply(app) => write!(f, "{} {}", keyword::APPLY, app),
            Command::Undo => f.write_str(keyword::UNDO),
            Command::Export(name) => write!(f, "{} {}", keyword::EXPORT, name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_atom_rejects_bad_names() {
        assert_eq!(Formula::try_atom("pq"), Some(Formula::atom("pq")));
        assert_eq!(Formula::try_atom(""), None);
        assert_eq!(Formula::try_atom("p1"), None);
        assert_eq!(Formula::try_atom("p q"), None);
    }

    #[test]
    fn structural_equality_compares_names_and_shape() {
        let a = Formula::and(Formula::atom("p"), Formula::not(Formula::atom("q")));
        let b = Formula::and(Formula::atom("p"), Formula::not(Formula::atom("q")));
        let c = Formula::or(Formula::atom("p"), Formula::not(Formula::atom("q")));
        let d = Formula::and(Formula::atom("p"), Formula::not(Formula::atom("r")));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_ne!(Formula::Contradiction, Formula::atom("p"));
    }

    #[test]
    fn clone_is_independent() {
        let original = Formula::implies(Formula::atom("p"), Formula::atom("q"));
        let mut copy = original.clone();
        if let Formula::Implies(_, rhs) = &mut copy {
            **rhs = Formula::atom("r");
        }
        assert_eq!(
            original,
            Formula::implies(Formula::atom("p"), Formula::atom("q"))
        );
        assert_ne!(original, copy);
    }

    #[test]
    fn rule_names_are_unique() {
        for (i, a) in Rule::ALL.iter().enumerate() {
            for b in &Rule::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
            assert_eq!(Rule::from_name(a.name()), Some(*a));
        }
        assert_eq!(Rule::from_name("->e"), None);
    }

    #[test]
    fn application_display_uses_one_based_refs() {
        let app = Application::new(
            Rule::OrElim,
            vec![
                Input::Line(0),
                Input::Box { start: 1, end: 2 },
                Input::Box { start: 3, end: 4 },
            ],
        );
        assert_eq!(app.to_string(), "/e 1, 2-3, 4-5");
        let lem = Application::new(Rule::ExcludedMiddle, vec![Input::Formula(Formula::atom("p"))]);
        assert_eq!(lem.to_string(), "LEM p");
    }
}
