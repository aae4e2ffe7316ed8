// proof/src/rules.rs — Inference rules
//
// One handler per rule. Each handler checks, in order:
//   1. input shape: exact arity and kind (line / box / inline formula)
//   2. visibility of every cited line and box
//   3. the structural pattern the rule requires
// and then builds the conclusion. Handlers only read the proof; appending the
// conclusion is done by `Proof::apply`, so a rejected rule changes nothing.
//
// Formulas taken from existing lines are cloned; inline formulas are moved
// out of the application into the conclusion.

use nde_parser::{Formula, Input, Rule};

use crate::error::{ProofError, Result};
use crate::state::Proof;

/// Derive the conclusion of applying `rule` to `inputs`.
pub(crate) fn derive(proof: &Proof, rule: Rule, inputs: Vec<Input>) -> Result<Formula> {
    match rule {
        Rule::NotIntro => not_intro(proof, inputs),
        Rule::NotElim => not_elim(proof, inputs),
        Rule::AndIntro => and_intro(proof, inputs),
        Rule::AndElim1 => and_elim(proof, inputs, Side::Left),
        Rule::AndElim2 => and_elim(proof, inputs, Side::Right),
        Rule::OrIntro1 => or_intro_1(proof, inputs),
        Rule::OrIntro2 => or_intro_2(proof, inputs),
        Rule::OrElim => or_elim(proof, inputs),
        Rule::ImpliesIntro => implies_intro(proof, inputs),
        Rule::ImpliesElim => implies_elim(proof, inputs),
        Rule::ContradictionElim => contradiction_elim(proof, inputs),
        Rule::DoubleNotIntro => double_not_intro(proof, inputs),
        Rule::DoubleNotElim => double_not_elim(proof, inputs),
        Rule::ModusTollens => modus_tollens(proof, inputs),
        Rule::ProofByContradiction => proof_by_contradiction(proof, inputs),
        Rule::ExcludedMiddle => excluded_middle(inputs),
        Rule::Copy => copy(proof, inputs),
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

// ─── Input shape ─────────────────────────────────────────────────

/// Exactly `N` inputs, or "invalid rule inputs".
fn take<const N: usize>(inputs: Vec<Input>) -> Result<[Input; N]> {
    inputs.try_into().map_err(|_| ProofError::InvalidInputs)
}

// ─── Formula shape ───────────────────────────────────────────────

fn as_not(form: &Formula, line: usize) -> Result<&Formula> {
    match form {
        Formula::Not(inner) => Ok(inner),
        _ => Err(ProofError::WrongShape {
            line,
            expected: "a negation",
        }),
    }
}

fn as_and(form: &Formula, line: usize) -> Result<(&Formula, &Formula)> {
    match form {
        Formula::And(l, r) => Ok((l, r)),
        _ => Err(ProofError::WrongShape {
            line,
            expected: "a conjunction",
        }),
    }
}

fn as_or(form: &Formula, line: usize) -> Result<(&Formula, &Formula)> {
    match form {
        Formula::Or(l, r) => Ok((l, r)),
        _ => Err(ProofError::WrongShape {
            line,
            expected: "a disjunction",
        }),
    }
}

fn as_implies(form: &Formula, line: usize) -> Result<(&Formula, &Formula)> {
    match form {
        Formula::Implies(l, r) => Ok((l, r)),
        _ => Err(ProofError::WrongShape {
            line,
            expected: "an implication",
        }),
    }
}

fn expect_contradiction(form: &Formula, line: usize) -> Result<()> {
    match form {
        Formula::Contradiction => Ok(()),
        _ => Err(ProofError::WrongShape {
            line,
            expected: "a contradiction",
        }),
    }
}

fn expect_equal(a: &Formula, left: usize, b: &Formula, right: usize) -> Result<()> {
    if a == b {
        Ok(())
    } else {
        Err(ProofError::Mismatch { left, right })
    }
}

// ─── Negation ────────────────────────────────────────────────────

/// [X ... ⟂] ⊢ ¬X
fn not_intro(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Box { start, end }] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let (first, last) = proof.visible_box(start, end)?;
    expect_contradiction(last, end)?;
    Ok(Formula::not(first.clone()))
}

/// Y, ¬Y ⊢ ⟂
fn not_elim(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a), Input::Line(b)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let fa = proof.visible_line(a)?;
    let fb = proof.visible_line(b)?;
    let negated = as_not(fb, b)?;
    expect_equal(fa, a, negated, b)?;
    Ok(Formula::Contradiction)
}

/// X ⊢ ¬¬X
fn double_not_intro(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let fa = proof.visible_line(a)?;
    Ok(Formula::not(Formula::not(fa.clone())))
}

/// ¬¬X ⊢ X
fn double_not_elim(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let fa = proof.visible_line(a)?;
    match fa {
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Not(x) => Ok(x.as_ref().clone()),
            _ => Err(ProofError::WrongShape {
                line: a,
                expected: "a double negation",
            }),
        },
        _ => Err(ProofError::WrongShape {
            line: a,
            expected: "a double negation",
        }),
    }
}

// ─── Conjunction ─────────────────────────────────────────────────

/// X, Y ⊢ X ∧ Y
fn and_intro(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a), Input::Line(b)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let fa = proof.visible_line(a)?;
    let fb = proof.visible_line(b)?;
    Ok(Formula::and(fa.clone(), fb.clone()))
}

/// X ∧ Y ⊢ X (left) or Y (right)
fn and_elim(proof: &Proof, inputs: Vec<Input>, side: Side) -> Result<Formula> {
    let [Input::Line(a)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let (left, right) = as_and(proof.visible_line(a)?, a)?;
    Ok(match side {
        Side::Left => left.clone(),
        Side::Right => right.clone(),
    })
}

// ─── Disjunction ─────────────────────────────────────────────────

/// X ⊢ X ∨ Y, with Y given inline
fn or_intro_1(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a), Input::Formula(right)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let fa = proof.visible_line(a)?;
    Ok(Formula::or(fa.clone(), right))
}

/// Y ⊢ X ∨ Y, with X given inline
fn or_intro_2(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Formula(left), Input::Line(a)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let fa = proof.visible_line(a)?;
    Ok(Formula::or(left, fa.clone()))
}

/// X ∨ Y, [X ... Z], [Y ... Z] ⊢ Z
fn or_elim(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a), Input::Box { start: s1, end: e1 }, Input::Box { start: s2, end: e2 }] =
        take(inputs)?
    else {
        return Err(ProofError::InvalidInputs);
    };

    let fa = proof.visible_line(a)?;
    let (first1, last1) = proof.visible_box(s1, e1)?;
    let (first2, last2) = proof.visible_box(s2, e2)?;

    let (x, y) = as_or(fa, a)?;
    expect_equal(x, a, first1, s1)?;
    expect_equal(y, a, first2, s2)?;
    expect_equal(last1, e1, last2, e2)?;
    Ok(last1.clone())
}

// ─── Implication ─────────────────────────────────────────────────

/// [X ... Y] ⊢ X → Y
fn implies_intro(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Box { start, end }] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let (first, last) = proof.visible_box(start, end)?;
    Ok(Formula::implies(first.clone(), last.clone()))
}

/// X, X → Y ⊢ Y
fn implies_elim(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a), Input::Line(b)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let fa = proof.visible_line(a)?;
    let fb = proof.visible_line(b)?;
    let (antecedent, consequent) = as_implies(fb, b)?;
    expect_equal(fa, a, antecedent, b)?;
    Ok(consequent.clone())
}

/// X → Y, ¬Y ⊢ ¬X
fn modus_tollens(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a), Input::Line(b)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let fa = proof.visible_line(a)?;
    let fb = proof.visible_line(b)?;
    let (antecedent, consequent) = as_implies(fa, a)?;
    let negated = as_not(fb, b)?;
    expect_equal(consequent, a, negated, b)?;
    Ok(Formula::not(antecedent.clone()))
}

// ─── Contradiction and classical rules ───────────────────────────

/// ⟂ ⊢ X, with X given inline
fn contradiction_elim(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a), Input::Formula(conclusion)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    expect_contradiction(proof.visible_line(a)?, a)?;
    Ok(conclusion)
}

/// [¬X ... ⟂] ⊢ X
fn proof_by_contradiction(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Box { start, end }] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let (first, last) = proof.visible_box(start, end)?;
    expect_contradiction(last, end)?;
    let x = as_not(first, start)?;
    Ok(x.clone())
}

/// ⊢ X ∨ ¬X
fn excluded_middle(inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Formula(x)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    let negated = Formula::not(x.clone());
    Ok(Formula::or(x, negated))
}

/// X ⊢ X
fn copy(proof: &Proof, inputs: Vec<Input>) -> Result<Formula> {
    let [Input::Line(a)] = take(inputs)? else {
        return Err(ProofError::InvalidInputs);
    };
    Ok(proof.visible_line(a)?.clone())
}
