// tex/src/lib.rs — LaTeX export
//
// Renders a proof as a standalone document for the `logicproof` package.
// The event log drives the layout: `Open`/`Close` become subproof
// environments and each `Line` becomes a `formula & justification` row.
// Rows are separated by `\\`, but never directly before `\end{subproof}`.
//
// Rendering only reads the proof.

use std::fmt::{self, Write};

use nde_parser::{write_formula, Notation, Rule};
use nde_proof::{Event, Justification, Line, Proof};

/// Operator spellings inside LaTeX math mode.
pub const NOTATION: Notation = Notation {
    not: "\\neg ",
    and: "\\land",
    or: "\\lor",
    implies: "\\to",
    contradiction: "\\perp",
};

const PREAMBLE: &str = "\\documentclass{article}\n\
                        \\usepackage{logicproof}\n\
                        \\usepackage{amssymb}\n\
                        \\begin{document}\n";

const POSTAMBLE: &str = "\\end{logicproof}\n\
                         \\end{document}\n";

/// Justification label for a rule.
pub fn rule_label(rule: Rule) -> &'static str {
    match rule {
        Rule::NotIntro => "\\(\\neg i\\)",
        Rule::NotElim => "\\(\\neg e\\)",
        Rule::AndIntro => "\\(\\land i\\)",
        Rule::AndElim1 => "\\(\\land e_1\\)",
        Rule::AndElim2 => "\\(\\land e_2\\)",
        Rule::OrIntro1 => "\\(\\lor i_1\\)",
        Rule::OrIntro2 => "\\(\\lor i_2\\)",
        Rule::OrElim => "\\(\\lor e\\)",
        Rule::ImpliesIntro => "\\(\\to i\\)",
        Rule::ImpliesElim => "\\(\\to e\\)",
        Rule::ContradictionElim => "\\(\\perp e\\)",
        Rule::DoubleNotIntro => "\\(\\neg\\neg i\\)",
        Rule::DoubleNotElim => "\\(\\neg\\neg e\\)",
        Rule::ModusTollens => "MT",
        Rule::ProofByContradiction => "PBC",
        Rule::ExcludedMiddle => "LEM",
        Rule::Copy => "copy",
    }
}

/// Render the whole document.
pub fn render(proof: &Proof) -> String {
    let mut out = String::with_capacity(256 + proof.len() * 48);
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, proof);
    out
}

/// Write the whole document to `out`.
pub fn write_document<W: Write>(out: &mut W, proof: &Proof) -> fmt::Result {
    out.write_str(PREAMBLE)?;
    writeln!(out, "\\begin{{logicproof}}{{{}}}", proof.max_depth() + 1)?;

    let mut state = Row::Start;
    for event in proof.events() {
        match *event {
            Event::Open => {
                out.write_str(state.separator())?;
                out.write_str("\\begin{subproof}")?;
                state = Row::AfterBox;
            }
            Event::Close => {
                out.write_str("\n\\end{subproof}")?;
                state = Row::AfterBox;
            }
            Event::Line(index) => {
                let Some(line) = proof.line(index) else {
                    continue;
                };
                out.write_str(state.separator())?;
                write_row(out, line)?;
                state = Row::AfterLine;
            }
        }
    }

    if state != Row::Start {
        out.write_char('\n')?;
    }
    out.write_str(POSTAMBLE)
}

/// What was written last, which decides how the next row is separated.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Row {
    Start,
    AfterLine,
    AfterBox,
}

impl Row {
    fn separator(self) -> &'static str {
        match self {
            Row::Start => "",
            Row::AfterLine => "\\\\\n",
            Row::AfterBox => "\n",
        }
    }
}

fn write_row<W: Write>(out: &mut W, line: &Line) -> fmt::Result {
    write_formula(out, &line.formula, &NOTATION)?;
    out.write_str(" & ")?;
    write_justification(out, &line.justification)
}

fn write_justification<W: Write>(out: &mut W, justification: &Justification) -> fmt::Result {
    match justification {
        Justification::Premise => out.write_str("premise"),
        Justification::Assumption => out.write_str("assumption"),
        Justification::Rule { rule, citations } => {
            out.write_str(rule_label(*rule))?;
            for (i, citation) in citations.iter().enumerate() {
                out.write_str(if i == 0 { " " } else { ", " })?;
                write!(out, "{}", citation)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nde_parser::{parse_formula, Application, Formula, Input};

    fn f(text: &str) -> Formula {
        parse_formula(text).unwrap()
    }

    fn body(doc: &str) -> &str {
        let start = doc.find("\\begin{logicproof}").unwrap();
        let end = doc.find("\\end{logicproof}").unwrap();
        &doc[start..end]
    }

    #[test]
    fn empty_proof_is_a_valid_document() {
        let doc = render(&Proof::new());
        assert!(doc.starts_with("\\documentclass{article}\n\\usepackage{logicproof}\n"));
        assert!(doc.contains("\\begin{logicproof}{1}\n\\end{logicproof}\n"));
        assert!(doc.ends_with("\\end{document}\n"));
    }

    #[test]
    fn modus_ponens_rows() {
        let mut proof = Proof::new();
        proof.premise(f("p"));
        proof.premise(f("p => q"));
        proof
            .apply(Application::new(Rule::ImpliesElim, vec![Input::Line(0), Input::Line(1)]))
            .unwrap();
        assert_eq!(
            body(&render(&proof)),
            "\\begin{logicproof}{1}\n\
             p & premise\\\\\n\
             p \\to q & premise\\\\\n\
             q & \\(\\to e\\) 1, 2\n"
        );
    }

    #[test]
    fn subproofs_follow_the_event_log() {
        let mut proof = Proof::new();
        proof.premise(f("p"));
        proof.open();
        proof.assume(f("-p")).unwrap();
        proof
            .apply(Application::new(Rule::NotElim, vec![Input::Line(0), Input::Line(1)]))
            .unwrap();
        proof.close().unwrap();
        proof
            .apply(Application::new(Rule::NotIntro, vec![Input::Box { start: 1, end: 2 }]))
            .unwrap();
        assert_eq!(
            body(&render(&proof)),
            "\\begin{logicproof}{2}\n\
             p & premise\\\\\n\
             \\begin{subproof}\n\
             \\neg p & assumption\\\\\n\
             \\perp & \\(\\neg e\\) 1, 2\n\
             \\end{subproof}\n\
             \\neg \\neg p & \\(\\neg i\\) 2-3\n"
        );
    }

    #[test]
    fn inline_formulas_are_not_cited() {
        let mut proof = Proof::new();
        proof.premise(f("p"));
        proof
            .apply(Application::new(Rule::OrIntro1, vec![Input::Line(0), Input::Formula(f("q ^ r"))]))
            .unwrap();
        proof
            .apply(Application::new(Rule::ExcludedMiddle, vec![Input::Formula(f("s"))]))
            .unwrap();
        let doc = render(&proof);
        assert!(doc.contains("p \\lor (q \\land r) & \\(\\lor i_1\\) 1\\\\\n"));
        assert!(doc.contains("s \\lor \\neg s & LEM\n"));
    }

    #[test]
    fn undone_lines_do_not_appear() {
        let mut proof = Proof::new();
        proof.premise(f("p"));
        proof.premise(f("q"));
        proof.undo().unwrap();
        let doc = render(&proof);
        assert!(doc.contains("p & premise\n"));
        assert!(!doc.contains("q & premise"));
    }

    #[test]
    fn depth_counts_nested_boxes() {
        let mut proof = Proof::new();
        proof.open();
        proof.assume(f("p")).unwrap();
        proof.open();
        proof.assume(f("q")).unwrap();
        proof.close().unwrap();
        proof.close().unwrap();
        assert!(render(&proof).contains("\\begin{logicproof}{3}"));
    }
}
