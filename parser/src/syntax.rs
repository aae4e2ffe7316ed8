// parser/src/syntax.rs — Wire vocabulary
//
// These strings are shared by the lexer, the printer and any tooling that
// reads or writes proof scripts. Changing one breaks existing scripts.

// ─── Operators ───────────────────────────────────────────────────

pub const NOT: &str = "-";
pub const AND: &str = "^";
pub const OR: &str = "/";
pub const IMPLIES: &str = "=>";
pub const CONTRADICTION: &str = "_|_";

// ─── Rules ───────────────────────────────────────────────────────
//
// Rule names are an operator followed by `i` (introduction) or `e`
// (elimination), plus a side index where a rule has two forms.

pub const NOT_INTRO: &str = "-i";
pub const NOT_ELIM: &str = "-e";
pub const AND_INTRO: &str = "^i";
pub const AND_ELIM_1: &str = "^e1";
pub const AND_ELIM_2: &str = "^e2";
pub const OR_INTRO_1: &str = "/i1";
pub const OR_INTRO_2: &str = "/i2";
pub const OR_ELIM: &str = "/e";
pub const IMPLIES_INTRO: &str = "=>i";
pub const IMPLIES_ELIM: &str = "=>e";
pub const CONTRADICTION_ELIM: &str = "_|_e";
pub const DOUBLE_NOT_INTRO: &str = "--i";
pub const DOUBLE_NOT_ELIM: &str = "--e";
pub const MODUS_TOLLENS: &str = "MT";
pub const PROOF_BY_CONTRADICTION: &str = "PBC";
pub const EXCLUDED_MIDDLE: &str = "LEM";
pub const COPY: &str = "copy";

// ─── Command keywords ────────────────────────────────────────────

pub mod keyword {
    pub const PRESUME: &str = "presume";
    pub const ASSUME: &str = "assume";
    pub const OPEN: &str = "open";
    pub const CLOSE: &str = "close";
    pub const APPLY: &str = "apply";
    pub const UNDO: &str = "undo";
    pub const EXPORT: &str = "export";
}

/// Lines starting with this character (after whitespace) are comments.
pub const COMMENT: char = '#';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_are_built_from_operators() {
        assert_eq!(NOT_INTRO, format!("{}i", NOT));
        assert_eq!(AND_ELIM_2, format!("{}e2", AND));
        assert_eq!(OR_INTRO_1, format!("{}i1", OR));
        assert_eq!(IMPLIES_ELIM, format!("{}e", IMPLIES));
        assert_eq!(CONTRADICTION_ELIM, format!("{}e", CONTRADICTION));
        assert_eq!(DOUBLE_NOT_ELIM, format!("{}{}e", NOT, NOT));
    }
}
