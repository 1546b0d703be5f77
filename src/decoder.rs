use serde::{Deserialize, Serialize};
use std::fmt;

use crate::instructions::{classify, OpClass};

/// Lexical conventions of the dialect being analyzed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Syntax {
    /// Everything from this character to end of line is comment text.
    pub comment_marker: char,
    /// Leading characters that mark a register name (case-insensitive).
    pub register_prefixes: Vec<char>,
    /// Character whose presence anywhere in a token marks a register.
    pub register_sigil: char,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            comment_marker: '#',
            register_prefixes: vec!['R', 'F'],
            register_sigil: '$',
        }
    }
}

/// An architectural register name. Equality is exact text identity; no
/// aliasing between spellings is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reg(pub String);

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Reg {
    fn from(s: &str) -> Self {
        Reg(s.to_string())
    }
}

/// One operand, typed before any category-specific interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Plain operand: register name or literal, taken verbatim.
    Ident(String),
    /// Memory reference `offset(base)`; only `base` ever names a register.
    Memory { raw: String, base: String },
    /// Pure alphabetic word with no register prefix or sigil: a jump target.
    Label(String),
}

impl Token {
    /// The operand exactly as it appeared in the source.
    pub fn text(&self) -> &str {
        match self {
            Token::Ident(s) | Token::Label(s) => s,
            Token::Memory { raw, .. } => raw,
        }
    }
}

/// One decoded source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// A `name:` line. Carries no register effects.
    Label(String),
    Op(Operation),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Uppercase mnemonic.
    pub mnemonic: String,
    pub class: OpClass,
    pub dest: Option<Reg>,
    /// Source registers in operand order; duplicates are kept.
    pub sources: Vec<Reg>,
}

/// Turns one line of assembly text into an instruction record.
///
/// Never fails: a line that is empty after comment stripping decodes to
/// `None`, everything else is classified best-effort.
#[derive(Debug, Clone, Default)]
pub struct LineDecoder {
    syntax: Syntax,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_syntax(syntax: Syntax) -> Self {
        Self { syntax }
    }

    pub fn decode(&self, line: &str) -> Option<Instruction> {
        let text = match line.find(self.syntax.comment_marker) {
            Some(pos) => &line[..pos],
            None => line,
        };
        let mut tokens = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty());

        let first = tokens.next()?;
        if let Some(name) = first.strip_suffix(':') {
            // Anything after the label on the same line is discarded.
            return Some(Instruction::Label(name.to_string()));
        }

        let mnemonic = first.to_uppercase();
        let class = classify(&mnemonic);
        let operands: Vec<Token> = tokens.map(|t| self.operand_token(t)).collect();

        let (dest, sources) = match class {
            OpClass::ReadOnly => (None, read_only_sources(operands)),
            OpClass::Write => write_operands(operands),
        };

        Some(Instruction::Op(Operation {
            mnemonic,
            class,
            dest,
            sources,
        }))
    }

    /// Type one raw operand token.
    pub fn operand_token(&self, raw: &str) -> Token {
        if let Some(inner) = raw.split('(').nth(1) {
            return Token::Memory {
                raw: raw.to_string(),
                base: inner.replace(')', ""),
            };
        }
        let pure_alpha =
            !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphabetic() || c == '_');
        let prefixed = raw
            .chars()
            .next()
            .map(|c| {
                self.syntax
                    .register_prefixes
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(&c))
            })
            .unwrap_or(false);
        if pure_alpha && !prefixed && !raw.contains(self.syntax.register_sigil) {
            return Token::Label(raw.to_string());
        }
        Token::Ident(raw.to_string())
    }
}

/// Store/branch/jump operands: memory bases and plain operands are read,
/// jump targets are not registers.
fn read_only_sources(operands: Vec<Token>) -> Vec<Reg> {
    let mut sources = Vec::new();
    for t in operands {
        match t {
            Token::Memory { base, .. } => sources.push(Reg(base)),
            Token::Ident(name) => sources.push(Reg(name)),
            Token::Label(_) => {}
        }
    }
    sources
}

/// Default operands: second token is the destination as written, the rest
/// are read (memory references contribute their base register only).
fn write_operands(operands: Vec<Token>) -> (Option<Reg>, Vec<Reg>) {
    let mut it = operands.into_iter();
    let dest = it.next().map(|t| Reg(t.text().to_string()));
    let mut sources = Vec::new();
    for t in it {
        match t {
            Token::Memory { base, .. } => sources.push(Reg(base)),
            Token::Ident(name) | Token::Label(name) => sources.push(Reg(name)),
        }
    }
    (dest, sources)
}
