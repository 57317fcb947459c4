//! S-expression reader for atoms.
//!
//! Reads the syntax produced by the printer:
//!
//! ```text
//! ; a comment
//! (EvaluationLink
//!     (PredicateNode "likes")
//!     (ListLink (VariableNode "$x") (ConceptNode "pizza")))
//! (Equal (Number 1) (Number 2))
//! ```
//!
//! Type names may drop their `Node`/`Link` suffix, and node names that
//! contain no whitespace or parentheses may be written bare.

use crate::atom::{AtomType, Handle};
use crate::error::{Error, ErrorContext, Result};
use crate::intern::AtomTable;

#[derive(Clone, Debug, PartialEq)]
enum TokenKind {
    LParen,
    RParen,
    /// A double-quoted string, unescaped.
    Str(String),
    /// Anything else up to whitespace or a paren.
    Word(String),
    Eof,
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    line: u32,
    column: u32,
}

/// Tokenizer over atom source text.
struct Lexer<'src> {
    source: &'src str,
    chars: std::iter::Peekable<std::str::Chars<'src>>,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.advance();
            } else if c == ';' {
                while let Some(c) = self.advance() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn error(&self, message: impl Into<String>, line: u32, column: u32) -> Error {
        let context = self
            .source
            .lines()
            .nth(line.saturating_sub(1) as usize)
            .unwrap_or_default()
            .to_string();
        Error::parse(message, line, column, context)
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia();
        let (line, column) = (self.line, self.column);

        let kind = match self.chars.peek().copied() {
            None => TokenKind::Eof,
            Some('(') => {
                self.advance();
                TokenKind::LParen
            }
            Some(')') => {
                self.advance();
                TokenKind::RParen
            }
            Some('"') => {
                self.advance();
                let mut text = String::new();
                loop {
                    match self.advance() {
                        None => return Err(self.error("unterminated string", line, column)),
                        Some('"') => break,
                        Some('\\') => match self.advance() {
                            Some('n') => text.push('\n'),
                            Some(c) => text.push(c),
                            None => {
                                return Err(self.error("unterminated string", line, column));
                            }
                        },
                        Some(c) => text.push(c),
                    }
                }
                TokenKind::Str(text)
            }
            Some(_) => {
                let mut word = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' || c == '"' || c == ';' {
                        break;
                    }
                    word.push(c);
                    self.advance();
                }
                TokenKind::Word(word)
            }
        };

        Ok(Token { kind, line, column })
    }
}

/// Recursive-descent reader producing interned atoms.
struct Reader<'src, 't> {
    lexer: Lexer<'src>,
    table: &'t mut AtomTable,
    current: Token,
}

impl<'src, 't> Reader<'src, 't> {
    fn new(source: &'src str, table: &'t mut AtomTable) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            table,
            current,
        })
    }

    fn bump(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> Error {
        self.lexer.error(message, token.line, token.column)
    }

    fn at_eof(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    fn read_atom(&mut self) -> Result<Handle> {
        let open = self.bump()?;
        if open.kind != TokenKind::LParen {
            return Err(self.error_at(&open, format!("expected '(', found {:?}", open.kind)));
        }

        let head = self.bump()?;
        let TokenKind::Word(type_name) = &head.kind else {
            return Err(self.error_at(&head, "expected an atom type name"));
        };
        let Some(kind) = AtomType::from_name(type_name) else {
            return Err(self.error_at(&head, format!("unknown atom type '{type_name}'")));
        };

        let atom = if kind.is_node() {
            let name_token = self.bump()?;
            let name = match &name_token.kind {
                TokenKind::Str(s) | TokenKind::Word(s) => s.clone(),
                _ => return Err(self.error_at(&name_token, format!("{kind} requires a name"))),
            };
            self.table.node(kind, &name)?
        } else {
            let mut children = Vec::new();
            while !matches!(self.current.kind, TokenKind::RParen | TokenKind::Eof) {
                children.push(self.read_atom()?);
            }
            if kind == AtomType::Quote {
                if children.len() != 1 {
                    return Err(Error::wrong_arity(kind, 1, children.len())
                        .with_context(ErrorContext::new().with_location(head.line, head.column)));
                }
                self.table.quote(&children[0])
            } else {
                self.table.link(kind, children)?
            }
        };

        let close = self.bump()?;
        if close.kind != TokenKind::RParen {
            return Err(self.error_at(&close, format!("expected ')' to close {kind}")));
        }
        Ok(atom)
    }
}

/// Reads a single atom from `source`.
///
/// # Errors
///
/// Returns a parse error for malformed text, or if `source` holds anything
/// other than exactly one atom.
pub fn parse_atom(table: &mut AtomTable, source: &str) -> Result<Handle> {
    let mut reader = Reader::new(source, table)?;
    if reader.at_eof() {
        return Err(reader.error_at(&reader.current.clone(), "expected an atom"));
    }
    let atom = reader.read_atom()?;
    if !reader.at_eof() {
        return Err(reader.error_at(&reader.current.clone(), "trailing input after atom"));
    }
    Ok(atom)
}

/// Reads every top-level atom in `source`, in order.
///
/// # Errors
///
/// Returns a parse error for malformed text.
pub fn parse_atoms(table: &mut AtomTable, source: &str) -> Result<Vec<Handle>> {
    let mut reader = Reader::new(source, table)?;
    let mut atoms = Vec::new();
    while !reader.at_eof() {
        atoms.push(reader.read_atom()?);
    }
    Ok(atoms)
}
