//! S-expression printing for atoms.
//!
//! `Display` renders a handle on one line:
//!
//! ```
//! use clausal_foundation::Handle;
//!
//! let clause = Handle::evaluation(Handle::predicate("P"), vec![Handle::variable("$x")]);
//! assert_eq!(
//!     clause.to_string(),
//!     r#"(EvaluationLink (PredicateNode "P") (ListLink (VariableNode "$x")))"#
//! );
//! ```
//!
//! [`Handle::pretty`] breaks links over several lines instead.

use std::fmt::{self, Write};

use crate::atom::{Atom, Handle};

/// Configuration for multi-line printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
    /// Links whose one-line rendering fits this width stay on one line.
    pub max_width: usize,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_width: 60,
        }
    }
}

fn write_name(out: &mut impl Write, name: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in name.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            _ => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

fn write_flat(out: &mut impl Write, handle: &Handle) -> fmt::Result {
    match handle.atom() {
        Atom::Node { kind, name } => {
            write!(out, "({kind} ")?;
            write_name(out, name)?;
            out.write_char(')')
        }
        Atom::Link { kind, outgoing } => {
            write!(out, "({kind}")?;
            for child in outgoing {
                out.write_char(' ')?;
                write_flat(out, child)?;
            }
            out.write_char(')')
        }
        Atom::Quote(inner) => {
            write!(out, "({} ", handle.atom_type())?;
            write_flat(out, inner)?;
            out.write_char(')')
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flat(f, self)
    }
}

struct PrettyPrinter<'c> {
    config: &'c PrettyConfig,
    output: String,
}

impl PrettyPrinter<'_> {
    fn print(&mut self, handle: &Handle, depth: usize) {
        let flat = handle.to_string();
        let indent = depth * self.config.indent_width;
        if handle.children().is_empty() || indent + flat.len() <= self.config.max_width {
            self.output.push_str(&flat);
            return;
        }

        let _ = write!(self.output, "({}", handle.atom_type());
        for child in handle.children() {
            self.output.push('\n');
            let child_indent = (depth + 1) * self.config.indent_width;
            self.output.extend(std::iter::repeat_n(' ', child_indent));
            self.print(child, depth + 1);
        }
        self.output.push(')');
    }
}

impl Handle {
    /// Renders this atom over several lines with default settings.
    #[must_use]
    pub fn pretty(&self) -> String {
        self.pretty_with_config(&PrettyConfig::default())
    }

    /// Renders this atom over several lines.
    #[must_use]
    pub fn pretty_with_config(&self, config: &PrettyConfig) -> String {
        let mut printer = PrettyPrinter {
            config,
            output: String::new(),
        };
        printer.print(self, 0);
        printer.output
    }
}

/// Prints each handle on its own line.
#[must_use]
pub fn print_all(handles: &[Handle]) -> String {
    handles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
