//! Compile a regular expression over literals, `|`, `*` and parentheses into
//! a non-deterministic finite automaton by Thompson's construction, and draw
//! the result through graphviz.
//!
//! There is no escape mechanism: `( ) | *` are always operators and cannot
//! be matched as literals. Every other character, whitespace included, is a
//! literal.
//!
//! ```
//! use re2nfa::compiler::compile;
//! use re2nfa::graphviz::Graphviz;
//! use re2nfa::utils::RenderFlags;
//!
//! let nfa = compile("(a|b)*c").unwrap();
//! let dot = Graphviz::new(RenderFlags::NO_FLAG).to_dot(&nfa);
//! assert!(dot.starts_with("digraph"));
//! ```

pub mod compiler;
pub mod fsm;
pub mod graphviz;
pub mod utils;

#[cfg(test)]
mod simulation;
