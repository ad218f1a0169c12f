use std::error::Error;
use std::fmt::Display;

use colored::Colorize;

use crate::fsm::{Fragment, Nfa};

/// The four control characters; anything else is a literal, whitespace
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Literal(char),
    Star,
    Pipe,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Split a pattern into tokens. Positions are byte offsets into the pattern
/// string, usable for caret diagnostics against it.
pub fn tokenize(pattern: &str) -> Vec<Token> {
    pattern
        .char_indices()
        .map(|(position, symbol)| {
            let kind = match symbol {
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                '|' => TokenKind::Pipe,
                '*' => TokenKind::Star,
                _ => TokenKind::Literal(symbol),
            };
            Token { kind, position }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    EmptyPattern,
    MissingOperand { operator: char, position: usize },
    UnbalancedParenthesis { position: usize },
    EmptyGroup { position: usize },
    UnresolvedFragments(usize),
}

impl CompileError {
    /// Byte offset of the offending character, when the error points at one.
    pub fn position(&self) -> Option<usize> {
        match *self {
            Self::MissingOperand { position, .. }
            | Self::UnbalancedParenthesis { position }
            | Self::EmptyGroup { position } => Some(position),
            Self::EmptyPattern | Self::UnresolvedFragments(_) => None,
        }
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = "malformed expression".red().bold();
        match *self {
            Self::EmptyPattern => write!(f, "{}: empty pattern", tag),
            Self::MissingOperand { operator, position } => {
                write!(
                    f,
                    "{}: `{}` at position {} is missing an operand",
                    tag, operator, position
                )
            }
            Self::UnbalancedParenthesis { position } => {
                write!(f, "{}: unbalanced parenthesis at position {}", tag, position)
            }
            Self::EmptyGroup { position } => {
                write!(f, "{}: group closed at position {} is empty", tag, position)
            }
            Self::UnresolvedFragments(count) => {
                write!(f, "{}: {} fragments left after parsing", tag, count)
            }
        }
    }
}

impl Error for CompileError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Union,
    Group,
}

/// A pending `|` or `(`. `base` is the fragment stack height when it was
/// pushed; the fragments above it belong to the segment the operator opened.
#[derive(Debug, Clone, Copy)]
struct PendingOp {
    op: Op,
    base: usize,
    position: usize,
}

fn segment_base(operators: &[PendingOp]) -> usize {
    operators.last().map_or(0, |pending| pending.base)
}

/// Merge a finished run with the atom after it. The newest fragment is left
/// unmerged until the next token rules out a `*`, so the current segment
/// never holds more than one finished run plus one atom.
fn reduce_concat(nfa: &mut Nfa, fragments: &mut Vec<Fragment>, base: usize) {
    if fragments.len() - base == 2 {
        let second = fragments.pop().unwrap();
        let first = fragments.pop().unwrap();
        fragments.push(nfa.concat(first, second));
    }
}

fn fold_union(nfa: &mut Nfa, fragments: &mut Vec<Fragment>) {
    let upper = fragments.pop().unwrap();
    let lower = fragments.pop().unwrap();
    let folded = nfa.union(lower, upper);
    fragments.push(folded);
}

/// Compile a regular expression into an automaton, single left-to-right pass
/// over the tokens. Adjacent atoms concatenate implicitly, `|` alternates,
/// `*` repeats the nearest finished atom, parentheses group.
pub fn compile(pattern: &str) -> Result<Nfa, CompileError> {
    if pattern.is_empty() {
        return Err(CompileError::EmptyPattern);
    }

    let mut nfa = Nfa::new();
    let mut fragments: Vec<Fragment> = Vec::new();
    let mut operators: Vec<PendingOp> = Vec::new();

    for token in tokenize(pattern) {
        match token.kind {
            TokenKind::Literal(symbol) => {
                reduce_concat(&mut nfa, &mut fragments, segment_base(&operators));
                let fragment = nfa.literal(symbol);
                fragments.push(fragment);
            }
            TokenKind::Star => {
                if fragments.len() == segment_base(&operators) {
                    return Err(CompileError::MissingOperand {
                        operator: '*',
                        position: token.position,
                    });
                }
                let inner = fragments.pop().unwrap();
                let starred = nfa.star(inner);
                fragments.push(starred);
            }
            TokenKind::Pipe => {
                let base = segment_base(&operators);
                if fragments.len() == base {
                    return Err(CompileError::MissingOperand {
                        operator: '|',
                        position: token.position,
                    });
                }
                reduce_concat(&mut nfa, &mut fragments, base);
                operators.push(PendingOp {
                    op: Op::Union,
                    base: fragments.len(),
                    position: token.position,
                });
            }
            TokenKind::LeftParen => {
                reduce_concat(&mut nfa, &mut fragments, segment_base(&operators));
                operators.push(PendingOp {
                    op: Op::Group,
                    base: fragments.len(),
                    position: token.position,
                });
            }
            TokenKind::RightParen => loop {
                let pending = match operators.last() {
                    Some(pending) => *pending,
                    None => {
                        return Err(CompileError::UnbalancedParenthesis {
                            position: token.position,
                        })
                    }
                };
                if fragments.len() == pending.base {
                    return Err(match pending.op {
                        Op::Union => CompileError::MissingOperand {
                            operator: '|',
                            position: pending.position,
                        },
                        Op::Group => CompileError::EmptyGroup {
                            position: token.position,
                        },
                    });
                }
                reduce_concat(&mut nfa, &mut fragments, pending.base);
                operators.pop();
                match pending.op {
                    Op::Union => fold_union(&mut nfa, &mut fragments),
                    Op::Group => break,
                }
            },
        }
    }

    // unwind what the input left pending; a surviving group was never closed
    while let Some(pending) = operators.last().copied() {
        if fragments.len() == pending.base {
            return Err(match pending.op {
                Op::Union => CompileError::MissingOperand {
                    operator: '|',
                    position: pending.position,
                },
                Op::Group => CompileError::UnbalancedParenthesis {
                    position: pending.position,
                },
            });
        }
        reduce_concat(&mut nfa, &mut fragments, pending.base);
        operators.pop();
        match pending.op {
            Op::Union => fold_union(&mut nfa, &mut fragments),
            Op::Group => {
                return Err(CompileError::UnbalancedParenthesis {
                    position: pending.position,
                })
            }
        }
    }
    reduce_concat(&mut nfa, &mut fragments, 0);

    if fragments.len() != 1 {
        return Err(CompileError::UnresolvedFragments(fragments.len()));
    }
    let (start, accept) = fragments.pop().unwrap();
    nfa.start = start;
    nfa.accept = accept;
    Ok(nfa)
}
