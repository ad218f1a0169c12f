use std::collections::HashSet;
use std::env::temp_dir;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use itertools::Itertools;
use regex::Regex;

use crate::fsm::{Nfa, StateId};
use crate::utils::RenderFlags;

/// Replace the characters that cannot appear in a filename on the platforms
/// graphviz runs on. The expression itself names the output file, so control
/// characters like `|` and `*` land here routinely.
pub fn sanitize_filename(filename: &str) -> String {
    Regex::new(r#"[<>:"/\\|?*]"#)
        .unwrap()
        .replace_all(filename, "_")
        .into_owned()
}

fn escape_label(symbol: char) -> String {
    match symbol {
        '"' => String::from("\\\""),
        '\\' => String::from("\\\\"),
        _ => symbol.to_string(),
    }
}

fn dot_executable() -> &'static str {
    if cfg!(target_os = "macos") {
        "/usr/local/bin/dot"
    } else {
        "/usr/bin/dot"
    }
}

fn viewer_executable() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Draws an automaton through graphviz `dot`.
pub struct Graphviz {
    flags: RenderFlags,
}

impl Graphviz {
    pub fn new(flags: RenderFlags) -> Graphviz {
        Graphviz { flags }
    }

    /// Graphviz source for the automaton: one node per state reachable from
    /// the start, one edge per transition. The start node is filled green,
    /// the accepting node is a double circle, epsilon edges are dashed and
    /// labeled `ε`.
    pub fn to_dot(&self, nfa: &Nfa) -> String {
        let mut body = String::new();
        let mut visited: HashSet<StateId> = HashSet::new();
        self.add_states(nfa, nfa.start, &mut visited, &mut body);
        format!(
            "digraph G {{ rankdir=\"LR\"\n  \
             node [shape=circle style=filled fillcolor=\"#EEEEEE\"]\n{}}}\n",
            body
        )
    }

    fn add_states(
        &self,
        nfa: &Nfa,
        state: StateId,
        visited: &mut HashSet<StateId>,
        out: &mut String,
    ) {
        if !visited.insert(state) {
            return;
        }
        if state == nfa.start {
            out.push_str(&format!(
                "  node_{}[label=\"{}\" fillcolor=green]\n",
                state, state
            ));
        } else if state == nfa.accept {
            out.push_str(&format!(
                "  node_{}[label=\"{}\" shape=doublecircle]\n",
                state, state
            ));
        } else {
            out.push_str(&format!("  node_{}[label=\"{}\"]\n", state, state));
        }
        for (symbol, targets) in nfa.transitions(state).iter().sorted_by_key(|(symbol, _)| **symbol) {
            for &target in targets.iter().sorted() {
                out.push_str(&format!(
                    "  node_{} -> node_{}[label=\"{}\"]\n",
                    state,
                    target,
                    escape_label(*symbol)
                ));
                self.add_states(nfa, target, visited, out);
            }
        }
        for &target in nfa.epsilons(state).iter().sorted() {
            out.push_str(&format!(
                "  node_{} -> node_{}[label=\"ε\" style=dashed]\n",
                state, target
            ));
            self.add_states(nfa, target, visited, out);
        }
    }

    /// Write the DOT source to a file under the system temp directory and
    /// return its path.
    pub fn write_dot(&self, nfa: &Nfa, safe_name: &str) -> io::Result<PathBuf> {
        let mut path = temp_dir();
        path.push(format!("{}.dot", safe_name));
        fs::write(&path, self.to_dot(nfa))?;
        Ok(path)
    }

    /// Render the automaton to `<sanitized filename>.png` in the working
    /// directory by running `dot` over the written DOT source.
    pub fn render(&self, nfa: &Nfa, filename: &str) -> io::Result<PathBuf> {
        if self.flags.intersects(RenderFlags::DEBUG) {
            println!("{}", self.to_dot(nfa));
        }

        let safe_name = sanitize_filename(filename);
        let dot_path = self.write_dot(nfa, &safe_name)?;
        let image_path = PathBuf::from(format!("{}.png", safe_name));

        let status = Command::new(dot_executable())
            .arg("-Tpng")
            .arg(&dot_path)
            .arg("-o")
            .arg(&image_path)
            .status()?;
        if !status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("dot exited with {}", status),
            ));
        }

        if !self.flags.intersects(RenderFlags::KEEP_DOT) {
            fs::remove_file(&dot_path)?;
        }
        if self.flags.intersects(RenderFlags::OPEN_VIEWER) {
            Command::new(viewer_executable()).arg(&image_path).status()?;
        }
        Ok(image_path)
    }
}
