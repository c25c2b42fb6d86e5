//! Data-driven command table.
//!
//! The table is defined as a grid of strings: columns go from the most
//! general token to the most specific, and the final column holds
//! literal answer text. The builder turns the grid into a forest of
//! tries whose interior nodes are interned by token string, so a token
//! reappearing anywhere in the grid reuses the same node. That makes
//! the structure a token-keyed merge (effectively a DAG) rather than a
//! strict tree; shared sub-paths between commands share storage.

use std::collections::HashMap;

/// Table key resolved when no command path matches.
pub const NOT_FOUND_KEY: &str = "ERROR NOT_FOUND";
/// Table key resolved when an error key itself has no entry.
pub const BASE_ERROR_KEY: &str = "ERROR";

// ---------------------------------------------------------------------------
// CSV grid loading
// ---------------------------------------------------------------------------

/// Parse CSV text into a grid of cells.
///
/// The first record is a header and only fixes the column count; data
/// rows are padded (or truncated) to that width. Fields may be
/// double-quoted, with `""` escaping a quote; CRLF line ends are
/// tolerated. Empty input yields an empty grid.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                },
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {},
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            },
            _ => field.push(ch),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    // Drop blank trailing records (a file ending in a newline).
    records.retain(|r| !(r.len() == 1 && r[0].is_empty()));

    if records.len() < 2 {
        return Vec::new();
    }

    let width = records[0].len();
    records
        .into_iter()
        .skip(1)
        .map(|mut row| {
            row.resize(width, String::new());
            row.truncate(width);
            row
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Trie builder
// ---------------------------------------------------------------------------

/// Index of a node in the table arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeId(usize);

#[derive(Debug)]
enum Node {
    /// Interior token node with ordered children.
    Arg {
        token: String,
        children: Vec<NodeId>,
    },
    /// Leaf literal answer. Never interned, never walked as a token.
    Answer { text: String },
}

/// Builds a [`CommandTable`] from a grid.
pub struct TableBuilder {
    grid: Vec<Vec<String>>,
}

impl TableBuilder {
    /// Build from an already-parsed grid (row-major).
    pub fn from_grid(grid: Vec<Vec<String>>) -> Self {
        Self { grid }
    }

    /// Build from CSV text (header row + data rows).
    pub fn from_csv(text: &str) -> Self {
        Self::from_grid(parse_csv(text))
    }

    /// Run the build. An empty or malformed grid yields an empty table.
    ///
    /// Columns are processed right-to-left, rows top-to-bottom within
    /// each column. Answer cells (last column) always allocate a fresh
    /// leaf; other cells are interned by token. Each cell's parent is
    /// the nearest non-empty cell in an earlier column of the same row,
    /// falling back to scanning earlier rows upward. Column-0 cells
    /// start root trees.
    pub fn build(self) -> CommandTable {
        let mut table = CommandTable {
            nodes: Vec::new(),
            roots: Vec::new(),
        };
        let grid = &self.grid;
        let rows = grid.len();
        let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
        if rows == 0 || cols < 2 {
            if rows > 0 {
                log::warn!("command grid has {cols} columns, need at least 2");
            }
            return table;
        }

        // Token -> interned interior node.
        let mut interned: HashMap<String, NodeId> = HashMap::new();

        let cell = |row: usize, col: usize| -> &str {
            grid[row].get(col).map_or("", String::as_str)
        };

        for col in (0..cols).rev() {
            for row in 0..rows {
                let value = cell(row, col);
                if value.is_empty() {
                    continue;
                }

                let current = if col == cols - 1 {
                    // Answer text is never deduplicated.
                    table.push_node(Node::Answer {
                        text: value.to_string(),
                    })
                } else {
                    Self::intern(&mut table, &mut interned, value)
                };

                if col == 0 {
                    table.roots.push((value.to_string(), current));
                    continue;
                }

                // Nearest non-empty earlier cell in this row, then in
                // preceding rows, becomes the parent.
                let parent = Self::find_parent(grid, row, col, &mut table, &mut interned);
                if let Some(parent) = parent {
                    table.add_child(parent, current);
                }
            }
        }

        log::debug!(
            "built command table: {} roots, {} nodes",
            table.roots.len(),
            table.nodes.len()
        );
        table
    }

    fn intern(
        table: &mut CommandTable,
        interned: &mut HashMap<String, NodeId>,
        token: &str,
    ) -> NodeId {
        if let Some(&id) = interned.get(token) {
            return id;
        }
        let id = table.push_node(Node::Arg {
            token: token.to_string(),
            children: Vec::new(),
        });
        interned.insert(token.to_string(), id);
        id
    }

    fn find_parent(
        grid: &[Vec<String>],
        row: usize,
        col: usize,
        table: &mut CommandTable,
        interned: &mut HashMap<String, NodeId>,
    ) -> Option<NodeId> {
        let cell = |row: usize, col: usize| -> &str {
            grid[row].get(col).map_or("", String::as_str)
        };
        for parent_col in (0..col).rev() {
            let value = cell(row, parent_col);
            if !value.is_empty() {
                return Some(Self::intern(table, interned, value));
            }
        }
        for prev_row in (0..row).rev() {
            for parent_col in (0..col).rev() {
                let value = cell(prev_row, parent_col);
                if !value.is_empty() {
                    return Some(Self::intern(table, interned, value));
                }
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Result of resolving one command line against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the line fell through to the not-found fallback.
    pub error: bool,
    /// Answer texts, in table order.
    pub responses: Vec<String>,
}

/// An immutable forest of token tries with literal answers at the
/// leaves. Built once by [`TableBuilder`]; rebuild by building again.
#[derive(Debug)]
pub struct CommandTable {
    nodes: Vec<Node>,
    /// One entry per column-0 cell, in grid order.
    roots: Vec<(String, NodeId)>,
}

impl CommandTable {
    /// Resolve a whitespace-tokenized command line.
    ///
    /// Unknown commands resolve the dedicated [`NOT_FOUND_KEY`] instead,
    /// so the not-found message itself is table data. A table that does
    /// not define the key yields an empty error resolution.
    pub fn resolve(&self, command: &str) -> Resolution {
        if let Some(responses) = self.lookup(command)
            && !responses.is_empty()
        {
            return Resolution {
                error: false,
                responses,
            };
        }
        Resolution {
            error: true,
            responses: self.lookup(NOT_FOUND_KEY).unwrap_or_default(),
        }
    }

    /// Walk the trie for a command line. `None` when no root matches or
    /// an argument has no matching child; `Some` holds the direct
    /// answer children of the final node (possibly empty).
    fn lookup(&self, command: &str) -> Option<Vec<String>> {
        let mut args = command.split_whitespace();
        let first = args.next()?;
        let mut current = self
            .roots
            .iter()
            .find(|(token, _)| token == first)
            .map(|(_, id)| *id)?;

        for arg in args {
            current = self.child_by_token(current, arg)?;
        }

        Some(self.answers_of(current))
    }

    /// Whether a key has at least one answer (without the fallback).
    pub fn defines(&self, command: &str) -> bool {
        self.lookup(command).is_some_and(|r| !r.is_empty())
    }

    /// Root tokens in table order.
    pub fn root_tokens(&self) -> Vec<&str> {
        self.roots.iter().map(|(token, _)| token.as_str()).collect()
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Append an edge, skipping exact duplicates (re-processing the
    /// same token pair is idempotent).
    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let Node::Arg { children, .. } = &mut self.nodes[parent.0]
            && !children.contains(&child)
        {
            children.push(child);
        }
    }

    fn child_by_token(&self, parent: NodeId, wanted: &str) -> Option<NodeId> {
        let Node::Arg { children, .. } = &self.nodes[parent.0] else {
            return None;
        };
        children.iter().copied().find(|&child| {
            matches!(&self.nodes[child.0], Node::Arg { token, .. } if token == wanted)
        })
    }

    fn answers_of(&self, id: NodeId) -> Vec<String> {
        let Node::Arg { children, .. } = &self.nodes[id.0] else {
            return Vec::new();
        };
        children
            .iter()
            .filter_map(|&child| match &self.nodes[child.0] {
                Node::Answer { text } => Some(text.clone()),
                Node::Arg { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn demo_table() -> CommandTable {
        TableBuilder::from_grid(grid(&[
            &["help", "", "try again"],
            &["help", "me", "you asked for it"],
            &["ERROR", "NOT_FOUND", "[ERROR]:command not found"],
            &["ERROR", "", "[ERROR]:something went wrong"],
        ]))
        .build()
    }

    #[test]
    fn root_with_no_arguments_returns_direct_answers() {
        let table = demo_table();
        let res = table.resolve("help");
        assert!(!res.error);
        assert_eq!(res.responses, vec!["try again"]);
    }

    #[test]
    fn nested_argument_resolves() {
        let table = demo_table();
        let res = table.resolve("help me");
        assert!(!res.error);
        assert_eq!(res.responses, vec!["you asked for it"]);
    }

    #[test]
    fn unknown_argument_falls_back_to_not_found() {
        let table = demo_table();
        let res = table.resolve("help you");
        assert!(res.error);
        assert_eq!(res.responses, vec!["[ERROR]:command not found"]);
    }

    #[test]
    fn unknown_root_falls_back_to_not_found() {
        let table = demo_table();
        let res = table.resolve("frobnicate");
        assert!(res.error);
        assert_eq!(res.responses, vec!["[ERROR]:command not found"]);
    }

    #[test]
    fn empty_input_is_not_found() {
        let table = demo_table();
        assert!(table.resolve("").error);
        assert!(table.resolve("   ").error);
    }

    #[test]
    fn missing_not_found_key_yields_empty_error() {
        let table = TableBuilder::from_grid(grid(&[&["hi", "answer"]])).build();
        let res = table.resolve("nope");
        assert!(res.error);
        assert!(res.responses.is_empty());
    }

    #[test]
    fn multiple_answers_keep_insertion_order() {
        let table = TableBuilder::from_grid(grid(&[
            &["help", "line one"],
            &["help", "line two"],
            &["help", "line three"],
        ]))
        .build();
        let res = table.resolve("help");
        assert_eq!(res.responses, vec!["line one", "line two", "line three"]);
    }

    #[test]
    fn answer_text_is_not_deduplicated() {
        let table = TableBuilder::from_grid(grid(&[
            &["echo", "same"],
            &["echo", "same"],
        ]))
        .build();
        assert_eq!(table.resolve("echo").responses, vec!["same", "same"]);
    }

    #[test]
    fn repeated_token_merges_into_one_node() {
        // "list" appears under two different roots; the merge means
        // both paths see the union of its children.
        let table = TableBuilder::from_grid(grid(&[
            &["show", "list", "from show"],
            &["hide", "list", "from hide"],
        ]))
        .build();
        let from_show = table.resolve("show list");
        let from_hide = table.resolve("hide list");
        assert_eq!(from_show.responses, vec!["from show", "from hide"]);
        assert_eq!(from_show.responses, from_hide.responses);
    }

    #[test]
    fn node_without_answers_reports_not_found() {
        // "deep" has an arg child but no answer children.
        let table = TableBuilder::from_grid(grid(&[
            &["deep", "er", "bottom"],
            &["ERROR", "NOT_FOUND", "nope"],
        ]))
        .build();
        let res = table.resolve("deep");
        assert!(res.error);
        assert_eq!(res.responses, vec!["nope"]);
    }

    #[test]
    fn parent_found_in_preceding_row() {
        // The second row leaves earlier columns empty; its cells attach
        // under the nearest non-empty cell scanning upward.
        let table = TableBuilder::from_grid(grid(&[
            &["git", "status", "clean"],
            &["", "log", "two commits"],
        ]))
        .build();
        assert_eq!(table.resolve("git log").responses, vec!["two commits"]);
    }

    #[test]
    fn empty_grid_builds_empty_table() {
        let table = TableBuilder::from_grid(Vec::new()).build();
        assert!(table.root_tokens().is_empty());
        assert!(table.resolve("anything").responses.is_empty());
    }

    #[test]
    fn single_column_grid_builds_empty_table() {
        let table = TableBuilder::from_grid(grid(&[&["lonely"]])).build();
        assert!(table.root_tokens().is_empty());
    }

    #[test]
    fn defines_ignores_fallback() {
        let table = demo_table();
        assert!(table.defines("help"));
        assert!(table.defines("ERROR NOT_FOUND"));
        assert!(!table.defines("nope"));
    }

    #[test]
    fn rebuild_from_same_grid_is_equivalent() {
        let g = grid(&[&["a", "b", "c"]]);
        let first = TableBuilder::from_grid(g.clone()).build();
        let second = TableBuilder::from_grid(g).build();
        assert_eq!(
            first.resolve("a b").responses,
            second.resolve("a b").responses
        );
    }

    // -- CSV parsing --

    #[test]
    fn csv_header_sets_width_and_is_dropped() {
        let g = parse_csv("c0,c1,answer\nhelp,,hi there\n");
        assert_eq!(g, vec![vec!["help".to_string(), String::new(), "hi there".to_string()]]);
    }

    #[test]
    fn csv_short_rows_are_padded() {
        let g = parse_csv("a,b,c\nx\n");
        assert_eq!(g[0].len(), 3);
        assert_eq!(g[0][0], "x");
        assert_eq!(g[0][2], "");
    }

    #[test]
    fn csv_quoted_fields_keep_commas_and_quotes() {
        let g = parse_csv("a,b\n\"one, two\",\"say \"\"hi\"\"\"\n");
        assert_eq!(g[0][0], "one, two");
        assert_eq!(g[0][1], "say \"hi\"");
    }

    #[test]
    fn csv_tolerates_crlf() {
        let g = parse_csv("a,b\r\nx,y\r\n");
        assert_eq!(g, vec![vec!["x".to_string(), "y".to_string()]]);
    }

    #[test]
    fn csv_empty_text_is_empty_grid() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("only,header\n").is_empty());
    }

    #[test]
    fn csv_to_table_end_to_end() {
        let table = TableBuilder::from_csv(
            "command,argument,answer\nhelp,me,try again\nERROR,NOT_FOUND,unknown\n",
        )
        .build();
        assert_eq!(table.resolve("help me").responses, vec!["try again"]);
        assert_eq!(table.resolve("help nope").responses, vec!["unknown"]);
    }
}
