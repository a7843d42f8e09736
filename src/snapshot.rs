/// Loading the front end's JSON dump of a checked file.
///
/// The dump is a serialized [`CheckedFile`]:
///
/// ```json
/// {
///   "package": 0,
///   "tree": { "nodes": [ { "span": {...}, "kind": "File", ... } ] },
///   "tables": { "defs": [[node, symbol]], "uses": [...], "selections": [...] },
///   "graph": { "types": [...], "symbols": [...], "scopes": [...], "packages": [...] },
///   "diagnostics": [ "..." ]
/// }
/// ```
///
/// Every id in the dump is checked on load so the resolver can index the
/// arenas without bounds failures.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::warn;

use crate::binding::{CheckedFile, GraphError};
use crate::syntax::TreeError;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid syntax tree: {0}")]
    Tree(#[from] TreeError),
    #[error("invalid type graph: {0}")]
    Graph(#[from] GraphError),
    #[error("package {0} is not in the type graph")]
    MissingPackage(usize),
    #[error("{table} entry refers to missing node {node}")]
    DanglingNode { table: &'static str, node: usize },
    #[error("{table} entry for node {node} refers to missing {what} {index}")]
    DanglingBinding {
        table: &'static str,
        node: usize,
        what: &'static str,
        index: usize,
    },
    #[error("{0}")]
    Diagnostic(String),
}

/// Parse and validate a dump.
pub fn load(reader: impl Read) -> Result<CheckedFile, SnapshotError> {
    let file: CheckedFile = serde_json::from_reader(reader)?;
    validate(&file)?;
    Ok(file)
}

pub fn load_path(path: &Path) -> Result<CheckedFile, SnapshotError> {
    load(BufReader::new(File::open(path)?))
}

/// Check every id the resolver may follow.
pub fn validate(file: &CheckedFile) -> Result<(), SnapshotError> {
    file.tree.validate()?;
    file.graph.validate()?;
    if file.graph.packages().nth(file.package.index()).is_none() {
        return Err(SnapshotError::MissingPackage(file.package.index()));
    }

    let nodes = file.tree.len();
    let symbols = file.graph.symbols().count();
    let types = file.graph.type_count();

    let symbol_tables = [("defs", &file.tables.defs), ("uses", &file.tables.uses)];
    for (table, map) in symbol_tables {
        for (node, symbol) in map {
            if node.index() >= nodes {
                return Err(SnapshotError::DanglingNode {
                    table,
                    node: node.index(),
                });
            }
            if symbol.index() >= symbols {
                return Err(SnapshotError::DanglingBinding {
                    table,
                    node: node.index(),
                    what: "symbol",
                    index: symbol.index(),
                });
            }
        }
    }

    for (node, selection) in &file.tables.selections {
        let dangling = |what, index| SnapshotError::DanglingBinding {
            table: "selections",
            node: node.index(),
            what,
            index,
        };
        if node.index() >= nodes {
            return Err(SnapshotError::DanglingNode {
                table: "selections",
                node: node.index(),
            });
        }
        if selection.recv.index() >= types {
            return Err(dangling("type", selection.recv.index()));
        }
        if selection.obj.index() >= symbols {
            return Err(dangling("symbol", selection.obj.index()));
        }
    }
    Ok(())
}

// ─── Diagnostics ────────────────────────────────────────────────────────────

/// Whether a front-end message is never fatal.
///
/// "value of x is not used" comes from expressions the user is still
/// typing and says nothing about the bindings.
pub fn ignore_diagnostic(message: &str) -> bool {
    message.contains("is not used")
}

/// Apply the diagnostics policy: in strict mode the first message that is
/// not ignorable is an error; otherwise every such message is logged.
pub fn check_diagnostics(file: &CheckedFile, strict: bool) -> Result<(), SnapshotError> {
    for message in file.diagnostics.iter().filter(|m| !ignore_diagnostic(m)) {
        if strict {
            return Err(SnapshotError::Diagnostic(message.clone()));
        }
        warn!(%message, "front end reported an error");
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
