//! Graphviz rendering of a finished tree.
//!
//! Nodes are drawn as record shapes with the root, inner nodes and leaves
//! filled in distinct colours; rendering to `.png` shells out to the
//! external `dot` binary.

use std::{collections::VecDeque, fmt::Write as _, fs, process::Command};

use tracing::{info, instrument};

use crate::{
    error::{Error, Result},
    tree::{node::Node, Tree},
};

const ROOT_FILL: &str = "#FDF3D0";
const MID_FILL: &str = "#DCE8FA";
const LEAF_FILL: &str = "#F1CFCD";

/// Produce the record-shape digraph source describing a tree.
///
/// Every node is addressed by its root path (`N`, `NL`, `NR`, `NLL`, ...),
/// which is unique within a tree and stable across renders.
pub fn dot_source(tree: &Tree) -> String {
    let mut out = String::from("strict digraph {\nnode [shape=record];\n");

    let root = match tree.root().as_deref() {
        Some(root) => root,
        None => {
            out.push_str("}\n");
            return out;
        }
    };

    let mut queue: VecDeque<(Option<(String, &str)>, &Node, String)> = VecDeque::new();
    queue.push_back((None, root, String::from("N")));

    while let Some((parent, node, path)) = queue.pop_front() {
        let left = if node.l.is_some() { "<L>L" } else { "" };
        let right = if node.r.is_some() { "<R>R" } else { "" };
        let (tag, fill) = if parent.is_none() {
            ("<RT>RT", ROOT_FILL)
        } else if node.l.is_none() && node.r.is_none() {
            ("<LF>LF", LEAF_FILL)
        } else {
            ("<MD>MD", MID_FILL)
        };

        let _ = writeln!(
            out,
            "{} [label=\"{}|{{<C>{}|{}}}|{}\" style=filled fillcolor=\"{}\"];",
            path,
            left,
            hex(&node.k),
            tag,
            right,
            fill
        );

        if let Some((parent_path, dir)) = parent {
            let _ = writeln!(out, "{}:{} -> {}:C;", parent_path, dir, path);
        }

        if let Some(l) = node.l.as_deref() {
            queue.push_back((Some((path.clone(), "L")), l, format!("{}L", path)));
        }
        if let Some(r) = node.r.as_deref() {
            queue.push_back((Some((path.clone(), "R")), r, format!("{}R", path)));
        }
    }

    out.push_str("}\n");
    out
}

/// Write `<stem>.dot` and render `<stem>.png` through the external `dot`
/// binary.
#[instrument(skip(tree))]
pub fn render(tree: &Tree, stem: &str) -> Result<()> {
    let dot_path = format!("{}.dot", stem);
    fs::write(&dot_path, dot_source(tree))?;

    let png_path = format!("{}.png", stem);
    let status = Command::new("dot")
        .args(["-Tpng", dot_path.as_str(), "-o", png_path.as_str()])
        .status()?;
    if !status.success() {
        return Err(Error::Renderer(status));
    }

    info!(%dot_path, %png_path, "rendered tree");

    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut out, byte| {
        let _ = write!(out, "{:02x}", byte);
        out
    })
}
