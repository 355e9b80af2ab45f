// File: src/graph.rs
//! Graphviz export of a pun set.
//!
//! Each word of a pun becomes a node identified by the word and its position
//! in the pun (`CA_0`, `TEA_1`), with an edge to the word that follows it.
//! Puns sharing a word at the same position share the node, which turns the
//! set into a lattice of alternatives.
use crate::error::Result;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct PunGraph {
    /// Node weights are the word labels, edge weights the position of the
    /// word the edge leads to.
    graph: DiGraph<String, usize>,
    node_index_map: HashMap<String, NodeIndex>,
}

fn node_id(word: &str, position: usize) -> String {
    format!("{}_{}", word, position)
}

impl PunGraph {
    fn node(&mut self, word: &str, position: usize) -> NodeIndex {
        let id = node_id(word, position);
        if let Some(&idx) = self.node_index_map.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(word.to_string());
        self.node_index_map.insert(id, idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Label of the node for `word` at `position`, if any pun put it there.
    pub fn label(&self, word: &str, position: usize) -> Option<&str> {
        let idx = self.node_index_map.get(&node_id(word, position))?;
        Some(self.graph[*idx].as_str())
    }

    pub fn has_edge(&self, from: (&str, usize), to: (&str, usize)) -> bool {
        let from = self.node_index_map.get(&node_id(from.0, from.1));
        let to = self.node_index_map.get(&node_id(to.0, to.1));
        match (from, to) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }
}

pub fn pun_graph<'a, I>(puns: I) -> PunGraph
where
    I: IntoIterator<Item = &'a String>,
{
    let mut graph = PunGraph::default();
    for pun in puns {
        let mut previous: Option<NodeIndex> = None;
        for (i, word) in pun.split(' ').enumerate() {
            let idx = graph.node(word, i);
            if let Some(prev) = previous {
                if graph.graph.find_edge(prev, idx).is_none() {
                    graph.graph.add_edge(prev, idx, i);
                }
            }
            previous = Some(idx);
        }
    }
    graph
}

pub fn write_dot<'a, I>(puns: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    fs::write(path, pun_graph(puns).to_dot())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn puns(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let graph = pun_graph(&puns(&["CA T", "CA TEA", "CA TEA"]));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.label("CA", 0), Some("CA"));
        assert!(graph.has_edge(("CA", 0), ("TEA", 1)));
        assert!(graph.has_edge(("CA", 0), ("T", 1)));
        assert!(!graph.has_edge(("T", 1), ("CA", 0)));
    }

    #[test]
    fn repeated_word_pairs_add_one_edge() {
        let graph = pun_graph(&puns(&["I SCREAM", "I SCREAM TOO", "I SCREAM AGAIN"]));
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn word_and_position_never_collide() {
        // "A1" at position 1 and "A" at position 11 are different nodes.
        let mut long = vec!["X"; 11];
        long.push("A");
        let tail = long.join(" ");
        let graph = pun_graph(&puns(&["X A1", tail.as_str()]));
        assert_eq!(graph.label("A1", 1), Some("A1"));
        assert_eq!(graph.label("A", 11), Some("A"));
        assert_eq!(graph.node_count(), 1 + 1 + 11);
    }

    #[test]
    fn single_word_puns_have_no_edges() {
        let graph = pun_graph(&puns(&["CAT", "KAT"]));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn dot_output_lists_labels_and_edges() {
        let dot = pun_graph(&puns(&["CA TEA"])).to_dot();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"CA\""));
        assert!(dot.contains("label = \"TEA\""));
        assert!(dot.contains("0 -> 1"));
    }

    #[test]
    fn writes_dot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("puns.gv");
        write_dot(&puns(&["CA TEA"]), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("->"));
    }
}
