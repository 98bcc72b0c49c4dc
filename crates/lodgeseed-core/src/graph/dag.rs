use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};

use crate::schema::Table;

/// A directed graph representing table dependencies via foreign keys.
/// Edges point from dependent table to referenced table (child → parent).
pub struct DependencyGraph {
    pub graph: DiGraph<Table, ()>,
    pub node_indices: HashMap<Table, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
        }
    }

    /// Build the graph for every seeded table.
    pub fn from_schema() -> Self {
        Self::from_tables(&Table::ALL)
    }

    /// Build the graph for a subset of tables.
    /// Edges to parents outside the subset are dropped.
    pub fn from_tables(tables: &[Table]) -> Self {
        let mut graph = Self::new();
        for &table in tables {
            graph.add_table(table);
        }
        for &table in tables {
            for &parent in table.parents() {
                if graph.node_indices.contains_key(&parent) {
                    graph.add_dependency(table, parent);
                }
            }
        }
        graph
    }

    /// Add a table node; adding the same table twice is a no-op.
    pub fn add_table(&mut self, table: Table) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&table) {
            return idx;
        }
        let idx = self.graph.add_node(table);
        self.node_indices.insert(table, idx);
        idx
    }

    /// Record that `child` holds a foreign key into `parent`.
    pub fn add_dependency(&mut self, child: Table, parent: Table) {
        let from = self.add_table(child);
        let to = self.add_table(parent);
        self.graph.update_edge(from, to, ());
    }

    pub fn table(&self, idx: NodeIndex) -> Table {
        self.graph[idx]
    }

    pub fn node_index(&self, table: Table) -> Option<NodeIndex> {
        self.node_indices.get(&table).copied()
    }

    pub fn tables(&self) -> Vec<Table> {
        self.graph.node_weights().copied().collect()
    }

    pub fn table_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Close a table selection under `Table::parents`, so every foreign key of a
/// selected table still has its parent seeded in the same run.
pub fn with_ancestors(selection: &[Table]) -> Vec<Table> {
    let mut closed = BTreeSet::new();
    let mut stack: Vec<Table> = selection.to_vec();
    while let Some(table) = stack.pop() {
        if closed.insert(table) {
            stack.extend_from_slice(table.parents());
        }
    }
    Table::ALL
        .into_iter()
        .filter(|t| closed.contains(t))
        .collect()
}
