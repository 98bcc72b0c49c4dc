use petgraph::visit::EdgeRef;

use crate::graph::dag::DependencyGraph;
use crate::schema::Table;

/// Output format for graph visualization.
#[derive(Debug, Clone, Copy)]
pub enum GraphFormat {
    Mermaid,
    Dot,
}

/// Render the dependency graph.
pub fn visualize(graph: &DependencyGraph, format: GraphFormat) -> String {
    match format {
        GraphFormat::Mermaid => generate_mermaid(graph),
        GraphFormat::Dot => generate_dot(graph),
    }
}

/// Render an insertion order as a numbered list.
pub fn render_order(order: &[Table]) -> String {
    order
        .iter()
        .enumerate()
        .map(|(i, table)| format!("{:>2}. {}\n", i + 1, table))
        .collect()
}

fn generate_mermaid(graph: &DependencyGraph) -> String {
    let mut output = String::from("graph TD\n");

    for node in graph.graph.node_indices() {
        let name = graph.table(node);
        output.push_str(&format!("    {}[{}]\n", name, name));
    }

    output.push('\n');

    for edge in graph.graph.edge_references() {
        let from = graph.table(edge.source());
        let to = graph.table(edge.target());
        output.push_str(&format!("    {} --> {}\n", from, to));
    }

    output
}

fn generate_dot(graph: &DependencyGraph) -> String {
    let mut output = String::from("digraph dependencies {\n");
    output.push_str("    rankdir=TB;\n");
    output.push_str("    node [shape=box, style=rounded];\n\n");

    for node in graph.graph.node_indices() {
        output.push_str(&format!("    \"{}\";\n", graph.table(node)));
    }

    for edge in graph.graph.edge_references() {
        output.push_str(&format!(
            "    \"{}\" -> \"{}\";\n",
            graph.table(edge.source()),
            graph.table(edge.target())
        ));
    }

    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mermaid_output() {
        let graph = DependencyGraph::from_tables(&[Table::Accounts, Table::Credentials]);
        let output = visualize(&graph, GraphFormat::Mermaid);
        assert!(output.starts_with("graph TD"));
        assert!(output.contains("accounts[accounts]"));
        assert!(output.contains("credentials --> accounts"));
    }

    #[test]
    fn test_dot_output() {
        let graph = DependencyGraph::from_tables(&[Table::Accounts, Table::Credentials]);
        let output = visualize(&graph, GraphFormat::Dot);
        assert!(output.starts_with("digraph dependencies {"));
        assert!(output.contains("\"credentials\" -> \"accounts\";"));
        assert!(output.trim_end().ends_with('}'));
    }

    #[test]
    fn test_render_order() {
        let output = render_order(&[Table::Accounts, Table::Credentials]);
        assert_eq!(output, " 1. accounts\n 2. credentials\n");
    }
}
