use petgraph::algo::toposort;

use crate::error::{Result, SeedError};
use crate::graph::dag::DependencyGraph;
use crate::schema::Table;

/// Compute the insertion order of the graph: every table comes after all of
/// its parents.
pub fn topological_sort(graph: &DependencyGraph) -> Result<Vec<Table>> {
    // Edges point child → parent, so petgraph yields children first.
    match toposort(&graph.graph, None) {
        Ok(sorted) => Ok(sorted.iter().rev().map(|&idx| graph.table(idx)).collect()),
        Err(cycle) => Err(SeedError::CircularDependency {
            table: graph.table(cycle.node_id()).to_string(),
        }),
    }
}

/// Insertion order for a selection of tables plus everything they depend on.
pub fn insertion_order(selection: &[Table]) -> Result<Vec<Table>> {
    let tables = if selection.is_empty() {
        Table::ALL.to_vec()
    } else {
        crate::graph::dag::with_ancestors(selection)
    };
    topological_sort(&DependencyGraph::from_tables(&tables))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[Table], table: Table) -> usize {
        order
            .iter()
            .position(|&t| t == table)
            .unwrap_or_else(|| panic!("{table} missing from order"))
    }

    #[test]
    fn test_parents_come_first() {
        let order = topological_sort(&DependencyGraph::from_schema()).unwrap();
        assert_eq!(order.len(), Table::ALL.len());

        for table in Table::ALL {
            for &parent in table.parents() {
                assert!(
                    position(&order, parent) < position(&order, table),
                    "{parent} must come before {table}"
                );
            }
        }
    }

    #[test]
    fn test_accounts_first_bookings_after_payments() {
        let order = topological_sort(&DependencyGraph::from_schema()).unwrap();
        assert!(position(&order, Table::Accounts) < position(&order, Table::Credentials));
        assert!(position(&order, Table::Payments) < position(&order, Table::Bookings));
        assert!(
            position(&order, Table::ReviewImages) < position(&order, Table::AccommodationImages)
        );
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency(Table::Payments, Table::Bookings);
        graph.add_dependency(Table::Bookings, Table::Payments);

        let err = topological_sort(&graph).unwrap_err();
        assert!(matches!(err, SeedError::CircularDependency { .. }));
    }

    #[test]
    fn test_insertion_order_for_selection() {
        let order = insertion_order(&[Table::CreditCards]).unwrap();
        assert_eq!(
            order,
            vec![Table::Accounts, Table::PaymentMethods, Table::CreditCards]
        );
    }

    #[test]
    fn test_empty_selection_means_everything() {
        let order = insertion_order(&[]).unwrap();
        assert_eq!(order.len(), Table::ALL.len());
    }
}
