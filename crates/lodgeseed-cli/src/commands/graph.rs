use anyhow::Result;

use lodgeseed_core::graph::dag::{with_ancestors, DependencyGraph};
use lodgeseed_core::graph::topo::insertion_order;
use lodgeseed_core::graph::visualize::{self, GraphFormat as VizFormat};
use lodgeseed_core::Table;

use crate::args::{GraphArgs, GraphFormat};
use crate::commands::parse_tables;

pub fn run(args: &GraphArgs) -> Result<()> {
    let selection = parse_tables(&args.only)?;

    let output = match args.format {
        GraphFormat::Order => visualize::render_order(&insertion_order(&selection)?),
        GraphFormat::Mermaid | GraphFormat::Dot => {
            let tables = if selection.is_empty() {
                Table::ALL.to_vec()
            } else {
                with_ancestors(&selection)
            };
            let format = match args.format {
                GraphFormat::Dot => VizFormat::Dot,
                _ => VizFormat::Mermaid,
            };
            visualize::visualize(&DependencyGraph::from_tables(&tables), format)
        }
    };

    print!("{}", output);
    Ok(())
}
