use crate::document::{Node, read_nodes};
use crate::normalizer::{method_records, summarize};
use crate::types::{HarvestRecord, SummaryRecord};
use crate::walker::{UnitLabels, walk};

fn count_tables(nodes: &[Node]) -> usize {
    nodes.iter().filter(|n| matches!(n, Node::Table(_))).count()
}

/// Per-method records for every unit table of a yearly report, whichever
/// labeling convention the page uses.
pub fn parse_harvest_page(html: &str, year: u16) -> Vec<HarvestRecord> {
    let nodes = read_nodes(html);
    let tables = walk(&nodes, UnitLabels::CaptionOrHeading);

    log::debug!(
        "{}: resolved {} of {} tables",
        year,
        tables.len(),
        count_tables(&nodes)
    );

    tables
        .iter()
        .flat_map(|t| method_records(t.table, &t.context, year))
        .collect()
}

/// One summary per captioned unit table.
pub fn parse_summary_page(html: &str) -> Vec<SummaryRecord> {
    let nodes = read_nodes(html);
    let tables = walk(&nodes, UnitLabels::CaptionOnly);

    log::debug!(
        "Resolved {} of {} tables",
        tables.len(),
        count_tables(&nodes)
    );

    tables
        .iter()
        .map(|t| summarize(t.table, &t.context))
        .collect()
}
