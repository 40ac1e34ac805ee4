//! Document-order walk that resolves the district and unit each data table
//! belongs to.
//!
//! Reports from different years label units differently: newer pages give
//! every table a `<caption>` such as `101 - SHERMAN`, older pages put the same
//! label in an `h3`/`h4` heading ahead of the table. Districts are always `h2`
//! headings. The walk handles both conventions in a single forward pass.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::{HeadingLevel, Node, RawTable};

static RE_DISTRICT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)District\s*(\d+)").expect("invalid regex: district"));

static RE_UNIT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})\s*[-–]\s*(.+)").expect("invalid regex: unit label"));

/// Which labeling conventions may establish a table's unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitLabels {
    CaptionOnly,
    CaptionOrHeading,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub district: Option<String>,
    pub unit_id: String,
    pub unit_name: String,
}

/// A data table together with the context it was found under. `index` is the
/// table's position among all tables of the document, dropped ones included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTable<'a> {
    pub index: usize,
    pub context: Context,
    pub table: &'a RawTable,
}

pub fn parse_district(text: &str) -> Option<String> {
    RE_DISTRICT.captures(text).map(|caps| caps[1].to_string())
}

/// Parses a `<3 digits> <dash> <name>` label; both `-` and `–` are accepted.
pub fn parse_unit_label(text: &str) -> Option<(String, String)> {
    let caps = RE_UNIT_LABEL.captures(text.trim())?;
    Some((caps[1].to_string(), caps[2].trim().to_string()))
}

#[derive(Debug, Default)]
struct WalkState {
    district: Option<String>,
    heading_unit: Option<(String, String)>,
}

impl WalkState {
    fn enter_heading(&mut self, level: HeadingLevel, text: &str) {
        match level {
            HeadingLevel::Major => {
                if let Some(district) = parse_district(text) {
                    self.district = Some(district);
                    self.heading_unit = None;
                }
            }
            HeadingLevel::Minor => {
                if let Some(unit) = parse_unit_label(text) {
                    self.heading_unit = Some(unit);
                }
            }
        }
    }

    fn resolve_unit(&self, table: &RawTable, labels: UnitLabels) -> Option<(String, String)> {
        // A caption is authoritative even when it does not parse.
        if let Some(caption) = &table.caption {
            return parse_unit_label(caption);
        }

        match labels {
            UnitLabels::CaptionOnly => None,
            UnitLabels::CaptionOrHeading => self.heading_unit.clone(),
        }
    }
}

pub fn walk(nodes: &[Node], labels: UnitLabels) -> Vec<ResolvedTable<'_>> {
    let mut state = WalkState::default();
    let mut resolved = Vec::new();
    let mut index = 0;

    for node in nodes {
        match node {
            Node::Heading { level, text } => state.enter_heading(*level, text),
            Node::Table(table) => {
                match state.resolve_unit(table, labels) {
                    Some((unit_id, unit_name)) => resolved.push(ResolvedTable {
                        index,
                        context: Context {
                            district: state.district.clone(),
                            unit_id,
                            unit_name,
                        },
                        table,
                    }),
                    None => log::debug!(
                        "Dropping table {} (caption: {:?}): no unit label",
                        index,
                        table.caption
                    ),
                }
                index += 1;
            }
        }
    }

    resolved
}
