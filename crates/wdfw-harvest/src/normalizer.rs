//! Row classification and normalization of a unit's harvest table.
//!
//! Column layout (0-indexed):
//!
//! | idx | column             | idx | column         |
//! |-----|--------------------|-----|----------------|
//! | 0   | method             | 7   | 4 point        |
//! | 1   | antlerless harvest | 8   | 5+ point       |
//! | 2   | antlered harvest   | 9   | hunters        |
//! | 3   | total harvest      | 10  | success rate   |
//! | 4   | 1 point            | 11  | hunter days    |
//! | 5   | 2 point            | 12  | days per kill  |
//! | 6   | 3 point            |     |                |

use crate::document::RawTable;
use crate::types::{HarvestRecord, SummaryRecord};
use crate::utils::{clean_value, nonzero_text, normalize_method, overall_stats, parse_int};
use crate::walker::Context;

pub const TABLE_WIDTH: usize = 13;

const COL_TOTAL_HARVEST: usize = 3;
const COL_HUNTERS: usize = 9;
const COL_SUCCESS_RATE: usize = 10;
const COL_HUNTER_DAYS: usize = 11;
const COL_DAYS_PER_KILL: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Totals,
    Method,
}

pub fn classify_row(first_cell: &str) -> RowKind {
    let label = first_cell.trim().to_lowercase();
    if label.contains("method") {
        RowKind::Header
    } else if label == "totals" {
        RowKind::Totals
    } else {
        RowKind::Method
    }
}

fn is_archery(first_cell: &str) -> bool {
    first_cell.to_lowercase().contains("archery")
}

/// Rows wide enough to carry the full column layout; narrower rows are
/// spacers or notes.
fn data_rows(table: &RawTable) -> impl Iterator<Item = &[String]> {
    table
        .rows
        .iter()
        .filter(|cells| {
            let wide_enough = cells.len() >= TABLE_WIDTH;
            if !wide_enough {
                log::debug!(
                    "Discarding row with {} cells: {:?}",
                    cells.len(),
                    cells.first()
                );
            }
            wide_enough
        })
        .map(Vec::as_slice)
}

/// One record per method row; header and totals rows are skipped.
pub fn method_records(table: &RawTable, context: &Context, year: u16) -> Vec<HarvestRecord> {
    data_rows(table)
        .filter(|cells| classify_row(&cells[0]) == RowKind::Method)
        .map(|cells| HarvestRecord {
            year,
            district: context.district.clone().unwrap_or_default(),
            unit_id: context.unit_id.clone(),
            unit_name: context.unit_name.clone(),
            method: normalize_method(&clean_value(&cells[0])),
            antlerless_harvest: clean_value(&cells[1]),
            antlered_harvest: clean_value(&cells[2]),
            total_harvest: clean_value(&cells[3]),
            points_1: clean_value(&cells[4]),
            points_2: clean_value(&cells[5]),
            points_3: clean_value(&cells[6]),
            points_4: clean_value(&cells[7]),
            points_5_plus: clean_value(&cells[8]),
            hunters: clean_value(&cells[9]),
            success_rate: clean_value(&cells[10]),
            hunter_days: clean_value(&cells[11]),
            days_per_kill: clean_value(&cells[12]),
        })
        .collect()
}

#[derive(Debug, Default)]
struct ArcheryRow {
    harvest: String,
    hunters: String,
    success_rate: String,
    days_per_kill: String,
}

/// Collapses a unit table into one summary.
///
/// Total harvest is read from the table's own totals row, while hunters and
/// hunter-days are summed over the method rows.
pub fn summarize(table: &RawTable, context: &Context) -> SummaryRecord {
    let mut archery: Option<ArcheryRow> = None;
    let mut total_harvest = 0;
    let mut total_hunters: i64 = 0;
    let mut total_hunter_days: i64 = 0;

    for cells in data_rows(table) {
        let kind = classify_row(&cells[0]);
        if kind == RowKind::Header {
            continue;
        }

        if is_archery(&cells[0]) {
            archery = Some(ArcheryRow {
                harvest: clean_value(&cells[COL_TOTAL_HARVEST]),
                hunters: clean_value(&cells[COL_HUNTERS]),
                success_rate: clean_value(&cells[COL_SUCCESS_RATE]),
                days_per_kill: clean_value(&cells[COL_DAYS_PER_KILL]),
            });
        }

        if kind == RowKind::Totals {
            total_harvest = parse_int(&cells[COL_TOTAL_HARVEST]);
        } else {
            total_hunters = total_hunters.saturating_add(parse_int(&cells[COL_HUNTERS]));
            total_hunter_days =
                total_hunter_days.saturating_add(parse_int(&cells[COL_HUNTER_DAYS]));
        }
    }

    let (overall_success_rate, overall_days_per_kill) =
        overall_stats(total_harvest, total_hunters, total_hunter_days);
    let archery = archery.unwrap_or_default();

    SummaryRecord {
        district: context.district.clone().unwrap_or_default(),
        unit_id: context.unit_id.clone(),
        unit_name: context.unit_name.clone(),
        archery_hunters: archery.hunters,
        archery_harvest: archery.harvest,
        archery_success_rate: archery.success_rate,
        archery_days_per_kill: archery.days_per_kill,
        total_hunters: nonzero_text(total_hunters),
        total_harvest: nonzero_text(total_harvest),
        overall_success_rate,
        overall_days_per_kill,
    }
}
