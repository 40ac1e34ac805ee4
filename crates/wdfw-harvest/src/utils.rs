use crate::types::HarvestRecord;

use std::collections::BTreeMap;

/// Trims a cell and maps `n/a` (any case) to an empty string.
pub fn clean_value(value: &str) -> String {
    let value = value.trim();
    if value.eq_ignore_ascii_case("n/a") {
        String::new()
    } else {
        value.to_string()
    }
}

/// Lenient integer parse for table cells: thousands separators are dropped and
/// anything unparseable counts as zero.
pub fn parse_int(value: &str) -> i64 {
    let value = value.trim().replace(',', "");
    if value.is_empty() || value.eq_ignore_ascii_case("n/a") {
        return 0;
    }
    value.parse().unwrap_or(0)
}

/// Some years label the rifle season "Modern Firearms"; others use the
/// singular. Only that exact spelling is rewritten.
pub fn normalize_method(method: &str) -> String {
    match method {
        "Modern Firearms" => "Modern Firearm".to_string(),
        other => other.to_string(),
    }
}

/// Overall success rate and hunter-days per kill for a unit, or two empty
/// strings when harvest or hunters are zero.
pub fn overall_stats(
    total_harvest: i64,
    total_hunters: i64,
    total_hunter_days: i64,
) -> (String, String) {
    if total_harvest <= 0 || total_hunters <= 0 {
        return (String::new(), String::new());
    }

    let success_rate = total_harvest as f64 / total_hunters as f64 * 100.0;
    let days_per_kill = total_hunter_days as f64 / total_harvest as f64;

    (format!("{success_rate:.0}%"), format!("{days_per_kill:.0}"))
}

/// Integer rendered as text, empty when zero.
pub fn nonzero_text(value: i64) -> String {
    if value > 0 {
        value.to_string()
    } else {
        String::new()
    }
}

#[derive(Debug)]
pub struct HarvestStats {
    pub per_year: BTreeMap<u16, usize>,
    pub units: usize,
    pub total: usize,
}

impl HarvestStats {
    pub fn from_records(records: &[HarvestRecord]) -> HarvestStats {
        let mut per_year = BTreeMap::new();
        for record in records {
            *per_year.entry(record.year).or_insert(0) += 1;
        }

        let mut units: Vec<&str> = records.iter().map(|r| r.unit_id.as_str()).collect();
        units.sort_unstable();
        units.dedup();

        HarvestStats {
            per_year,
            units: units.len(),
            total: records.len(),
        }
    }
}

impl std::fmt::Display for HarvestStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        for (year, count) in &self.per_year {
            writeln!(f, "  {year}: {count:>6} records")?;
        }
        writeln!(f, "  Distinct units: {:>6}", self.units)?;
        writeln!(f, "  Total:          {:>6}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("1,234"), 1234);
        assert_eq!(parse_int(" 42 "), 42);
        assert_eq!(parse_int("n/a"), 0);
        assert_eq!(parse_int("N/A"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int("25%"), 0);
    }

    #[test]
    fn test_clean_value() {
        assert_eq!(clean_value("N/A"), "");
        assert_eq!(clean_value("n/a"), "");
        assert_eq!(clean_value(" 42 "), "42");
        assert_eq!(clean_value("31%"), "31%");
    }

    #[test]
    fn test_normalize_method() {
        assert_eq!(normalize_method("Modern Firearms"), "Modern Firearm");
        assert_eq!(normalize_method("Archery"), "Archery");
        assert_eq!(normalize_method("Modern Firearm"), "Modern Firearm");
        assert_eq!(normalize_method("modern firearms"), "modern firearms");
        assert_eq!(normalize_method("MODERN FIREARMS"), "MODERN FIREARMS");
    }

    #[test]
    fn test_overall_stats() {
        assert_eq!(
            overall_stats(50, 200, 1000),
            ("25%".to_string(), "20".to_string())
        );
        assert_eq!(overall_stats(0, 200, 1000), (String::new(), String::new()));
        assert_eq!(overall_stats(50, 0, 1000), (String::new(), String::new()));
    }

    #[test]
    fn test_overall_stats_rounds() {
        assert_eq!(overall_stats(1, 3, 10), ("33%".to_string(), "10".to_string()));
        assert_eq!(overall_stats(2, 3, 7), ("67%".to_string(), "4".to_string()));
    }

    #[test]
    fn test_nonzero_text() {
        assert_eq!(nonzero_text(0), "");
        assert_eq!(nonzero_text(1234), "1234");
    }

    #[test]
    fn test_harvest_stats() {
        let record = |year: u16, unit: &str| HarvestRecord {
            year,
            district: "1".to_string(),
            unit_id: unit.to_string(),
            unit_name: String::new(),
            method: "Archery".to_string(),
            antlerless_harvest: String::new(),
            antlered_harvest: String::new(),
            total_harvest: String::new(),
            points_1: String::new(),
            points_2: String::new(),
            points_3: String::new(),
            points_4: String::new(),
            points_5_plus: String::new(),
            hunters: String::new(),
            success_rate: String::new(),
            hunter_days: String::new(),
            days_per_kill: String::new(),
        };
        let records = vec![record(2013, "101"), record(2013, "105"), record(2014, "101")];

        let stats = HarvestStats::from_records(&records);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.units, 2);
        assert_eq!(stats.per_year.get(&2013), Some(&2));
        assert_eq!(stats.per_year.get(&2014), Some(&1));
    }
}
