use std::path::Path;

use crate::runner::ScenarioResult;

/// Events shown as their own columns in the summary table.
const HEADLINE_EVENTS: [&str; 4] = ["TreeCut", "FireOut", "CookStateChanged", "VisitorImpatient"];

/// Results from one invocation of the runner.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    pub seed: u64,
    pub dt: f32,
    pub results: Vec<ScenarioResult>,
}

/// Load a report from a JSON file. Returns None if it is missing or unreadable.
pub fn load_report(path: &Path) -> Option<RunReport> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a report as pretty JSON.
pub fn save_report(path: &Path, report: &RunReport) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[ScenarioResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scenario | Ticks | Sim (s) | Served ok | Served wrong | Wood held |");
    for name in HEADLINE_EVENTS {
        out.push_str(&format!(" {} |", name));
    }
    out.push_str(" Events | Wall (ms) |\n");
    out.push_str("|----------|-------|---------|-----------|--------------|-----------|");
    for _ in HEADLINE_EVENTS {
        out.push_str("------|");
    }
    out.push_str("--------|-----------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {:.1} | {} | {} | {} |",
            r.scenario,
            r.tick_count,
            r.sim_seconds,
            r.served_correct,
            r.served_incorrect,
            r.wood_held,
        ));
        for name in HEADLINE_EVENTS {
            out.push_str(&format!(" {} |", r.count(name)));
        }
        out.push_str(&format!(" {} | {:.2} |\n", r.total_events(), r.wall_ms));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn result() -> ScenarioResult {
        let mut events = BTreeMap::new();
        events.insert("TreeCut".to_string(), 2);
        events.insert("FuelChanged".to_string(), 10);
        ScenarioResult {
            scenario: "lumberjack".to_string(),
            tick_count: 100,
            sim_seconds: 10.0,
            served_correct: 0,
            served_incorrect: 0,
            wood_held: 6,
            events,
            wall_ms: 1.5,
        }
    }

    #[test]
    fn test_markdown_has_row_per_result() {
        let table = format_markdown(&[result()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("| lumberjack | 100 | 10.0 | 0 | 0 | 6 | 2 | 0 |"));
        assert!(lines[2].contains("| 12 | 1.50 |"));
    }

    #[test]
    fn test_report_json_round_trip() {
        let dir = std::env::temp_dir().join(format!("emberwood-report-{}", std::process::id()));
        let path = dir.join("report.json");
        let report = RunReport {
            seed: 42,
            dt: 0.1,
            results: vec![result()],
        };
        save_report(&path, &report).expect("write report");
        assert_eq!(load_report(&path), Some(report));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_report() {
        assert!(load_report(Path::new("/nonexistent/report.json")).is_none());
    }
}
