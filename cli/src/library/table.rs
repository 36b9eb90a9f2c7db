use console::style;
use snapit_library::SnapshotReport;
use tabled::{
    builder::Builder,
    settings::{Style, Theme},
};

pub fn render_report_table(report: &SnapshotReport) -> String {
    let header = ["Snapshot", "Size", "Location", "Description", "Local Datetime"]
        .iter()
        .map(|s| style(s).green().bold().to_string())
        .collect::<Vec<String>>();

    let mut builder = Builder::default();
    builder.push_record(header);
    builder.push_record([
        format!("#{}", report.number),
        report.size_or_unknown().to_string(),
        report.path.clone(),
        report.description.clone(),
        report.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);

    let mut table = builder.build();

    let mut style = Theme::from_style(Style::markdown());
    style.remove_borders_horizontal();

    table.with(style);

    table.to_string()
}

pub fn print_report_table(report: &SnapshotReport) {
    println!("{}", render_report_table(report));
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;

    #[test]
    fn table_lists_every_reported_field() {
        let report = SnapshotReport {
            number: "42".to_string(),
            description: "before update".to_string(),
            subvolume: "/".to_string(),
            path: "/.snapshots/42/snapshot".to_string(),
            size: None,
            created_at: Local.with_ymd_and_hms(2026, 10, 16, 10, 15, 2).unwrap(),
        };

        let table = console::strip_ansi_codes(&render_report_table(&report)).to_string();

        assert!(table.contains("#42"));
        assert!(table.contains("Unknown"));
        assert!(table.contains("/.snapshots/42/snapshot"));
        assert!(table.contains("before update"));
        assert!(table.contains("2026-10-16 10:15:02"));
    }
}
