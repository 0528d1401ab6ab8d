use std::io::{self, Write};
use std::path::Path;

use mol2split::{Layout, SplitConfig, SplitReport};

use crate::util::text::{truncate, truncate_start};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_summary(config: &SplitConfig, report: &SplitReport, output_dir: &Path) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let layout = match config.layout() {
        Layout::PerRecord => "one file per record".to_string(),
        Layout::Partitioned {
            records_per_partition,
        } => format!("{records_per_partition} records per file"),
    };

    let mut rows = vec![
        ("Format", config.format().to_string()),
        ("Layout", layout),
        ("Lines", report.lines.to_string()),
        ("Records", report.records.to_string()),
        ("Files Written", report.files_written.to_string()),
    ];
    if report.overwritten > 0 {
        rows.push(("Overwritten", report.overwritten.to_string()));
    }
    rows.push((
        "Output",
        truncate_start(&output_dir.display().to_string(), SAFE_TABLE_WIDTH - 22),
    ));

    print_kv_table(&mut out, "Split Summary", &rows);
    let _ = writeln!(out);
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);
    let k_line = "─".repeat(key_w + 2);
    let v_line = "─".repeat(val_w + 2);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{INDENT}┌{k_line}┬{v_line}┐");
    let _ = writeln!(out, "{INDENT}│ {:<key_w$} │ {:>val_w$} │", "Metric", "Value");
    let _ = writeln!(out, "{INDENT}├{k_line}┼{v_line}┤");

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(out, "{INDENT}└{k_line}┴{v_line}┘");
}
