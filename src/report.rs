// Rendering of run results for the terminal, for spreadsheets and for scripts.

use clap::ValueEnum;
use std::fmt::Write;

use crate::error::Result;
use crate::runner::RunResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable report
    Text,
    /// One `key=value` CSV line per metric
    Csv,
    /// JSON object per run
    Json,
}

fn result_label(workload: &str) -> &'static str {
    match workload {
        "matrix-compare" => "Total Differences",
        "matrix-init" => "Cells Written",
        _ => "Sum",
    }
}

pub fn render(result: &RunResult, format: Format) -> Result<String> {
    let rendered = match format {
        Format::Text => render_text(result),
        Format::Csv => render_csv(result),
        Format::Json => serde_json::to_string_pretty(result)? + "\n",
    };
    Ok(rendered)
}

pub fn render_all(results: &[RunResult], format: Format) -> Result<String> {
    if format == Format::Json {
        return Ok(serde_json::to_string_pretty(results)? + "\n");
    }

    let mut out = String::new();
    for result in results {
        out.push_str(&render(result, format)?);
    }
    Ok(out)
}

fn render_text(result: &RunResult) -> String {
    let mut out = String::new();

    let access = match result.layout {
        Some(layout) => format!("{} access, {} slots", result.traversal.as_str(), layout.as_str()),
        None => format!("{} access", result.traversal.as_str()),
    };
    match result.phase {
        Some(phase) => {
            let _ = writeln!(out, "Mode: {} / {} ({})", result.mode, phase, access);
        }
        None => {
            let _ = writeln!(out, "Mode: {} ({})", result.mode, access);
        }
    }

    let _ = writeln!(out, "Size: {}", result.size);
    let _ = writeln!(out, "Threads: {}", result.threads);
    if let Some(seed) = result.seed {
        let _ = writeln!(out, "Seed: {}", seed);
    }
    let _ = writeln!(out, "{}: {}", result_label(result.workload), result.value);
    if let Some(probe) = result.probe {
        let _ = writeln!(out, "a[17][17] = {}", probe);
    }
    match result.is_correct() {
        Some(true) => {}
        Some(false) => {
            let _ = writeln!(
                out,
                "Expected: {} (MISMATCH)",
                result.expected.unwrap_or_default()
            );
        }
        None => {
            let _ = writeln!(out, "Expected: unknown (partial coverage)");
        }
    }
    let _ = writeln!(out, "Execution Time: {:.6} seconds", result.elapsed_secs());

    out
}

fn render_csv(result: &RunResult) -> String {
    let mut prefix = format!(
        "{},rust,mode={},N={},T={}",
        result.workload, result.mode, result.size, result.threads
    );
    if let Some(phase) = result.phase {
        let _ = write!(prefix, ",phase={}", phase);
    }
    let layout = result.layout.map_or("none", |layout| layout.as_str());
    let _ = write!(
        prefix,
        ",layout={},traversal={}",
        layout,
        result.traversal.as_str()
    );

    let mut out = String::new();
    let _ = writeln!(out, "{},time,{:.6},sec", prefix, result.elapsed_secs());
    let _ = writeln!(out, "{},result,{},value", prefix, result.value);
    if let Some(correct) = result.is_correct() {
        let _ = writeln!(out, "{},correct,{},boolean", prefix, u8::from(correct));
    }
    out
}
