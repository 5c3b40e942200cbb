use failtrace_extractor::{AffectedFile, LinkKind};
use failtrace_triage::TriageReport;

/// Markdown job summary: run metrics, linked affected files and the cleaned
/// log in a collapsed block.
pub fn render_markdown(report: &TriageReport, limit: usize) -> String {
    let job = &report.job;
    let mut md = String::new();

    md.push_str("# CI failure triage\n\n");
    if !job.job_name.is_empty() || !job.step_name.is_empty() {
        md.push_str(&format!(
            "> **Failed:** `{}` → `{}`\n\n",
            or_na(&job.job_name),
            or_na(&job.step_name)
        ));
    }

    md.push_str("## Run metrics\n\n");
    md.push_str("| Exit Code | Duration | Job | Step |\n");
    md.push_str("|-----------|----------|-----|------|\n");
    md.push_str(&format!(
        "| `{}` | {} | `{}` | `{}` |\n\n",
        job.exit_code.map_or("N/A".to_string(), |code| code.to_string()),
        job.duration_display(),
        or_na(&job.job_name),
        or_na(&job.step_name)
    ));

    md.push_str("## Affected files\n\n");
    let shown = report.top_files(limit);
    if shown.is_empty() {
        md.push_str("_No source file references found._\n");
    }
    for file in shown {
        md.push_str(&format!("- {}\n", file_entry(file)));
    }
    let hidden = report.affected_files.len() - shown.len();
    if hidden > 0 {
        md.push_str(&format!("- _… and {hidden} more_\n"));
    }
    md.push('\n');

    let stats = &report.stats;
    md.push_str(&format!(
        "<details><summary>Cleaned log ({} of {} lines, {:.0}% smaller)</summary>\n\n",
        stats.cleaned_lines,
        stats.raw_lines,
        stats.reduction_ratio() * 100.0
    ));
    let fence = code_fence(&report.cleaned_log);
    md.push_str(&format!("{fence}text\n{}\n{fence}\n\n", report.cleaned_log));
    md.push_str("</details>\n");

    md
}

/// `` [`path:line`](url) ``, with search links marked as such.
pub fn file_entry(file: &AffectedFile) -> String {
    let entry = format!("[`{}`]({})", file.location(), file.link);
    match file.link_kind {
        LinkKind::Search => format!("{entry} _(open as search)_"),
        LinkKind::Direct | LinkKind::File => entry,
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// A backtick fence longer than any backtick run inside `text`.
fn code_fence(text: &str) -> String {
    let longest = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
