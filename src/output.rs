use std::fmt::Write as _;
use std::path::Path;

use similar::{ChangeTag, TextDiff};

use crate::colors::Colors;
use crate::merge::MergeReport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
        }
    }
}

pub fn print_written(path: &Path, report: &MergeReport, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        println!("{}", path.display());
        return;
    }

    println!(
        "{}Written:{} {}",
        ctx.colors.success,
        ctx.colors.reset(),
        path.display()
    );
    print_report(report, ctx);
}

pub fn print_dry_run(path: &Path, report: &MergeReport, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }

    println!(
        "{}Dry run:{} {} was not written",
        ctx.colors.info,
        ctx.colors.reset(),
        path.display()
    );
    print_report(report, ctx);
}

fn print_report(report: &MergeReport, ctx: &OutputContext) {
    println!("{}", summary_line(report));
    if !report.extras.is_empty() {
        println!(
            "{}Not in template:{} {}",
            ctx.colors.warning,
            ctx.colors.reset(),
            report.extras.join(", ")
        );
    }
}

pub fn summary_line(report: &MergeReport) -> String {
    format!(
        "{} kept from prior, {} template defaults, {} extra variable(s) appended",
        report.overridden,
        report.defaults,
        report.extras.len()
    )
}

pub fn print_cancelled(message: &str, ctx: &OutputContext) {
    eprintln!(
        "{}Cancelled:{} {message}",
        ctx.colors.warning,
        ctx.colors.reset()
    );
}

pub fn print_error(message: &str, ctx: &OutputContext) {
    eprintln!("{}Error:{} {message}", ctx.colors.error, ctx.colors.reset());
}

pub fn print_diff(label: &str, original: &str, content: &str, ctx: &OutputContext) {
    print!("{}", render_diff(label, original, content, &ctx.colors));
}

/// Unified-style diff with three lines of context. Empty when unchanged.
pub fn render_diff(label: &str, original: &str, content: &str, colors: &Colors) -> String {
    let mut out = String::new();
    if original == content {
        return out;
    }

    let diff = TextDiff::from_lines(original, content);

    let _ = writeln!(out, "--- {label}");
    let _ = writeln!(out, "+++ {label}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, color) = match change.tag() {
                    ChangeTag::Delete => ('-', colors.removed),
                    ChangeTag::Insert => ('+', colors.added),
                    ChangeTag::Equal => (' ', ""),
                };
                let reset = if color.is_empty() { "" } else { colors.reset() };
                let _ = write!(out, "{color}{sign}{change}{reset}");
                if change.missing_newline() {
                    out.push('\n');
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_diff_unchanged_is_empty() {
        let colors = Colors::new(false);
        assert_eq!(render_diff(".env", "A=1\n", "A=1\n", &colors), "");
    }

    #[test]
    fn test_render_diff_shows_changes() {
        let colors = Colors::new(false);
        let diff = render_diff(".env", "A=1\nB=2\n", "A=1\nB=3\n", &colors);

        assert!(diff.starts_with("--- .env\n+++ .env\n"));
        assert!(diff.contains(" A=1\n"));
        assert!(diff.contains("-B=2\n"));
        assert!(diff.contains("+B=3\n"));
    }

    #[test]
    fn test_render_diff_from_empty() {
        let colors = Colors::new(false);
        let diff = render_diff("new.env", "", "A=1\n", &colors);
        assert!(diff.contains("+A=1\n"));
    }

    #[test]
    fn test_render_diff_missing_final_newline() {
        let colors = Colors::new(false);
        let diff = render_diff(".env", "A=1", "A=2\n", &colors);
        assert!(diff.contains("-A=1\n"));
        assert!(diff.contains("+A=2\n"));
    }

    #[test]
    fn test_summary_line_counts() {
        let report = MergeReport {
            overridden: 2,
            defaults: 5,
            extras: vec!["X".to_string()],
        };
        assert_eq!(
            summary_line(&report),
            "2 kept from prior, 5 template defaults, 1 extra variable(s) appended"
        );
    }
}
