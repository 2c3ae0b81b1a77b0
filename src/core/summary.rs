//! Human-readable rendering of a synergy report

use colored::{Color, Colorize};
use std::fmt::Write;

use crate::types::{PackageResult, PackageStrength, SynergyReport};

/// Cards listed per primary package in the summary
const SUMMARY_TOP_CARDS: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryOptions {
    /// Append every card's signals
    pub verbose: bool,
    pub no_color: bool,
}

struct Painter {
    enabled: bool,
}

impl Painter {
    fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn strength_color(strength: PackageStrength) -> Color {
    match strength {
        PackageStrength::Strong => Color::Green,
        PackageStrength::Moderate => Color::Cyan,
        PackageStrength::Weak => Color::Yellow,
        PackageStrength::Absent => Color::BrightBlack,
    }
}

/// Render the report as terminal text
pub fn render_summary(report: &SynergyReport, options: SummaryOptions) -> String {
    let p = Painter {
        enabled: !options.no_color,
    };
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {:.1}/100",
        p.bold("Overall synergy:"),
        report.overall_score
    );

    if report.primary_packages.is_empty() {
        let _ = writeln!(out, "\nNo primary strategy detected.");
    }

    for pkg in &report.primary_packages {
        render_package(&mut out, pkg, &p);
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "\n{}", p.bold("Warnings:"));
        for warning in &report.warnings {
            let _ = writeln!(out, "  {} {}", p.paint("⚠", Color::Yellow), warning);
        }
    }

    if options.verbose {
        let _ = writeln!(out, "\n{}", p.bold("Per-card signals:"));
        for (name, card) in &report.per_card {
            let _ = writeln!(out, "  {}", name);
            for note in &card.notes {
                let _ = writeln!(out, "    {}", p.paint(note, Color::Red));
            }
            for signal in &card.signals {
                let _ = writeln!(
                    out,
                    "    {:<22} {:>4.1}  [{}] {}",
                    signal.tag,
                    signal.strength,
                    signal.source,
                    p.paint(&signal.evidence, Color::BrightBlack)
                );
            }
        }
    }

    out
}

fn render_package(out: &mut String, pkg: &PackageResult, p: &Painter) {
    let header = format!("{} [{}] {:.1}", pkg.display_name, pkg.strength, pkg.score);
    let _ = writeln!(out, "\n{}", p.paint(&header, strength_color(pkg.strength)));

    for component in &pkg.components {
        let mark = if component.is_covered() {
            p.paint("✓", Color::Green)
        } else {
            p.paint("⚠", Color::Yellow)
        };
        let _ = writeln!(
            out,
            "  {} {}: {:.1}/{:.0} ({:.0}%)",
            mark,
            component.display_name,
            component.count,
            component.min_required,
            component.coverage_ratio * 100.0
        );
    }

    if !pkg.missing.is_empty() {
        let _ = writeln!(out, "  Missing: {}", pkg.missing.join(", "));
    }

    if !pkg.top_cards.is_empty() {
        let _ = writeln!(out, "  Top cards:");
        for (name, score) in pkg.top_cards.iter().take(SUMMARY_TOP_CARDS) {
            let _ = writeln!(out, "    {} ({:.1})", name, score);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
