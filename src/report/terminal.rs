use super::{Report, TRANSITIVE_NOTE};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

/// Terminal reporter with colored, sectioned output
pub struct TerminalReporter {
    output_path: Option<PathBuf>,
}

impl TerminalReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    /// Print the report, or write it uncoloured to the output file
    pub fn report(&self, report: &Report) -> Result<()> {
        match &self.output_path {
            Some(path) => {
                colored::control::set_override(false);
                let text = self.render(report);
                colored::control::unset_override();
                std::fs::write(path, text).into_diagnostic()?;
                eprintln!("Report written to: {}", path.display());
            }
            None => print!("{}", self.render(report)),
        }
        Ok(())
    }

    /// Render the whole report as text
    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();
        let rule = "---".dimmed().to_string();

        push(&mut out, &rule);
        push(&mut out, &"Unreferenced asset and type scan".bold().to_string());
        push(&mut out, &format!("Project path: {}", report.root));
        push(&mut out, &rule);

        if report.passes.assets {
            self.render_assets(&mut out, report, &rule);
        }
        if report.passes.symbols {
            self.render_symbols(&mut out, report, &rule);
        }

        push(&mut out, &"Scan complete. Review every result by hand.".green().to_string());
        push(
            &mut out,
            &"Back up the project before deleting any file or code.".dimmed().to_string(),
        );
        out
    }

    fn render_assets(&self, out: &mut String, report: &Report, rule: &str) {
        push(out, &"## 1. Unreferenced images".cyan().bold().to_string());
        push(out, rule);

        if !report.asset_collisions.is_empty() {
            push(out, &"### 1.1 Images sharing a name".yellow().to_string());
            for collision in &report.asset_collisions {
                push(out, &format!("    - {}: {} files", collision.name, collision.count));
            }
            push(out, rule);
        }

        push(out, "### 1.2 Image reference results");
        if report.unreferenced_assets.is_empty() {
            push(out, &"  No obviously unreferenced images found.".green().to_string());
        } else {
            push(
                out,
                &format!(
                    "  {} possibly unreferenced image names (check manually):",
                    report.unreferenced_assets.len()
                )
                .yellow()
                .to_string(),
            );
            for asset in &report.unreferenced_assets {
                push(out, &format!("    - {}", asset.name.white()));
                if let Some(location) = &asset.location {
                    push(out, &format!("      (path: {})", location).dimmed().to_string());
                }
            }
        }
        push(out, rule);
    }

    fn render_symbols(&self, out: &mut String, report: &Report, rule: &str) {
        push(
            out,
            &"## 2. Unreferenced classes / structs / enums".cyan().bold().to_string(),
        );
        push(out, rule);

        if !report.symbol_collisions.is_empty() {
            push(out, &"### 2.1 Types declared in multiple files".yellow().to_string());
            for collision in &report.symbol_collisions {
                push(
                    out,
                    &format!(
                        "    - {} (checked: {}; also in: {})",
                        collision.name,
                        collision.kept,
                        collision.shadowed.join(", ")
                    ),
                );
            }
            push(out, rule);
        }

        if report.unreferenced_symbols.is_empty() {
            push(
                out,
                &"  No obviously unreferenced classes / structs / enums found."
                    .green()
                    .to_string(),
            );
        } else {
            push(
                out,
                &format!(
                    "  {} possibly unreferenced types (check the reference chain manually):",
                    report.unreferenced_symbols.len()
                )
                .yellow()
                .to_string(),
            );
            for symbol in &report.unreferenced_symbols {
                push(
                    out,
                    &format!(
                        "    - {} {}",
                        symbol.name.white(),
                        format!("(declared in: {})", symbol.file).dimmed()
                    ),
                );
            }
            push(out, "");
            push(out, &format!("  Note: {}", TRANSITIVE_NOTE).dimmed().to_string());
        }
        push(out, rule);
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new(None)
    }
}

fn push(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
