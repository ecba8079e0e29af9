//! Output rendering and formatting

use console::{Style, Term};
use lcdb_builder::{BuildReport, EnvironmentStatus};
use lcdb_config::ColorChoice;
use std::io;

/// Output renderer for the final build summary
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stderr(),
        }
    }

    /// Whether styled output should be produced
    pub fn colors_enabled(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }

    /// Render the build summary
    ///
    /// JSON goes to stdout as the last line. The text summary goes to stderr
    /// to keep stdout for the runner's own output.
    pub fn render_report(&self, report: &BuildReport) -> io::Result<()> {
        if self.json_output {
            let json = serde_json::to_string(report).map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        let label = self.style(Style::new().bold());
        let environment = match report.environment {
            EnvironmentStatus::Created { duration } => {
                format!("created in {:.1}s", duration.as_secs_f64())
            }
            EnvironmentStatus::Reused => "reused".to_string(),
        };

        self.term.write_line(&format!(
            "{} {}",
            label.apply_to("Data directory:"),
            report.target.display()
        ))?;
        self.term.write_line(&format!(
            "{} {} ({environment})",
            label.apply_to("Environment:   "),
            report.prefix.display()
        ))?;
        self.term.write_line(&format!(
            "{} {}",
            label.apply_to("Manifest md5:  "),
            report.fingerprint
        ))?;
        Ok(())
    }

    fn style(&self, style: Style) -> Style {
        if self.colors_enabled() {
            style.force_styling(true)
        } else {
            Style::new().force_styling(false)
        }
    }
}
