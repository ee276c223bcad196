//! Output formatting for search results.
//!
//! Text-like formats delegate to the library's [`SearchSummary`] renderers;
//! `enhanced` adds colored STRT/VIA/GOAL tags; `json` serialises the summary.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use geopath_lib::{SearchStep, SearchSummary, SummaryRenderMode};

use crate::terminal::{format_km, supports_unicode, ColorPalette};

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly step list.
    #[default]
    Text,
    /// Markdown suitable for chat or notes.
    Rich,
    /// Compact `+`/`|`/`-` list.
    Basic,
    /// Colored tags per step.
    Enhanced,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// JSON payload for the search command.
#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    #[serde(flatten)]
    pub summary: &'a SearchSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<&'a [SearchStep]>,
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: std::time::Duration) {
    let palette = ColorPalette::detect();

    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };

    println!("\n{}Completed in {}{}", palette.gray, time_str, palette.reset);
}

/// Render a search summary in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_summary(
    summary: &SearchSummary,
    format: OutputFormat,
    expansion: Option<&[SearchStep]>,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", summary.render(SummaryRenderMode::PlainText)),
        OutputFormat::Rich => print!("{}", summary.render(SummaryRenderMode::RichText)),
        OutputFormat::Basic => print!("{}", summary.render(SummaryRenderMode::Basic)),
        OutputFormat::Enhanced => {
            print!("{}", EnhancedRenderer::new(ColorPalette::detect()).render(summary))
        }
        OutputFormat::Json => {
            return render_json(&SearchReport { summary, expansion });
        }
    }

    if let Some(steps) = expansion {
        println!("Expansion order: {}", format_expansion(steps));
    }
    Ok(())
}

/// Write any serialisable value to stdout as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Join expanded node ids in visiting order.
pub fn format_expansion(steps: &[SearchStep]) -> String {
    steps
        .iter()
        .map(|step| step.current.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Renderer for enhanced output format with colored tags.
pub struct EnhancedRenderer {
    palette: ColorPalette,
}

impl EnhancedRenderer {
    /// Create a new enhanced renderer with the given color palette.
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    /// Render a search summary to a string.
    pub fn render(&self, summary: &SearchSummary) -> String {
        let p = &self.palette;
        if !summary.found {
            return format!(
                "{}No path found{} ({} iterations, algorithm: {})\n",
                p.red, p.reset, summary.iterations, summary.algorithm
            );
        }

        let mut lines = vec![format!(
            "Path over {}{}{} waypoints ({} hops, algorithm: {}):",
            p.white_bold,
            summary.steps.len(),
            p.reset,
            summary.hops,
            summary.algorithm
        )];

        let bullet = if supports_unicode() { "●" } else { "*" };
        let len = summary.steps.len();
        for (i, step) in summary.steps.iter().enumerate() {
            let (tag_color, tag_text) = if i == 0 {
                (p.tag_start, " STRT ")
            } else if i + 1 == len {
                (p.tag_goal, " GOAL ")
            } else {
                (p.tag_via, " VIA  ")
            };
            let leg = step
                .leg_km
                .map(|km| format!(" {}+{}{}", p.green, format_km(km), p.reset))
                .unwrap_or_default();
            lines.push(format!(
                "{}{}{} {} {}{:.4}, {:.4}{}{}",
                tag_color, tag_text, p.reset, bullet, p.white_bold, step.lat, step.lon, p.reset, leg
            ));
        }

        lines.push(format!(
            "{}Total distance:{} {}",
            p.gray,
            p.reset,
            format_km(summary.total_distance_km)
        ));
        if let Some(travel) = &summary.travel {
            lines.push(format!(
                "{}Estimated time ({}):{} {}",
                p.gray, travel.mode, p.reset, travel.display
            ));
        }

        let mut rendered = lines.join("\n");
        rendered.push('\n');
        rendered
    }
}
