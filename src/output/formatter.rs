//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeScorerError};
use crate::output::report::{MatchReport, ScoreBand};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Width of the console gauge in cells.
const GAUGE_WIDTH: usize = 20;

const ALL_KEYWORDS_PRESENT: &str = "Your resume contains all major keywords from the job description!";

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and a score gauge
pub struct ConsoleFormatter {
    use_colors: bool,
    show_text: bool,
    preview_chars: usize,
}

/// JSON formatter for structured output
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing results
pub struct MarkdownFormatter {
    show_text: bool,
    preview_chars: usize,
}

/// HTML formatter
pub struct HtmlFormatter {
    show_text: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Report</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 860px; margin: 0 auto; padding: 20px; color: #333; }
        .score { font-size: 1.6em; font-weight: bold; color: #28a745; }
        .gauge { background: #e9ecef; border-radius: 6px; height: 18px; overflow: hidden; }
        .gauge-fill { height: 100%; }
        .band-low { background: #dc3545; }
        .band-medium { background: #ffc107; }
        .band-high { background: #28a745; }
        .warning { border-left: 4px solid #ffc107; padding: 10px 15px; background: #fff8e1; }
        .info { border-left: 4px solid #17a2b8; padding: 10px 15px; background: #e8f6f8; }
        pre { white-space: pre-wrap; background: #f8f9fa; padding: 15px; border-radius: 6px; }
        .metadata { font-size: 0.9em; color: #6c757d; margin-top: 30px; }
    </style>
</head>
<body>
    <h1>Resume vs Job Description</h1>
    <p class="score">Match Score: {{ score }}%</p>
    <div class="gauge"><div class="gauge-fill {{ band_class }}" style="width: {{ gauge_percent }}%"></div></div>
    <p>Band: <strong>{{ band_label }}</strong></p>

    {% if all_present %}
    <p class="info">{{ all_present_message }}</p>
    {% else %}
    <div class="warning">
        <p><strong>Missing Keywords from Resume:</strong></p>
        <p>{{ missing_keywords }}</p>
    </div>
    {% endif %}

    {% if show_text %}
    <details>
        <summary>Extracted Resume Text</summary>
        <pre>{{ resume_text }}</pre>
    </details>
    <details>
        <summary>Job Description Used</summary>
        <pre>{{ job_text }}</pre>
    </details>
    {% endif %}

    <div class="metadata">
        <p>Generated by resume-scorer v{{ version }} at {{ generated_at }}</p>
        <p>Resume: {{ resume_source }} | Job: {{ job_source }}</p>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    score: String,
    gauge_percent: String,
    band_class: &'static str,
    band_label: &'static str,
    all_present: bool,
    all_present_message: &'static str,
    missing_keywords: String,
    show_text: bool,
    resume_text: String,
    job_text: String,
    version: String,
    generated_at: String,
    resume_source: String,
    job_source: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, show_text: bool, preview_chars: usize) -> Self {
        Self { use_colors, show_text, preview_chars }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".color(Color::Green).bold(), title.color(Color::Green).bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn band_color(band: ScoreBand) -> Color {
        match band {
            ScoreBand::Low => Color::Red,
            ScoreBand::Medium => Color::Yellow,
            ScoreBand::High => Color::Green,
        }
    }

    fn format_gauge(&self, score: f64, band: ScoreBand) -> String {
        let filled = gauge_cells(score);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled));
        format!("[{}] {}", self.colorize(&bar, Self::band_color(band)), band.label())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 RESUME VS JOB DESCRIPTION"));
        output.push_str(&format!(
            "{}\n",
            self.colorize(&format!("✅ Resume–JD Match Score: {:.2}%", report.match_score), Color::Green)
        ));
        output.push_str(&format!("{}\n", self.format_gauge(report.match_score, report.band)));

        if report.all_keywords_present() {
            output.push_str(&format!("\n🎯 {}\n", self.colorize(ALL_KEYWORDS_PRESENT, Color::Cyan)));
        } else {
            output.push_str(&format!("\n{}\n", self.colorize("🔍 Missing Keywords from Resume:", Color::Yellow)));
            output.push_str(&format!("{}\n", report.missing_keywords_line()));
            if report.keyword_gap.len() > report.displayed_missing_keywords.len() {
                output.push_str(&self.colorize(
                    &format!("   (+{} more)\n", report.keyword_gap.len() - report.displayed_missing_keywords.len()),
                    Color::BrightBlack,
                ));
            }
        }

        if self.show_text {
            output.push_str(&self.format_header("📄 Extracted Resume Text"));
            output.push_str(&format!("{}\n", report.resume.raw_text));
            output.push_str(&self.format_header("📌 Job Description Used"));
            output.push_str(&format!("{}\n", report.job_description.raw_text));
        } else if self.preview_chars > 0 {
            output.push_str(&format!(
                "\n{} {}\n",
                self.colorize("Resume preview:", Color::BrightBlack),
                truncate_text(&report.resume.raw_text, self.preview_chars)
            ));
        }

        output.push_str(&self.colorize(
            &format!(
                "\nResume: {} | Job: {} | {} terms | {}ms\n",
                report.resume.source,
                report.job_description.source,
                report.metadata.vocabulary_size,
                report.metadata.processing_time_ms
            ),
            Color::BrightBlack,
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(show_text: bool, preview_chars: usize) -> Self {
        Self { show_text, preview_chars }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📄 Resume vs Job Description\n\n");
        output.push_str(&format!(
            "**Generated:** {} | **Resume:** `{}` | **Job:** `{}`\n\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.resume.source,
            report.job_description.source
        ));

        output.push_str(&format!("## ✅ Match Score: {:.2}%\n\n", report.match_score));
        output.push_str(&format!(
            "`{}{}` **{}**\n\n",
            "█".repeat(gauge_cells(report.match_score)),
            "░".repeat(GAUGE_WIDTH - gauge_cells(report.match_score)),
            report.band
        ));

        if report.all_keywords_present() {
            output.push_str(&format!("> 🎯 {}\n\n", ALL_KEYWORDS_PRESENT));
        } else {
            output.push_str("## 🔍 Missing Keywords\n\n");
            output.push_str(&format!("{}\n\n", report.missing_keywords_line()));
        }

        if self.show_text {
            output.push_str("## 📄 Extracted Resume Text\n\n```text\n");
            output.push_str(&report.resume.raw_text);
            output.push_str("\n```\n\n## 📌 Job Description Used\n\n```text\n");
            output.push_str(&report.job_description.raw_text);
            output.push_str("\n```\n");
        } else if self.preview_chars > 0 {
            output.push_str(&format!(
                "*Resume preview:* {}\n",
                truncate_text(&report.resume.raw_text, self.preview_chars)
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(show_text: bool) -> Self {
        Self { show_text }
    }

    fn create_template_data(&self, report: &MatchReport) -> HtmlTemplate {
        let band_class = match report.band {
            ScoreBand::Low => "band-low",
            ScoreBand::Medium => "band-medium",
            ScoreBand::High => "band-high",
        };

        HtmlTemplate {
            score: format!("{:.2}", report.match_score),
            gauge_percent: format!("{:.2}", report.match_score.clamp(0.0, 100.0)),
            band_class,
            band_label: report.band.label(),
            all_present: report.all_keywords_present(),
            all_present_message: ALL_KEYWORDS_PRESENT,
            missing_keywords: report.missing_keywords_line(),
            show_text: self.show_text,
            resume_text: report.resume.raw_text.clone(),
            job_text: report.job_description.raw_text.clone(),
            version: report.metadata.version.clone(),
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            resume_source: report.resume.source.clone(),
            job_source: report.job_description.source.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeScorerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, 300)
    }

    pub fn with_options(use_colors: bool, show_text: bool, preview_chars: usize) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, show_text, preview_chars),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(show_text, preview_chars),
            html_formatter: HtmlFormatter::new(show_text),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of filled gauge cells for a score in [0, 100].
fn gauge_cells(score: f64) -> usize {
    let cells = (score.clamp(0.0, 100.0) / 100.0 * GAUGE_WIDTH as f64).round() as usize;
    cells.min(GAUGE_WIDTH)
}

/// Truncate text to at most `max_graphemes`, breaking on a word boundary.
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.graphemes(true).count() <= max_graphemes {
        return flattened;
    }

    let cut: String = flattened.graphemes(true).take(max_graphemes).collect();
    let end = cut.rfind(' ').unwrap_or(cut.len());
    format!("{}...", &cut[..end])
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_match{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_match{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_match{}.md", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}_match{}.html", base_name, timestamp_suffix),
    }
}
