//! Markdown report generation.
//!
//! This module renders a negotiation review as Markdown or JSON.

use super::{Report, ReportMetadata};
use crate::analysis::{
    bar_fraction, humanize_label, max_count, usage_phrase, CoachingSections, TECHNIQUE_LEGEND,
};
use crate::config::ReportConfig;
use crate::models::{format_price, DealOutcome, Message, SessionConfig, TechniqueCount};
use anyhow::Result;

/// Shown in place of a coaching section the analysis did not contain.
const MISSING_SECTION: &str = "_Not found in analysis._";

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, settings: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str("# Negotiation Review\n\n");

    output.push_str(&generate_session_section(&report.metadata, &report.config));

    output.push_str(&generate_outcome_section(
        &report.summary.outcome,
        report.summary.rounds_used,
        report.config.max_rounds,
    ));

    output.push_str(&generate_analysis_section(&report.full_analysis));

    output.push_str(&generate_techniques_section(
        &report.summary.techniques,
        settings,
    ));

    output.push_str(&generate_learning_section(&report.summary.sections));

    if settings.include_transcript {
        output.push_str(&generate_transcript_section(&report.messages));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the session details section.
fn generate_session_section(metadata: &ReportMetadata, config: &SessionConfig) -> String {
    let mut section = String::new();

    section.push_str("## Session\n\n");
    section.push_str(&format!("- **Product:** {}\n", config.product_name));
    section.push_str(&format!(
        "- **Customer Persona:** {} ({})\n",
        config.customer_persona,
        config.customer_persona.hint()
    ));
    section.push_str(&format!(
        "- **Target Price:** {}\n",
        format_price(config.target_price)
    ));
    section.push_str(&format!(
        "- **Floor:** {}\n",
        format_price(config.minimum_price)
    ));
    section.push_str(&format!(
        "- **Customer Budget:** {}\n",
        format_price(config.customer_budget)
    ));
    section.push_str(&format!("- **Messages:** {}\n", metadata.message_count));
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push('\n');

    section
}

/// Generate the outcome banner.
fn generate_outcome_section(outcome: &DealOutcome, rounds_used: usize, max_rounds: u32) -> String {
    let mut section = String::new();

    section.push_str("## Outcome\n\n");
    section.push_str(&format!(
        "### {} {}\n\n{}\n\n",
        outcome.emoji(),
        outcome.status_label(),
        outcome.message()
    ));

    match outcome {
        DealOutcome::Closed {
            price,
            deviation_pct,
        } => {
            section.push_str("| Final Price | From Target | Rounds Used |\n");
            section.push_str("|:---:|:---:|:---:|\n");
            section.push_str(&format!(
                "| {} | {:.1}% | {} / {} |\n\n",
                format_price(*price as f64),
                deviation_pct,
                rounds_used,
                max_rounds
            ));
        }
        DealOutcome::Failed {
            gap,
            sales_final,
            customer_final,
        } => {
            section.push_str("| Final Gap | Sales Final | Customer Final |\n");
            section.push_str("|:---:|:---:|:---:|\n");
            section.push_str(&format!(
                "| {} | {} | {} |\n\n",
                format_price(*gap as f64),
                format_price(*sales_final),
                format_price(*customer_final)
            ));
        }
    }

    section
}

/// Generate the performance analysis section.
fn generate_analysis_section(full_analysis: &str) -> String {
    if full_analysis.trim().is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Performance Analysis\n\n");
    section.push_str(full_analysis);
    section.push_str("\n\n");

    section
}

/// Render a usage bar of `width` cells.
fn render_bar(count: usize, max: usize, width: usize) -> String {
    let filled = (bar_fraction(count, max) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled.min(width)))
}

/// Generate the technique usage section.
fn generate_techniques_section(tally: &[TechniqueCount], settings: &ReportConfig) -> String {
    let mut section = String::new();

    section.push_str("## Techniques\n\n");

    if tally.is_empty() {
        section.push_str("No techniques were tagged in this session.\n\n");
    } else {
        let max = max_count(tally);

        section.push_str("| Technique | Usage | |\n");
        section.push_str("|:---|:---|:---|\n");
        for technique in tally {
            section.push_str(&format!(
                "| {} | {} | `{}` |\n",
                humanize_label(&technique.label),
                usage_phrase(technique.count),
                render_bar(technique.count, max, settings.bar_width)
            ));
        }
        section.push('\n');
    }

    if settings.include_legend {
        section.push_str("### Technique Definitions\n\n");
        for (name, definition) in TECHNIQUE_LEGEND {
            section.push_str(&format!("- **{}:** {}\n", name, definition));
        }
        section.push('\n');
    }

    section
}

/// Generate the learning points section.
fn generate_learning_section(sections: &CoachingSections) -> String {
    let mut section = String::new();

    section.push_str("## Learning Points\n\n");

    for (title, body) in [
        ("✅ What Worked Well", &sections.worked_well),
        ("🎯 Areas for Improvement", &sections.improvement_areas),
        ("💡 Coaching Advice", &sections.coaching_advice),
    ] {
        section.push_str(&format!("### {}\n\n", title));
        if body.trim().is_empty() {
            section.push_str(MISSING_SECTION);
        } else {
            section.push_str(body.trim_end());
        }
        section.push_str("\n\n");
    }

    section
}

/// Generate the full transcript section.
fn generate_transcript_section(messages: &[Message]) -> String {
    let mut section = String::new();

    section.push_str("## Transcript\n\n");

    if messages.is_empty() {
        section.push_str("The transcript is empty.\n\n");
        return section;
    }

    for message in messages {
        section.push_str(&generate_message_block(message));
    }

    section
}

/// Generate a single transcript entry.
fn generate_message_block(message: &Message) -> String {
    let mut block = String::new();

    block.push_str(&format!(
        "**{} {}** · Round {}\n\n",
        message.agent.emoji(),
        message.agent,
        message.round
    ));

    for line in message.content.lines() {
        block.push_str(&format!("> {}\n", line));
    }
    block.push('\n');

    if !message.techniques.is_empty() {
        block.push_str(&format!(
            "*Techniques: {}*\n\n",
            message.techniques.join(", ")
        ));
    }

    block
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Report generated by negotiation-review v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SectionPatterns;
    use crate::models::{Agent, CustomerPersona};
    use crate::session::Session;

    const CLOSED_SESSION: &str = include_str!("../../fixtures/closed_session.json");
    const FAILED_SESSION: &str = include_str!("../../fixtures/failed_session.json");

    fn create_test_report(json: &str) -> Report {
        let session = Session::from_json(json).unwrap();
        Report::build(&session, "session.json", &SectionPatterns::default()).unwrap()
    }

    #[test]
    fn test_generate_markdown_report_closed() {
        let report = create_test_report(CLOSED_SESSION);
        let markdown = generate_markdown_report(&report, &ReportConfig::default());

        assert!(markdown.contains("# Negotiation Review"));
        assert!(markdown.contains("### 🤝 Deal Reached"));
        assert!(markdown.contains("Successfully closed at $500,000"));
        assert!(markdown.contains("| $500,000 | 0.0% | 3 / 7 |"));
        assert!(markdown.contains("| reciprocity | Used 3 times |"));
        assert!(markdown.contains("| social proof | Used 1 time |"));
        assert!(markdown.contains("### Technique Definitions"));
        assert!(markdown.contains("Things you did well:\n- Opened with a strong anchor"));
        assert!(markdown.contains("## Transcript"));
        assert!(markdown.contains("*Techniques: anchoring, value_proposition*"));
    }

    #[test]
    fn test_generate_markdown_report_failed() {
        let report = create_test_report(FAILED_SESSION);
        let markdown = generate_markdown_report(&report, &ReportConfig::default());

        assert!(markdown.contains("### ❌ No Deal"));
        assert!(markdown.contains("| $130,000 | $480,000 | $350,000 |"));
        assert!(markdown.contains("### ✅ What Worked Well\n\n_Not found in analysis._"));
        assert!(markdown.contains("Areas for improvement\nQualify the budget before anchoring."));
    }

    #[test]
    fn test_generate_markdown_without_transcript_or_legend() {
        let report = create_test_report(CLOSED_SESSION);
        let settings = ReportConfig {
            include_transcript: false,
            include_legend: false,
            ..ReportConfig::default()
        };
        let markdown = generate_markdown_report(&report, &settings);

        assert!(!markdown.contains("## Transcript"));
        assert!(!markdown.contains("### Technique Definitions"));
    }

    #[test]
    fn test_generate_outcome_section_deviation() {
        let section = generate_outcome_section(
            &DealOutcome::Closed {
                price: 450_000,
                deviation_pct: -10.0,
            },
            4,
            7,
        );

        assert!(section.contains("| $450,000 | -10.0% | 4 / 7 |"));
    }

    #[test]
    fn test_generate_techniques_section_empty() {
        let section = generate_techniques_section(&[], &ReportConfig::default());
        assert!(section.contains("No techniques were tagged"));
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(2, 4, 4), "██░░");
        assert_eq!(render_bar(4, 4, 4), "████");
        assert_eq!(render_bar(0, 0, 3), "░░░");
    }

    #[test]
    fn test_generate_message_block() {
        let message = Message {
            agent: Agent::Customer,
            round: 2,
            content: "Too high.\nCan you move?".to_string(),
            techniques: vec!["anchoring".to_string()],
        };

        let block = generate_message_block(&message);

        assert!(block.contains("**🏢 Customer** · Round 2"));
        assert!(block.contains("> Too high.\n> Can you move?\n"));
        assert!(block.contains("*Techniques: anchoring*"));
    }

    #[test]
    fn test_generate_session_section() {
        let report = create_test_report(CLOSED_SESSION);
        let section = generate_session_section(&report.metadata, &report.config);

        assert_eq!(report.config.customer_persona, CustomerPersona::Moderate);
        assert!(section.contains("moderate (Standard training)"));
        assert!(section.contains("- **Target Price:** $500,000"));
        assert!(section.contains("- **Messages:** 6"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(FAILED_SESSION);
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"status\": \"failed\""));
        assert!(json.contains("\"gap\": 130000"));
        assert!(json.contains("\"techniques\""));
        assert!(json.contains("\"coaching_advice\""));
    }
}
