// Report Rendering
// Human-readable and JSON views of an AnalysisResult

use crate::models::{AnalysisResult, Severity, Verdict};

const BEFORE_SHARING: [&str; 4] = [
    "Cross-reference with trusted sources",
    "Check author credentials",
    "Verify publication date",
    "Look for supporting evidence",
];

const RED_FLAGS: [&str; 4] = [
    "Sensational headlines",
    "Poor grammar/spelling",
    "Missing source attribution",
    "Emotional manipulation",
];

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub recommendations: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { recommendations: true }
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "[HIGH]  ",
        Severity::Medium => "[MEDIUM]",
        Severity::Low => "[LOW]   ",
    }
}

/// Render a human-readable report
pub fn render_text(result: &AnalysisResult, options: RenderOptions) -> String {
    let mut out = String::new();

    let (headline, verdict_text, delta) = match result.verdict {
        Verdict::Real => ("VERDICT: This News Appears to be REAL", "REAL NEWS", "Likely Authentic"),
        Verdict::Fake => ("VERDICT: This News Appears to be FAKE", "FAKE NEWS", "Likely False"),
    };
    out.push_str(&format!("{}\n\n", headline));

    out.push_str("Analysis Results\n");
    out.push_str(&format!(
        "  Confidence Score:  {:.1}% ({})\n",
        result.confidence_percent,
        result.confidence_level().as_str()
    ));
    out.push_str(&format!("  Verdict:           {} ({})\n", verdict_text, delta));
    out.push_str(&format!("  Fake Probability:  {:.1}%\n", result.probability_fake_percent));

    let stats = &result.statistics;
    out.push_str("\nText Statistics\n");
    out.push_str(&format!("  Words:             {}\n", stats.word_count));
    out.push_str(&format!("  Characters:        {}\n", stats.char_count));
    out.push_str(&format!("  Sentences:         {}\n", stats.sentence_count));
    out.push_str(&format!("  Avg Word Length:   {:.1}\n", stats.avg_word_length));
    out.push_str(&format!("  Reading Time:      {} min\n", stats.reading_time_minutes));

    out.push_str("\nFake News Indicators\n");
    if result.has_major_indicators {
        for indicator in &result.indicators {
            out.push_str(&format!(
                "  {} {} - {}\n",
                severity_tag(indicator.severity),
                indicator.label,
                indicator.detail
            ));
        }
        out.push_str("  Multiple indicators detected - exercise caution with this article\n");
    } else {
        out.push_str("  No major fake news indicators detected - Article appears legitimate\n");
    }

    if options.recommendations {
        out.push_str("\nRecommendations\n");
        out.push_str("  Before sharing this news:\n");
        for item in BEFORE_SHARING {
            out.push_str(&format!("    + {}\n", item));
        }
        out.push_str("  Red flags to watch for:\n");
        for item in RED_FLAGS {
            out.push_str(&format!("    - {}\n", item));
        }
    }

    out
}

/// Render as pretty-printed JSON
pub fn render_json(result: &AnalysisResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
