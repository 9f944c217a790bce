/// Sentiment used to colour scores and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBadge {
    HighQuality,
    Acceptable,
    NeedsImprovement,
}

impl QualityBadge {
    /// Map a quality score to its badge. NaN falls through to `NeedsImprovement`.
    pub fn for_score(score: f64) -> Self {
        if score >= 7.0 {
            QualityBadge::HighQuality
        } else if score >= 5.0 {
            QualityBadge::Acceptable
        } else {
            QualityBadge::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityBadge::HighQuality => "High Quality",
            QualityBadge::Acceptable => "Acceptable",
            QualityBadge::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            QualityBadge::HighQuality => Tone::Positive,
            QualityBadge::Acceptable => Tone::Neutral,
            QualityBadge::NeedsImprovement => Tone::Negative,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            QualityBadge::HighQuality => "✓",
            QualityBadge::Acceptable => "!",
            QualityBadge::NeedsImprovement => "✗",
        }
    }
}

/// Format a score as "8.2/10".
pub fn format_score(score: f64) -> String {
    format!("{score}/10")
}

/// Group digits in threes with commas (2847 -> "2,847").
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Score as a 0.0..=1.0 ratio for gauges.
pub fn score_ratio(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    (score / 10.0).clamp(0.0, 1.0)
}
