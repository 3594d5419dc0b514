use designate::{AttemptOutcome, ParseReport, ParseResult, Position, TierAttempt};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Compact one-line summary of a result.
pub fn print_line(res: &ParseResult, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("{}", fmt_result(res, &palette));
}

/// A result as a standalone YAML document.
pub fn print_yaml(res: &ParseResult) -> Result<(), serde_yaml::Error> {
    println!("---\n{}", serde_yaml::to_string(res)?.trim_end());
    Ok(())
}

pub fn print_run(report: &ParseReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", report.result.input), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Tiers ━━━", ansi::GRAY));
    for attempt in &report.attempts {
        println!("  {}", fmt_attempt(attempt, &palette));
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    if report.result.matched {
        println!("  {}", fmt_result(&report.result, &palette));
        if let Some(standard) = &report.result.standard_designator {
            println!("      {} {}", palette.dim("standard:"), palette.paint(standard, ansi::CYAN));
        }
    } else {
        println!("{}", palette.dim("  No designator found"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • The designator is not in the dataset");
        println!("  • It sits mid-string or is followed by other text");
        println!("  • No space or punctuation separates it from the name");
        println!("\n{}", palette.dim("  Tip: Set RUST_LOG=designate=trace to see each tier as it runs"));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    let matching = report.attempts.iter().map(|a| a.duration).sum::<std::time::Duration>();
    println!(
        "  Total: {}  │  Matching: {}",
        palette.paint(format!("{:?}", report.elapsed), ansi::GREEN),
        palette.paint(format!("{:?}", matching), ansi::CYAN),
    );
    println!();
}

fn fmt_attempt(attempt: &TierAttempt, palette: &ansi::Palette) -> String {
    let label = palette.paint(format!("{:<15}", attempt.tier.name()), ansi::BLUE);
    let outcome = match attempt.outcome {
        AttemptOutcome::Matched => palette.paint("✓ matched", ansi::GREEN),
        AttemptOutcome::NoMatch => palette.dim("✗ no match"),
        AttemptOutcome::Skipped => palette.paint("- skipped", ansi::YELLOW),
        AttemptOutcome::Absent => palette.dim("- absent"),
    };
    let fallback = if attempt.tier.is_fallback() { palette.dim(" (blacklist only)") } else { String::new() };

    if attempt.outcome == AttemptOutcome::Absent {
        return format!("{label} {outcome}{fallback}");
    }
    format!(
        "{label} {outcome}{fallback}  {} {}  {}",
        palette.dim("alternatives:"),
        palette.paint(attempt.alternatives.to_string(), ansi::YELLOW),
        palette.dim(format!("{:?}", attempt.duration)),
    )
}

fn fmt_result(res: &ParseResult, palette: &ansi::Palette) -> String {
    let Some(designator) = &res.designator else {
        return format!("{} {}", palette.bold(&res.short_name), palette.dim("│ no designator"));
    };

    let position = match res.position {
        Position::Begin => palette.paint("begin", ansi::YELLOW),
        Position::End => palette.paint("end", ansi::YELLOW),
        Position::None => palette.dim("none"),
    };
    let tier = res.tier.map(|t| t.name()).unwrap_or("-");
    format!(
        "{} {} {} {} {} {}",
        palette.bold(palette.paint(&res.short_name, ansi::GREEN)),
        palette.dim("│"),
        palette.paint(designator, ansi::CYAN),
        palette.dim("│"),
        position,
        palette.dim(format!("({tier})")),
    )
}
