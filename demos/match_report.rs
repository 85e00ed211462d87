//! Match report over the bundled fixtures
//!
//! Runs every transaction and attachment through the matcher and compares
//! the result with the expected counterpart.

use receipt_matcher::{utils::FixtureSet, MatchDecision, Matcher, MatcherConfig};

const FIXTURES: &str = include_str!("../tests/fixtures/matching.json");

const EXPECTED_ATTACHMENTS: &[(&str, Option<&str>)] = &[
    ("2001", Some("3001")),
    ("2002", Some("3002")),
    ("2003", None),
    ("2004", Some("3004")),
    ("2005", None),
    ("2006", Some("3007")),
    ("2007", None),
    ("2008", Some("3007")),
];

const EXPECTED_TRANSACTIONS: &[(&str, Option<&str>)] = &[
    ("3001", Some("2001")),
    ("3002", Some("2002")),
    ("3003", None),
    ("3004", Some("2004")),
    ("3005", Some("2005")),
    ("3006", Some("2005")),
    ("3007", Some("2006")),
];

fn describe(decision: &MatchDecision) -> String {
    match decision {
        MatchDecision::Golden { .. } => "reference match".to_string(),
        MatchDecision::Scored { score, .. } => format!("score {}", score),
        MatchDecision::NoConfidentMatch { best_score } => {
            format!("no confident match (best score {})", best_score)
        }
        MatchDecision::Ambiguous { score, tied } => {
            format!("ambiguous ({} candidates at score {})", tied, score)
        }
        MatchDecision::EmptyPool => "no candidates".to_string(),
    }
}

fn print_line(
    anchor: &str,
    expected: Option<&str>,
    found: Option<&str>,
    decision: &MatchDecision,
) -> bool {
    let passed = expected == found;
    println!(
        "  {} {} -> {} (expected {}) [{}]",
        if passed { "✅" } else { "❌" },
        anchor,
        found.unwrap_or("none"),
        expected.unwrap_or("none"),
        describe(decision)
    );
    passed
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Receipt Matcher - Fixture Report\n");

    let matcher = Matcher::new(MatcherConfig::new("Example Company Oy"))?;
    let fixtures = FixtureSet::from_json(FIXTURES)?;

    let mut passed = 0;
    let mut total = 0;

    println!("🏦 Transaction -> Attachment:");
    for (tx_id, expected) in EXPECTED_ATTACHMENTS {
        let tx = fixtures
            .transaction(tx_id)
            .ok_or_else(|| format!("fixture transaction {} missing", tx_id))?;
        let report = matcher.evaluate(tx, &fixtures.attachments);
        let found = report
            .matched_index()
            .map(|index| fixtures.attachments[index].id.as_str());

        total += 1;
        if print_line(tx_id, *expected, found, &report.decision) {
            passed += 1;
        }
    }
    println!();

    println!("📎 Attachment -> Transaction:");
    for (att_id, expected) in EXPECTED_TRANSACTIONS {
        let att = fixtures
            .attachment(att_id)
            .ok_or_else(|| format!("fixture attachment {} missing", att_id))?;
        let report = matcher.evaluate(att, &fixtures.transactions);
        let found = report
            .matched_index()
            .map(|index| fixtures.transactions[index].id.as_str());

        total += 1;
        if print_line(att_id, *expected, found, &report.decision) {
            passed += 1;
        }
    }
    println!();

    println!("📊 {}/{} checks passed", passed, total);
    if passed != total {
        return Err(format!("{} check(s) failed", total - passed).into());
    }

    Ok(())
}
