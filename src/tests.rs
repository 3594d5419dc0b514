//! Regression corpus.
//!
//! `data/tests.yml` lists company names with their expected split. Every case
//! runs against the bundled `data/company_designator.yml` on both backends.

use crate::{Backend, Dataset, Options, Parser, Position};
use rstest::rstest;
use serde::Deserialize;

const DATASET: &str = include_str!("../data/company_designator.yml");
const CORPUS: &str = include_str!("../data/tests.yml");

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    #[serde(default)]
    before: String,
    #[serde(default)]
    des: String,
    #[serde(default)]
    des_std: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    position: String,
    #[serde(default)]
    skip: bool,
    #[serde(default)]
    skip_unless_lang: bool,
}

impl Case {
    fn checked(&self) -> bool {
        !self.skip && !self.skip_unless_lang && self.position != "mid"
    }
}

fn corpus() -> Vec<Case> {
    serde_yaml::from_str(CORPUS).unwrap()
}

fn parser(backend: Backend) -> Parser {
    let dataset = Dataset::from_yaml_str(DATASET).unwrap();
    Parser::with_options(&dataset, Options::default().with_backend(backend)).unwrap()
}

/// Compare one result against its case; returns a description of each mismatch.
fn check(p: &Parser, case: &Case) -> Vec<String> {
    let res = p.parse(&case.name);
    let mut failures = Vec::new();
    let label = format!("{:?} [{}]", case.name, case.lang.as_deref().unwrap_or("-"));

    match case.position.as_str() {
        "none" => {
            if res.matched || res.position != Position::None || res.short_name != res.input {
                failures.push(format!("{label}: expected no match, got {res:?}"));
            }
        }
        expected => {
            if res.position.to_string() != expected {
                failures.push(format!("{label}: position {} != {expected}", res.position));
            }
            if res.short_name != case.before {
                failures.push(format!("{label}: short name {:?} != {:?}", res.short_name, case.before));
            }
            if res.designator.as_deref() != Some(case.des.as_str()) {
                failures.push(format!("{label}: designator {:?} != {:?}", res.designator, case.des));
            }
            if let Some(standard) = &case.des_std {
                if res.standard_designator.as_deref() != Some(standard.as_str()) {
                    failures.push(format!("{label}: standard {:?} != {standard:?}", res.standard_designator));
                }
            }
        }
    }
    failures
}

#[test]
fn dataset_loads() {
    let dataset = Dataset::from_yaml_str(DATASET).unwrap();
    assert_eq!(dataset.len(), 31);

    let llc = dataset.get("Limited Liability Company").unwrap();
    assert_eq!(llc.standard_abbreviation.as_deref(), Some("LLC"));
    assert_eq!(llc.abbreviations, vec!["LLC", "L.L.C."]);
    assert!(!llc.lead);

    let vof = dataset.get("Vennootschap Onder Firma").unwrap();
    assert!(vof.lead);
    assert_eq!(vof.language.as_deref(), Some("nl"));

    let cont = dataset.get("股份有限公司").unwrap();
    assert!(cont.abbreviations.is_empty());
}

#[test]
fn corpus_positions_are_known() {
    for case in corpus() {
        assert!(
            matches!(case.position.as_str(), "begin" | "end" | "none" | "mid"),
            "unknown position {:?} for {:?}",
            case.position,
            case.name
        );
    }
}

#[rstest]
fn corpus_matches(#[values(Backend::Regex, Backend::Set)] backend: Backend) {
    let p = parser(backend);
    let cases: Vec<Case> = corpus().into_iter().filter(Case::checked).collect();
    assert!(cases.len() > 40, "corpus shrank to {} cases", cases.len());

    let failures: Vec<String> = cases.iter().flat_map(|case| check(&p, case)).collect();
    assert!(failures.is_empty(), "{backend:?} failures:\n{}", failures.join("\n"));
}

#[test]
fn backends_agree_on_every_case() {
    let by_regex = parser(Backend::Regex);
    let by_set = parser(Backend::Set);

    for case in corpus() {
        let a = by_regex.parse(&case.name);
        let b = by_set.parse(&case.name);
        assert_eq!(
            (&a.short_name, &a.designator, a.position),
            (&b.short_name, &b.designator, b.position),
            "{:?}",
            case.name
        );
    }
}

#[test]
fn continuous_scripts_are_covered() {
    let p = parser(Backend::Regex);
    let matched = corpus()
        .iter()
        .filter(|case| matches!(case.lang.as_deref(), Some("zh" | "ja" | "ko")))
        .filter(|case| p.parse(&case.name).matched)
        .count();
    assert_eq!(matched, 9);
}

#[test]
fn unsupported_cases_stay_unchecked() {
    let p = parser(Backend::Regex);
    let skipped: Vec<Case> = corpus().into_iter().filter(|case| !case.checked()).collect();
    assert_eq!(skipped.len(), 3);

    // Mid-string designators are left alone rather than half-stripped.
    let mid = skipped.iter().find(|case| case.position == "mid").unwrap();
    assert!(!p.parse(&mid.name).matched);
}
