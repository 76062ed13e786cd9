mod common;

use std::time::Duration;

use cert_trainer::models::{Certification, Document, LearningPath, Module, Unit};
use cert_trainer::workflow::{
    clean_concurrently, generate_questions_concurrently, Cleanable, Questionable, Scrapable,
};
use common::*;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

fn two_path_certification() -> Certification {
    Certification::with_learning_paths(vec![
        LearningPath::with_modules(
            "Path A",
            vec![
                Module::with_units("Module A1", vec![Unit::with_content("a1", "a"), Unit::with_content("a2", "b")]),
                Module::with_units("Module A2", vec![Unit::with_content("a3", "c")]),
            ],
        ),
        LearningPath::with_modules(
            "Path B",
            vec![Module::with_units("Module B1", vec![Unit::with_content("b1", "d")])],
        ),
    ])
}

#[tokio::test]
async fn test_clean_replaces_unit_content() {
    let cleaner = UppercaseCleaner::default();
    let mut unit = Unit::with_content("Introduction", "raw");

    assert_ok!(unit.clean(&cleaner).await);
    assert_eq!(unit.unit_content.as_deref(), Some("RAW"));
    assert_eq!(cleaner.calls(), 1);
}

#[tokio::test]
async fn test_clean_skips_units_without_content() {
    let cleaner = UppercaseCleaner::default();
    let mut module = Module::with_units(
        "Module",
        vec![Unit::new("not scraped"), Unit::with_content("blank", "   "), Unit::with_content("ok", "raw")],
    );

    assert_ok!(module.clean(&cleaner).await);
    assert_eq!(cleaner.calls(), 1);
    assert_eq!(module.units_in_module[0].unit_content, None);
    assert_eq!(module.units_in_module[2].unit_content.as_deref(), Some("RAW"));
}

#[tokio::test]
async fn test_module_questions_are_flattened_in_unit_order() {
    let generator = ScriptedGenerator::new()
        .respond("a", vec![question("q1")])
        .respond("b", vec![question("q2"), question("q3")]);
    let module = Module::with_units("Module", vec![Unit::with_content("u1", "a"), Unit::with_content("u2", "b")]);

    let questions = assert_ok!(module.generate_questions(&generator).await);
    let texts: Vec<_> = questions.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(texts, ["q1", "q2", "q3"]);
}

#[tokio::test]
async fn test_zero_questions_is_valid() {
    let generator = ScriptedGenerator::new().respond("a", Vec::new());
    let unit = Unit::with_content("u1", "a");

    let questions = assert_ok!(unit.generate_questions(&generator).await);
    assert!(questions.is_empty());
}

#[tokio::test]
async fn test_unit_without_content_does_not_call_generator() {
    let generator = ScriptedGenerator::new();
    let unit = Unit::new("u1");

    let questions = assert_ok!(unit.generate_questions(&generator).await);
    assert!(questions.is_empty());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_certification_questions_grouped_by_learning_path() {
    let generator = ScriptedGenerator::new();
    let certification = two_path_certification();

    let groups = assert_ok!(certification.generate_questions(&generator).await);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].learning_path_title, "Path A");
    let texts: Vec<_> = groups[0].questions.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(texts, ["a", "b", "c"]);
    assert_eq!(groups[1].learning_path_title, "Path B");
    assert_eq!(groups[1].questions.len(), 1);
}

#[tokio::test]
async fn test_generator_failure_propagates() {
    let certification = two_path_certification();
    assert_err!(certification.generate_questions(&FailingGenerator).await);
    assert_err!(generate_questions_concurrently(&certification, &FailingGenerator, 4).await);
}

#[tokio::test]
async fn test_concurrent_transforms_keep_order() {
    // 越靠前的单元越慢，乱序完成
    let generator = ScriptedGenerator::new()
        .delay("a", Duration::from_millis(60))
        .delay("b", Duration::from_millis(40))
        .delay("c", Duration::from_millis(20));
    let mut certification = two_path_certification();

    let sequential = assert_ok!(certification.generate_questions(&generator).await);
    let concurrent = assert_ok!(generate_questions_concurrently(&certification, &generator, 4).await);
    assert_eq!(concurrent, sequential);

    let mut expected = certification.clone();
    let cleaner = UppercaseCleaner::default();
    assert_ok!(expected.clean(&cleaner).await);
    assert_ok!(clean_concurrently(&mut certification, &cleaner, 3).await);
    assert_eq!(certification, expected);
}

#[tokio::test]
async fn test_scrape_clean_and_questionify_end_to_end() {
    let mut navigator = FakeNavigator::new(course_site(1, 1, 2)).starting_at(ROOT_URL);
    let mut certification = Certification::new();
    assert_ok!(certification.scrap(&mut navigator, false).await);

    assert_eq!(
        assert_ok!(certification.to_document()),
        json!({
            "certification_content": [{
                "learning_path_title": "Learning path 1",
                "modules_in_learning_path": [{
                    "module_title": "Module 1.1",
                    "units_in_module": [
                        { "unit_title": "Unit 1.1.1", "unit_content": unit_content(1, 1, 1) },
                        { "unit_title": "Unit 1.1.2", "unit_content": unit_content(1, 1, 2) }
                    ]
                }]
            }]
        })
    );

    let cleaner = UppercaseCleaner::default();
    assert_ok!(certification.clean(&cleaner).await);
    assert_eq!(cleaner.calls(), 2);

    let generator = ScriptedGenerator::new();
    let groups = assert_ok!(certification.generate_questions(&generator).await);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].learning_path_title, "Learning path 1");
    let texts: Vec<_> = groups[0].questions.iter().map(|q| q.question.clone()).collect();
    assert_eq!(
        texts,
        [unit_content(1, 1, 1).to_uppercase(), unit_content(1, 1, 2).to_uppercase()]
    );
}
