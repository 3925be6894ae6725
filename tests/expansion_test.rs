//! Integration tests for prefix and fuzzy expansion.

use glaive::dictionary::{
    MemoryTermDictionary, MemoryTermDictionaryBuilder, PostingIterator, TermDictionary,
};
use glaive::error::{GlaiveError, Result};
use glaive::expand::*;
use glaive::prelude::Deadline;

fn build(field: &str, terms: &[&str]) -> Result<MemoryTermDictionary> {
    let mut builder = MemoryTermDictionaryBuilder::new();
    for (doc_id, text) in terms.iter().enumerate() {
        builder.add_term(doc_id as u64, field, text, 1)?;
    }
    Ok(builder.build())
}

fn fuzziness_dict() -> Result<MemoryTermDictionary> {
    build(
        "text",
        &["aaaaa", "aaaab", "aaabb", "aabbb", "abbbb", "bbbbb", "ddddd"],
    )
}

#[test]
fn test_prefix_expansion_of_categories() -> Result<()> {
    let dict = build(
        "category",
        &["/Computers", "/Computers/Mac", "/Computers/Windows"],
    )?;

    let all = PrefixExpander::new("category", "/Computers").expand(&dict)?;
    assert_eq!(all.len(), 3);
    assert!(all.terms().iter().all(|t| t.weight == 1.0));

    let one = PrefixExpander::new("category", "/Computers/Mac").expand(&dict)?;
    assert_eq!(one.texts(), vec!["/Computers/Mac"]);

    Ok(())
}

#[test]
fn test_prefix_expansion_is_exact_set() -> Result<()> {
    let terms = ["app", "apple", "applet", "apply", "apricot", "banana", "ap"];
    let dict = build("body", &terms)?;

    let expansion = PrefixExpander::new("body", "app").expand(&dict)?;
    let mut expected: Vec<&str> = terms.iter().copied().filter(|t| t.starts_with("app")).collect();
    expected.sort();
    assert_eq!(expansion.texts(), expected);

    Ok(())
}

#[test]
fn test_fuzzy_scenario() -> Result<()> {
    let dict = fuzziness_dict()?;
    let deadline = Deadline::none();

    let expansion = FuzzyExpander::new("text", "aaaaa").expand(&dict, &deadline)?;
    let accepted: Vec<(&str, f32)> = expansion
        .terms()
        .iter()
        .map(|t| (t.term.text(), t.weight))
        .collect();
    assert_eq!(accepted.len(), 3);
    for ((text, weight), (expected_text, expected_weight)) in
        accepted.iter().zip([("aaaaa", 1.0), ("aaaab", 0.8), ("aaabb", 0.6)])
    {
        assert_eq!(*text, expected_text);
        assert!((weight - expected_weight).abs() < 1e-6);
    }

    let narrowed = FuzzyExpander::new("text", "aaaaa")
        .prefix_length(4)
        .expand(&dict, &deadline)?;
    assert_eq!(narrowed.texts(), vec!["aaaaa", "aaaab"]);

    let mismatch = FuzzyExpander::new("text", "ddddX")
        .prefix_length(5)
        .expand(&dict, &deadline)?;
    assert!(mismatch.is_empty());

    Ok(())
}

#[test]
fn test_over_limit_is_reported_not_truncated() -> Result<()> {
    let terms: Vec<String> = (0..2000).map(|i| format!("t{i:04}")).collect();
    let mut builder = MemoryTermDictionaryBuilder::new();
    for (doc_id, text) in terms.iter().enumerate() {
        builder.add_term(doc_id as u64, "body", text, 1)?;
    }
    let dict = builder.build();

    let err = PrefixExpander::new("body", "t")
        .max_terms(1024)
        .expand(&dict)
        .unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(err, GlaiveError::ExpansionTooBroad { limit: 1024, .. }));

    // A longer prefix narrows the band below the limit.
    let narrowed = PrefixExpander::new("body", "t1")
        .max_terms(1024)
        .expand(&dict)?;
    assert_eq!(narrowed.len(), 1000);

    Ok(())
}

#[test]
fn test_invalid_parameters_fail_before_scanning() {
    let dict = fuzziness_dict().unwrap();
    let deadline = Deadline::none();

    let err = FuzzyExpander::new("text", "aaaaa")
        .min_similarity(1.5)
        .expand(&dict, &deadline)
        .unwrap_err();
    assert!(!err.is_retryable());
    assert!(matches!(err, GlaiveError::InvalidParameter(_)));

    let err = FuzzyExpander::new("text", "abc")
        .prefix_length(4)
        .expand(&dict, &deadline)
        .unwrap_err();
    assert!(matches!(err, GlaiveError::InvalidParameter(_)));
}

#[test]
fn test_expanded_terms_carry_handles() -> Result<()> {
    let mut builder = MemoryTermDictionaryBuilder::new();
    builder.add_document(0, "body", ["apple", "apple", "apply"])?;
    builder.add_document(1, "body", ["apple"])?;
    let dict = builder.build();

    let expansion = PrefixExpander::new("body", "appl").expand(&dict)?;
    let apple = expansion.get("apple").unwrap();
    assert_eq!(apple.doc_freq, 2);

    let mut postings = dict.postings(apple.handle)?;
    let first = postings.next()?.unwrap();
    assert_eq!((first.doc_id, first.term_freq), (0, 2));
    let second = postings.next()?.unwrap();
    assert_eq!((second.doc_id, second.term_freq), (1, 1));
    assert!(postings.next()?.is_none());

    Ok(())
}

#[test]
fn test_expander_enum_dispatch() -> Result<()> {
    let dict = fuzziness_dict()?;
    let deadline = Deadline::none();

    let expanders: Vec<Expander> = vec![
        ExactExpander::new("text", "bbbbb").into(),
        PrefixExpander::new("text", "aab").into(),
        FuzzyExpander::new("text", "bbbbx").into(),
    ];
    let results: Vec<Vec<String>> = expanders
        .iter()
        .map(|e| {
            e.expand(&dict, &deadline)
                .map(|x| x.texts().into_iter().map(String::from).collect())
        })
        .collect::<Result<_>>()?;

    assert_eq!(results[0], vec!["bbbbb"]);
    assert_eq!(results[1], vec!["aabbb"]);
    assert_eq!(results[2], vec!["abbbb", "bbbbb"]);

    Ok(())
}
