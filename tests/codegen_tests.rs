// Integration tests for phrase code generation and dictionary additions

use rustc_hash::FxHashSet;
use std::fs;
use tempfile::TempDir;
use wb_dict::{
    append_failed_phrases, generate, load_existing_phrases, try_add, AddOutcome, BatchReport,
    CharCodeTable, DictionaryEntry, EncodingRule, PhraseWeightTable,
};

fn digits_table() -> CharCodeTable {
    // firstCode: 一=g 二=f 三=d 四=l 五=g
    CharCodeTable::from_pairs([
        ('一', "ggll"),
        ('二', "fgg"),
        ('三', "dggg"),
        ('四', "lhng"),
        ('五', "gghg"),
    ])
}

// ============ Rule 1 Reference Cases ============

#[test]
fn test_two_char_phrase_two_codes_each() {
    let table = CharCodeTable::from_pairs([('你', "wq"), ('好', "vb")]);
    assert_eq!(generate("你好", &table, EncodingRule::Standard), "wqvb");
}

#[test]
fn test_single_char_returns_raw_stored_code() {
    let table = CharCodeTable::from_pairs([('中', "k")]);
    assert_eq!(generate("中", &table, EncodingRule::Standard), "k");
}

#[test]
fn test_long_phrase_first_three_plus_last() {
    assert_eq!(
        generate("一二三四五", &digits_table(), EncodingRule::Standard),
        "gfdg"
    );
}

// ============ Rule 1 vs Rule 2 Asymmetry ============

#[test]
fn test_rules_1_and_2_diverge_past_four_chars() {
    let table = digits_table();
    let phrase = "一二三四五";

    // Rule 1: first three + last
    assert_eq!(generate(phrase, &table, EncodingRule::Standard), "gfdg");
    // Rule 2: every char's first code, truncated to 4
    assert_eq!(generate(phrase, &table, EncodingRule::OnePerChar), "gfdl");
}

#[test]
fn test_rules_1_and_2_agree_at_four_chars() {
    let table = digits_table();
    assert_eq!(
        generate("一二三四", &table, EncodingRule::Standard),
        generate("一二三四", &table, EncodingRule::OnePerChar)
    );
}

// ============ Rule 4 Padding Arithmetic ============

#[test]
fn test_rule4_one_letter_code_contributes_padded_fragment() {
    // First char's code has length 1 → fragment "ax", then "bc" fills to 4
    let table = CharCodeTable::from_pairs([('甲', "a"), ('乙', "bcd")]);
    assert_eq!(generate("甲乙", &table, EncodingRule::AllTwoCodes), "axbc");
}

#[test]
fn test_rule4_result_always_exactly_four() {
    let table = CharCodeTable::from_pairs([('甲', "a"), ('乙', "b")]);
    // ax + bx = 4 letters
    assert_eq!(generate("甲乙", &table, EncodingRule::AllTwoCodes), "axbx");

    // Uncoded chars degrade but the length holds
    let empty = CharCodeTable::default();
    assert_eq!(generate("甲乙", &empty, EncodingRule::AllTwoCodes), "xxxx");
}

// ============ Dictionary Addition Workflows ============

#[test]
fn test_batch_addition_flow() {
    let table = CharCodeTable::from_pairs([('你', "wq"), ('好', "vb"), ('中', "k")]);
    let weights = PhraseWeightTable::parse("你好\t900\n");
    let mut existing: FxHashSet<String> = FxHashSet::default();

    // First addition succeeds with the table weight
    let outcome = try_add("你好", EncodingRule::Standard, None, &table, &weights, &existing);
    let AddOutcome::Added(entry) = outcome else {
        panic!("expected Added");
    };
    assert_eq!(entry.to_line(), "你好\twqvb\t900");
    existing.insert(entry.phrase.clone());

    // Second attempt is a duplicate
    assert_eq!(
        try_add("你好", EncodingRule::Standard, None, &table, &weights, &existing),
        AddOutcome::Duplicate
    );

    // Unknown weight falls back to the default
    let outcome = try_add("中", EncodingRule::Standard, None, &table, &weights, &existing);
    let AddOutcome::Added(entry) = outcome else {
        panic!("expected Added");
    };
    assert_eq!(entry.weight, "100");
}

#[test]
fn test_uncoded_phrase_rejected_before_generation() {
    let table = CharCodeTable::from_pairs([('你', "wq")]);
    let outcome = try_add(
        "你好",
        EncodingRule::Standard,
        None,
        &table,
        &PhraseWeightTable::new(),
        &FxHashSet::default(),
    );
    assert_eq!(outcome, AddOutcome::UncodedCharacters);
}

// ============ Batch Run Records ============

#[test]
fn test_processing_record_written() {
    let dir = TempDir::new().unwrap();
    let phrases_path = dir.path().join("new_phrases.txt");
    let record_dir = dir.path().join("update_record");

    let mut report = BatchReport::new(EncodingRule::Standard);
    report.added.push(DictionaryEntry::new(
        "你好".to_string(),
        "wqvb".to_string(),
        "900".to_string(),
    ));
    report.duplicates = 2;
    report.skipped_failed = 1;
    report
        .rejected
        .push(("hello".to_string(), AddOutcome::NoCjkCharacters.to_string()));

    let record_path = report.write_record(&record_dir, &phrases_path).unwrap();

    let name = record_path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("new_phrases_processed_"));
    assert!(name.ends_with(".txt"));

    let content = fs::read_to_string(&record_path).unwrap();
    assert!(content.contains("Added: 1"));
    assert!(content.contains("Duplicates: 2"));
    assert!(content.contains("Previously failed (skipped): 1"));
    assert!(content.contains("Rejected: 1"));
    assert!(content.contains("你好\twqvb\t900"));
    // Rejected phrases carry their reason
    assert!(content.contains("hello\t"));
}

#[test]
fn test_fail_list_accumulates_across_runs() {
    let dir = TempDir::new().unwrap();
    let fail_path = dir.path().join("failed_phrases.txt");
    fs::write(&fail_path, "旧词\n").unwrap();

    append_failed_phrases(&fail_path, &["hello".to_string(), "world".to_string()]).unwrap();

    let content = fs::read_to_string(&fail_path).unwrap();
    assert_eq!(content, "旧词\nhello\nworld\n");

    // A later run reads the accumulated list as its skip set
    let failed = load_existing_phrases(&fail_path).unwrap();
    assert!(failed.contains("旧词"));
    assert!(failed.contains("hello"));
    assert!(failed.contains("world"));
}
