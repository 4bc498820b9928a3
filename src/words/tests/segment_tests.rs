use crate::words::{has_word, segment_runs, TextRun};

fn words(text: &str) -> Vec<String> {
    segment_runs(text)
        .into_iter()
        .filter(|r| r.is_word())
        .map(|r| r.text().to_string())
        .collect()
}

#[test]
fn splits_on_whitespace_runs() {
    let runs = segment_runs("quick brown fox");
    assert_eq!(
        runs,
        vec![
            TextRun::Word("quick".into()),
            TextRun::Gap(" ".into()),
            TextRun::Word("brown".into()),
            TextRun::Gap(" ".into()),
            TextRun::Word("fox".into()),
        ]
    );
}

#[test]
fn punctuation_stays_attached_to_word() {
    assert_eq!(words("Hello, world!"), vec!["Hello,", "world!"]);
    assert_eq!(words("don't stop"), vec!["don't", "stop"]);
}

#[test]
fn roundtrip_preserves_input_exactly() {
    let inputs = [
        "  leading and trailing  ",
        "tabs\tand\nnewlines mixed \u{a0}too",
        "one",
        "",
    ];
    for input in inputs {
        let rebuilt: String = segment_runs(input).iter().map(|r| r.text()).collect();
        assert_eq!(rebuilt, input);
    }
}

#[test]
fn whitespace_only_has_no_words() {
    let runs = segment_runs("   \n\t ");
    assert_eq!(runs.len(), 1);
    assert!(!runs[0].is_word());

    assert!(!has_word("   \n\t "));
    assert!(!has_word(""));
    assert!(has_word(" a "));
}

#[test]
fn unicode_words_survive_segmentation() {
    assert_eq!(words("über straße"), vec!["über", "straße"]);
    assert_eq!(words("日本語 テスト"), vec!["日本語", "テスト"]);
}

#[test]
fn interior_whitespace_runs_kept_verbatim() {
    let runs = segment_runs("a  b");
    assert_eq!(
        runs,
        vec![
            TextRun::Word("a".into()),
            TextRun::Gap("  ".into()),
            TextRun::Word("b".into()),
        ]
    );
}
