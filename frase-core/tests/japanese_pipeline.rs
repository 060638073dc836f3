//! Japanese extraction: front matter, notes and pseudo-token counting

use frase_core::{get_rules, FilterOutcome, FinalFilter, Pipeline, RejectReason};

const BOOK: &str = "青空文庫版\n\
出版社の前書き\n\
目次\n\
第一章\n\
東京の古い町並みを歩きながら私たちは昔の思い出や友人の話をゆっくりと語り合った。\
夏休みに祖父の家へ行くと庭の大きな木の下で白い猫が静かに昼寝をしていた。\
今日はいい天気ですね！\n\
注1 これは注釈です\n\
駅前の小さな喫茶店で温かいコーヒーを飲みながら毎朝新聞の記事を丁寧に読んでいた…\n\
訳者注\n\
春になると川沿いの桜並木が満開になり多くの人々が写真を撮りに遠くから集まる。\n";

#[test]
fn test_japanese_book_extraction() {
    let mut pipeline = Pipeline::new(get_rules("ja").unwrap());
    let outcome = pipeline.process_text("小説.txt", BOOK);

    let texts: Vec<&str> = outcome.accepted.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "東京の古い町並みを歩きながら私たちは昔の思い出や友人の話をゆっくりと語り合った。",
            "夏休みに祖父の家へ行くと庭の大きな木の下で白い猫が静かに昼寝をしていた。",
            "駅前の小さな喫茶店で温かいコーヒーを飲みながら毎朝新聞の記事を丁寧に読んでいた。",
        ]
    );
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].reason, RejectReason::TooShort);
}

#[test]
fn test_translator_notes_are_dropped() {
    let mut pipeline = Pipeline::new(get_rules("ja").unwrap());
    let outcome = pipeline.process_text("小説.txt", BOOK);
    assert!(!outcome.accepted.iter().any(|s| s.text.contains("桜並木")));
    assert!(!outcome.rejected.iter().any(|r| r.text.contains("注釈")));
}

#[test]
fn test_hiragana_heavy_sentence_has_too_few_tokens() {
    let mut pipeline = Pipeline::new(get_rules("ja").unwrap());
    // Long enough, but no kanji or katakana at all
    let outcome = pipeline.process_text(
        "小説.txt",
        "それはとてもむずかしいもんだいだったのでわたしたちはみんなでかんがえました",
    );
    assert_eq!(outcome.rejected[0].reason, RejectReason::WordCount);
}

#[test]
fn test_final_filter_keeps_clean_japanese() {
    let mut filter = FinalFilter::new(&get_rules("ja").unwrap());
    assert!(matches!(
        filter.check("夏休みに祖父の家へ行くと庭の大きな木の下で白い猫が静かに昼寝をしていた。"),
        FilterOutcome::Accepted { .. }
    ));
    assert!(matches!(
        filter.check("夏休みに祖父の家へ行くと庭の大きな木の下で白い猫が静かに昼寝をしていた。"),
        FilterOutcome::Rejected(_)
    ));
}
