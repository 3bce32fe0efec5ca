use teamfeed_core::{extract_mentions, MentionKind, MentionScan};

const BODY: &str = concat!(
    "<p>Kickoff with ",
    r#"<span class="mention" data-denotation-char="@" data-id="u2">@Bea</span>"#,
    " about ",
    r##"<span class="mention" data-denotation-char="#" data-id="3">#Ruby</span>"##,
    "</p><ul><li>",
    r#"<span class="mention" data-denotation-char="@" data-id="u3">@Cai</span>"#,
    "</li></ul>",
);

#[test]
fn extracts_user_and_topic_mentions_in_document_order() {
    let mentions = extract_mentions(BODY);

    let summary: Vec<(MentionKind, &str)> = mentions
        .iter()
        .map(|mention| (mention.kind, mention.target_id.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (MentionKind::User, "u2"),
            (MentionKind::Topic, "3"),
            (MentionKind::User, "u3"),
        ]
    );
    assert!(mentions
        .windows(2)
        .all(|pair| pair[0].source_offset < pair[1].source_offset));
}

#[test]
fn extraction_is_idempotent() {
    assert_eq!(extract_mentions(BODY), extract_mentions(BODY));

    let scan = MentionScan::parse(BODY);
    let first: Vec<_> = scan.iter().collect();
    let second: Vec<_> = scan.iter().collect();
    assert_eq!(first, second);
}

#[test]
fn plain_text_and_empty_content_have_no_mentions() {
    assert!(extract_mentions("").is_empty());
    assert!(extract_mentions("hello @Bea, no markers here").is_empty());
    assert!(extract_mentions("<p>unclosed <b>tags").is_empty());
}

#[test]
fn malformed_markers_are_skipped_without_aborting_the_scan() {
    let body = concat!(
        r#"<span class="mention" data-denotation-char="@">no id</span>"#,
        r#"<span class="mention" data-denotation-char="!" data-id="u9">bad char</span>"#,
        r#"<span data-denotation-char="@" data-id="u8">not a marker</span>"#,
        r#"<span class="mention" data-denotation-char="@" data-id="u1">@Ada</span>"#,
    );

    let mentions = extract_mentions(body);

    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].target_id, "u1");
}
