//! Citation normalizer behaviour on marker-bearing fragments

use lemma_extract::{
    CitationNormalizer, CitationRules, DualText, ExtractionEvent, NoopObserver, RecordingObserver,
};
use proptest::prelude::*;

fn normalize(html: &str) -> DualText {
    CitationNormalizer::new(CitationRules::default(), &NoopObserver).normalize_fragment(html)
}

#[test]
fn test_range_markers_expand() {
    assert_eq!(normalize("<p>a<sup>[91-92]</sup></p>").annotated, "a[91, 92]");
    assert_eq!(normalize("<p>a<sup>[5-5]</sup></p>").annotated, "a[5]");
    assert_eq!(normalize("<p>a<sup>[a-b]</sup></p>").annotated, "a[a-b]");
}

#[test]
fn test_adjacent_markers_merge_within_gap() {
    assert_eq!(normalize("<p>x<sup>[262]</sup> <sup>[411]</sup></p>").annotated, "x[262, 411]");
    assert_eq!(
        normalize("<p>x<sup>[262]</sup> and <sup>[411]</sup></p>").annotated,
        "x[262] and [411]"
    );
}

#[test]
fn test_duplicate_markers_collapse() {
    assert_eq!(normalize("<p>y<sup>[7]</sup> <sup>[7]</sup></p>").annotated, "y[7]");
}

#[test]
fn test_union_sorted_numerically() {
    let dual = normalize("<p>z<sup>[411]</sup><sup>[7]</sup> <sup>[92]</sup></p>");
    assert_eq!(dual.annotated, "z[7, 92, 411]");
    assert_eq!(dual.clean, "z");
}

#[test]
fn test_nested_marker_links() {
    let dual = normalize(
        r#"<div>Shenzhen<sup><a href="javascript:;" class="supLink">[1]</a></sup><sup><a>[2-3]</a></sup> city</div>"#,
    );
    assert_eq!(dual.clean, "Shenzhen city");
    assert_eq!(dual.annotated, "Shenzhen[1, 2, 3] city");
}

#[test]
fn test_merge_events_reported() {
    let observer = RecordingObserver::new();
    let normalizer = CitationNormalizer::new(CitationRules::default(), &observer);
    let _ = normalizer.normalize_fragment("<p>a<sup>[1]</sup><sup>[9-2]</sup></p>");

    let events = observer.take();
    assert!(events.contains(&ExtractionEvent::CitationsMerged { markers: 2 }));
    assert!(events.contains(&ExtractionEvent::MalformedSpan {
        context: "citation".to_string(),
        token: "[9-2]".to_string(),
    }));
}

#[test]
fn test_custom_gap() {
    let rules = CitationRules { adjacency_gap: 0, ..CitationRules::default() };
    let normalizer = CitationNormalizer::new(rules, &NoopObserver);
    let dual = normalizer.normalize_fragment("<p>a<sup>[1]</sup> <sup>[2]</sup><sup>[3]</sup></p>");
    assert_eq!(dual.annotated, "a[1] [2, 3]");
}

#[derive(Debug, Clone)]
enum Piece {
    Word(String),
    Marker(u64),
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        3 => "[a-z]{1,8}".prop_map(Piece::Word),
        1 => "\\[[0-9]{1,3}\\]".prop_map(Piece::Word),
        2 => (1u64..500).prop_map(Piece::Marker),
    ]
}

fn fragment(pieces: &[Piece]) -> String {
    let body: String = pieces
        .iter()
        .map(|piece| match piece {
            Piece::Word(word) => format!("{word} "),
            Piece::Marker(n) => format!("<sup>[{n}]</sup>"),
        })
        .collect();
    format!("<p>{body}</p>")
}

proptest! {
    #[test]
    fn prop_clean_output_is_a_fixed_point(pieces in prop::collection::vec(piece(), 0..20)) {
        let first = normalize(&fragment(&pieces));
        let again = normalize(&format!("<p>{}</p>", first.clean));
        prop_assert_eq!(&again.clean, &first.clean);
        prop_assert_eq!(&again.annotated, &first.clean);
    }

    #[test]
    fn prop_clean_has_no_marker_text(words in prop::collection::vec("[a-z]{1,6}", 1..8), marks in prop::collection::vec(1u64..100, 1..8)) {
        let pieces: Vec<Piece> = words
            .into_iter()
            .map(Piece::Word)
            .zip(marks.into_iter().map(Piece::Marker))
            .flat_map(|(w, m)| [w, m])
            .collect();
        let dual = normalize(&fragment(&pieces));
        prop_assert!(!dual.clean.contains('['));
    }

    #[test]
    fn prop_adjacent_markers_form_sorted_union(numbers in prop::collection::vec(1u64..5000, 1..8)) {
        let markers: String = numbers.iter().map(|n| format!("<sup>[{n}]</sup>")).collect();
        let dual = normalize(&format!("<p>t{markers}</p>"));

        let mut expected = numbers.clone();
        expected.sort_unstable();
        expected.dedup();
        let joined = expected.iter().map(u64::to_string).collect::<Vec<_>>().join(", ");
        prop_assert_eq!(dual.annotated, format!("t[{joined}]"));
    }
}
