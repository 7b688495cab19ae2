use editor_core_line_heights::{LineHeightConfig, LineHeightIndex, OverrideId};
use pretty_assertions::assert_eq;

const A: OverrideId = OverrideId(1);
const B: OverrideId = OverrideId(2);
const C: OverrideId = OverrideId(3);

fn heights(index: &mut LineHeightIndex, lines: std::ops::RangeInclusive<usize>) -> Vec<u32> {
    lines.map(|line| index.height_for_line(line)).collect()
}

#[test]
fn test_single_override_scenario() {
    let mut index = LineHeightIndex::new(20);
    index.insert_or_update(A, 5, 40);

    assert_eq!(index.height_for_line(5), 40);
    assert_eq!(index.cumulative_height_through(5), 20 * 4 + 40);
    assert_eq!(index.cumulative_height_through(4), 80);
    assert_eq!(index.cumulative_height_through(6), 140);
}

#[test]
fn test_max_height_wins_on_shared_line() {
    let mut index = LineHeightIndex::new(20);
    index.insert_or_update(A, 5, 40);
    index.insert_or_update(B, 5, 25);

    assert_eq!(index.height_for_line(5), 40);
    assert_eq!(index.cumulative_height_through(5), 120);

    index.remove_override(A);
    assert_eq!(index.height_for_line(5), 25);
    assert_eq!(index.cumulative_height_through(5), 105);
}

#[test]
fn test_delete_lines_moves_override_up() {
    let mut index = LineHeightIndex::new(20);
    index.insert_or_update(A, 5, 40);
    index.on_lines_deleted(3, 4);

    let overrides: Vec<_> = index.overrides().collect();
    assert_eq!(overrides, vec![(A, 3, 40)]);
    assert_eq!(index.height_for_line(3), 40);
    assert_eq!(index.height_for_line(5), 20);
}

#[test]
fn test_insert_then_remove_restores_height() {
    let mut index = LineHeightIndex::new(20);
    index.insert_or_update(B, 7, 30);
    let before = heights(&mut index, 1..=10);

    index.insert_or_update(A, 7, 50);
    assert_eq!(index.height_for_line(7), 50);
    index.remove_override(A);

    assert_eq!(heights(&mut index, 1..=10), before);
}

#[test]
fn test_insert_then_delete_lines_round_trip() {
    let mut index = LineHeightIndex::new(20);
    index.insert_or_update(A, 2, 30);
    index.insert_or_update(B, 4, 40);
    index.insert_or_update(C, 4, 45);
    index.insert_or_update(OverrideId(4), 9, 60);
    let before: Vec<_> = index.overrides().collect();
    let before_heights = heights(&mut index, 1..=12);

    index.on_lines_inserted(4, 6);
    assert_eq!(index.height_for_line(4), 20);
    assert_eq!(index.height_for_line(7), 45);

    index.on_lines_deleted(4, 6);
    let after: Vec<_> = index.overrides().collect();
    assert_eq!(after, before);
    assert_eq!(heights(&mut index, 1..=12), before_heights);
}

#[test]
fn test_cumulative_is_prefix_sum_of_heights() {
    let mut index = LineHeightIndex::new(18);
    index.insert_or_update(A, 1, 36);
    index.insert_or_update(B, 3, 0);
    index.insert_or_update(C, 3, 12);
    index.insert_or_update(OverrideId(4), 11, 90);

    assert_eq!(index.cumulative_height_through(0), 0);
    let mut previous = 0;
    for line in 1..=20 {
        let through = index.cumulative_height_through(line);
        assert!(through >= previous);
        assert_eq!(through - previous, u64::from(index.height_for_line(line)));
        previous = through;
    }
}

#[test]
fn test_queries_are_idempotent() {
    let mut index = LineHeightIndex::new(20);
    index.insert_or_update(A, 3, 40);
    index.insert_or_update(B, 8, 10);

    let first = (index.height_for_line(3), index.cumulative_height_through(8));
    assert!(!index.needs_commit());
    let records = index.special_lines().to_vec();

    let second = (index.height_for_line(3), index.cumulative_height_through(8));
    assert_eq!(first, second);
    assert!(!index.commit());
    assert_eq!(index.special_lines(), records.as_slice());
}

#[test]
fn test_batch_of_mutations_single_commit() {
    let mut index = LineHeightIndex::new(20);
    for raw in 0..100u64 {
        index.insert_or_update(OverrideId(raw), (raw as usize % 10) * 3 + 1, 21 + raw as u32);
    }
    for raw in (0..100u64).step_by(2) {
        index.remove_override(OverrideId(raw));
    }
    assert_eq!(index.len(), 50);

    assert!(index.commit());
    assert!(!index.commit());
    // Odd ids land on lines 4, 10, 16, 22, 28; the largest odd id on line 28 is 99.
    assert_eq!(index.height_for_line(28), 120);
    assert_eq!(index.height_for_line(1), 20);
}

#[test]
fn test_default_height_change_recomputes() {
    let mut index = LineHeightIndex::new(20);
    index.insert_or_update(A, 5, 40);
    index.insert_or_update(B, 10, 40);
    assert_eq!(index.cumulative_height_through(10), 240);

    index.set_default_height(10);
    assert_eq!(index.default_height(), 10);
    assert_eq!(index.cumulative_height_through(10), 40 + 40 + 40 + 40);
    assert_eq!(index.height_for_line(5), 40);
}

#[test]
fn test_index_from_config() {
    let config = LineHeightConfig::from_json_str(r#"{"default_height": 24}"#).unwrap();
    let mut index = LineHeightIndex::from_config(&config).unwrap();
    assert_eq!(index.cumulative_height_through(3), 72);

    assert!(LineHeightIndex::from_config(&LineHeightConfig::new(0)).is_err());
    assert_eq!(LineHeightIndex::default().default_height(), 20);
}

#[test]
fn test_scroll_round_trip_after_edits() {
    let mut index = LineHeightIndex::new(20);
    index.insert_or_update(A, 10, 100);
    index.insert_or_update(B, 20, 5);
    index.on_lines_inserted(1, 5);
    index.on_lines_deleted(2, 3);

    // A is now on line 13, B on line 23.
    assert_eq!(index.top_of_line(13), 240);
    assert_eq!(index.line_at_offset(300), 13);
    assert_eq!(index.line_at_offset(340), 14);
    assert_eq!(index.visible_lines(230, 120, 30), Some(12..=14));
}
