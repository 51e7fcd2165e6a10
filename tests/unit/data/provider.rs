use super::*;

#[test]
fn timeline_is_a_step_function() {
    let mut data = TimelineData::new();
    data.insert("gain", TimeCursor(100), 0.5);
    data.insert("gain", TimeCursor(200), 1.0);

    assert_eq!(data.resolve("gain", TimeCursor(99)), None);
    assert_eq!(data.resolve("gain", TimeCursor(100)), Some(Scalar::Number(0.5)));
    assert_eq!(data.resolve("gain", TimeCursor(199)), Some(Scalar::Number(0.5)));
    assert_eq!(data.resolve("gain", TimeCursor(5_000)), Some(Scalar::Number(1.0)));
    assert_eq!(data.resolve("missing", TimeCursor(150)), None);
}

#[test]
fn insert_overwrites_and_remove_drops_series() {
    let mut data = TimelineData::new();
    data.insert("lane", TimeCursor(0), 1_i64);
    data.insert("lane", TimeCursor(0), 2_i64);
    assert_eq!(data.resolve("lane", TimeCursor(0)), Some(Scalar::Int(2)));

    assert!(data.contains_key("lane"));
    assert!(data.remove_key("lane"));
    assert!(!data.remove_key("lane"));
    assert_eq!(data.resolve("lane", TimeCursor(0)), None);
}

#[test]
fn closures_and_no_data_are_providers() {
    let provider = |key: &str, cursor: TimeCursor| {
        (key == "tick").then_some(Scalar::Int(cursor.0 as i64))
    };
    assert_eq!(provider.resolve("tick", TimeCursor(7)), Some(Scalar::Int(7)));
    assert_eq!(provider.resolve("tock", TimeCursor(7)), None);
    assert_eq!(NoData.resolve("tick", TimeCursor(7)), None);
}
