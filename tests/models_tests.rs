// Model tests: timestamp formats, archive keys, datapoint JSON shape

mod common;

use chrono::Duration;
use common::*;
use rds_metrics_collector::collector::serialize_datapoints;
use rds_metrics_collector::models::*;

#[test]
fn format_timestamp_uses_month_day_year() {
    assert_eq!(
        format_timestamp(utc("2024-03-07T04:05:06Z")),
        "03/07/2024, 04:05:06"
    );
}

#[test]
fn format_key_timestamp_is_path_safe() {
    let s = format_key_timestamp(utc("2024-03-07T14:05:06Z"));
    assert_eq!(s, "03-07-2024_14-05-06");
    assert!(!s.contains('/') && !s.contains(':') && !s.contains(' '));
}

#[test]
fn archive_key_is_deterministic() {
    let window = TimeWindow::ending_at(utc("2024-01-01T12:00:00Z"), Duration::hours(2)).unwrap();
    let a = archive_key("rds-cpu-metrics", &window);
    let b = archive_key("rds-cpu-metrics", &window);
    assert_eq!(a, b);
    assert_eq!(
        a,
        "rds-cpu-metrics_01-01-2024_10-00-00_01-01-2024_12-00-00.json"
    );
}

#[test]
fn archive_key_differs_for_windows_one_second_apart() {
    let first = TimeWindow::ending_at(utc("2024-01-01T12:00:00Z"), Duration::hours(2)).unwrap();
    let second = TimeWindow::ending_at(utc("2024-01-01T12:00:01Z"), Duration::hours(2)).unwrap();
    assert_ne!(
        archive_key("rds-cpu-metrics", &first),
        archive_key("rds-cpu-metrics", &second)
    );
}

#[test]
fn archive_key_ignores_subsecond_precision() {
    let a = TimeWindow::ending_at(utc("2024-01-01T12:00:00.100Z"), Duration::hours(2)).unwrap();
    let b = TimeWindow::ending_at(utc("2024-01-01T12:00:00.900Z"), Duration::hours(2)).unwrap();
    assert_eq!(archive_key("p", &a), archive_key("p", &b));
}

#[test]
fn time_window_duration_and_display() {
    let window =
        TimeWindow::ending_at(utc("2024-01-01T12:00:00Z"), Duration::minutes(90)).unwrap();
    assert_eq!(window.duration(), Duration::minutes(90));
    assert_eq!(
        window.to_string(),
        "2024-01-01T10:30:00Z..2024-01-01T12:00:00Z"
    );
}

#[test]
fn time_window_rejects_non_positive_duration() {
    let now = utc("2024-01-01T12:00:00Z");
    assert!(TimeWindow::ending_at(now, Duration::zero()).is_none());
    assert!(TimeWindow::ending_at(now, Duration::minutes(-5)).is_none());
    assert!(TimeWindow::ending_at(now, Duration::seconds(1)).is_some());
}

#[test]
fn formatted_datapoint_keys_follow_statistic() {
    let dp = Datapoint {
        timestamp: utc("2024-01-01T11:00:00Z"),
        statistic: Statistic::Maximum,
        value: 97.0,
        unit: "Percent".into(),
    };
    let json = serde_json::to_string(&FormattedDatapoint::from(&dp)).unwrap();
    assert_eq!(
        json,
        r#"{"Timestamp":"01/01/2024, 11:00:00","Maximum":97.0,"Unit":"Percent"}"#
    );
}

#[test]
fn serialize_empty_datapoints_is_empty_array() {
    assert_eq!(serialize_datapoints(&[]).unwrap(), "[]");
}

#[test]
fn serialize_datapoints_keeps_input_order() {
    let points = vec![
        cpu_point("2024-01-01T11:00:00Z", 42.5),
        cpu_point("2024-01-01T10:00:00Z", 7.25),
    ];
    assert_eq!(
        serialize_datapoints(&points).unwrap(),
        concat!(
            r#"[{"Timestamp":"01/01/2024, 11:00:00","Average":42.5,"Unit":"Percent"},"#,
            r#"{"Timestamp":"01/01/2024, 10:00:00","Average":7.25,"Unit":"Percent"}]"#
        )
    );
}

#[test]
fn statistic_names_match_monitoring_api() {
    for (stat, name) in [
        (Statistic::Average, "Average"),
        (Statistic::Sum, "Sum"),
        (Statistic::Minimum, "Minimum"),
        (Statistic::Maximum, "Maximum"),
        (Statistic::SampleCount, "SampleCount"),
    ] {
        assert_eq!(stat.as_str(), name);
        assert_eq!(serde_json::to_string(&stat).unwrap(), format!("\"{}\"", name));
    }
    assert_eq!(Statistic::default(), Statistic::Average);
}
