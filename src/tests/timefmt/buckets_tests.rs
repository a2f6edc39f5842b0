use super::*;

#[test]
fn sub_minute_is_just_now() {
    assert_eq!(time_ago(0), "just now");
    assert_eq!(time_ago(59), "just now");
}

#[test]
fn minute_bucket_is_inclusive_on_lower_bound() {
    assert_eq!(time_ago(60), "1 minute ago");
    assert_eq!(time_ago(119), "1 minute ago");
    assert_eq!(time_ago(120), "2 minutes ago");
    assert_eq!(time_ago(3599), "59 minutes ago");
}

#[test]
fn hour_bucket() {
    assert_eq!(time_ago(3600), "1 hour ago");
    assert_eq!(time_ago(7199), "1 hour ago");
    assert_eq!(time_ago(86399), "23 hours ago");
}

#[test]
fn day_bucket_has_no_upper_bound() {
    assert_eq!(time_ago(86400), "1 day ago");
    assert_eq!(time_ago(86400 * 2), "2 days ago");
    assert_eq!(time_ago(86400 * 400), "400 days ago");
}

#[test]
fn rfc3339_age_relative_to_now() {
    let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    let ts = OffsetDateTime::from_unix_timestamp(1_700_000_000 - 3600)
        .unwrap()
        .format(&Rfc3339)
        .unwrap();
    assert_eq!(time_ago_str(&ts, now).as_deref(), Some("1 hour ago"));
}

#[test]
fn future_timestamps_clamp_to_just_now() {
    let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    let ts = OffsetDateTime::from_unix_timestamp(1_700_000_500)
        .unwrap()
        .format(&Rfc3339)
        .unwrap();
    assert_eq!(time_ago_str(&ts, now).as_deref(), Some("just now"));
}

#[test]
fn garbage_timestamps_do_not_parse() {
    let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    assert_eq!(time_ago_str("not-a-time", now), None);
    assert_eq!(parse_epoch("not-a-time"), 0);
}

#[test]
fn parse_epoch_roundtrip() {
    let ts = OffsetDateTime::from_unix_timestamp(1_700_000_000)
        .unwrap()
        .format(&Rfc3339)
        .unwrap();
    assert_eq!(parse_epoch(&ts), 1_700_000_000);
}
