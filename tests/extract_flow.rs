use calendarBot::extract::extractor::extract;
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn picture_day_yields_one_timed_candidate() {
    let body = "Picture day is March 4th, 2024 at 9:00am in the gym.";
    let candidates = extract("", body, today());

    assert_eq!(candidates.len(), 1);
    let candidate = &candidates[0];
    assert_eq!(candidate.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    assert!(candidate.has_time);
    assert_eq!(
        candidate.date_time,
        Some(
            NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        )
    );
    assert!(candidate.description.contains("at 9:00am in the gym."));
    assert!(!candidate.description.contains("March 4th, 2024"));
}

#[test]
fn text_without_dates_yields_nothing() {
    let body = "Please remember to send lunch money with your student this week.";
    assert!(extract("Lunch reminder", body, today()).is_empty());
}

#[test]
fn slash_date_without_time_yields_all_day_candidate() {
    let body = "Early dismissal on 5/1/2025. No time specified.";
    let candidates = extract("", body, today());

    assert_eq!(candidates.len(), 1);
    let candidate = &candidates[0];
    assert_eq!(candidate.date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
    assert!(!candidate.has_time);
    assert_eq!(candidate.date_time, None);
}

#[test]
fn extraction_is_deterministic() {
    let subject = "Spring schedule";
    let body = "Field day is May 10, 2024 at 1pm. Rain date is 5/17/2024.";
    let first = extract(subject, body, today());
    let second = extract(subject, body, today());
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn same_date_in_two_shapes_yields_two_candidates() {
    let body = "The fair runs 3/4/2024, see the flyer dated 2024-03-04 for details.";
    let candidates = extract("", body, today());

    assert_eq!(candidates.len(), 2);
    let expected = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    assert!(candidates.iter().all(|c| c.date == expected));
}

#[test]
fn subject_dates_are_extracted_too() {
    let candidates = extract("Conference on 11/12/2024", "Sign up sheet attached.", today());
    assert_eq!(candidates.len(), 1);
    assert_eq!(
        candidates[0].date,
        NaiveDate::from_ymd_opt(2024, 11, 12).unwrap()
    );
}
