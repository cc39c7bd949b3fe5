mod helpers;

use helpers::*;
use hr_calendar::domain::entities::*;
use hr_calendar::CalendarError;

#[tokio::test]
async fn test_holiday_takes_precedence_over_weekly_off() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;
    create_fixed_rule(
        &db,
        &location,
        "Weekend",
        &[WeekdayName::Saturday, WeekdayName::Sunday],
        d(2024, 1, 1),
        None,
    )
    .await;
    // 2025-01-26 is a Sunday
    let holiday = create_test_holiday(&db, &location, d(2025, 1, 26), "Republic Day").await;

    let engine = engine_for(&db);
    let resolution = engine
        .resolve_date(ORG, &location.id, d(2025, 1, 26))
        .await
        .unwrap();

    assert_eq!(resolution.classification, Classification::Holiday);
    assert_eq!(resolution.day_of_week, WeekdayName::Sunday);
    assert_eq!(resolution.reference_id(), Some(holiday.id.as_str()));
}

#[tokio::test]
async fn test_fixed_rule_classifies_weekly_off() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;
    let rule = create_fixed_rule(
        &db,
        &location,
        "Sunday off",
        &[WeekdayName::Sunday],
        d(2024, 1, 1),
        None,
    )
    .await;

    let engine = engine_for(&db);
    let sunday = engine
        .resolve_date(ORG, &location.id, d(2025, 1, 12))
        .await
        .unwrap();
    let monday = engine
        .resolve_date(ORG, &location.id, d(2025, 1, 13))
        .await
        .unwrap();

    assert_eq!(sunday.classification, Classification::WeeklyOff);
    match sunday.reference {
        Some(ResolutionReference::WeeklyOffRule {
            reference_id,
            rule_name,
            rule_type,
        }) => {
            assert_eq!(reference_id, rule.id);
            assert_eq!(rule_name, "Sunday off");
            assert_eq!(rule_type, RuleType::Fixed);
        }
        other => panic!("Unexpected reference: {:?}", other),
    }
    assert_eq!(monday.classification, Classification::WorkingDay);
    assert!(monday.reference.is_none());
}

#[tokio::test]
async fn test_second_and_fourth_saturday_in_january() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Mumbai").await;
    create_nth_rule(
        &db,
        &location,
        "2nd & 4th Saturday",
        WeekdayName::Saturday,
        &[2, 4],
        d(2025, 1, 1),
    )
    .await;

    let engine = engine_for(&db);
    for (day, expected) in [
        (4, Classification::WorkingDay),
        (11, Classification::WeeklyOff),
        (18, Classification::WorkingDay),
        (25, Classification::WeeklyOff),
    ] {
        let resolution = engine
            .resolve_date(ORG, &location.id, d(2025, 1, day))
            .await
            .unwrap();
        assert_eq!(resolution.classification, expected, "2025-01-{:02}", day);
    }
}

#[tokio::test]
async fn test_rule_stops_after_effective_to() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Chennai").await;
    create_fixed_rule(
        &db,
        &location,
        "Saturday off H1",
        &[WeekdayName::Saturday],
        d(2025, 1, 1),
        Some(d(2025, 6, 30)),
    )
    .await;

    let engine = engine_for(&db);
    let resolutions = engine
        .resolve_range(ORG, &location.id, d(2025, 6, 28), d(2025, 7, 31))
        .await
        .unwrap();

    // 2025-06-28 is the last Saturday inside the window
    assert_eq!(resolutions[0].classification, Classification::WeeklyOff);
    assert!(resolutions
        .iter()
        .filter(|r| r.date >= d(2025, 7, 1))
        .all(|r| r.classification == Classification::WorkingDay));
}

#[tokio::test]
async fn test_rule_not_yet_effective() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Delhi").await;
    create_fixed_rule(
        &db,
        &location,
        "Saturday off from March",
        &[WeekdayName::Saturday],
        d(2025, 3, 1),
        None,
    )
    .await;

    let engine = engine_for(&db);
    let february = engine
        .resolve_date(ORG, &location.id, d(2025, 2, 22))
        .await
        .unwrap();
    let march = engine
        .resolve_date(ORG, &location.id, d(2025, 3, 1))
        .await
        .unwrap();

    assert_eq!(february.classification, Classification::WorkingDay);
    assert_eq!(march.classification, Classification::WeeklyOff);
}

#[tokio::test]
async fn test_rules_are_scoped_to_location() {
    let db = setup_test_db().await;
    let pune = create_test_location(&db, ORG, "Pune").await;
    let mumbai = create_test_location(&db, ORG, "Mumbai").await;
    create_fixed_rule(
        &db,
        &pune,
        "Weekend",
        &[WeekdayName::Saturday, WeekdayName::Sunday],
        d(2024, 1, 1),
        None,
    )
    .await;
    create_test_holiday(&db, &pune, d(2025, 1, 14), "Makar Sankranti").await;

    let engine = engine_for(&db);
    let pune_counts = engine
        .count_working_days(ORG, &pune.id, d(2025, 1, 1), d(2025, 1, 31))
        .await
        .unwrap();
    let mumbai_counts = engine
        .count_working_days(ORG, &mumbai.id, d(2025, 1, 1), d(2025, 1, 31))
        .await
        .unwrap();

    assert_eq!(pune_counts.weekly_offs, 8);
    assert_eq!(pune_counts.holidays, 1);
    assert_eq!(pune_counts.working_days, 22);
    assert_eq!(mumbai_counts.working_days, 31);
}

#[tokio::test]
async fn test_location_from_other_organization_is_not_found() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, "org-other", "Berlin").await;

    let engine = engine_for(&db);
    let err = engine
        .resolve_date(ORG, &location.id, d(2025, 1, 6))
        .await
        .unwrap_err();

    assert_eq!(err, CalendarError::LocationNotFound(location.id.clone()));
}

#[tokio::test]
async fn test_range_resolution_shape() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;
    create_fixed_rule(
        &db,
        &location,
        "Weekend",
        &[WeekdayName::Saturday, WeekdayName::Sunday],
        d(2024, 1, 1),
        None,
    )
    .await;
    create_test_holiday(&db, &location, d(2025, 1, 1), "New Year").await;
    create_test_holiday(&db, &location, d(2025, 1, 26), "Republic Day").await;

    let engine = engine_for(&db);
    let start = d(2025, 1, 1);
    let end = d(2025, 1, 31);
    let resolutions = engine
        .resolve_range(ORG, &location.id, start, end)
        .await
        .unwrap();

    assert_eq!(resolutions.len() as i64, (end - start).num_days() + 1);
    assert!(resolutions.windows(2).all(|w| w[0].date < w[1].date));
    assert!(resolutions.iter().all(|r| r.policy_version_used == "v1"));

    let counts = engine
        .count_working_days(ORG, &location.id, start, end)
        .await
        .unwrap();
    assert_eq!(counts.total_days, resolutions.len());
    assert_eq!(counts.holidays, 2);
    assert_eq!(counts.weekly_offs, 7);
    assert_eq!(counts.working_days, 22);
    assert_eq!(
        counts.working_days + counts.holidays + counts.weekly_offs,
        counts.total_days
    );
}

#[tokio::test]
async fn test_inverted_range_is_rejected() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;

    let engine = engine_for(&db);
    let err = engine
        .resolve_range(ORG, &location.id, d(2025, 1, 31), d(2025, 1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, CalendarError::InvalidRange { .. }));
    assert_eq!(engine.cached_entries().await, 0);
}

#[tokio::test]
async fn test_repeat_resolution_is_identical() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;
    create_test_holiday(&db, &location, d(2025, 8, 15), "Independence Day").await;

    let engine = engine_for(&db);
    let cold = engine
        .resolve_date(ORG, &location.id, d(2025, 8, 15))
        .await
        .unwrap();
    let warm = engine
        .resolve_date(ORG, &location.id, d(2025, 8, 15))
        .await
        .unwrap();

    assert_eq!(cold, warm);
    assert_eq!(
        serde_json::to_string(&cold).unwrap(),
        serde_json::to_string(&warm).unwrap()
    );
}

#[tokio::test]
async fn test_deactivated_holiday_needs_cache_clear() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;
    let holiday = create_test_holiday(&db, &location, d(2025, 10, 2), "Gandhi Jayanti").await;

    let engine = engine_for(&db);
    let before = engine
        .resolve_date(ORG, &location.id, d(2025, 10, 2))
        .await
        .unwrap();
    assert_eq!(before.classification, Classification::Holiday);

    db.deactivate_holiday(&holiday.id).await.unwrap();

    let cached = engine
        .resolve_date(ORG, &location.id, d(2025, 10, 2))
        .await
        .unwrap();
    assert_eq!(cached.classification, Classification::Holiday);

    engine.clear_cache().await;
    let after = engine
        .resolve_date(ORG, &location.id, d(2025, 10, 2))
        .await
        .unwrap();
    assert_eq!(after.classification, Classification::WorkingDay);
}

#[tokio::test]
async fn test_only_one_active_holiday_per_date() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;
    let first = create_test_holiday(&db, &location, d(2025, 12, 25), "Christmas").await;

    let duplicate = Holiday::new(
        ORG.to_string(),
        location.id.clone(),
        "Christmas Day".to_string(),
        d(2025, 12, 25),
        true,
        HolidaySource::Manual,
        "admin-1".to_string(),
    );
    assert!(db.create_holiday(&duplicate).await.is_err());

    db.deactivate_holiday(&first.id).await.unwrap();
    db.create_holiday(&duplicate).await.unwrap();

    let stored = db
        .get_active_holiday(ORG, &location.id, d(2025, 12, 25))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, duplicate.id);
}

#[tokio::test]
async fn test_malformed_stored_rule_never_matches() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;

    // FIXED rule with no weekday list, and one naming only an unknown weekday
    for (id, weekdays) in [("rule-empty", None), ("rule-funday", Some("[\"FUNDAY\"]"))] {
        sqlx::query(
            "INSERT INTO weekly_off_rules (id, organization_id, location_id, name, rule_type,
                                           fixed_weekdays, effective_from, status, created_at)
             VALUES (?, ?, ?, 'Broken', 'FIXED', ?, '2024-01-01', 'ACTIVE', '2024-01-01T00:00:00Z')",
        )
        .bind(id)
        .bind(ORG)
        .bind(&location.id)
        .bind(weekdays)
        .execute(db.pool())
        .await
        .unwrap();
    }
    let valid = create_fixed_rule(
        &db,
        &location,
        "Sunday off",
        &[WeekdayName::Sunday],
        d(2024, 1, 1),
        None,
    )
    .await;

    let engine = engine_for(&db);
    let resolutions = engine
        .resolve_range(ORG, &location.id, d(2025, 1, 6), d(2025, 1, 12))
        .await
        .unwrap();

    let offs: Vec<_> = resolutions
        .iter()
        .filter(|r| r.classification == Classification::WeeklyOff)
        .collect();
    assert_eq!(offs.len(), 1);
    assert_eq!(offs[0].date, d(2025, 1, 12));
    assert_eq!(offs[0].reference_id(), Some(valid.id.as_str()));
}

#[tokio::test]
async fn test_rule_with_unreadable_window_is_skipped() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;

    for (id, effective_from, effective_to) in [
        ("rule-slash-from", "2025/01/01", None),
        ("rule-bad-to", "2024-01-01", Some("soon")),
    ] {
        sqlx::query(
            "INSERT INTO weekly_off_rules (id, organization_id, location_id, name, rule_type,
                                           fixed_weekdays, effective_from, effective_to, status, created_at)
             VALUES (?, ?, ?, 'Saturday off', 'FIXED', '[\"SATURDAY\"]', ?, ?, 'ACTIVE', '2024-01-01T00:00:00Z')",
        )
        .bind(id)
        .bind(ORG)
        .bind(&location.id)
        .bind(effective_from)
        .bind(effective_to)
        .execute(db.pool())
        .await
        .unwrap();
    }
    let valid = create_fixed_rule(
        &db,
        &location,
        "Sunday off",
        &[WeekdayName::Sunday],
        d(2024, 1, 1),
        None,
    )
    .await;

    let engine = engine_for(&db);
    let sunday = engine
        .resolve_date(ORG, &location.id, d(2026, 1, 4))
        .await
        .unwrap();
    let saturday = engine
        .resolve_date(ORG, &location.id, d(2026, 1, 3))
        .await
        .unwrap();

    assert_eq!(sunday.classification, Classification::WeeklyOff);
    assert_eq!(sunday.reference_id(), Some(valid.id.as_str()));
    assert_eq!(saturday.classification, Classification::WorkingDay);
}

#[tokio::test]
async fn test_undecodable_holiday_column_is_reported() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;

    // A binary description cannot be read back as text
    sqlx::query(
        "INSERT INTO holidays (id, organization_id, location_id, name, date, year, is_mandatory,
                               description, status, source, created_by, created_at)
         VALUES ('hol-blob', ?, ?, 'Diwali', '2025-10-20', 2025, 1, X'00FF', 'ACTIVE', 'MANUAL',
                 'admin-1', '2025-01-01T00:00:00Z')",
    )
    .bind(ORG)
    .bind(&location.id)
    .execute(db.pool())
    .await
    .unwrap();

    let result = db
        .get_active_holiday(ORG, &location.id, d(2025, 10, 20))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_iso_boundary() {
    let db = setup_test_db().await;
    let location = create_test_location(&db, ORG, "Pune").await;

    let engine = engine_for(&db);
    let resolutions = engine
        .resolve_iso_range(ORG, &location.id, "2025-01-01", "2025-01-07")
        .await
        .unwrap();
    assert_eq!(resolutions.len(), 7);

    let err = engine
        .resolve_iso_date(ORG, &location.id, "2025/01/01")
        .await
        .unwrap_err();
    assert!(matches!(err, CalendarError::InvalidDate(_)));
}
