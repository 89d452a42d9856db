use learner_charts::aggregate::{
    AuditSummary, RankedEntry, RatioSplit, ResultRecord, SkillTransaction, TOP_N, XpTransaction,
    cumulative_series, normalize_skills, project_xp_ranking, tally_pass_fail,
};
use learner_charts::geometry::{PathCommand, describe_arc};
use learner_charts::core::PixelPoint;

#[test]
fn cumulative_series_sums_in_time_order() {
    let records = vec![
        XpTransaction::new(50.0, "2024-01-02T00:00:00Z"),
        XpTransaction::new(100.0, "2024-01-01T00:00:00Z"),
    ];
    let series = cumulative_series(&records).expect("series");
    let values: Vec<f64> = series.values().collect();
    assert_eq!(values, vec![100.0, 150.0]);
}

#[test]
fn cumulative_series_without_dated_records_is_none() {
    let records = vec![XpTransaction::new(50.0, "not a date")];
    assert!(cumulative_series(&records).is_none());
    assert!(cumulative_series(&Vec::<XpTransaction>::new()).is_none());
}

#[test]
fn audit_split_sweeps_three_quarters() {
    let summary = AuditSummary::new(30.0, 10.0).with_audit_ratio(Some(3.0));
    let split = RatioSplit::new(summary.total_up, summary.total_down).expect("split");
    let (up, down) = split.sweep_degrees().expect("sweeps");
    assert!((up - 270.0).abs() <= 1e-9);
    assert!((down - 90.0).abs() <= 1e-9);
}

#[test]
fn zero_total_split_has_no_sweeps() {
    let split = RatioSplit::new(0.0, 0.0).expect("split");
    assert!(split.fractions().is_none());
    assert!(split.sweep_degrees().is_none());
}

#[test]
fn tally_splits_on_threshold() {
    let results = vec![
        ResultRecord::new(Some(1.2), "2024-01-01"),
        ResultRecord::new(Some(0.5), "2024-01-02"),
        ResultRecord::new(None, "2024-01-03"),
    ];
    let tally = tally_pass_fail(&results, 1.0);
    assert_eq!(tally.passed, 1);
    assert_eq!(tally.failed, 1);
    assert_eq!(tally.excluded, 1);
    assert_eq!(tally.pass_rate(), Some(0.5));
}

#[test]
fn grade_exactly_at_threshold_passes() {
    let results = vec![ResultRecord::new(Some(1.0), "2024-01-01")];
    assert_eq!(tally_pass_fail(&results, 1.0).passed, 1);
}

#[test]
fn project_ranking_sums_per_project() {
    let records = vec![
        XpTransaction::new(500.0, "2024-01-01").with_object("A", "project"),
        XpTransaction::new(300.0, "2024-01-02").with_object("A", "project"),
        XpTransaction::new(500.0, "2024-01-03").with_object("B", "project"),
    ];
    let ranked = project_xp_ranking(&records, "project", TOP_N);
    assert_eq!(
        ranked,
        vec![RankedEntry::new("A", 800.0), RankedEntry::new("B", 500.0)]
    );
}

#[test]
fn skills_are_grouped_by_normalized_key() {
    let records = vec![
        SkillTransaction::new("skill_go", 10.0),
        SkillTransaction::new("skill_js", 8.0),
        SkillTransaction::new("skill_go", 5.0),
    ];
    let categories = normalize_skills(&records, "skill_");
    assert_eq!(
        categories,
        vec![RankedEntry::new("go", 15.0), RankedEntry::new("js", 8.0)]
    );
}

#[test]
fn arc_flags_follow_sweep() {
    let center = PixelPoint::new(100.0, 100.0);
    let short = describe_arc(center, 50.0, 0.0, 90.0).expect("arc");
    let long = describe_arc(center, 50.0, 0.0, 270.0).expect("arc");

    let large_arc = |commands: &[PathCommand]| {
        commands.iter().find_map(|command| match command {
            PathCommand::Arc { large_arc, .. } => Some(*large_arc),
            _ => None,
        })
    };
    assert_eq!(large_arc(short.commands()), Some(false));
    assert_eq!(large_arc(long.commands()), Some(true));

    match short.commands()[0] {
        PathCommand::MoveTo(start) => {
            assert!((start.x - 100.0).abs() <= 1e-9);
            assert!((start.y - 50.0).abs() <= 1e-9);
        }
        ref other => panic!("expected move-to, got {other:?}"),
    }
    assert!(describe_arc(center, 50.0, 0.0, 0.0).expect("arc").is_empty());
    assert!(describe_arc(center, 50.0, 0.0, 360.0).expect("arc").is_closed());
}
