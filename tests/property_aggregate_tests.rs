use learner_charts::aggregate::{
    RatioSplit, SkillTransaction, TOP_N, XpTransaction, cumulative_series, normalize_skills,
    rank_top_n,
};
use learner_charts::charts::{ChartKind, ChartSpec, default_viewport, render_radar};
use learner_charts::core::{LinearScale, PixelRange};
use proptest::prelude::*;

fn day(offset: u32) -> String {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).expect("base date");
    (base + chrono::Days::new(u64::from(offset)))
        .format("%Y-%m-%d")
        .to_string()
}

proptest! {
    #[test]
    fn cumulative_total_matches_sum_and_never_drops_for_positive_amounts(
        entries in prop::collection::vec((0u32..365, 0.0f64..10_000.0), 1..40)
    ) {
        let records: Vec<XpTransaction> = entries
            .iter()
            .map(|(offset, amount)| XpTransaction::new(*amount, day(*offset)))
            .collect();
        let series = cumulative_series(&records).expect("series");
        let values: Vec<f64> = series.values().collect();

        prop_assert_eq!(values.len(), records.len());
        prop_assert!(values.windows(2).all(|pair| pair[1] >= pair[0]));
        let total: f64 = entries.iter().map(|(_, amount)| amount).sum();
        let last = *values.last().expect("last");
        prop_assert!((last - total).abs() <= 1e-6 * total.max(1.0));
    }

    #[test]
    fn split_sweeps_cover_the_full_circle(
        first in 0.0f64..1_000_000.0,
        second in 0.0f64..1_000_000.0
    ) {
        prop_assume!(first + second > 0.0);
        let split = RatioSplit::new(first, second).expect("split");
        let (a, b) = split.sweep_degrees().expect("sweeps");
        prop_assert!((a + b - 360.0).abs() <= 1e-9);
        prop_assert!(a >= 0.0 && b >= 0.0);
    }

    #[test]
    fn ranking_is_bounded_and_sorted_descending(
        items in prop::collection::vec((0u8..30, 0.0f64..1_000.0), 0..120)
    ) {
        let ranked = rank_top_n(items.iter().map(|(key, value)| (format!("k{key}"), *value)), TOP_N);
        prop_assert!(ranked.len() <= TOP_N);
        prop_assert!(ranked.windows(2).all(|pair| pair[0].total >= pair[1].total));
    }

    #[test]
    fn radar_has_one_vertex_per_category(
        amounts in prop::collection::vec(1.0f64..500.0, 1..12)
    ) {
        let records: Vec<SkillTransaction> = amounts
            .iter()
            .enumerate()
            .map(|(index, amount)| SkillTransaction::new(format!("skill_s{index}"), *amount))
            .collect();
        let categories = normalize_skills(&records, "skill_");
        prop_assert_eq!(categories.len(), amounts.len());

        let spec = ChartSpec::new(ChartKind::Radar, default_viewport());
        let outcome = render_radar(&records, &spec).expect("render");
        let frame = outcome.frame().expect("frame");
        prop_assert_eq!(frame.polygons[0].points.len(), amounts.len());
        prop_assert_eq!(frame.handles.len(), amounts.len());
    }

    #[test]
    fn linear_scale_round_trip(
        domain_min in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_max = domain_min + domain_span;
        let value = domain_min + value_factor * domain_span;
        let scale = LinearScale::new(domain_min, domain_max).expect("valid scale");
        let range = PixelRange::new(305.0, 45.0);

        let px = scale.domain_to_pixel(value, range).expect("to pixel");
        prop_assert!((45.0..=305.0).contains(&px) || (px - 45.0).abs() <= 1e-7 || (px - 305.0).abs() <= 1e-7);
        let recovered = scale.pixel_to_domain(px, range).expect("from pixel");
        prop_assert!((recovered - value).abs() <= 1e-6);
    }
}

#[test]
fn ranking_ties_keep_first_seen_order() {
    let ranked = rank_top_n([("A", 100.0), ("B", 100.0), ("C", 100.0)], TOP_N);
    let keys: Vec<&str> = ranked.iter().map(|entry| entry.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "C"]);
}
