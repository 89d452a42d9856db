use learner_charts::aggregate::XpTransaction;
use learner_charts::api::{ChartEngine, ChartEngineConfig};
use learner_charts::render::NullRenderer;

fn engine() -> ChartEngine<NullRenderer> {
    ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default()).expect("engine")
}

fn records() -> Vec<XpTransaction> {
    vec![
        XpTransaction::new(100.0, "2024-01-01T00:00:00Z").with_object("go-reloaded", "project"),
        XpTransaction::new(50.0, "2024-01-02T00:00:00Z").with_object("ascii-art", "project"),
    ]
}

#[test]
fn hovering_a_marker_shows_its_tooltip() {
    let mut instance = engine().cumulative_xp(&records(), None).expect("render");
    let (x, y) = {
        let handle = &instance.interaction.handles()[0];
        (handle.x, handle.y)
    };

    let tooltip = instance
        .interaction
        .on_pointer_move(x + 1.0, y - 1.0)
        .expect("tooltip")
        .clone();
    assert_eq!(tooltip.point_index, 0);
    assert_eq!(tooltip.text, "go-reloaded | 100 XP | 2024-01-01");
    let expected_width = tooltip.text.chars().count() as f64 * 6.0 + 10.0;
    assert!((tooltip.width - expected_width).abs() <= 1e-9);
    assert_eq!(instance.interaction.marker_radius(0), Some(6.0));
    assert_eq!(instance.interaction.marker_radius(1), Some(4.0));

    instance.interaction.on_pointer_move(0.0, 0.0);
    assert!(!instance.interaction.tooltip().is_visible());
    assert_eq!(instance.interaction.marker_radius(0), Some(4.0));
}

#[test]
fn at_most_one_tooltip_is_visible() {
    let mut instance = engine().cumulative_xp(&records(), None).expect("render");
    instance.interaction.on_point_enter(0);
    instance.interaction.on_point_enter(1);
    assert_eq!(instance.interaction.tooltip().active_index(), Some(1));

    instance.interaction.on_point_leave(0);
    assert_eq!(instance.interaction.tooltip().active_index(), Some(1));

    instance.interaction.on_pointer_exit();
    assert!(instance.interaction.tooltip().active().is_none());
}

#[test]
fn click_reports_details_without_changing_state() {
    let mut instance = engine().cumulative_xp(&records(), None).expect("render");
    instance.interaction.on_point_enter(0);
    let before = instance.interaction.clone();

    let details = instance.interaction.on_point_click(1).expect("details");
    assert_eq!(details.label, "ascii-art");
    assert_eq!(details.value, "150 XP");
    assert_eq!(details.date.as_deref(), Some("2024-01-02"));
    assert_eq!(instance.interaction, before);
    assert!(instance.interaction.on_point_click(7).is_none());
}

#[test]
fn chart_instances_do_not_share_tooltips() {
    let mut engine = engine();
    let mut first = engine.cumulative_xp(&records(), None).expect("render");
    let second = engine.top_projects(&records()).expect("render");

    first.interaction.on_point_enter(0);
    assert!(first.interaction.tooltip().is_visible());
    assert!(!second.interaction.tooltip().is_visible());
}

#[test]
fn tooltip_stays_inside_the_viewport() {
    let mut instance = engine().cumulative_xp(&records(), None).expect("render");
    let tooltip = instance.interaction.on_point_enter(1).expect("tooltip").clone();
    let viewport = instance.card.viewport;
    assert!(tooltip.x >= 0.0 && tooltip.y >= 0.0);
    assert!(tooltip.x + tooltip.width <= f64::from(viewport.width) + 1e-9);
    assert!(tooltip.y + tooltip.height <= f64::from(viewport.height) + 1e-9);
}
