//! End-to-end tests: snapshot JSON in, SVG or geometry JSON out

use pretty_assertions::assert_eq;

use orgchart::{
    render, render_segments, render_with_config, ChartView, Filter, LayoutConfig, RenderConfig,
    Snapshot, Stylesheet, SvgConfig, ViewMode, ViewOptions,
};

const ORG: &str = r#"{
    "users": [
        {"id": 1, "name": "Alice Smith", "email": "alice@example.com", "role": "CEO"},
        {"id": 2, "name": "Bob Jones", "email": "bob@example.com", "role": "CTO", "line_manager": 1},
        {"id": 3, "name": "Carol White", "email": "carol@example.com", "role": "Engineer", "line_manager": 2},
        {"id": 4, "name": "Dave Brown", "email": "dave@example.com", "role": "Engineer", "line_manager": 2,
         "status": "inactive", "end_date": "2024-03-31"},
        {"id": 5, "name": "Erin Green", "email": "erin@example.com", "role": "CFO", "line_manager": "1"}
    ],
    "drafts": [
        {"id": 7, "position_title": "Staff Engineer", "line_manager": 2, "status": "open"}
    ],
    "teams": [
        {"id": 10, "name": "Platform", "lead_id": 2, "members": [3, 4]},
        {"id": 11, "name": "Finance", "lead_id": 5, "members": []}
    ]
}"#;

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_full_org_draws_every_person() {
    let svg = render(ORG).unwrap();
    for id in ["1", "2", "3", "4", "5", "draft-7"] {
        assert!(svg.contains(&format!(r#"id="oc-card-{}""#, id)), "missing card {}", id);
    }
    assert!(svg.contains("Staff Engineer"));
    assert!(svg.contains("End: 2024-03-31"));
    assert!(svg.contains(r#"id="oc-add-member-1-level-0""#));
    assert!(svg.contains(r#"id="oc-add-member-2-level-1""#));
}

#[test]
fn test_connectors_drawn_before_cards() {
    let svg = render(ORG).unwrap();
    let first_line = svg.find("<line").unwrap();
    let first_card = svg.find(r#"id="oc-card-1""#).unwrap();
    assert!(first_line < first_card);
    assert!(svg.contains("oc-dashed"));
}

#[test]
fn test_hide_inactive_drops_vacancies_and_leavers() {
    let config = RenderConfig::new()
        .with_options(ViewOptions::default().with_show_inactive(false));
    let svg = render_with_config(ORG, config).unwrap();
    assert!(!svg.contains(r#"id="oc-card-4""#));
    assert!(!svg.contains(r#"id="oc-card-draft-7""#));
    assert!(svg.contains(r#"id="oc-card-3""#));
}

#[test]
fn test_team_filter_draws_lead_and_members() {
    let config = RenderConfig::new().with_filter(Filter::Team("10".to_string()));
    let svg = render_with_config(ORG, config).unwrap();
    assert!(svg.contains(r#"id="oc-card-2""#));
    assert!(svg.contains(r#"id="oc-card-3""#));
    assert!(svg.contains(r#"id="oc-card-4""#));
    assert!(svg.contains("Team Lead"));
    assert!(!svg.contains(r#"id="oc-card-5""#));
    assert!(!svg.contains(r#"id="oc-card-draft-7""#));
}

#[test]
fn test_team_without_members_draws_lead_alone() {
    let config = RenderConfig::new()
        .with_filter(Filter::Team("11".to_string()))
        .with_options(ViewOptions::default().with_add_slots(false));
    let svg = render_with_config(ORG, config).unwrap();
    assert_eq!(count(&svg, r#"id="oc-card-"#), 1);
    assert!(svg.contains(r#"id="oc-card-5""#));
    assert!(!svg.contains("<line"));
}

#[test]
fn test_unknown_team_shows_full_org() {
    let filtered = render_with_config(
        ORG,
        RenderConfig::new().with_filter(Filter::Team("999".to_string())),
    )
    .unwrap();
    assert_eq!(filtered, render(ORG).unwrap());
}

#[test]
fn test_stack_mode_renders_rows_without_lines() {
    let config = RenderConfig::new().with_mode(ViewMode::Stack);
    let svg = render_with_config(ORG, config).unwrap();
    assert!(!svg.contains("<line"));
    assert!(svg.contains(r#"id="oc-card-3""#));
    assert!(!svg.contains("Add Member"));
}

#[test]
fn test_deep_chain_gets_depth_placeholder() {
    let users: Vec<String> = (0..14)
        .map(|i| {
            let manager = if i == 0 {
                String::new()
            } else {
                format!(r#", "line_manager": {}"#, i - 1)
            };
            format!(r#"{{"id": {}, "name": "P{}"{}}}"#, i, i, manager)
        })
        .collect();
    let json = format!(r#"{{"users": [{}]}}"#, users.join(","));

    let svg = render(&json).unwrap();
    assert_eq!(count(&svg, "Max depth reached"), 1);
    assert!(svg.contains(r#"id="oc-card-10""#));
    assert!(!svg.contains(r#"id="oc-card-11""#));
}

#[test]
fn test_segments_json_matches_layout() {
    let config = RenderConfig::new()
        .with_filter(Filter::Team("10".to_string()))
        .with_options(ViewOptions::default().with_add_slots(false));
    let json = render_segments(ORG, config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["mode"], "tree");
    let cards = value["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0]["kind"]["id"], "2");
    assert_eq!(cards[0]["kind"]["team_lead"], true);
    // Lead over two members: trunk, span and two drops
    assert_eq!(value["segments"].as_array().unwrap().len(), 4);
}

#[test]
fn test_custom_stylesheet_and_prefix() {
    let stylesheet = Stylesheet::from_str(
        r##"
[metadata]
name = "dark"

[colors]
card-background = "#1f2937"
"##,
    )
    .unwrap();
    let config = RenderConfig::new()
        .with_stylesheet(stylesheet)
        .with_svg(SvgConfig::default().without_class_prefix());
    let svg = render_with_config(ORG, config).unwrap();
    assert!(svg.contains("#1f2937"));
    assert!(svg.contains(r#"id="card-1""#));
}

#[test]
fn test_viewport_width_centres_chart() {
    let narrow = render_segments(ORG, RenderConfig::new()).unwrap();
    let wide = render_segments(
        ORG,
        RenderConfig::new().with_layout(LayoutConfig::default().with_viewport_width(Some(5000.0))),
    )
    .unwrap();
    let x = |json: &str| {
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        value["cards"][0]["bounds"]["x"].as_f64().unwrap()
    };
    assert!(x(&wide) > x(&narrow));
}

#[test]
fn test_chart_view_follows_reloads() {
    let snapshot = Snapshot::from_json(ORG).unwrap();
    let mut view = ChartView::from_snapshot(&snapshot);
    view.select(Filter::Team("10".to_string()));
    assert_eq!(view.layout().cards.member_ids().next(), Some("2"));

    let smaller = Snapshot::from_json(r#"{"users": [{"id": 1, "name": "Solo"}]}"#).unwrap();
    view.reload(&smaller);
    // Team 10 is gone, so the filter falls back to the whole organisation
    let ids: Vec<&str> = view.layout().cards.member_ids().collect();
    assert_eq!(ids, vec!["1"]);
}
