mod common;

use common::{RecordingHost, fill, widget, widget_with};
use serde_json::Value;
use zakat_widget::prelude::*;

fn stored(widget: &common::TestWidget) -> Value {
    let raw = widget.store().storage().item("iaZakatState").expect("snapshot written");
    serde_json::from_str(raw).unwrap()
}

#[test]
fn test_switching_tabs_keeps_only_shared_fields() {
    let host = RecordingHost::default();
    let mut widget = widget();

    widget.update(WidgetEvent::SelectTab(Tab::PreciousMetals), &host);
    fill(&mut widget, &[("goldPrice", "350"), ("nisabGrams", "90"), ("gold_keep", "30")]);
    widget.update(WidgetEvent::SelectTab(Tab::Fitrah), &host);
    fill(&mut widget, &[("fit_rate", "7"), ("fit_heads", "5")]);

    widget.update(WidgetEvent::SelectTab(Tab::PreciousMetals), &host);
    assert_eq!(widget.form().value(FieldId::GoldKeep), Some(""));
    assert_eq!(widget.state().nisab_gold_price, "350");
    assert_eq!(widget.state().nisab_grams, "90");

    widget.update(WidgetEvent::SelectTab(Tab::Fitrah), &host);
    assert_eq!(widget.form().value(FieldId::FitHeads), Some(""));
    assert_eq!(widget.form().value(FieldId::FitRate), Some("7"));

    let html = widget.render();
    assert!(html.contains(r#"id="fit_rate" type="number" inputmode="decimal" placeholder="cth: 7" value="7""#));
    assert!(!html.contains(r#"id="goldPrice""#));
}

#[test]
fn test_tab_switch_updates_query_and_storage() {
    let mut widget = widget();
    let effect = widget.on_click("", Some("kwsp"), &RecordingHost::default());

    assert_eq!(effect, Effect::Render);
    assert_eq!(widget.active_tab(), Tab::Retirement);
    assert_eq!(widget.store().location().href(), "https://ilmualam.example/zakat?tab=kwsp");
    assert_eq!(widget.store().location().replacements(), 1);
    assert_eq!(stored(&widget)["activeTab"], "kwsp");
}

#[test]
fn test_shared_fields_are_persisted_on_input() {
    let mut widget = common::widget_with(MemoryStore::new(), "https://ilmualam.example/zakat?tab=info");
    fill(&mut widget, &[("goldPrice", "352.40")]);

    let snapshot = stored(&widget);
    assert_eq!(snapshot["activeTab"], "info");
    assert_eq!(snapshot["nisabGoldPrice"], "352.40");
    assert_eq!(snapshot["nisabGrams"], "85");
    assert_eq!(snapshot["fitrahPerHead"], "");
}

#[test]
fn test_restore_order() {
    let storage = MemoryStore::new().with_item(
        "iaZakatState",
        r#"{"activeTab":"perniagaan","nisabGoldPrice":"340","nisabGrams":"85","fitrahPerHead":"7"}"#,
    );
    let widget = widget_with(storage.clone(), "https://ilmualam.example/zakat");
    assert_eq!(widget.active_tab(), Tab::Business);
    assert_eq!(widget.state().nisab_gold_price, "340");

    let widget = widget_with(storage, "https://ilmualam.example/zakat?tab=emas#calc");
    assert_eq!(widget.active_tab(), Tab::PreciousMetals);
    assert_eq!(widget.state().fitrah_per_head, "7");
}

#[test]
fn test_malformed_snapshot_is_ignored() {
    let defaults = SessionState::defaults(&WidgetConfig::default());
    for raw in [
        "{not json",
        "null",
        "42",
        r#""emas""#,
        "[1,2]",
        r#"["emas","999","1","9"]"#,
        r#"{"activeTab":"unta","nisabGrams":true,"nisabGoldPrice":[350],"fitrahPerHead":{"v":7}}"#,
    ] {
        let storage = MemoryStore::new().with_item("iaZakatState", raw);
        let widget = widget_with(storage, "https://ilmualam.example/zakat");
        assert_eq!(widget.state(), &defaults, "snapshot {}", raw);
        assert_eq!(widget.active_tab(), Tab::Income, "snapshot {}", raw);
    }
}

#[test]
fn test_failed_writes_keep_state_in_memory() {
    let host = RecordingHost::default();
    let mut widget = widget_with(MemoryStore::read_only(), "https://ilmualam.example/zakat");

    assert_eq!(widget.update(WidgetEvent::SelectTab(Tab::Info), &host), Effect::Render);
    fill(&mut widget, &[("goldPrice", "350")]);
    assert_eq!(widget.nisab_amount(), rust_decimal_macros::dec!(29750));
    assert_eq!(widget.store().storage().item("iaZakatState"), None);

    widget.update(WidgetEvent::Action(Action::SaveShared), &host);
    assert_eq!(host.last_alert().as_deref(), Some("Nilai disimpan untuk sesi ini."));
}

#[test]
fn test_reset_restores_defaults() {
    let host = RecordingHost::default();
    let mut widget = widget();
    widget.update(WidgetEvent::SelectTab(Tab::Info), &host);
    fill(&mut widget, &[("goldPrice", "350"), ("nisabGrams", "90")]);
    assert!(widget.store().storage().item("iaZakatState").is_some());

    let effect = widget.on_click("resetBtn", None, &host);
    assert_eq!(effect, Effect::Render);
    assert_eq!(widget.active_tab(), Tab::Income);
    assert_eq!(widget.state(), &SessionState::defaults(widget.config()));
    assert_eq!(widget.store().storage().item("iaZakatState"), None);
    assert_eq!(widget.store().location().query_param("tab").as_deref(), Some("pendapatan"));
    assert!(widget.render().contains(r#"aria-selected="true" data-tab="pendapatan""#));
}
