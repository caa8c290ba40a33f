mod common;

use common::{fill, output, widget};
use rust_decimal_macros::dec;
use zakat_widget::prelude::*;

#[test]
fn test_income_net_monthly() {
    let mut widget = widget();
    fill(
        &mut widget,
        &[("inc_gross", "5000"), ("inc_mand", "800"), ("inc_ess", "1500"), ("inc_oth", "400")],
    );
    assert_eq!(output(&widget, "inc_yearly").as_deref(), Some("RM 27,600.00"));
    assert_eq!(output(&widget, "inc_zakat").as_deref(), Some("RM 690.00"));

    fill(&mut widget, &[("inc_period", "tahun"), ("inc_basis", "simpanan")]);
    assert_eq!(output(&widget, "inc_yearly").as_deref(), Some("RM 4,200.00"));
    assert_eq!(output(&widget, "inc_zakat").as_deref(), Some("RM 105.00"));
}

#[test]
fn test_savings_sum() {
    let mut widget = widget();
    widget.update(WidgetEvent::SelectTab(Tab::Savings), &common::RecordingHost::default());
    fill(
        &mut widget,
        &[("sav_cash", "800"), ("sav_bank", "5,000"), ("sav_fd", " 3000 "), ("sav_other", "")],
    );
    assert_eq!(output(&widget, "sav_total").as_deref(), Some("RM 8,800.00"));
    assert_eq!(output(&widget, "sav_zakat").as_deref(), Some("RM 220.00"));
}

#[test]
fn test_precious_metals_with_shared_price() {
    let mut widget = widget();
    widget.update(WidgetEvent::SelectTab(Tab::PreciousMetals), &common::RecordingHost::default());
    fill(&mut widget, &[("goldPrice", "350"), ("gold_keep", "30"), ("gold_wear", "50"), ("gold_uruf", "0")]);

    let details = widget.details().unwrap();
    assert_eq!(details.eligible_amount, dec!(28000));
    assert_eq!(details.zakat_due, Some(dec!(700)));
    assert_eq!(output(&widget, "gp_zakat").as_deref(), Some("RM 700.00"));
}

#[test]
fn test_uruf_larger_than_worn_gold() {
    let mut widget = widget();
    widget.update(WidgetEvent::SelectTab(Tab::PreciousMetals), &common::RecordingHost::default());
    fill(
        &mut widget,
        &[("goldPrice", "350"), ("gold_wear", "50"), ("gold_uruf", "800"), ("silver_gram", "100"), ("silver_price", "3.35")],
    );
    assert_eq!(widget.details().unwrap().eligible_amount, dec!(335));
}

#[test]
fn test_business_working_capital() {
    let mut widget = widget();
    widget.update(WidgetEvent::SelectTab(Tab::Business), &common::RecordingHost::default());
    fill(&mut widget, &[("biz_assets", "120000"), ("biz_liab", "50000")]);
    assert_eq!(output(&widget, "biz_nett").as_deref(), Some("RM 70,000.00"));
    assert_eq!(output(&widget, "biz_zakat").as_deref(), Some("RM 1,750.00"));

    fill(&mut widget, &[("biz_liab", "500000")]);
    assert_eq!(output(&widget, "biz_nett").as_deref(), Some("RM 0.00"));
    assert_eq!(output(&widget, "biz_zakat").as_deref(), Some("RM 0.00"));
}

#[test]
fn test_investments_and_retirement() {
    let host = common::RecordingHost::default();
    let mut widget = widget();
    widget.update(WidgetEvent::SelectTab(Tab::Investments), &host);
    fill(&mut widget, &[("inv_asb", "10000"), ("inv_th", "8000"), ("inv_stocks", "6000"), ("inv_crypto", "1000")]);
    assert_eq!(output(&widget, "inv_zakat").as_deref(), Some("RM 625.00"));

    widget.update(WidgetEvent::SelectTab(Tab::Retirement), &host);
    fill(&mut widget, &[("kwsp_withd", "10000"), ("kwsp_bal", "80000")]);
    assert_eq!(output(&widget, "kwsp_base").as_deref(), Some("RM 10,000.00"));
    assert_eq!(output(&widget, "kwsp_zakat").as_deref(), Some("RM 250.00"));
}

#[test]
fn test_fitrah_total_has_no_payable_output() {
    let mut widget = widget();
    widget.update(WidgetEvent::SelectTab(Tab::Fitrah), &common::RecordingHost::default());
    fill(&mut widget, &[("fit_heads", "5"), ("fit_rate", "7")]);

    assert_eq!(widget.outputs(), vec![("fit_total", "RM 35.00".to_string())]);
    assert_eq!(widget.details().unwrap().zakat_due, None);
}

#[test]
fn test_fitrah_rate_falls_back_to_state() {
    let storage = MemoryStore::new().with_item("iaZakatState", r#"{"fitrahPerHead":"7"}"#);
    let mut widget = common::widget_with(storage, "https://ilmualam.example/zakat?tab=fitrah");
    fill(&mut widget, &[("fit_heads", "4")]);
    assert_eq!(output(&widget, "fit_total").as_deref(), Some("RM 28.00"));
}

#[test]
fn test_negative_and_garbage_inputs_are_zero() {
    let mut widget = widget();
    fill(&mut widget, &[("inc_gross", "-5000"), ("inc_mand", "abc"), ("inc_ess", "1e400")]);
    assert_eq!(output(&widget, "inc_yearly").as_deref(), Some("RM 0.00"));
    assert_eq!(output(&widget, "inc_zakat").as_deref(), Some("RM 0.00"));

    let details = widget.details().unwrap();
    assert!(details.eligible_amount >= dec!(0));
}

#[test]
fn test_info_tab_nisab() {
    let mut widget = common::widget_with(MemoryStore::new(), "https://ilmualam.example/zakat?tab=info");
    assert_eq!(widget.details(), None);
    assert_eq!(output(&widget, "info_nisab").as_deref(), Some("RM 0.00"));

    fill(&mut widget, &[("goldPrice", "350")]);
    assert_eq!(widget.nisab_amount(), dec!(29750));
    assert_eq!(output(&widget, "info_nisab").as_deref(), Some("RM 29,750.00"));

    fill(&mut widget, &[("nisabGrams", "")]);
    assert_eq!(widget.nisab_amount(), dec!(29750));
    fill(&mut widget, &[("nisabGrams", "-1")]);
    assert_eq!(widget.nisab_amount(), dec!(0));
}

#[test]
fn test_untrusted_calculator_constants_keep_results_non_negative() {
    let config: WidgetConfig = r#"{"zakat":{"rate":"-0.025","monthsPerYear":-12}}"#.parse().unwrap();
    let mut widget = ZakatWidget::new(config, MemoryStore::new(), MemoryLocation::default());
    fill(&mut widget, &[("inc_gross", "5000"), ("inc_mand", "800"), ("inc_ess", "1500"), ("inc_oth", "400")]);
    assert_eq!(output(&widget, "inc_yearly").as_deref(), Some("RM 27,600.00"));
    assert_eq!(output(&widget, "inc_zakat").as_deref(), Some("RM 690.00"));
}
