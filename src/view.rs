//! HTML rendering with `maud`.
//!
//! Rendering is a pure function of the session state, the mounted form and
//! its results. The browser binding writes the output into the shadow root;
//! the preview binary wraps it in a standalone page.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use rust_decimal::Decimal;
use strum::IntoEnumIterator;
use zakat_i18n::{CurrencyFormatter, Translator};

use crate::config::WidgetConfig;
use crate::form::{ButtonId, CategoryForm, CategoryResult, FieldId, OutputId, Tab};
use crate::state::SessionState;

const BASE_CSS: &str = r#"
*{box-sizing:border-box}
.app{font-family:Inter,system-ui,Segoe UI,Roboto,Helvetica,Arial,sans-serif; color:var(--ia-text)}
.wrap{max-width:980px; margin:24px auto; padding:0 5px}
.card{background:var(--ia-bg); border:1px solid var(--ia-border); border-radius:var(--ia-radius); box-shadow:0 1px 12px rgba(0,0,0,.04)}
.header{padding:18px 18px 0}
.title{display:flex; gap:10px; align-items:center}
.logo{width:28px;height:28px;border-radius:8px;background:var(--ia-primary); display:inline-grid;place-items:center;color:#fff;font-weight:700}
h1{font-size:20px; margin:0}
.sub{color:var(--ia-muted); font-size:13px; margin:6px 0 0}
.bar{margin:16px 18px 0; display:flex; flex-wrap:wrap; gap:8px}
.tab{padding:10px 12px; border:1px solid var(--ia-border); border-radius:10px; background:var(--ia-soft); cursor:pointer; font-size:13px}
.tab[aria-selected="true"]{background:var(--ia-primary); border-color:var(--ia-primary); color:#fff}
.body{padding:18px}
.grid{display:grid; grid-template-columns:1fr 1fr; gap:var(--ia-gap)}
.grid-3{display:grid; grid-template-columns:repeat(3,1fr); gap:var(--ia-gap)}
.grid-1{display:grid; gap:var(--ia-gap)}
label{font-size:12px; color:var(--ia-muted)}
input[type="number"], input[type="text"], select{
  width:100%; padding:10px 12px; border:1px solid var(--ia-border); border-radius:10px; background:#fff; font-size:14px; outline:none;
}
.muted{color:var(--ia-muted); font-size:12px}
.note{padding:10px 12px; background:var(--ia-soft); border:1px dashed var(--ia-border); border-radius:12px; font-size:12px}
.sum{display:flex; flex-wrap:wrap; gap:16px; align-items:center; justify-content:space-between; padding:12px 14px; background:linear-gradient(0deg, #f8fff9, #ffffff); border:1px solid var(--ia-border); border-radius:12px}
.sum h3{font-size:16px; margin:0}
.btns{display:flex; gap:10px; flex-wrap:wrap}
button{padding:10px 12px; border-radius:10px; border:1px solid var(--ia-border); background:#fff; cursor:pointer; font-weight:600}
.primary{background:var(--ia-primary); border-color:var(--ia-primary); color:#fff}
.ghost{background:#fff}
.section{margin-top:18px}
.kpi{display:grid; grid-template-columns:repeat(2,1fr); gap:10px}
.kpic{padding:12px; border:1px solid var(--ia-border); border-radius:12px; background:var(--ia-soft)}
.kpic b{display:block; font-size:18px; margin-top:4px}
.hr{height:1px; background:var(--ia-border); margin:18px 0}
.foot{padding:0 18px 18px; display:flex; justify-content:space-between; align-items:center; color:var(--ia-muted); font-size:12px}
.link{color:var(--ia-primary-dark); text-decoration:underline; cursor:pointer}
.danger{color:#a91919}
@media(max-width:720px){ .grid, .grid-3{grid-template-columns:1fr} }
@media print{
  .bar, .btns, .foot{display:none !important}
  .wrap{max-width:none; margin:0; padding:0}
  .card{border:none; box-shadow:none}
  .kpic{background:#fff}
}
"#;

/// Everything a render needs, borrowed from the widget.
pub struct ViewContext<'a> {
    pub config: &'a WidgetConfig,
    pub state: &'a SessionState,
    pub form: &'a CategoryForm,
    pub result: &'a CategoryResult,
    pub translator: &'a Translator,
    pub formatter: &'a CurrencyFormatter,
}

impl ViewContext<'_> {
    fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    fn example(&self, value: &str) -> String {
        self.translator.translate_with("placeholder-example", &[("value", value)])
    }

    fn output(&self, id: OutputId) -> String {
        let amount = self
            .result
            .entries()
            .into_iter()
            .find(|(output, _)| *output == id)
            .map(|(_, amount)| amount)
            .unwrap_or(Decimal::ZERO);
        self.formatter.format(amount)
    }

    fn default_grams(&self) -> String {
        self.config.zakat.nisab_gold_grams.normalize().to_string()
    }

    /// Current text of an input. Shared fields are read from the session
    /// state so they survive a tab switch.
    fn field_value(&self, field: FieldId) -> String {
        match field {
            FieldId::GoldPrice => self.state.nisab_gold_price.clone(),
            FieldId::NisabGrams if self.state.nisab_grams.trim().is_empty() => self.default_grams(),
            FieldId::NisabGrams => self.state.nisab_grams.clone(),
            _ => self.form.value(field).unwrap_or_default().to_string(),
        }
    }
}

/// Colour variables from the config followed by the fixed sheet. `:host`
/// applies inside the shadow root, `.ia-host` in a plain page.
pub fn stylesheet(config: &WidgetConfig) -> String {
    format!(
        ":host, .ia-host{{ --ia-primary:{}; --ia-primary-dark:{};\n  --ia-bg:#ffffff; --ia-text:#0b1a10; --ia-muted:#6b7d70; --ia-border:#e3e8e5; --ia-soft:#f6faf7;\n  --ia-radius:16px; --ia-gap:14px; font-synthesis-weight:none; }}{}",
        config.primary, config.dark_primary, BASE_CSS
    )
}

/// The widget shell: stylesheet, header with tab bar, active view, footer.
pub fn render_widget(ctx: &ViewContext<'_>) -> Markup {
    let footer = format!("© {} {} • v{}", ctx.config.year, ctx.config.brand, ctx.config.version);
    html! {
        style { (PreEscaped(stylesheet(ctx.config))) }
        div.app {
            div.wrap {
                div.card {
                    div.header {
                        div.title {
                            div.logo { (initials(&ctx.config.brand)) }
                            div {
                                h1 { (ctx.t("app-title")) }
                                p.sub { (ctx.t("app-subtitle")) }
                            }
                        }
                        (tab_bar(ctx))
                    }
                    div.body id="view" { (render_view(ctx)) }
                    div.foot {
                        span { (footer) }
                        span {
                            span.link id=(ButtonId::Print.id()) { (ctx.t("footer-print")) }
                            " · "
                            span.link id=(ButtonId::Reset.id()) { (ctx.t("footer-reset")) }
                        }
                    }
                }
            }
        }
    }
}

/// A standalone document hosting the widget outside a shadow root.
pub fn render_page(ctx: &ViewContext<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(ctx.config.locale.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (ctx.t("app-title")) }
            }
            body {
                div id="ia-zakat-root" {
                    div class="ia-host" { (render_widget(ctx)) }
                }
            }
        }
    }
}

pub fn tab_bar(ctx: &ViewContext<'_>) -> Markup {
    let active = ctx.state.active_tab;
    html! {
        div.bar role="tablist" aria-label=(ctx.t("tablist-label")) {
            @for tab in Tab::iter() {
                button.tab type="button" role="tab"
                    aria-selected=(if tab == active { "true" } else { "false" })
                    data-tab=(tab.id()) {
                    (ctx.t(&tab.label_key()))
                }
            }
        }
    }
}

/// The body of the active tab: its form, results panel and notes.
pub fn render_view(ctx: &ViewContext<'_>) -> Markup {
    match ctx.form.tab() {
        Tab::Income => income_view(ctx),
        Tab::Savings => savings_view(ctx),
        Tab::PreciousMetals => metals_view(ctx),
        Tab::Business => business_view(ctx),
        Tab::Investments => investments_view(ctx),
        Tab::Retirement => retirement_view(ctx),
        Tab::Fitrah => fitrah_view(ctx),
        Tab::Info => info_view(ctx),
    }
}

fn initials(brand: &str) -> String {
    let capitals: String = brand.chars().filter(|c| c.is_uppercase()).take(2).collect();
    if capitals.is_empty() {
        brand.chars().take(1).collect::<String>().to_uppercase()
    } else {
        capitals
    }
}

fn number_field(ctx: &ViewContext<'_>, field: FieldId, label: Markup, example: Option<&str>) -> Markup {
    let placeholder = example.map(|value| ctx.example(value));
    html! {
        div {
            label for=(field.id()) { (label) }
            input id=(field.id()) type="number" inputmode="decimal" placeholder=[placeholder] value=(ctx.field_value(field));
        }
    }
}

fn labelled(ctx: &ViewContext<'_>, field: FieldId, label_key: &str, example: &str) -> Markup {
    number_field(ctx, field, html! { (ctx.t(label_key)) }, Some(example))
}

fn select_field(ctx: &ViewContext<'_>, field: FieldId, label_key: &str, options: &[(&str, &str)]) -> Markup {
    let current = ctx.field_value(field);
    html! {
        div {
            label for=(field.id()) { (ctx.t(label_key)) }
            select id=(field.id()) {
                @for (index, (value, text_key)) in options.iter().enumerate() {
                    option value=(value) selected[current == *value || (current.is_empty() && index == 0)] {
                        (ctx.t(text_key))
                    }
                }
            }
        }
    }
}

fn kpi(ctx: &ViewContext<'_>, output: OutputId, label_key: &str) -> Markup {
    html! {
        div.kpic {
            span { (ctx.t(label_key)) }
            b id=(output.id()) { (ctx.output(output)) }
        }
    }
}

fn button(ctx: &ViewContext<'_>, id: ButtonId, class: &str, label_key: &str) -> Markup {
    html! {
        button class=(class) type="button" id=(id.id()) { (ctx.t(label_key)) }
    }
}

fn results(ctx: &ViewContext<'_>, heading_key: &str, kpis: Markup, buttons: Markup) -> Markup {
    html! {
        div.section.sum {
            h3 { (ctx.t(heading_key)) }
            div.kpi { (kpis) }
            div.btns { (buttons) }
        }
    }
}

/// Base and payable amounts with a single copy button.
fn rated_results(ctx: &ViewContext<'_>, base_label: &str, copy: ButtonId) -> Markup {
    let (base, payable) = ctx.form.tab().outputs();
    let kpis = html! {
        (kpi(ctx, base, base_label))
        @if let Some(payable) = payable {
            (kpi(ctx, payable, "zakat-rate-label"))
        }
    };
    results(ctx, "results-heading", kpis, button(ctx, copy, "primary", "copy-zakat-button"))
}

fn income_view(ctx: &ViewContext<'_>) -> Markup {
    let gross_label = html! { (ctx.t("inc-gross-label")) " " small { (ctx.t("inc-gross-hint")) } };
    let kpis = html! {
        (kpi(ctx, OutputId::IncYearly, "inc-yearly-label"))
        (kpi(ctx, OutputId::IncZakat, "inc-zakat-label"))
    };
    let buttons = html! {
        (button(ctx, ButtonId::IncCopy, "primary", "copy-zakat-button"))
        (button(ctx, ButtonId::IncMonthly, "ghost", "inc-monthly-button"))
    };
    html! {
        div.grid {
            (number_field(ctx, FieldId::IncGross, gross_label, Some("5000")))
            (labelled(ctx, FieldId::IncMand, "inc-mand-label", "800"))
            (labelled(ctx, FieldId::IncEss, "inc-ess-label", "1500"))
            (labelled(ctx, FieldId::IncOth, "inc-oth-label", "400"))
            (select_field(ctx, FieldId::IncPeriod, "inc-period-label", &[("bulan", "inc-period-monthly"), ("tahun", "inc-period-yearly")]))
            (select_field(ctx, FieldId::IncBasis, "inc-basis-label", &[("net", "inc-basis-net"), ("simpanan", "inc-basis-savings")]))
        }
        (results(ctx, "results-heading", kpis, buttons))
        p.note { (ctx.t("inc-note")) }
    }
}

fn savings_view(ctx: &ViewContext<'_>) -> Markup {
    html! {
        div.grid {
            (labelled(ctx, FieldId::SavCash, "sav-cash-label", "800"))
            (labelled(ctx, FieldId::SavBank, "sav-bank-label", "5000"))
            (labelled(ctx, FieldId::SavFd, "sav-fd-label", "3000"))
            (labelled(ctx, FieldId::SavOther, "sav-other-label", "0"))
        }
        (rated_results(ctx, "sav-total-label", ButtonId::SavCopy))
    }
}

fn metals_view(ctx: &ViewContext<'_>) -> Markup {
    let grams = ctx.default_grams();
    let buttons = html! {
        (button(ctx, ButtonId::GpCopy, "primary", "copy-zakat-button"))
        (button(ctx, ButtonId::GpNisab, "ghost", "gp-nisab-button"))
    };
    let kpis = html! {
        (kpi(ctx, OutputId::GpTotal, "gp-total-label"))
        (kpi(ctx, OutputId::GpZakat, "zakat-rate-label"))
    };
    html! {
        div.grid {
            (labelled(ctx, FieldId::GoldPrice, "gold-price-label", "350"))
            (number_field(ctx, FieldId::NisabGrams, html! { (ctx.t("nisab-grams-label")) }, None))
            (labelled(ctx, FieldId::GoldWear, "gold-wear-label", "50"))
            (labelled(ctx, FieldId::GoldKeep, "gold-keep-label", "30"))
            (labelled(ctx, FieldId::GoldUruf, "gold-uruf-label", "0"))
            (labelled(ctx, FieldId::SilverGram, "silver-gram-label", "0"))
            (labelled(ctx, FieldId::SilverPrice, "silver-price-label", "3.5"))
        }
        (results(ctx, "results-heading", kpis, buttons))
        p.note { (ctx.translator.translate_with("gp-note", &[("grams", grams.as_str())])) }
    }
}

fn business_view(ctx: &ViewContext<'_>) -> Markup {
    html! {
        div.grid {
            (labelled(ctx, FieldId::BizAssets, "biz-assets-label", "120000"))
            (labelled(ctx, FieldId::BizLiab, "biz-liab-label", "50000"))
        }
        (rated_results(ctx, "biz-nett-label", ButtonId::BizCopy))
    }
}

fn investments_view(ctx: &ViewContext<'_>) -> Markup {
    html! {
        div class="grid-3" {
            (labelled(ctx, FieldId::InvAsb, "inv-asb-label", "10000"))
            (labelled(ctx, FieldId::InvTh, "inv-th-label", "8000"))
            (labelled(ctx, FieldId::InvStocks, "inv-stocks-label", "6000"))
            (labelled(ctx, FieldId::InvCrypto, "inv-crypto-label", "0"))
            (labelled(ctx, FieldId::InvOthers, "inv-others-label", "0"))
        }
        (rated_results(ctx, "inv-total-label", ButtonId::InvCopy))
        p.note { (ctx.t("inv-note")) }
    }
}

fn retirement_view(ctx: &ViewContext<'_>) -> Markup {
    html! {
        div.grid {
            (labelled(ctx, FieldId::KwspWithd, "kwsp-withd-label", "10000"))
            (labelled(ctx, FieldId::KwspBal, "kwsp-bal-label", "80000"))
        }
        (rated_results(ctx, "kwsp-base-label", ButtonId::KwspCopy))
        p.note {
            (ctx.t("kwsp-note-before")) " " em { (ctx.t("kwsp-note-emphasis")) } " " (ctx.t("kwsp-note-after"))
        }
    }
}

fn fitrah_view(ctx: &ViewContext<'_>) -> Markup {
    let kpis = kpi(ctx, OutputId::FitTotal, "fit-total-label");
    html! {
        div.grid {
            (labelled(ctx, FieldId::FitHeads, "fit-heads-label", "5"))
            (labelled(ctx, FieldId::FitRate, "fit-rate-label", "7"))
        }
        (results(ctx, "results-heading", kpis, button(ctx, ButtonId::FitCopy, "primary", "copy-total-button")))
        p.note { (ctx.t("fit-note")) }
    }
}

fn info_view(ctx: &ViewContext<'_>) -> Markup {
    let kpis = html! {
        (kpi(ctx, OutputId::InfoNisab, "info-nisab-label"))
        div.kpic {
            span { (ctx.t("info-rate-label")) }
            b { (ctx.t("info-rate-value")) }
        }
    };
    let buttons = html! {
        (button(ctx, ButtonId::InfoSave, "ghost", "info-save-button"))
        (button(ctx, ButtonId::InfoShare, "ghost", "info-share-button"))
    };
    html! {
        div.grid {
            (labelled(ctx, FieldId::GoldPrice, "info-gold-price-label", "350"))
            (number_field(ctx, FieldId::NisabGrams, html! { (ctx.t("nisab-grams-label")) }, None))
        }
        (results(ctx, "info-heading", kpis, buttons))
        div.hr {}
        div class="grid-1" {
            div.note {
                b { (ctx.t("disclaimer-title")) }
                " "
                (ctx.t("disclaimer-body"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zakat_core::config::ZakatConfig;

    fn render(tab: Tab, edit: impl FnOnce(&mut SessionState, &mut CategoryForm)) -> String {
        let config = WidgetConfig::default().with_year(2025);
        let mut state = SessionState::defaults(&config);
        state.active_tab = tab;
        let mut form = CategoryForm::for_tab(tab, &state);
        edit(&mut state, &mut form);
        let result = form.result(&state, &ZakatConfig::default());
        let translator = Translator::default();
        let formatter = CurrencyFormatter::default();
        let ctx = ViewContext {
            config: &config,
            state: &state,
            form: &form,
            result: &result,
            translator: &translator,
            formatter: &formatter,
        };
        render_widget(&ctx).into_string()
    }

    #[test]
    fn test_only_active_form_is_rendered() {
        let html = render(Tab::Savings, |_, _| {});
        assert!(html.contains(r#"id="sav_cash""#));
        assert!(!html.contains(r#"id="inc_gross""#));
        assert!(html.contains(r#"aria-selected="true" data-tab="simpanan""#));
        assert!(html.contains(r#"aria-selected="false" data-tab="pendapatan""#));
        assert!(html.contains(r#"<b id="sav_total">RM 0.00</b>"#));
        assert!(html.contains("© 2025 IlmuAlam • v1.0.0"));
    }

    #[test]
    fn test_shared_fields_prefilled() {
        let html = render(Tab::PreciousMetals, |state, _| state.nisab_gold_price = "350".to_string());
        assert!(html.contains(r#"id="goldPrice" type="number" inputmode="decimal" placeholder="cth: 350" value="350""#));
        assert!(html.contains(r#"id="nisabGrams" type="number" inputmode="decimal" value="85""#));
    }

    #[test]
    fn test_info_shows_nisab() {
        let html = render(Tab::Info, |state, _| state.nisab_gold_price = "350".to_string());
        assert!(html.contains(r#"<b id="info_nisab">RM 29,750.00</b>"#));
        assert!(html.contains(r#"id="info_share""#));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = render(Tab::Business, |_, form| {
            form.set(FieldId::BizAssets, r#""><script>"#);
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_stylesheet_uses_colours() {
        let css = stylesheet(&WidgetConfig::default().with_primary("#0055aa"));
        assert!(css.starts_with(":host, .ia-host{ --ia-primary:#0055aa; --ia-primary-dark:#1c7a3a;"));
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("IlmuAlam"), "IA");
        assert_eq!(initials("masjid"), "M");
    }
}
