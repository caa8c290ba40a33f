//! Typed model of the widget's forms.
//!
//! Every tab maps to one [`CategoryForm`] variant carrying the raw text of
//! its fields. Element ids are the wire format between the markup and the
//! browser binding, so each id enum serializes to exactly the id used in the
//! rendered HTML.

use rust_decimal::Decimal;
use strum::{EnumIter, EnumString, IntoStaticStr};
use zakat_core::prelude::*;

use crate::state::SessionState;

/// The tabs of the widget, identified by their query-string id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, IntoStaticStr, EnumIter)]
pub enum Tab {
    #[default]
    #[strum(serialize = "pendapatan")]
    Income,
    #[strum(serialize = "simpanan")]
    Savings,
    #[strum(serialize = "emas")]
    PreciousMetals,
    #[strum(serialize = "perniagaan")]
    Business,
    #[strum(serialize = "pelaburan")]
    Investments,
    #[strum(serialize = "kwsp")]
    Retirement,
    #[strum(serialize = "fitrah")]
    Fitrah,
    #[strum(serialize = "info")]
    Info,
}

impl Tab {
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        id.trim().parse().ok()
    }

    /// Translation key of the tab button label.
    pub fn label_key(self) -> String {
        format!("tab-{}", self.id())
    }

    pub fn wealth_type(self) -> Option<WealthType> {
        match self {
            Tab::Income => Some(WealthType::Income),
            Tab::Savings => Some(WealthType::Savings),
            Tab::PreciousMetals => Some(WealthType::PreciousMetals),
            Tab::Business => Some(WealthType::Business),
            Tab::Investments => Some(WealthType::Investment),
            Tab::Retirement => Some(WealthType::Retirement),
            Tab::Fitrah => Some(WealthType::Fitrah),
            Tab::Info => None,
        }
    }

    /// The input fields rendered on this tab, in display order.
    pub fn fields(self) -> &'static [FieldId] {
        use FieldId::*;
        match self {
            Tab::Income => &[IncGross, IncMand, IncEss, IncOth, IncPeriod, IncBasis],
            Tab::Savings => &[SavCash, SavBank, SavFd, SavOther],
            Tab::PreciousMetals => &[GoldPrice, NisabGrams, GoldWear, GoldKeep, GoldUruf, SilverGram, SilverPrice],
            Tab::Business => &[BizAssets, BizLiab],
            Tab::Investments => &[InvAsb, InvTh, InvStocks, InvCrypto, InvOthers],
            Tab::Retirement => &[KwspWithd, KwspBal],
            Tab::Fitrah => &[FitHeads, FitRate],
            Tab::Info => &[GoldPrice, NisabGrams],
        }
    }

    /// Results panel element ids: the base amount, then the payable amount
    /// where the tab has one.
    pub fn outputs(self) -> (OutputId, Option<OutputId>) {
        match self {
            Tab::Income => (OutputId::IncYearly, Some(OutputId::IncZakat)),
            Tab::Savings => (OutputId::SavTotal, Some(OutputId::SavZakat)),
            Tab::PreciousMetals => (OutputId::GpTotal, Some(OutputId::GpZakat)),
            Tab::Business => (OutputId::BizNett, Some(OutputId::BizZakat)),
            Tab::Investments => (OutputId::InvTotal, Some(OutputId::InvZakat)),
            Tab::Retirement => (OutputId::KwspBase, Some(OutputId::KwspZakat)),
            Tab::Fitrah => (OutputId::FitTotal, None),
            Tab::Info => (OutputId::InfoNisab, None),
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// State fields that outlive a tab switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharedField {
    GoldPrice,
    NisabGrams,
    FitrahPerHead,
}

/// Input element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum FieldId {
    #[strum(serialize = "inc_gross")]
    IncGross,
    #[strum(serialize = "inc_mand")]
    IncMand,
    #[strum(serialize = "inc_ess")]
    IncEss,
    #[strum(serialize = "inc_oth")]
    IncOth,
    #[strum(serialize = "inc_period")]
    IncPeriod,
    #[strum(serialize = "inc_basis")]
    IncBasis,
    #[strum(serialize = "sav_cash")]
    SavCash,
    #[strum(serialize = "sav_bank")]
    SavBank,
    #[strum(serialize = "sav_fd")]
    SavFd,
    #[strum(serialize = "sav_other")]
    SavOther,
    #[strum(serialize = "goldPrice")]
    GoldPrice,
    #[strum(serialize = "nisabGrams")]
    NisabGrams,
    #[strum(serialize = "gold_wear")]
    GoldWear,
    #[strum(serialize = "gold_keep")]
    GoldKeep,
    #[strum(serialize = "gold_uruf")]
    GoldUruf,
    #[strum(serialize = "silver_gram")]
    SilverGram,
    #[strum(serialize = "silver_price")]
    SilverPrice,
    #[strum(serialize = "biz_assets")]
    BizAssets,
    #[strum(serialize = "biz_liab")]
    BizLiab,
    #[strum(serialize = "inv_asb")]
    InvAsb,
    #[strum(serialize = "inv_th")]
    InvTh,
    #[strum(serialize = "inv_stocks")]
    InvStocks,
    #[strum(serialize = "inv_crypto")]
    InvCrypto,
    #[strum(serialize = "inv_others")]
    InvOthers,
    #[strum(serialize = "kwsp_withd")]
    KwspWithd,
    #[strum(serialize = "kwsp_bal")]
    KwspBal,
    #[strum(serialize = "fit_heads")]
    FitHeads,
    #[strum(serialize = "fit_rate")]
    FitRate,
}

impl FieldId {
    pub fn id(self) -> &'static str {
        self.into()
    }

    pub fn from_id(id: &str) -> Option<Self> {
        id.parse().ok()
    }

    /// The state field this input writes through to, if any.
    pub fn shared(self) -> Option<SharedField> {
        match self {
            FieldId::GoldPrice => Some(SharedField::GoldPrice),
            FieldId::NisabGrams => Some(SharedField::NisabGrams),
            FieldId::FitRate => Some(SharedField::FitrahPerHead),
            _ => None,
        }
    }
}

/// Results panel element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum OutputId {
    #[strum(serialize = "inc_yearly")]
    IncYearly,
    #[strum(serialize = "inc_zakat")]
    IncZakat,
    #[strum(serialize = "sav_total")]
    SavTotal,
    #[strum(serialize = "sav_zakat")]
    SavZakat,
    #[strum(serialize = "gp_total")]
    GpTotal,
    #[strum(serialize = "gp_zakat")]
    GpZakat,
    #[strum(serialize = "biz_nett")]
    BizNett,
    #[strum(serialize = "biz_zakat")]
    BizZakat,
    #[strum(serialize = "inv_total")]
    InvTotal,
    #[strum(serialize = "inv_zakat")]
    InvZakat,
    #[strum(serialize = "kwsp_base")]
    KwspBase,
    #[strum(serialize = "kwsp_zakat")]
    KwspZakat,
    #[strum(serialize = "fit_total")]
    FitTotal,
    #[strum(serialize = "info_nisab")]
    InfoNisab,
}

impl OutputId {
    pub fn id(self) -> &'static str {
        self.into()
    }
}

/// Button element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum ButtonId {
    #[strum(serialize = "inc_copy")]
    IncCopy,
    #[strum(serialize = "inc_monthly")]
    IncMonthly,
    #[strum(serialize = "sav_copy")]
    SavCopy,
    #[strum(serialize = "gp_copy")]
    GpCopy,
    #[strum(serialize = "gp_nisab")]
    GpNisab,
    #[strum(serialize = "biz_copy")]
    BizCopy,
    #[strum(serialize = "inv_copy")]
    InvCopy,
    #[strum(serialize = "kwsp_copy")]
    KwspCopy,
    #[strum(serialize = "fit_copy")]
    FitCopy,
    #[strum(serialize = "info_save")]
    InfoSave,
    #[strum(serialize = "info_share")]
    InfoShare,
    #[strum(serialize = "printBtn")]
    Print,
    #[strum(serialize = "resetBtn")]
    Reset,
}

impl ButtonId {
    pub fn id(self) -> &'static str {
        self.into()
    }

    pub fn from_id(id: &str) -> Option<Self> {
        id.parse().ok()
    }

    pub fn action(self) -> Action {
        match self {
            ButtonId::IncCopy
            | ButtonId::SavCopy
            | ButtonId::GpCopy
            | ButtonId::BizCopy
            | ButtonId::InvCopy
            | ButtonId::KwspCopy
            | ButtonId::FitCopy => Action::CopyAmount,
            ButtonId::IncMonthly => Action::MonthlyInstallment,
            ButtonId::GpNisab => Action::ShowNisab,
            ButtonId::InfoSave => Action::SaveShared,
            ButtonId::InfoShare => Action::ShareLink,
            ButtonId::Print => Action::Print,
            ButtonId::Reset => Action::Reset,
        }
    }
}

/// What a button asks the widget to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Copy the amount due of the active tab.
    CopyAmount,
    /// Show the payable amount divided into monthly installments.
    MonthlyInstallment,
    ShowNisab,
    SaveShared,
    /// Copy the current page link.
    ShareLink,
    Print,
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeForm {
    pub gross: String,
    pub mandatory: String,
    pub essentials: String,
    pub other: String,
    pub period: String,
    pub basis: String,
}

impl IncomeForm {
    pub fn calculator(&self) -> IncomeZakatCalculator {
        IncomeZakatCalculator::new()
            .gross(&self.gross)
            .mandatory(&self.mandatory)
            .essentials(&self.essentials)
            .other(&self.other)
            .period(IncomePeriod::from_form_value(&self.period))
            .basis(IncomeBasis::from_form_value(&self.basis))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavingsForm {
    pub cash: String,
    pub bank: String,
    pub fixed_deposit: String,
    pub other: String,
}

impl SavingsForm {
    pub fn calculator(&self) -> SavingsAssets {
        SavingsAssets::new()
            .cash(&self.cash)
            .bank(&self.bank)
            .fixed_deposit(&self.fixed_deposit)
            .other(&self.other)
    }
}

/// Gold and silver holdings. The gold price is a shared field and comes
/// from the session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetalsForm {
    pub worn: String,
    pub kept: String,
    pub exempt: String,
    pub silver_grams: String,
    pub silver_price: String,
}

impl MetalsForm {
    pub fn calculator(&self, gold_price: Decimal) -> PreciousMetals {
        PreciousMetals::new()
            .worn(&self.worn)
            .kept(&self.kept)
            .exempt(&self.exempt)
            .gold_price(gold_price)
            .silver(&self.silver_grams)
            .silver_price(&self.silver_price)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessForm {
    pub assets: String,
    pub liabilities: String,
}

impl BusinessForm {
    pub fn calculator(&self) -> BusinessAssets {
        BusinessAssets::new(&self.assets, &self.liabilities)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestmentForm {
    pub unit_trust: String,
    pub pilgrimage_fund: String,
    pub stocks: String,
    pub crypto: String,
    pub other: String,
}

impl InvestmentForm {
    pub fn calculator(&self) -> InvestmentAssets {
        InvestmentAssets::new()
            .unit_trust(&self.unit_trust)
            .pilgrimage_fund(&self.pilgrimage_fund)
            .stocks(&self.stocks)
            .crypto(&self.crypto)
            .other(&self.other)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetirementForm {
    pub withdrawn: String,
    pub balance: String,
}

impl RetirementForm {
    pub fn calculator(&self) -> RetirementWithdrawal {
        RetirementWithdrawal::new(&self.withdrawn).with_balance(&self.balance)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FitrahForm {
    pub heads: String,
    pub rate: String,
}

impl FitrahForm {
    pub fn calculator(&self, fallback_rate: Decimal) -> FitrahCalculator {
        FitrahCalculator::new(&self.heads)
            .rate(&self.rate)
            .fallback_rate(fallback_rate)
    }
}

/// The mounted form of the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryForm {
    Income(IncomeForm),
    Savings(SavingsForm),
    PreciousMetals(MetalsForm),
    Business(BusinessForm),
    Investments(InvestmentForm),
    Retirement(RetirementForm),
    Fitrah(FitrahForm),
    Info,
}

impl Default for CategoryForm {
    fn default() -> Self {
        CategoryForm::Income(IncomeForm::default())
    }
}

macro_rules! field_slots {
    ($($variant:ident { $($field:ident => $slot:ident),+ $(,)? }),+ $(,)?) => {
        impl CategoryForm {
            /// Raw text held for `field`, if this form owns it.
            pub fn value(&self, field: FieldId) -> Option<&str> {
                match (self, field) {
                    $($( (CategoryForm::$variant(form), FieldId::$field) => Some(form.$slot.as_str()), )+)+
                    _ => None,
                }
            }

            fn slot_mut(&mut self, field: FieldId) -> Option<&mut String> {
                match (self, field) {
                    $($( (CategoryForm::$variant(form), FieldId::$field) => Some(&mut form.$slot), )+)+
                    _ => None,
                }
            }
        }
    };
}

field_slots! {
    Income {
        IncGross => gross,
        IncMand => mandatory,
        IncEss => essentials,
        IncOth => other,
        IncPeriod => period,
        IncBasis => basis,
    },
    Savings { SavCash => cash, SavBank => bank, SavFd => fixed_deposit, SavOther => other },
    PreciousMetals {
        GoldWear => worn,
        GoldKeep => kept,
        GoldUruf => exempt,
        SilverGram => silver_grams,
        SilverPrice => silver_price,
    },
    Business { BizAssets => assets, BizLiab => liabilities },
    Investments {
        InvAsb => unit_trust,
        InvTh => pilgrimage_fund,
        InvStocks => stocks,
        InvCrypto => crypto,
        InvOthers => other,
    },
    Retirement { KwspWithd => withdrawn, KwspBal => balance },
    Fitrah { FitHeads => heads, FitRate => rate },
}

impl CategoryForm {
    /// A freshly mounted, empty form for `tab`. The per-head rate field is
    /// pre-filled from the session state.
    pub fn for_tab(tab: Tab, state: &SessionState) -> Self {
        match tab {
            Tab::Income => CategoryForm::Income(IncomeForm::default()),
            Tab::Savings => CategoryForm::Savings(SavingsForm::default()),
            Tab::PreciousMetals => CategoryForm::PreciousMetals(MetalsForm::default()),
            Tab::Business => CategoryForm::Business(BusinessForm::default()),
            Tab::Investments => CategoryForm::Investments(InvestmentForm::default()),
            Tab::Retirement => CategoryForm::Retirement(RetirementForm::default()),
            Tab::Fitrah => CategoryForm::Fitrah(FitrahForm {
                rate: state.fitrah_per_head.clone(),
                ..Default::default()
            }),
            Tab::Info => CategoryForm::Info,
        }
    }

    pub fn tab(&self) -> Tab {
        match self {
            CategoryForm::Income(_) => Tab::Income,
            CategoryForm::Savings(_) => Tab::Savings,
            CategoryForm::PreciousMetals(_) => Tab::PreciousMetals,
            CategoryForm::Business(_) => Tab::Business,
            CategoryForm::Investments(_) => Tab::Investments,
            CategoryForm::Retirement(_) => Tab::Retirement,
            CategoryForm::Fitrah(_) => Tab::Fitrah,
            CategoryForm::Info => Tab::Info,
        }
    }

    /// Whether `field` is rendered on this form.
    pub fn shows(&self, field: FieldId) -> bool {
        self.tab().fields().contains(&field)
    }

    /// Stores raw text for a field this form owns. Shared fields held only in
    /// the session state (gold price, nisab grams) are not stored here.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) -> bool {
        match self.slot_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Runs the calculator of this form. `None` on the info tab.
    pub fn calculate(&self, state: &SessionState, config: &ZakatConfig) -> Option<ZakatDetails> {
        let details = match self {
            CategoryForm::Income(form) => form.calculator().calculate_or_zero(config),
            CategoryForm::Savings(form) => form.calculator().calculate_or_zero(config),
            CategoryForm::PreciousMetals(form) => form.calculator(state.gold_price()).calculate_or_zero(config),
            CategoryForm::Business(form) => form.calculator().calculate_or_zero(config),
            CategoryForm::Investments(form) => form.calculator().calculate_or_zero(config),
            CategoryForm::Retirement(form) => form.calculator().calculate_or_zero(config),
            CategoryForm::Fitrah(form) => form.calculator(state.fitrah_rate()).calculate_or_zero(config),
            CategoryForm::Info => return None,
        };
        Some(details)
    }

    /// Calculates the results panel of this form.
    pub fn result(&self, state: &SessionState, config: &ZakatConfig) -> CategoryResult {
        CategoryResult {
            tab: self.tab(),
            details: self.calculate(state, config),
            nisab: state.nisab(config).threshold(),
        }
    }
}

/// Ephemeral results of the mounted form, recomputed on every event.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResult {
    pub tab: Tab,
    pub details: Option<ZakatDetails>,
    pub nisab: Decimal,
}

impl CategoryResult {
    /// The amount a copy button hands over: payable amount, or the total for
    /// the per-head fee. `None` on the info tab.
    pub fn amount_due(&self) -> Option<Decimal> {
        self.details.as_ref().map(ZakatDetails::amount_due)
    }

    /// Values for the results panel, keyed by element id.
    pub fn entries(&self) -> Vec<(OutputId, Decimal)> {
        let (base, payable) = self.tab.outputs();
        let Some(details) = &self.details else {
            return vec![(base, self.nisab)];
        };

        let mut entries = vec![(base, details.eligible_amount)];
        if let Some(payable) = payable {
            entries.push((payable, details.zakat_due.unwrap_or(Decimal::ZERO)));
        }
        entries
    }
}
