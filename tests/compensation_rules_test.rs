//! Regras de remuneração pela API pública

mod common;

use chrono::{Datelike, Months, Utc};
use common::{dec, state};
use kingcrop_engine::{
    models::{Lead, Shift},
    DateInput,
};
use rust_decimal::Decimal;
use serde_json::json;

fn shift(value: serde_json::Value) -> Shift {
    serde_json::from_value(value).unwrap()
}

fn lead(value: serde_json::Value) -> Lead {
    serde_json::from_value(value).unwrap()
}

#[test]
fn reimbursement_by_vehicle() {
    let svc = state().compensation_service;
    for miles in ["0", "1", "12.5", "300"] {
        for tolls in ["0", "4.75"] {
            assert_eq!(
                svc.calculate_reimbursement(dec(miles), dec(tolls), true),
                dec(miles) * dec("0.35") + dec(tolls)
            );
            assert_eq!(
                svc.calculate_reimbursement(dec(miles), dec(tolls), false),
                dec(miles) * dec("0.20") + dec(tolls)
            );
        }
    }
}

#[test]
fn hourly_rate_known_points() {
    let svc = state().compensation_service;
    assert_eq!(svc.calculate_hourly_rate(0), dec("20"));
    assert_eq!(svc.calculate_hourly_rate(100), dec("30"));
    assert_eq!(svc.calculate_hourly_rate(1000), dec("30"));
}

#[test]
fn commission_on_one_thousand() {
    let svc = state().compensation_service;
    assert_eq!(svc.calculate_rep_commission(dec("1000")), dec("20.00"));
    assert_eq!(svc.calculate_company_commission(dec("1000")), dec("50.00"));
}

#[test]
fn client_revenue_examples() {
    let svc = state().billing_service;
    let base = json!({ "hoursWorked": 4, "region": "NYC", "milesTraveled": 0, "tollAmount": 0 });
    assert_eq!(svc.calculate_shift_client_revenue(&shift(base)), dec("200"));

    let li = json!({ "hoursWorked": 4, "region": "LI", "milesTraveled": 0, "tollAmount": 0 });
    assert_eq!(svc.calculate_shift_client_revenue(&shift(li)), dec("220"));

    let miles = json!({ "hoursWorked": 4, "region": "NYC", "milesTraveled": 10, "tollAmount": 0 });
    assert_eq!(svc.calculate_shift_client_revenue(&shift(miles)), dec("207"));
}

#[test]
fn net_profit_from_audit_scenario() {
    // 4h NYC, $15 de pedágio, sem milhagem: 215 - (80 + 15)
    let svc = state().billing_service;
    let s = shift(json!({ "hoursWorked": 4, "tollAmount": 15, "hasVehicle": true }));
    assert_eq!(svc.calculate_shift_net_profit(&s, dec("20")), dec("120"));
}

#[test]
fn milestones() {
    let svc = state().compensation_service;
    assert_eq!(svc.get_milestone_bonus(10), dec("100"));
    assert_eq!(svc.get_milestone_bonus(15), Decimal::ZERO);
    assert_eq!(svc.get_milestone_bonus(110), Decimal::ZERO);
    assert_eq!(svc.calculate_total_lifetime_bonuses(30), dec("600"));
    assert_eq!(
        svc.calculate_total_lifetime_bonuses(105),
        svc.calculate_total_lifetime_bonuses(100)
    );
}

// Mesmos cenários do script de verificação da regra Space Poppers,
// contra o relógio real
fn months_ago(n: u32) -> DateInput {
    let today = Utc::now().date_naive();
    let fifteenth = today.with_day0(14).unwrap();
    let date = fifteenth - Months::new(n);
    DateInput::from(date.and_hms_opt(12, 0, 0).unwrap().and_utc())
}

#[test]
fn space_poppers_scenarios() {
    let svc = state().activity_service;

    let store_a = Lead {
        active_brands: Some(vec!["Space Poppers".into()]),
        first_sale_date: Some(months_ago(5)),
        status: Some("Sold".into()),
        ..Default::default()
    };
    let store_b = Lead {
        first_sale_date: Some(months_ago(10)),
        ..store_a.clone()
    };
    let store_c = Lead {
        active_brands: Some(vec!["Space Poppers".into(), "Green Giants".into()]),
        ..store_b.clone()
    };
    let store_d = Lead {
        status: Some("Sold".into()),
        first_sale_date: Some(months_ago(20)),
        ..Default::default()
    };

    assert!(svc.is_store_active(&store_a));
    assert!(!svc.is_store_active(&store_b));
    assert!(svc.is_store_active(&store_c));
    assert!(svc.is_store_active(&store_d));
    assert!(svc.is_store_active(&lead(json!({ "status": "Sold" }))));
}

#[test]
fn rep_score_for_todays_new_customer() {
    let svc = state().scoring_service;
    let leads = vec![Lead {
        status: Some("Sold".into()),
        sale_type: Some("New Customer".into()),
        amount: dec("500"),
        date: Some(DateInput::from(Utc::now())),
        ..Default::default()
    }];
    assert_eq!(svc.calculate_rep_score(&leads), dec("11"));
    // puro: mesma entrada, mesmo resultado
    assert_eq!(svc.calculate_rep_score(&leads), svc.calculate_rep_score(&leads));
}

#[test]
fn rep_score_ignores_other_quarters() {
    let svc = state().scoring_service;
    let last_year = Utc::now() - chrono::Duration::days(400);
    let leads = vec![Lead {
        status: Some("Sold".into()),
        sale_type: Some("New Customer".into()),
        amount: dec("100000"),
        date: Some(DateInput::from(last_year)),
        ..Default::default()
    }];
    assert_eq!(svc.calculate_rep_score(&leads), Decimal::ZERO);
}

#[test]
fn quarter_helpers_agree_with_the_clock() {
    let now = Utc::now();
    let label = kingcrop_engine::current_quarter_label();
    assert_eq!(label, format!("Q{} {}", now.month0() / 3 + 1, now.year()));
    assert!(kingcrop_engine::is_in_current_quarter(Some(&DateInput::from(now))));
    assert!(!kingcrop_engine::is_in_current_quarter(None));
}
