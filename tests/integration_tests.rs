//! Integration tests for order-tax-engine

use bigdecimal::BigDecimal;
use order_tax_engine::{
    handle_calculate_taxes, FlatRateResolver, NegativeAmountPolicy, OrderBuilder,
    OrderTaxResponse, TaxClassRateResolver, TaxEngine, TaxEngineConfig, TaxError, WebhookError,
    WebhookRequest,
};
use std::str::FromStr;

fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

fn rate() -> BigDecimal {
    dec("0.23")
}

fn assert_line(response: &OrderTaxResponse, index: usize, net: &str, gross: &str, rate: &str) {
    let line = &response.lines[index];
    assert_eq!(line.total_net_amount, net, "net of line {}", index);
    assert_eq!(line.total_gross_amount, gross, "gross of line {}", index);
    assert_eq!(line.tax_rate, rate, "rate of line {}", index);
}

#[test]
fn test_no_discounts_tax_inclusive() {
    let order = OrderBuilder::new(true)
        .shipping(dec("12.30"), rate())
        .line("line-1", dec("60.00"), rate())
        .build()
        .unwrap();

    let response = TaxEngine::default().calculate(&order).unwrap();

    assert_eq!(response.shipping_price_net_amount, "10.00");
    assert_eq!(response.shipping_price_gross_amount, "12.30");
    assert_eq!(response.shipping_tax_rate, "23.00");
    assert_line(&response, 0, "48.78", "60.00", "23.00");
}

// Raw base is 92.30 (12.30 + 60.00 + 20.00) so the discount share is 3/92.30
// of each unit's raw amount.
fn discounted_order(prices_entered_with_tax: bool) -> order_tax_engine::OrderTaxContext {
    OrderBuilder::new(prices_entered_with_tax)
        .shipping(dec("12.30"), rate())
        .line("line-1", dec("60.00"), rate())
        .line("line-2", dec("20.00"), rate())
        .discount(dec("1.00"))
        .discount(dec("2.00"))
        .build()
        .unwrap()
}

#[test]
fn test_discounts_tax_inclusive() {
    let response = TaxEngine::default()
        .calculate(&discounted_order(true))
        .unwrap();

    assert_eq!(response.shipping_price_gross_amount, "11.90");
    assert_eq!(response.shipping_price_net_amount, "9.67");
    assert_line(&response, 0, "47.19", "58.05", "23.00");
    assert_line(&response, 1, "15.73", "19.35", "23.00");
}

#[test]
fn test_discounts_tax_exclusive() {
    let response = TaxEngine::default()
        .calculate(&discounted_order(false))
        .unwrap();

    assert_eq!(response.shipping_price_net_amount, "11.90");
    assert_eq!(response.shipping_price_gross_amount, "14.64");
    assert_eq!(response.shipping_tax_rate, "23.00");
    assert_line(&response, 0, "58.05", "71.40", "23.00");
    assert_line(&response, 1, "19.35", "23.80", "23.00");
}

#[test]
fn test_exempt_line_without_discounts() {
    let order = OrderBuilder::new(true)
        .shipping(dec("12.30"), rate())
        .line("taxed", dec("60.00"), rate())
        .exempt_line("exempt", dec("60.00"))
        .build()
        .unwrap();

    let response = TaxEngine::default().calculate(&order).unwrap();

    assert_line(&response, 0, "48.78", "60.00", "23.00");
    assert_line(&response, 1, "60.00", "60.00", "0.00");
}

#[test]
fn test_exempt_line_still_takes_discount_share() {
    let order = OrderBuilder::new(true)
        .shipping(dec("12.30"), rate())
        .line("taxed", dec("60.00"), rate())
        .exempt_line("exempt", dec("60.00"))
        .discount(dec("3.00"))
        .build()
        .unwrap();

    let response = TaxEngine::default().calculate(&order).unwrap();

    assert_eq!(response.shipping_price_gross_amount, "12.02");
    assert_eq!(response.shipping_price_net_amount, "9.77");
    assert_line(&response, 0, "47.67", "58.64", "23.00");
    assert_line(&response, 1, "58.64", "58.64", "0.00");
}

#[test]
fn test_all_lines_exempt() {
    let order = OrderBuilder::new(false)
        .exempt_line("a", dec("19.99"))
        .exempt_line("b", dec("5.00"))
        .exempt_line("c", dec("0.10"))
        .build()
        .unwrap();

    let response = TaxEngine::default().calculate(&order).unwrap();

    assert_line(&response, 0, "19.99", "19.99", "0.00");
    assert_line(&response, 1, "5.00", "5.00", "0.00");
    assert_line(&response, 2, "0.10", "0.10", "0.00");
    assert_eq!(response.shipping_price_net_amount, "0.00");
    assert_eq!(response.shipping_tax_rate, "0.00");
}

#[test]
fn test_duplicate_products_are_not_merged() {
    let order = OrderBuilder::new(true)
        .line("line-1", dec("10.00"), rate())
        .line("line-1", dec("30.00"), rate())
        .line("line-2", dec("10.00"), rate())
        .build()
        .unwrap();

    let response = TaxEngine::default().calculate(&order).unwrap();

    assert_eq!(response.lines.len(), 3);
    assert_line(&response, 0, "8.13", "10.00", "23.00");
    assert_line(&response, 1, "24.39", "30.00", "23.00");
    assert_line(&response, 2, "8.13", "10.00", "23.00");
}

#[test]
fn test_zero_base_discount_is_reported() {
    let order = OrderBuilder::new(true)
        .line("free", dec("0"), rate())
        .discount(dec("3.00"))
        .build()
        .unwrap();

    let result = TaxEngine::default().calculate(&order);

    assert!(matches!(result, Err(TaxError::DivisionByZero { .. })));
}

#[test]
fn test_clamp_policy_from_config() {
    let config =
        TaxEngineConfig::from_json_str(r#"{"negative_amount_policy": "clamp_to_zero"}"#).unwrap();
    assert_eq!(config.negative_amount_policy, NegativeAmountPolicy::ClampToZero);

    let order = OrderBuilder::new(true)
        .line("line-1", dec("5.00"), rate())
        .discount(dec("8.00"))
        .build()
        .unwrap();

    let clamped = TaxEngine::new(config).calculate(&order).unwrap();
    let unclamped = TaxEngine::default().calculate(&order).unwrap();

    assert_line(&clamped, 0, "0.00", "0.00", "23.00");
    assert_line(&unclamped, 0, "-2.44", "-3.00", "23.00");
}

fn webhook(body: &str) -> WebhookRequest {
    WebhookRequest {
        domain: Some("shop.example.com".to_string()),
        event: Some("ORDER_CALCULATE_TAXES".to_string()),
        signature: Some("signed".to_string()),
        body: body.as_bytes().to_vec(),
    }
}

fn verifier(domain: &str, _payload: &[u8], signature: &str) -> bool {
    domain == "shop.example.com" && signature == "signed"
}

const ORDER_BODY: &str = r#"{
    "taxBase": {
        "pricesEnteredWithTax": true,
        "currency": "EUR",
        "shippingPrice": {"amount": "12.30"},
        "lines": [
            {"id": "T3JkZXJMaW5lOjE=", "totalPrice": {"amount": "60.00"}, "quantity": 2},
            {"id": "T3JkZXJMaW5lOjI=", "totalPrice": {"amount": "60.00"}, "taxExempt": true}
        ],
        "discounts": [{"amount": {"amount": "1.50"}}, {"amount": {"amount": "1.50"}}]
    }
}"#;

#[test]
fn test_webhook_end_to_end() {
    let resolver = FlatRateResolver::new(rate()).unwrap();
    let engine = TaxEngine::default();

    let response =
        handle_calculate_taxes(&webhook(ORDER_BODY), &verifier, &resolver, &engine).unwrap();

    assert_eq!(response.shipping_price_gross_amount, "12.02");
    assert_line(&response, 0, "47.67", "58.64", "23.00");
    assert_line(&response, 1, "58.64", "58.64", "0.00");

    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert_eq!(json["lines"].as_array().unwrap().len(), 2);
    assert_eq!(json["shipping_tax_rate"], "23.00");
}

#[test]
fn test_webhook_numeric_amounts_round_from_entered_value() {
    let body = r#"{
        "taxBase": {
            "pricesEnteredWithTax": false,
            "shippingPrice": {"amount": 0.30},
            "lines": [{"id": "l1", "totalPrice": {"amount": 0.30}}]
        }
    }"#;
    let resolver = FlatRateResolver::new(dec("0.05")).unwrap();
    let engine = TaxEngine::default();

    let response = handle_calculate_taxes(&webhook(body), &verifier, &resolver, &engine).unwrap();

    // 0.30 * 1.05 = 0.315 exactly, which rounds up
    assert_eq!(response.shipping_price_net_amount, "0.30");
    assert_eq!(response.shipping_price_gross_amount, "0.32");
    assert_line(&response, 0, "0.30", "0.32", "5.00");
}

#[test]
fn test_webhook_rejections_short_circuit() {
    let resolver = FlatRateResolver::new(rate()).unwrap();
    let engine = TaxEngine::default();

    let no_domain = WebhookRequest {
        domain: None,
        ..webhook(ORDER_BODY)
    };
    let no_event = WebhookRequest {
        event: None,
        ..webhook(ORDER_BODY)
    };
    let forged = WebhookRequest {
        signature: Some("forged".to_string()),
        ..webhook("not even json")
    };

    let err = handle_calculate_taxes(&no_domain, &verifier, &resolver, &engine).unwrap_err();
    assert!(matches!(err, WebhookError::MissingMerchantContext));

    let err = handle_calculate_taxes(&no_event, &verifier, &resolver, &engine).unwrap_err();
    assert!(matches!(err, WebhookError::MissingEventType));

    let err = handle_calculate_taxes(&forged, &verifier, &resolver, &engine).unwrap_err();
    assert!(matches!(err, WebhookError::AuthenticationFailed(_)));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_webhook_invalid_payload_and_rates() {
    let engine = TaxEngine::default();
    let flat = FlatRateResolver::new(rate()).unwrap();

    let err = handle_calculate_taxes(&webhook("{}"), &verifier, &flat, &engine).unwrap_err();
    assert!(matches!(err, WebhookError::InvalidPayload(_)));

    let body = r#"{"taxBase": {
        "pricesEnteredWithTax": false,
        "shippingPrice": {"amount": "5.00"},
        "lines": [{"id": "l1", "totalPrice": {"amount": "10.00"}, "taxClass": "wine"}]
    }}"#;
    let classes = TaxClassRateResolver::new(rate()).unwrap();

    let err = handle_calculate_taxes(&webhook(body), &verifier, &classes, &engine).unwrap_err();
    assert!(matches!(err, WebhookError::Engine(TaxError::RateNotFound(_))));
    assert_eq!(err.status_code(), 500);

    let negative = r#"{"taxBase": {
        "pricesEnteredWithTax": false,
        "shippingPrice": {"amount": "-5.00"}
    }}"#;
    let err = handle_calculate_taxes(&webhook(negative), &verifier, &flat, &engine).unwrap_err();
    assert!(matches!(err, WebhookError::Engine(TaxError::InvalidAmount(_))));
}
