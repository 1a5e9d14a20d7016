//! Order tax calculation examples

use bigdecimal::BigDecimal;
use order_tax_engine::{
    handle_calculate_taxes, OrderBuilder, OrderTaxResponse, TaxClassRateResolver, TaxEngine,
    TaxEngineConfig, WebhookRequest,
};
use std::str::FromStr;

fn print_response(response: &OrderTaxResponse) {
    println!(
        "  Shipping: net {} / gross {} @ {}%",
        response.shipping_price_net_amount,
        response.shipping_price_gross_amount,
        response.shipping_tax_rate
    );
    for (i, line) in response.lines.iter().enumerate() {
        println!(
            "  Line {}:   net {} / gross {} @ {}%",
            i + 1,
            line.total_net_amount,
            line.total_gross_amount,
            line.tax_rate
        );
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Order Tax Engine - Calculation Examples\n");

    let rate = BigDecimal::from_str("0.23")?;
    let engine = TaxEngine::default();

    // 1. Prices entered with tax, no discounts
    println!("📊 Tax-inclusive prices, no discounts:");
    let order = OrderBuilder::new(true)
        .shipping(BigDecimal::from_str("12.30")?, rate.clone())
        .line("line-1", BigDecimal::from(60), rate.clone())
        .build()?;
    print_response(&engine.calculate(&order)?);

    // 2. Same order entered net, with two vouchers
    println!("🏷️ Tax-exclusive prices, vouchers of 1.00 and 2.00:");
    let order = OrderBuilder::new(false)
        .shipping(BigDecimal::from_str("12.30")?, rate.clone())
        .line("line-1", BigDecimal::from(60), rate.clone())
        .line("line-2", BigDecimal::from(20), rate.clone())
        .discount(BigDecimal::from(1))
        .discount(BigDecimal::from(2))
        .build()?;
    print_response(&engine.calculate(&order)?);

    // 3. Exempt line still takes its share of the voucher
    println!("🚫 Exempt line with a 3.00 voucher:");
    let order = OrderBuilder::new(true)
        .shipping(BigDecimal::from_str("12.30")?, rate.clone())
        .line("taxed", BigDecimal::from(60), rate.clone())
        .exempt_line("exempt", BigDecimal::from(60))
        .discount(BigDecimal::from(3))
        .build()?;
    let breakdown = engine.breakdown(&order)?;
    for unit in &breakdown.allocation.units {
        println!(
            "  {:<8} raw {} - share {} = {}",
            unit.id, unit.raw_amount, unit.discount_share.round(4), unit.discounted_amount.round(4)
        );
    }
    print_response(&breakdown.to_response());

    // 4. Clamping oversized discounts
    println!("⚙️ Oversized voucher with clamping enabled:");
    let config = TaxEngineConfig::from_json_str(r#"{"negative_amount_policy": "clamp_to_zero"}"#)?;
    let order = OrderBuilder::new(true)
        .line("line-1", BigDecimal::from(5), rate.clone())
        .discount(BigDecimal::from(8))
        .build()?;
    print_response(&TaxEngine::new(config).calculate(&order)?);

    // 5. Full webhook round trip with tax classes
    println!("🌐 Webhook with tax classes:");
    let mut resolver = TaxClassRateResolver::new(rate)?;
    resolver.set_class_rate("books".to_string(), BigDecimal::from_str("0.05")?)?;

    let request = WebhookRequest {
        domain: Some("shop.example.com".to_string()),
        event: Some("CHECKOUT_CALCULATE_TAXES".to_string()),
        signature: Some("demo-signature".to_string()),
        body: br#"{"taxBase": {
            "pricesEnteredWithTax": true,
            "shippingPrice": {"amount": "9.99"},
            "lines": [
                {"id": "line-1", "totalPrice": {"amount": "42.00"}, "taxClass": "books"},
                {"id": "line-2", "totalPrice": {"amount": "15.00"}}
            ],
            "discounts": [{"amount": {"amount": "5.00"}}]
        }}"#
        .to_vec(),
    };
    let verifier = |_domain: &str, _payload: &[u8], signature: &str| signature == "demo-signature";

    let response = handle_calculate_taxes(&request, &verifier, &resolver, &engine)?;
    print_response(&response);
    println!("  JSON: {}", response.to_json()?);

    println!("\n🎉 Order tax examples completed successfully!");
    Ok(())
}
