// Property-based tests for per-line computation
//
// Properties tested:
// 1. item_total_tax_included == item_total + tax_amount in both tax modes
// 2. item_total is non-negative for non-negative rates and discounts <= 100
// 3. Inclusive mode reproduces the entered price within one cent
// 4. Switching tax mode back and forth does not drift rates or totals
// 5. Edits on different rows commute
// 6. Inputs near the decimal range never abort a recompute

use invoice_engine::core::{parse_input, PrecisionPolicy};
use invoice_engine::invoices::{
    DocumentKind, ExchangeRate, InvoiceEditor, LineCalculator, LineInput, RowOperations, TaxMode,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::row;

fn line_input() -> impl Strategy<Value = LineInput> {
    (
        0i64..10_000i64,
        0u32..3,
        0i64..100_000_000i64,
        0i64..=10_000i64,
        0i64..=10_000i64,
    )
        .prop_map(|(quantity, quantity_scale, rate_cents, discount_bp, tax_bp)| LineInput {
            quantity: Decimal::new(quantity, quantity_scale),
            rate: Decimal::new(rate_cents, 2),
            discount_percentage: Decimal::new(discount_bp, 2),
            tax_percentage: Decimal::new(tax_bp, 2),
        })
}

fn tax_mode() -> impl Strategy<Value = TaxMode> {
    prop_oneof![Just(TaxMode::Exclusive), Just(TaxMode::Inclusive)]
}

proptest! {
    /// Property: the tax-included total is always the sum of its parts
    #[test]
    fn test_tax_included_is_sum_of_parts(input in line_input(), mode in tax_mode()) {
        let amounts = LineCalculator::default().compute(&input, mode);

        prop_assert_eq!(
            amounts.item_total_tax_included,
            amounts.item_total + amounts.tax_amount,
            "input={:?} mode={}", input, mode
        );
    }

    /// Property: item_total >= 0 for rate >= 0 and discount <= 100
    #[test]
    fn test_item_total_non_negative(input in line_input(), mode in tax_mode()) {
        let amounts = LineCalculator::default().compute(&input, mode);

        prop_assert!(amounts.item_total >= Decimal::ZERO);
        prop_assert!(amounts.tax_amount >= Decimal::ZERO);
        prop_assert!(amounts.discount_amount >= Decimal::ZERO);
    }

    /// Property: all outputs carry exactly two decimal places
    #[test]
    fn test_outputs_rounded(input in line_input(), mode in tax_mode()) {
        let amounts = LineCalculator::default().compute(&input, mode);

        for value in [
            amounts.discount_amount,
            amounts.tax_amount,
            amounts.item_total,
            amounts.item_total_tax_included,
        ] {
            prop_assert_eq!(value.scale(), 2);
        }
    }

    /// Property: without discount, inclusive mode gives back the entered price
    #[test]
    fn test_inclusive_total_matches_published_price(input in line_input()) {
        let input = LineInput { discount_percentage: Decimal::ZERO, ..input };
        let amounts = LineCalculator::default().compute(&input, TaxMode::Inclusive);
        let published_price = input.quantity * input.rate;

        let difference = (amounts.item_total_tax_included - published_price).abs();
        prop_assert!(
            difference <= dec!(0.01),
            "published {} vs tax-included {}", published_price, amounts.item_total_tax_included
        );
    }

    /// Property: exclusive and inclusive agree on the discount share of the net price
    #[test]
    fn test_discount_applies_to_net_price(input in line_input(), mode in tax_mode()) {
        let amounts = LineCalculator::default().compute(&input, mode);
        let net_before_discount = amounts.item_total + amounts.discount_amount;
        let expected = net_before_discount * input.discount_percentage / Decimal::ONE_HUNDRED;

        prop_assert!((amounts.discount_amount - expected).abs() <= dec!(0.02));
    }

    /// Property: toggling tax mode never drifts stored rates or totals
    #[test]
    fn test_mode_toggle_does_not_drift(inputs in prop::collection::vec(line_input(), 1..6)) {
        let lines = inputs
            .iter()
            .map(|input| row(input.quantity, input.rate, input.discount_percentage, input.tax_percentage))
            .collect();
        let mut editor = InvoiceEditor::load(
            DocumentKind::Sales,
            TaxMode::Exclusive,
            ExchangeRate::ONE,
            lines,
            PrecisionPolicy::default(),
        );

        let before = editor.snapshot();
        editor.set_tax_mode(TaxMode::Inclusive);
        let after = editor.set_tax_mode(TaxMode::Exclusive);

        prop_assert_eq!(&before, &after);
        for (line, input) in after.lines.iter().zip(inputs.iter()) {
            prop_assert_eq!(line.rate, input.rate);
        }
    }

    /// Property: edits on different rows commute
    #[test]
    fn test_edits_on_different_rows_commute(
        quantity in 0i64..1_000i64,
        rate_cents in 0i64..10_000_000i64,
        mode in tax_mode()
    ) {
        let ops = RowOperations::default();
        let rows = vec![
            row(dec!(1), dec!(10), dec!(0), dec!(10)),
            row(dec!(2), dec!(20), dec!(5), dec!(0)),
        ];
        let quantity = Decimal::from(quantity);
        let rate = Decimal::new(rate_cents, 2);

        let a = ops.set_quantity(&rows, 0, quantity, mode);
        let a = ops.set_rate(&a, 1, rate, mode);

        let b = ops.set_rate(&rows, 1, rate, mode);
        let b = ops.set_quantity(&b, 0, quantity, mode);

        prop_assert_eq!(a, b);
    }

    /// Property: huge quantities and rates yield amounts, never a panic
    #[test]
    fn test_huge_inputs_do_not_panic(
        quantity_digits in "[1-9][0-9]{20,28}",
        rate in 0i64..1_000_000i64,
        tax_bp in 0i64..=10_000i64,
        mode in tax_mode(),
    ) {
        let input = LineInput {
            quantity: parse_input(&quantity_digits),
            rate: Decimal::new(rate, 2),
            discount_percentage: dec!(0),
            tax_percentage: Decimal::new(tax_bp, 2),
        };

        let amounts = LineCalculator::default().compute(&input, mode);
        prop_assert!(amounts.item_total >= Decimal::ZERO);
        prop_assert!(amounts.tax_amount >= Decimal::ZERO);
    }
}

#[test]
fn test_exclusive_and_inclusive_reference_values() {
    let calc = LineCalculator::new(PrecisionPolicy::default());
    let input = LineInput {
        quantity: dec!(1),
        rate: dec!(100),
        discount_percentage: dec!(0),
        tax_percentage: dec!(10),
    };

    let exclusive = calc.compute(&input, TaxMode::Exclusive);
    assert_eq!(exclusive.item_total, dec!(100.00));
    assert_eq!(exclusive.tax_amount, dec!(10.00));
    assert_eq!(exclusive.item_total_tax_included, dec!(110.00));

    let inclusive = calc.compute(&input, TaxMode::Inclusive);
    assert_eq!(inclusive.item_total, dec!(90.91));
    assert_eq!(inclusive.tax_amount, dec!(9.09));
    assert_eq!(inclusive.item_total_tax_included, dec!(100.00));
}

#[test]
fn test_discount_before_tax_reference_values() {
    let calc = LineCalculator::default();
    let amounts = calc.compute(
        &LineInput {
            quantity: dec!(2),
            rate: dec!(50),
            discount_percentage: dec!(10),
            tax_percentage: dec!(20),
        },
        TaxMode::Exclusive,
    );

    assert_eq!(amounts.discount_amount, dec!(10.00));
    assert_eq!(amounts.item_total, dec!(90.00));
    assert_eq!(amounts.tax_amount, dec!(18.00));
    assert_eq!(amounts.item_total_tax_included, dec!(108.00));
}

#[test]
fn test_zero_quantity_row() {
    let amounts = LineCalculator::default().compute(
        &LineInput {
            quantity: Decimal::ZERO,
            rate: dec!(49.99),
            discount_percentage: dec!(0),
            tax_percentage: dec!(11),
        },
        TaxMode::Exclusive,
    );
    assert_eq!(amounts.item_total_tax_included, dec!(0.00));
}

#[test]
fn test_typed_quantity_beyond_range_reports_zero() {
    let amounts = LineCalculator::default().compute(
        &LineInput {
            quantity: parse_input("79228162514264337593543950335"),
            rate: dec!(2),
            discount_percentage: dec!(0),
            tax_percentage: dec!(10),
        },
        TaxMode::Exclusive,
    );

    assert_eq!(amounts.item_total.to_string(), "0.00");
    assert_eq!(amounts.tax_amount.to_string(), "0.00");
    assert_eq!(amounts.item_total_tax_included.to_string(), "0.00");
}
