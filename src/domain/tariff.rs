//! Slab-based electricity tariff calculator
//!
//! Pricing is declarative: each connection type maps to a table of
//! `(upper_bound, marginal_rate)` slabs. The rate of a slab applies only to
//! the units above the previous slab's upper bound, so adding a new
//! connection type is a data change.

use rust_decimal::{Decimal, RoundingStrategy};

use super::bill::ConnectionType;

/// One pricing slab: units up to `upper_bound` (inclusive) are billed at
/// `rate` per unit. `None` means the slab is open-ended.
struct Slab {
    upper_bound: Option<u32>,
    /// Rate per unit as (mantissa, scale), e.g. (35, 1) = 3.50
    rate: (i64, u32),
}

const DOMESTIC_SLABS: &[Slab] = &[
    Slab { upper_bound: Some(100), rate: (35, 1) },
    Slab { upper_bound: Some(200), rate: (45, 1) },
    Slab { upper_bound: Some(300), rate: (65, 1) },
    Slab { upper_bound: None, rate: (85, 1) },
];

const COMMERCIAL_SLABS: &[Slab] = &[
    Slab { upper_bound: Some(100), rate: (55, 1) },
    Slab { upper_bound: Some(300), rate: (75, 1) },
    Slab { upper_bound: None, rate: (95, 1) },
];

// Industrial connections are billed at a flat rate, no slabs.
const INDUSTRIAL_SLABS: &[Slab] = &[Slab { upper_bound: None, rate: (80, 1) }];

fn slab_table(connection_type: ConnectionType) -> &'static [Slab] {
    match connection_type {
        ConnectionType::Domestic => DOMESTIC_SLABS,
        ConnectionType::Commercial => COMMERCIAL_SLABS,
        ConnectionType::Industrial => INDUSTRIAL_SLABS,
    }
}

/// One row of the published rate sheet for a connection type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSlab {
    /// First unit this rate applies to (1-based).
    pub from_units: u32,
    /// Last unit this rate applies to, `None` for the open-ended slab.
    pub to_units: Option<u32>,
    /// Price per unit.
    pub rate: Decimal,
}

/// The full rate sheet for a connection type, in slab order.
pub fn rate_sheet(connection_type: ConnectionType) -> Vec<RateSlab> {
    let mut covered = 0u32;
    slab_table(connection_type)
        .iter()
        .map(|slab| {
            let (mantissa, scale) = slab.rate;
            let row = RateSlab {
                from_units: covered + 1,
                to_units: slab.upper_bound,
                rate: Decimal::new(mantissa, scale),
            };
            covered = slab.upper_bound.unwrap_or(covered);
            row
        })
        .collect()
}

/// Calculate the billed amount for `units` consumed on a connection.
///
/// Accumulates `rate × units-within-slab` over every slab fully or partially
/// covered by `units`, then rounds half-up to 2 decimal places. A unit count
/// exactly on a slab boundary (100, 200, 300) is billed entirely at the
/// lower slab's rate; the next marginal rate starts strictly above it.
pub fn compute_amount(units: u32, connection_type: ConnectionType) -> Decimal {
    let mut amount = Decimal::ZERO;
    let mut covered = 0u32;

    for slab in slab_table(connection_type) {
        let slab_end = slab.upper_bound.unwrap_or(units).min(units);
        if slab_end <= covered {
            break;
        }
        let (mantissa, scale) = slab.rate;
        amount += Decimal::from(slab_end - covered) * Decimal::new(mantissa, scale);
        covered = slab_end;
    }

    // rounding only drops digits; rescale pads back to exactly 2 dp so
    // amounts serialize as "575.00", not "575.0"
    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    amount
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn zero_units_is_free_for_every_type() {
        for ct in [
            ConnectionType::Domestic,
            ConnectionType::Commercial,
            ConnectionType::Industrial,
        ] {
            assert_eq!(compute_amount(0, ct), dec("0.00"));
        }
    }

    #[test]
    fn domestic_first_slab() {
        // 50 * 3.5 = 175.00
        assert_eq!(compute_amount(50, ConnectionType::Domestic), dec("175.00"));
    }

    #[test]
    fn domestic_boundary_stays_in_lower_slab() {
        // 100 units are billed entirely at the first rate
        assert_eq!(compute_amount(100, ConnectionType::Domestic), dec("350.00"));
    }

    #[test]
    fn domestic_unit_above_boundary_uses_next_rate() {
        // the 101st unit is the first at 4.5
        assert_eq!(compute_amount(101, ConnectionType::Domestic), dec("354.50"));
    }

    #[test]
    fn domestic_second_boundary() {
        // 100*3.5 + 100*4.5 = 800.00
        assert_eq!(compute_amount(200, ConnectionType::Domestic), dec("800.00"));
        assert_eq!(compute_amount(201, ConnectionType::Domestic), dec("806.50"));
    }

    #[test]
    fn domestic_top_slab() {
        // 100*3.5 + 100*4.5 + 100*6.5 + 50*8.5 = 1875.00
        assert_eq!(compute_amount(350, ConnectionType::Domestic), dec("1875.00"));
    }

    #[test]
    fn commercial_boundary() {
        // 100*5.5 + 200*7.5 = 2050.00
        assert_eq!(
            compute_amount(300, ConnectionType::Commercial),
            dec("2050.00")
        );
    }

    #[test]
    fn commercial_above_boundary() {
        assert_eq!(
            compute_amount(301, ConnectionType::Commercial),
            dec("2059.50")
        );
    }

    #[test]
    fn industrial_is_flat_rate() {
        assert_eq!(compute_amount(50, ConnectionType::Industrial), dec("400.00"));
        assert_eq!(
            compute_amount(1000, ConnectionType::Industrial),
            dec("8000.00")
        );
    }

    #[test]
    fn amounts_render_with_two_decimal_places() {
        assert_eq!(compute_amount(150, ConnectionType::Domestic).to_string(), "575.00");
        assert_eq!(
            compute_amount(300, ConnectionType::Commercial).to_string(),
            "2050.00"
        );
        assert_eq!(compute_amount(0, ConnectionType::Domestic).to_string(), "0.00");
    }

    #[test]
    fn rate_sheet_reports_slab_ranges() {
        let sheet = rate_sheet(ConnectionType::Domestic);
        assert_eq!(sheet.len(), 4);
        assert_eq!(sheet[0].from_units, 1);
        assert_eq!(sheet[0].to_units, Some(100));
        assert_eq!(sheet[0].rate, dec("3.5"));
        assert_eq!(sheet[3].from_units, 301);
        assert_eq!(sheet[3].to_units, None);
        assert_eq!(sheet[3].rate, dec("8.5"));
    }

    #[test]
    fn amount_is_monotonically_non_decreasing() {
        for ct in [
            ConnectionType::Domestic,
            ConnectionType::Commercial,
            ConnectionType::Industrial,
        ] {
            let mut prev = Decimal::ZERO;
            for units in 0..=500 {
                let amount = compute_amount(units, ct);
                assert!(
                    amount >= prev,
                    "amount decreased at {} units for {:?}",
                    units,
                    ct
                );
                prev = amount;
            }
        }
    }
}
