//! Numeric input sanitization and clamping
//!
//! A single pure function keeps the price and quota text inputs always in a
//! valid, clamped state. Empty (or not-yet-parseable) input is reported as
//! `Pending` rather than coerced to zero so the operator can keep typing.

/// Which kind of numeric field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Decimal field: digits plus at most one decimal point.
    Price,
    /// Integer field: digits only, no separators.
    Quota,
}

/// Result of sanitizing and clamping one raw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClampOutcome {
    /// Input is empty or mid-typing; hold the transient state, do not store.
    Pending,
    /// Parsed and clamped into the field's bounds.
    Value(f64),
}

/// Strip everything a field of this kind cannot contain.
///
/// Price keeps digits and the first decimal point; quota keeps digits only,
/// so `"12.5"` sanitizes to `"125"` for a quota field.
pub fn sanitize(kind: FieldKind, raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_point = false;
    for c in raw.chars() {
        match c {
            '0'..='9' => out.push(c),
            '.' if kind == FieldKind::Price && !seen_point => {
                seen_point = true;
                out.push(c);
            }
            _ => {}
        }
    }
    out
}

/// Sanitize `raw` and clamp the parsed value into `[min, max]`.
pub fn clamp(kind: FieldKind, raw: &str, min: f64, max: f64) -> ClampOutcome {
    let cleaned = sanitize(kind, raw);
    if cleaned.is_empty() {
        return ClampOutcome::Pending;
    }
    let Ok(value) = cleaned.parse::<f64>() else {
        // A lone "." survives sanitization but does not parse.
        return ClampOutcome::Pending;
    };
    ClampOutcome::Value(value.clamp(min, max))
}

/// Upper bound for a sale price: one unit below the reference price,
/// floored at zero for reference prices of one or less.
pub fn sale_price_max(original_price: f64) -> f64 {
    (original_price - 1.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_price_strips_noise() {
        assert_eq!(sanitize(FieldKind::Price, "1,234.56บ"), "1234.56");
        assert_eq!(sanitize(FieldKind::Price, "฿99.00"), "99.00");
        // Only the first decimal point survives.
        assert_eq!(sanitize(FieldKind::Price, "1.2.3"), "1.23");
    }

    #[test]
    fn test_sanitize_quota_digits_only() {
        assert_eq!(sanitize(FieldKind::Quota, "12.5"), "125");
        assert_eq!(sanitize(FieldKind::Quota, "1,000"), "1000");
    }

    #[test]
    fn test_empty_input_is_pending() {
        assert_eq!(clamp(FieldKind::Price, "", 0.0, 100.0), ClampOutcome::Pending);
        assert_eq!(clamp(FieldKind::Price, "บาท", 0.0, 100.0), ClampOutcome::Pending);
        assert_eq!(clamp(FieldKind::Price, ".", 0.0, 100.0), ClampOutcome::Pending);
    }

    #[test]
    fn test_clamp_to_bounds() {
        assert_eq!(
            clamp(FieldKind::Price, "250", 0.0, 99.0),
            ClampOutcome::Value(99.0)
        );
        assert_eq!(
            clamp(FieldKind::Quota, "7", 0.0, 50.0),
            ClampOutcome::Value(7.0)
        );
        assert_eq!(
            clamp(FieldKind::Quota, "999", 0.0, 50.0),
            ClampOutcome::Value(50.0)
        );
    }

    #[test]
    fn test_sale_price_max() {
        assert_eq!(sale_price_max(100.0), 99.0);
        assert_eq!(sale_price_max(1.0), 0.0);
        assert_eq!(sale_price_max(0.5), 0.0);
    }
}
