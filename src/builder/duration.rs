//! Parser for duration literals made of integer+unit pairs, e.g. `5m30s`.

use std::time::Duration;

/// Parse a duration literal: one or more `<integer><unit>` pairs, where the
/// unit is one of `ns`, `us`, `ms`, `s`, `m`, `h`. Pairs are summed in order.
pub(super) fn parse_duration(input: &str) -> Result<Duration, String> {
    let mut rest = input.trim();
    if rest.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("missing unit in duration {input:?}"))?;
        if digits_end == 0 {
            return Err(format!("expected digit in duration {input:?}"));
        }
        let value: u64 = rest[..digits_end]
            .parse()
            .map_err(|_| format!("invalid number in duration {input:?}"))?;
        rest = &rest[digits_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        let step = match unit {
            "ns" => Some(Duration::from_nanos(value)),
            "us" => Some(Duration::from_micros(value)),
            "ms" => Some(Duration::from_millis(value)),
            "s" => Some(Duration::from_secs(value)),
            "m" => value.checked_mul(60).map(Duration::from_secs),
            "h" => value.checked_mul(3600).map(Duration::from_secs),
            _ => return Err(format!("unknown unit {unit:?} in duration {input:?}")),
        };
        let step = step.ok_or_else(|| format!("duration {input:?} overflows"))?;
        total = total
            .checked_add(step)
            .ok_or_else(|| format!("duration {input:?} overflows"))?;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("5ns").unwrap(), Duration::from_nanos(5));
        assert_eq!(parse_duration("10us").unwrap(), Duration::from_micros(10));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn parses_combined_pairs_in_order() {
        assert_eq!(parse_duration("5m30s").unwrap(), Duration::from_secs(330));
        assert_eq!(
            parse_duration("1h30m15s").unwrap(),
            Duration::from_secs(5415)
        );
        assert_eq!(
            parse_duration("1s500ms").unwrap(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn rejects_malformed_literals() {
        for input in ["", "  ", "5", "m5", "5x", "5m30", "five-m", "invalid-duration"] {
            assert!(parse_duration(input).is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn rejects_overflowing_literals() {
        assert!(parse_duration("18446744073709551615h").is_err());
    }
}
