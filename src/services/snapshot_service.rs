use uuid::Uuid;

use crate::api::{KalshiMarket, PriceLabel};
use crate::models::NewSnapshot;

/// Yes price used when the quoted text cannot be parsed
pub const FALLBACK_YES_PRICE: f64 = 0.5;

/// Parse a Kalshi price label into a fraction.
///
/// `"52¢"` -> `0.52`, `"0.52"` -> `0.52`, `"N/A"` -> `0.0`. Returns `None`
/// for anything else.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let text = text.trim();

    if text.contains('¢') {
        return text
            .replace('¢', "")
            .trim()
            .parse::<f64>()
            .ok()
            .map(|cents| cents / 100.0);
    }

    if text == "N/A" {
        return Some(0.0);
    }

    text.parse::<f64>().ok()
}

/// Resolve yes/no prices from the sub-title labels.
///
/// A missing label reads as `N/A`. A null or unparsable yes becomes 0.5 and
/// a null or unparsable no becomes the complement of yes.
pub fn resolve_prices(yes_label: &PriceLabel, no_label: &PriceLabel) -> (f64, f64) {
    let yes = label_price(yes_label).unwrap_or(FALLBACK_YES_PRICE);
    let no = label_price(no_label).unwrap_or(1.0 - yes);
    (yes, no)
}

fn label_price(label: &PriceLabel) -> Option<f64> {
    match label {
        PriceLabel::Missing => parse_price_text("N/A"),
        PriceLabel::Null => None,
        PriceLabel::Text(text) => parse_price_text(text),
    }
}

/// Map a Kalshi market onto a snapshot row for `market_id`
pub fn snapshot_from_market(market_id: Uuid, market: &KalshiMarket) -> NewSnapshot {
    let (yes_price, no_price) = resolve_prices(&market.yes_sub_title, &market.no_sub_title);

    NewSnapshot {
        market_id,
        yes_price,
        no_price,
        volume: market.volume,
        volume_24h: market.volume_24h,
        liquidity: market.liquidity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::kalshi::KalshiMarketResponse;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_cents_label() {
        assert!(close(parse_price_text("52¢").unwrap(), 0.52));
        assert!(close(parse_price_text(" 7 ¢").unwrap(), 0.07));
        assert!(close(parse_price_text("99.5¢").unwrap(), 0.995));
    }

    #[test]
    fn test_decimal_passes_through() {
        assert!(close(parse_price_text("0.52").unwrap(), 0.52));
        assert!(close(parse_price_text("1").unwrap(), 1.0));
    }

    #[test]
    fn test_not_available_is_zero() {
        assert_eq!(parse_price_text("N/A"), Some(0.0));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(parse_price_text("Yes"), None);
        assert_eq!(parse_price_text(""), None);
        assert_eq!(parse_price_text("abc¢"), None);
    }

    fn text(label: &str) -> PriceLabel {
        PriceLabel::Text(label.to_string())
    }

    #[test]
    fn test_fallbacks() {
        // unparsable yes -> 0.5, unparsable no -> 1 - yes
        assert_eq!(resolve_prices(&text("Above 4%"), &text("Below 4%")), (0.5, 0.5));

        let (yes, no) = resolve_prices(&text("30¢"), &text("n/a?"));
        assert!(close(yes, 0.30));
        assert!(close(no, 0.70));
    }

    #[test]
    fn test_missing_labels_read_as_not_available() {
        assert_eq!(resolve_prices(&PriceLabel::Missing, &PriceLabel::Missing), (0.0, 0.0));
    }

    #[test]
    fn test_null_labels_take_fallbacks() {
        assert_eq!(resolve_prices(&PriceLabel::Null, &PriceLabel::Null), (0.5, 0.5));

        let (yes, no) = resolve_prices(&text("20¢"), &PriceLabel::Null);
        assert!(close(yes, 0.20));
        assert!(close(no, 0.80));
    }

    #[test]
    fn test_null_and_missing_payloads_differ() {
        let parse = |json: &str| -> NewSnapshot {
            let market: KalshiMarket = serde_json::from_str::<KalshiMarketResponse>(json)
                .unwrap()
                .market
                .unwrap();
            snapshot_from_market(Uuid::nil(), &market)
        };

        let null = parse(r#"{"market":{"yes_sub_title":null,"no_sub_title":null}}"#);
        assert_eq!((null.yes_price, null.no_price), (0.5, 0.5));

        let missing = parse(r#"{"market":{}}"#);
        assert_eq!((missing.yes_price, missing.no_price), (0.0, 0.0));
    }

    #[test]
    fn test_snapshot_from_market() {
        let market = KalshiMarket {
            ticker: "KXFED".to_string(),
            yes_sub_title: text("61¢"),
            no_sub_title: text("39¢"),
            volume: 1500.0,
            volume_24h: 120.0,
            liquidity: 0.0,
        };
        let id = Uuid::new_v4();

        let snapshot = snapshot_from_market(id, &market);
        assert_eq!(snapshot.market_id, id);
        assert!(close(snapshot.yes_price, 0.61));
        assert!(close(snapshot.no_price, 0.39));
        assert_eq!(snapshot.volume, 1500.0);
        assert_eq!(snapshot.volume_24h, 120.0);
        assert_eq!(snapshot.liquidity, 0.0);
    }
}
