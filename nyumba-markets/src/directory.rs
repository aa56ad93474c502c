//! Static directory of live markets.
//!
//! Each entry carries what the client needs before any network round
//! trip: the currency to format prices in, the dial code for contact
//! links, and a map seed so the browse screen opens centered on the
//! right city.

use nyumba_types::{CountryCode, GeoPoint, Price};

use crate::{MarketsError, MarketsResult};

/// A country the marketplace is live in.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    /// ISO 3166-1 alpha-2 country code.
    pub country: CountryCode,
    /// English display name.
    pub name: &'static str,
    /// ISO 4217 currency code listings are priced in.
    pub currency_code: &'static str,
    /// Symbol shown next to prices.
    pub currency_symbol: &'static str,
    /// International dial prefix, with the leading `+`.
    pub dial_code: &'static str,
    /// Where the map opens before any listings are loaded.
    pub map_center: GeoPoint,
    /// Initial map zoom level.
    pub map_zoom: u8,
}

// Launch order, not alphabetical. The map seeds the largest
// listing city, which is not always the capital.
static MARKETS: [Market; 12] = [
    Market {
        country: CountryCode::from_static("CI"),
        name: "Côte d'Ivoire",
        currency_code: "XOF",
        currency_symbol: "CFA",
        dial_code: "+225",
        map_center: GeoPoint::new(5.3600, -4.0083),
        map_zoom: 12,
    },
    Market {
        country: CountryCode::from_static("SN"),
        name: "Senegal",
        currency_code: "XOF",
        currency_symbol: "CFA",
        dial_code: "+221",
        map_center: GeoPoint::new(14.7167, -17.4677),
        map_zoom: 12,
    },
    Market {
        country: CountryCode::from_static("CM"),
        name: "Cameroon",
        currency_code: "XAF",
        currency_symbol: "FCFA",
        dial_code: "+237",
        map_center: GeoPoint::new(4.0511, 9.7679),
        map_zoom: 12,
    },
    Market {
        country: CountryCode::from_static("GH"),
        name: "Ghana",
        currency_code: "GHS",
        currency_symbol: "GH₵",
        dial_code: "+233",
        map_center: GeoPoint::new(5.6037, -0.1870),
        map_zoom: 12,
    },
    Market {
        country: CountryCode::from_static("NG"),
        name: "Nigeria",
        currency_code: "NGN",
        currency_symbol: "₦",
        dial_code: "+234",
        map_center: GeoPoint::new(6.5244, 3.3792),
        map_zoom: 11,
    },
    Market {
        country: CountryCode::from_static("KE"),
        name: "Kenya",
        currency_code: "KES",
        currency_symbol: "KSh",
        dial_code: "+254",
        map_center: GeoPoint::new(-1.2921, 36.8219),
        map_zoom: 12,
    },
    Market {
        country: CountryCode::from_static("TZ"),
        name: "Tanzania",
        currency_code: "TZS",
        currency_symbol: "TSh",
        dial_code: "+255",
        map_center: GeoPoint::new(-6.7924, 39.2083),
        map_zoom: 12,
    },
    Market {
        country: CountryCode::from_static("RW"),
        name: "Rwanda",
        currency_code: "RWF",
        currency_symbol: "FRw",
        dial_code: "+250",
        map_center: GeoPoint::new(-1.9441, 30.0619),
        map_zoom: 13,
    },
    Market {
        country: CountryCode::from_static("BJ"),
        name: "Benin",
        currency_code: "XOF",
        currency_symbol: "CFA",
        dial_code: "+229",
        map_center: GeoPoint::new(6.3703, 2.3912),
        map_zoom: 13,
    },
    Market {
        country: CountryCode::from_static("TG"),
        name: "Togo",
        currency_code: "XOF",
        currency_symbol: "CFA",
        dial_code: "+228",
        map_center: GeoPoint::new(6.1256, 1.2254),
        map_zoom: 13,
    },
    Market {
        country: CountryCode::from_static("ML"),
        name: "Mali",
        currency_code: "XOF",
        currency_symbol: "CFA",
        dial_code: "+223",
        map_center: GeoPoint::new(12.6392, -8.0029),
        map_zoom: 12,
    },
    Market {
        country: CountryCode::from_static("BF"),
        name: "Burkina Faso",
        currency_code: "XOF",
        currency_symbol: "CFA",
        dial_code: "+226",
        map_center: GeoPoint::new(12.3714, -1.5197),
        map_zoom: 12,
    },
];

/// How many minor units make up one major unit of a currency.
///
/// CFA francs and shillings in the region are quoted in whole units;
/// prices still travel as minor units on the wire, so formatting needs
/// to know the split.
static CURRENCIES: [(&str, u32); 7] = [
    ("XOF", 0),
    ("XAF", 0),
    ("GHS", 2),
    ("NGN", 2),
    ("KES", 2),
    ("TZS", 2),
    ("RWF", 0),
];

/// Looks up the market for a country, if it is live.
#[must_use]
pub fn market_for(country: &CountryCode) -> Option<&'static Market> {
    MARKETS.iter().find(|m| m.country == *country)
}

/// All live market country codes, in launch order.
#[must_use]
pub fn supported_countries() -> Vec<CountryCode> {
    MARKETS.iter().map(|m| m.country).collect()
}

/// Whether the marketplace is live in a country.
#[must_use]
pub fn is_supported(country: &CountryCode) -> bool {
    market_for(country).is_some()
}

/// The ISO 4217 currency code listings are priced in for a country.
pub fn currency_for(country: &CountryCode) -> MarketsResult<&'static str> {
    market_for(country)
        .map(|m| m.currency_code)
        .ok_or(MarketsError::UnsupportedCountry(*country))
}

/// Initial map center and zoom for a country, if it is live.
#[must_use]
pub fn map_seed_for(country: &CountryCode) -> Option<(GeoPoint, u8)> {
    market_for(country).map(|m| (m.map_center, m.map_zoom))
}

/// Formats a price for display.
///
/// Zero-decimal currencies render the whole amount grouped; others
/// split off the minor part and only show it when nonzero, so round
/// prices stay clean. An unknown currency falls back to the grouped
/// raw amount with the bare ISO code.
#[must_use]
pub fn format_price(price: &Price) -> String {
    let currency = price.currency.as_str();
    let sign = if price.amount < 0 { "-" } else { "" };
    let magnitude = price.amount.unsigned_abs();

    let Some(&(_, minor_units)) = CURRENCIES.iter().find(|(code, _)| *code == currency) else {
        return format!("{sign}{} {currency}", group_thousands(magnitude));
    };

    let symbol = MARKETS
        .iter()
        .find(|m| m.currency_code == currency)
        .map_or(currency, |m| m.currency_symbol);

    if minor_units == 0 {
        return format!("{symbol} {sign}{}", group_thousands(magnitude));
    }

    let scale = 10_u64.pow(minor_units);
    let major = magnitude / scale;
    let minor = magnitude % scale;
    if minor == 0 {
        format!("{symbol} {sign}{}", group_thousands(major))
    } else {
        format!(
            "{symbol} {sign}{}.{minor:0width$}",
            group_thousands(major),
            width = minor_units as usize
        )
    }
}

/// Groups digits in threes with commas.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && i % 3 == lead {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
