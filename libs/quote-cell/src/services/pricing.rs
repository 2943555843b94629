//! Pricing tables for the quote simulator.
//!
//! Estimates are intentionally coarse: package base plus a flat per-guest
//! rate plus the selected extra services. The number shown to the customer
//! is always superseded by the final price an administrator sets.

/// Charged per expected guest.
pub const PRICE_PER_GUEST: u32 = 50;

/// Applied when a package key is not in the table.
pub const FALLBACK_PACKAGE_PRICE: u32 = 1000;

/// Applied when a service key is not in the table.
pub const FALLBACK_SERVICE_PRICE: u32 = 300;

#[derive(Debug, Clone, Copy)]
pub struct PackageInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub price: u32,
}

const PACKAGES: &[PackageInfo] = &[
    PackageInfo {
        key: "basico",
        name: "Básico",
        description: "Decoração essencial com flores e arranjos simples",
        price: 1000,
    },
    PackageInfo {
        key: "premium",
        name: "Premium",
        description: "Decoração completa com painel, iluminação e mobiliário",
        price: 2500,
    },
    PackageInfo {
        key: "luxo",
        name: "Luxo",
        description: "Projeto exclusivo com cenografia e flores importadas",
        price: 5000,
    },
];

const SERVICES: &[ServiceInfo] = &[
    ServiceInfo {
        key: "fotografo",
        name: "Fotógrafo",
        price: 300,
    },
    ServiceInfo {
        key: "buffet",
        name: "Buffet",
        price: 300,
    },
    ServiceInfo {
        key: "dj",
        name: "DJ",
        price: 300,
    },
    ServiceInfo {
        key: "videomaker",
        name: "Videomaker",
        price: 300,
    },
    ServiceInfo {
        key: "convites",
        name: "Convites personalizados",
        price: 300,
    },
    ServiceInfo {
        key: "lembrancinhas",
        name: "Lembrancinhas",
        price: 300,
    },
];

pub fn packages() -> &'static [PackageInfo] {
    PACKAGES
}

pub fn package_info(key: &str) -> Option<&'static PackageInfo> {
    PACKAGES.iter().find(|p| p.key == key)
}

pub fn services() -> &'static [ServiceInfo] {
    SERVICES
}

pub fn service_info(key: &str) -> Option<&'static ServiceInfo> {
    SERVICES.iter().find(|s| s.key == key)
}

/// Human label for a service key, falling back to the key itself.
pub fn service_label(key: &str) -> &str {
    service_info(key).map(|s| s.name).unwrap_or(key)
}

/// Automatic estimate shown in the quote simulator.
///
/// `guest_count` comes straight from the public form, so the arithmetic is
/// done in `u64`: any `u32` guest count times the per-guest rate fits.
pub fn estimate(package: &str, guest_count: u32, service_keys: &[String]) -> u64 {
    let base = package_info(package)
        .map(|p| p.price)
        .unwrap_or(FALLBACK_PACKAGE_PRICE);

    let extras: u64 = service_keys
        .iter()
        .map(|key| {
            u64::from(
                service_info(key)
                    .map(|s| s.price)
                    .unwrap_or(FALLBACK_SERVICE_PRICE),
            )
        })
        .sum();

    u64::from(base) + u64::from(guest_count) * u64::from(PRICE_PER_GUEST) + extras
}

/// Parses Brazilian currency text ("R$ 1.200,50") into a value. Anything
/// unparseable becomes 0.0, which callers treat as invalid input.
pub fn parse_currency(input: &str) -> f64 {
    let cleaned = input
        .trim()
        .trim_start_matches("R$")
        .trim()
        .replace('.', "")
        .replace(',', ".");

    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Formats a value the way it appears in customer emails: "R$ 1200,50".
pub fn format_currency(value: f64) -> String {
    format!("R$ {:.2}", value).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_adds_package_guests_and_services() {
        let services = vec!["dj".to_string(), "buffet".to_string()];
        // 1000 + 50 * 50 + 2 * 300
        assert_eq!(estimate("basico", 50, &services), 4100);
    }

    #[test]
    fn estimate_with_no_extras_is_base_plus_guests() {
        assert_eq!(estimate("premium", 100, &[]), 7500);
        assert_eq!(estimate("luxo", 0, &[]), 5000);
    }

    #[test]
    fn unknown_package_falls_back_to_base_price() {
        assert_eq!(estimate("imperial", 0, &[]), u64::from(FALLBACK_PACKAGE_PRICE));
    }

    #[test]
    fn unknown_service_falls_back_to_flat_price() {
        let services = vec!["drones".to_string()];
        assert_eq!(
            estimate("basico", 0, &services),
            1000 + u64::from(FALLBACK_SERVICE_PRICE)
        );
    }

    #[test]
    fn estimate_does_not_overflow_on_huge_guest_counts() {
        // The form field is an unvalidated u32; the math must hold for any
        // value a request can carry.
        assert_eq!(
            estimate("basico", 90_000_000, &[]),
            1000 + 90_000_000u64 * 50
        );
        assert_eq!(
            estimate("luxo", u32::MAX, &[]),
            5000 + u64::from(u32::MAX) * 50
        );
    }

    #[test]
    fn parse_currency_handles_brazilian_format() {
        assert_eq!(parse_currency("R$ 1.200,50"), 1200.50);
        assert_eq!(parse_currency("1.200,50"), 1200.50);
        assert_eq!(parse_currency("950"), 950.0);
        assert_eq!(parse_currency("  R$ 80,00 "), 80.0);
    }

    #[test]
    fn parse_currency_treats_garbage_as_zero() {
        assert_eq!(parse_currency(""), 0.0);
        assert_eq!(parse_currency("abc"), 0.0);
        assert_eq!(parse_currency("R$"), 0.0);
    }

    #[test]
    fn format_currency_uses_comma_decimals() {
        assert_eq!(format_currency(1200.5), "R$ 1200,50");
        assert_eq!(format_currency(80.0), "R$ 80,00");
    }

    #[test]
    fn service_label_falls_back_to_the_key() {
        assert_eq!(service_label("dj"), "DJ");
        assert_eq!(service_label("drones"), "drones");
    }
}
