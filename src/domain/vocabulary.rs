//! Fixed DAIDE vocabulary: keyword classes, power codes and province codes.
//!
//! Tokens outside these tables are not rejected; they travel through the
//! pipeline as opaque leaves.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Ownership list: `SCD (power province...) (power province...)`
pub const SCD: &str = "SCD";
/// Peace proposal
pub const PCE: &str = "PCE";
/// Alliance
pub const ALY: &str = "ALY";
/// Alliance target (`ALY (...) VSS (...)`)
pub const VSS: &str = "VSS";
/// Demilitarized zone
pub const DMZ: &str = "DMZ";

/// Placeholder used by structure-only scoring for power codes
pub const POWER_PLACEHOLDER: &str = "POWER";
/// Placeholder used by structure-only scoring for province codes
pub const PROVINCE_PLACEHOLDER: &str = "PROVINCE";

/// Keywords of the form `XXX (arrangement)`.
static SINGLE_ARGUMENT: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "PRP", "XDO", "REJ", "YES", "HUH", "NOT", "NAR", "BWX", "FCT", "INS", "QRY", "THK", "IDK",
        "SUG", "HOW", "WHT", "SRY", "WHY", "POB",
    ]
    .into_iter()
    .collect()
});

/// Keywords of the form `XXX (power power ...)` or `XXX (arrangement) (arrangement) ...`.
static MULTI_ARGUMENT: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| [PCE, "AND", "ORR", SCD, DMZ, "OCC"].into_iter().collect());

/// Keywords whose arguments may appear in any order.
static ORDER_INSENSITIVE: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| [ALY, VSS, "AND", "ORR", PCE, SCD, "OCC"].into_iter().collect());

/// Keywords whose arguments are per-power province lists.
static PER_POWER_LISTS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| [SCD, DMZ].into_iter().collect());

static POWERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["FRA", "GER", "AUS", "RUS", "ENG", "ITA", "TUR"]
        .into_iter()
        .collect()
});

static PROVINCES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // supply centres
        "ALB", "ANK", "APU", "ARM", "BEL", "BER", "BRE", "BUL", "CLY", "CON", "DEN", "EDI", "FIN",
        "GAS", "GRE", "HOL", "KIE", "LON", "LVN", "LVP", "MAR", "NAF", "NAP", "NWY", "PIC", "PIE",
        "POR", "PRU", "ROM", "RUM", "SEV", "SMY", "SPA", "STP", "SWE", "SYR", "TRI", "TUN", "TUS",
        "VEN", "YOR", "WAL",
        // inland
        "BOH", "BUD", "BUR", "MOS", "MUN", "GAL", "PAR", "RUH", "SER", "SIL", "TYR", "UKR", "VIE",
        "WAR",
        // sea
        "ADR", "AEG", "BAL", "BAR", "BLA", "BOT", "EAS", "ECH", "HEL", "ION", "IRI", "LYO", "MAO",
        "NAO", "NTH", "NWG", "SKA", "TYS", "WES",
    ]
    .into_iter()
    .collect()
});

pub fn is_single_argument(token: &str) -> bool {
    SINGLE_ARGUMENT.contains(token)
}

pub fn is_multi_argument(token: &str) -> bool {
    MULTI_ARGUMENT.contains(token)
}

pub fn is_order_insensitive(token: &str) -> bool {
    ORDER_INSENSITIVE.contains(token)
}

pub fn has_per_power_lists(token: &str) -> bool {
    PER_POWER_LISTS.contains(token)
}

pub fn is_power(token: &str) -> bool {
    POWERS.contains(token)
}

pub fn is_province(token: &str) -> bool {
    PROVINCES.contains(token)
}
