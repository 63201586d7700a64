use crate::catalog;
use crate::spec::{Node, Tier};

// Scanned in order, first match wins. Plain ASCII keywords must equal a whole token
// of the zone ("ran" matches "ran-south", not "transport"); the rest match as
// substrings so Korean zone names with prefixes ("강남국사") still resolve.
const ZONE_TIERS: &[(&str, Tier)] = &[
    // Telecom zones
    ("core-dc", Tier::Data),
    ("core dc", Tier::Data),
    ("ran", Tier::External),
    ("access", Tier::Dmz),
    ("aggregation", Tier::Internal),
    ("transport", Tier::Internal),
    ("backbone", Tier::Internal),
    ("기지국", Tier::External),
    ("무선", Tier::External),
    ("액세스", Tier::Dmz),
    ("가입자", Tier::Dmz),
    ("집선", Tier::Internal),
    ("전송", Tier::Internal),
    ("백본", Tier::Internal),
    ("국사", Tier::Internal),
    ("코어", Tier::Data),
    ("데이터센터", Tier::Data),
    // Enterprise zones
    ("internet", Tier::External),
    ("public", Tier::External),
    ("perimeter", Tier::Dmz),
    ("edge", Tier::Dmz),
    ("private", Tier::Internal),
    ("app", Tier::Internal),
    ("database", Tier::Data),
    ("storage", Tier::Data),
    ("외부", Tier::External),
    ("인터넷", Tier::External),
    ("내부", Tier::Internal),
    ("데이터", Tier::Data),
];

/// Maps a free-text zone to a tier, or `None` when no keyword applies.
///
/// A zone naming a tier directly ("dmz", "Data") maps to that tier.
pub fn zone_tier(zone: &str) -> Option<Tier> {
    let normalized = zone.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if let Ok(tier) = normalized.parse::<Tier>() {
        return Some(tier);
    }
    ZONE_TIERS
        .iter()
        .find(|(keyword, _)| zone_matches(&normalized, keyword))
        .map(|(_, tier)| *tier)
}

fn zone_matches(zone: &str, keyword: &str) -> bool {
    if keyword.chars().all(|c| c.is_ascii_alphanumeric()) {
        zone.split(|c: char| !c.is_alphanumeric())
            .any(|token| token == keyword)
    } else {
        zone.contains(keyword)
    }
}

/// Tier used for placement: explicit tier, then zone, then the type's default.
pub fn resolve_tier(node: &Node) -> Tier {
    node.tier
        .or_else(|| node.zone.as_deref().and_then(zone_tier))
        .unwrap_or_else(|| catalog::default_tier(&node.node_type))
}
