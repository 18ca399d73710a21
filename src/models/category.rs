use serde::Serialize;

use crate::db::models::RemoteCategory;

/// One entry of the property type filter shown on the consumer home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterType {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub is_dynamic: bool,
}

/// One entry of the partner onboarding "choose your property type" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerPropertyType {
    pub key: String,
    pub label: String,
    pub description: String,
    pub badge: String,
    pub icon: String,
    pub route: String,
    pub color: String,
}

const FILTER_FALLBACK_ICON: &str = "HelpCircle";
const PARTNER_FALLBACK_ICON: &str = "Star";
const PARTNER_DEFAULT_DESCRIPTION: &str = "Discover our unique stays";
const PARTNER_DEFAULT_BADGE: &str = "New";
const PARTNER_DYNAMIC_COLOR: &str = "bg-teal-50 text-teal-600";

/// `(id, label, icon)` of the built-in filter entries, in display order.
const STATIC_FILTER_TYPES: &[(&str, &str, &str)] = &[
    ("All", "All", "LayoutGrid"),
    ("Hotel", "Hotel", "Building2"),
    ("Villa", "Villa", "Home"),
    ("Resort", "Resort", "Palmtree"),
    ("Homestay", "Homestay", "Hotel"),
    ("Hostel", "Hostel", "Building"),
    ("PG", "PG", "BedDouble"),
    ("tent", "Tent", "Tent"),
];

/// `(key, label, description, badge, icon, color)` of the built-in partner types.
const STATIC_PARTNER_TYPES: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "hotel",
        "Hotel",
        "Multiple rooms, daily stays, front desk operations",
        "Business & Leisure",
        "Building2",
        "bg-blue-50 text-blue-600",
    ),
    (
        "resort",
        "Resort",
        "Destination stays with activities and experiences",
        "Vacation",
        "Home",
        "bg-orange-50 text-orange-600",
    ),
    (
        "villa",
        "Villa",
        "Entire villa or premium holiday home",
        "Family & Groups",
        "Home",
        "bg-emerald-50 text-emerald-600",
    ),
    (
        "hostel",
        "Hostel",
        "Beds or dorms for backpackers and students",
        "Budget",
        "Users",
        "bg-yellow-50 text-yellow-600",
    ),
    (
        "pg",
        "PG / Co-living",
        "Long-stay beds or rooms with shared facilities",
        "Long Term",
        "BedDouble",
        "bg-purple-50 text-purple-600",
    ),
    (
        "homestay",
        "Homestay",
        "Live-with-host or family-run stays",
        "Experience",
        "Home",
        "bg-rose-50 text-rose-600",
    ),
];

/// Built-in property type filter entries.
pub fn static_filter_types() -> Vec<FilterType> {
    STATIC_FILTER_TYPES
        .iter()
        .map(|(id, label, icon)| FilterType {
            id: id.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            is_dynamic: false,
        })
        .collect()
}

/// Built-in partner onboarding property types.
pub fn static_partner_types() -> Vec<PartnerPropertyType> {
    STATIC_PARTNER_TYPES
        .iter()
        .map(|(key, label, description, badge, icon, color)| PartnerPropertyType {
            key: key.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            badge: badge.to_string(),
            icon: icon.to_string(),
            route: format!("/hotel/join-{}", key),
            color: color.to_string(),
        })
        .collect()
}

/// Merge a static list with the result of a remote fetch.
///
/// The static entries always come first, in their original order, followed by
/// the mapped dynamic entries in fetch order. A failed fetch is logged and
/// yields the static list unchanged.
pub fn merge_lists<T, D, E, F>(static_list: Vec<T>, fetched: Result<Vec<D>, E>, map: F) -> Vec<T>
where
    E: std::fmt::Display,
    F: FnMut(D) -> Option<T>,
{
    match fetched {
        Ok(dynamic) => {
            let mut merged = static_list;
            merged.extend(dynamic.into_iter().filter_map(map));
            merged
        }
        Err(e) => {
            tracing::error!("Error loading categories, using built-in list: {e}");
            static_list
        }
    }
}

/// Property type filter: built-in types plus active admin-defined categories.
///
/// Remote categories named "tent" are skipped since the built-in list already
/// carries one.
pub fn filter_types<E: std::fmt::Display>(fetched: Result<Vec<RemoteCategory>, E>) -> Vec<FilterType> {
    merge_lists(static_filter_types(), fetched, |cat| {
        if is_tent(&cat) {
            return None;
        }
        Some(FilterType {
            icon: non_empty(cat.icon).unwrap_or_else(|| FILTER_FALLBACK_ICON.to_string()),
            id: cat.id,
            label: cat.display_name,
            is_dynamic: true,
        })
    })
}

/// Partner onboarding list: built-in types plus active admin-defined categories.
pub fn partner_property_types<E: std::fmt::Display>(
    fetched: Result<Vec<RemoteCategory>, E>,
) -> Vec<PartnerPropertyType> {
    merge_lists(static_partner_types(), fetched, |cat| {
        Some(PartnerPropertyType {
            route: format!("/hotel/join-dynamic/{}", cat.id),
            description: non_empty(cat.description)
                .unwrap_or_else(|| PARTNER_DEFAULT_DESCRIPTION.to_string()),
            badge: non_empty(cat.badge).unwrap_or_else(|| PARTNER_DEFAULT_BADGE.to_string()),
            icon: non_empty(cat.icon).unwrap_or_else(|| PARTNER_FALLBACK_ICON.to_string()),
            key: cat.id,
            label: cat.display_name,
            color: PARTNER_DYNAMIC_COLOR.to_string(),
        })
    })
}

fn is_tent(cat: &RemoteCategory) -> bool {
    cat.display_name.eq_ignore_ascii_case("tent") || cat.name.eq_ignore_ascii_case("tent")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
