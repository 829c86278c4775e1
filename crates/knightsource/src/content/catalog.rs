use serde::Serialize;

/// Navigation entry for a benefit category page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub slug: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

pub static CATEGORY_CATALOG: [CategoryEntry; 5] = [
    CategoryEntry {
        slug: "legal",
        name: "Legal",
        icon: "Scale",
    },
    CategoryEntry {
        slug: "academics",
        name: "Academics",
        icon: "GraduationCap",
    },
    CategoryEntry {
        slug: "healthcare",
        name: "Healthcare",
        icon: "Heart",
    },
    CategoryEntry {
        slug: "conferences",
        name: "Conferences",
        icon: "Plane",
    },
    CategoryEntry {
        slug: "recreation",
        name: "Recreation",
        icon: "Dumbbell",
    },
];

pub fn category_entry(slug: &str) -> Option<&'static CategoryEntry> {
    CATEGORY_CATALOG.iter().find(|entry| entry.slug == slug)
}
