//! Built-in catalog shipped with the application

use super::Video;

/// Category chips offered by the explore view
pub const EXPLORE_CATEGORIES: [&str; 6] = [
    "Sci-Fi",
    "Nature",
    "Design",
    "Technology",
    "Lifestyle",
    "Science",
];

struct Entry {
    id: &'static str,
    title: &'static str,
    seed: &'static str,
    media: &'static str,
    duration: &'static str,
    views: &'static str,
    creator: &'static str,
    category: &'static str,
    description: &'static str,
}

const ENTRIES: [Entry; 6] = [
    Entry {
        id: "1",
        title: "Cyberpunk Cityscape: 2099",
        seed: "cyber",
        media: "BigBuckBunny.mp4",
        duration: "10:04",
        views: "1.2M",
        creator: "NeonArch",
        category: "Sci-Fi",
        description: "A deep dive into the neon-lit streets of Neo-Tokyo in the year 2099.",
    },
    Entry {
        id: "2",
        title: "Mountain Retreat: Cinematic 4K",
        seed: "mountain",
        media: "ElephantsDream.mp4",
        duration: "12:35",
        views: "850K",
        creator: "NatureVibe",
        category: "Nature",
        description: "Breathtaking views from the highest peaks in the Himalayas.",
    },
    Entry {
        id: "3",
        title: "Minimalist Architecture Design",
        seed: "arch",
        media: "ForBiggerBlazes.mp4",
        duration: "08:20",
        views: "420K",
        creator: "StudioAlpha",
        category: "Design",
        description: "Exploring the beauty of modern minimalist structures across Europe.",
    },
    Entry {
        id: "4",
        title: "Future Tech Expo 2025",
        seed: "tech",
        media: "ForBiggerEscapes.mp4",
        duration: "15:45",
        views: "2.5M",
        creator: "TechDaily",
        category: "Technology",
        description: "Everything you missed at the biggest tech event of the decade.",
    },
    Entry {
        id: "5",
        title: "The Art of Coffee Roasting",
        seed: "coffee",
        media: "ForBiggerFun.mp4",
        duration: "05:12",
        views: "150K",
        creator: "BeanMaster",
        category: "Lifestyle",
        description: "Mastering the roast to get that perfect cup of specialty coffee.",
    },
    Entry {
        id: "6",
        title: "Deep Ocean Exploration",
        seed: "ocean",
        media: "ForBiggerJoyrides.mp4",
        duration: "22:10",
        views: "1.1M",
        creator: "AbyssExplorer",
        category: "Science",
        description: "Descending into the Mariana Trench to discover alien-like lifeforms.",
    },
];

const MEDIA_BASE: &str = "https://storage.googleapis.com/gtv-videos-bucket/sample";

/// The fixed catalog, in display order
pub fn builtin_catalog() -> Vec<Video> {
    ENTRIES
        .iter()
        .map(|e| Video {
            id: e.id.to_string(),
            title: e.title.to_string(),
            thumbnail: format!("https://picsum.photos/seed/{}/800/450", e.seed),
            url: format!("{}/{}", MEDIA_BASE, e.media),
            duration: e.duration.to_string(),
            views: e.views.to_string(),
            creator: e.creator.to_string(),
            description: e.description.to_string(),
            category: e.category.to_string(),
            ai_insights: None,
            is_user_generated: None,
            created_at: None,
        })
        .collect()
}

/// Resolve a chip name case-insensitively to its canonical spelling
///
/// # Examples
///
/// ```
/// use novastream::catalog::resolve_category;
///
/// assert_eq!(resolve_category("sci-fi"), Some("Sci-Fi"));
/// assert_eq!(resolve_category("Cooking"), None);
/// ```
pub fn resolve_category(name: &str) -> Option<&'static str> {
    EXPLORE_CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(name.trim()))
}
