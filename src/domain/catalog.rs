//! Built-in reading and audio libraries.

use crate::models::{Article, ArticleFilters, AudioTrack};

/// Filter value that matches every entry
pub const ALL: &str = "all";

struct ArticleEntry {
    id: &'static str,
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    category: &'static str,
    age_group: &'static str,
    read_time: &'static str,
    last_updated: &'static str,
    tags: &'static [&'static str],
}

impl ArticleEntry {
    fn to_article(&self) -> Article {
        Article {
            id: self.id.to_string(),
            title: self.title.to_string(),
            excerpt: self.excerpt.to_string(),
            content: self.content.to_string(),
            category: self.category.to_string(),
            age_group: self.age_group.to_string(),
            read_time: self.read_time.to_string(),
            last_updated: self.last_updated.to_string(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

const ARTICLES: &[ArticleEntry] = &[
    ArticleEntry {
        id: "newborn-sleep-patterns",
        title: "Understanding Newborn Sleep Patterns",
        excerpt: "Learn about normal sleep cycles and what to expect in the first few months.",
        content: "Newborns typically sleep 14-17 hours per day, but in short 2-4 hour stretches. Their sleep cycles are different from adults, with more REM sleep for brain development.",
        category: "Sleep Development",
        age_group: "0-3 months",
        read_time: "5 min read",
        last_updated: "2024-01-15",
        tags: &["newborn", "sleep cycles", "development"],
    },
    ArticleEntry {
        id: "sleep-regression-4months",
        title: "The 4-Month Sleep Regression",
        excerpt: "Why your baby's sleep suddenly changes and how to navigate this challenging phase.",
        content: "Around 4 months, babies' sleep patterns mature, leading to more frequent night wakings. This is actually a positive developmental milestone.",
        category: "Sleep Development",
        age_group: "3-6 months",
        read_time: "7 min read",
        last_updated: "2024-01-20",
        tags: &["sleep regression", "development", "4 months"],
    },
    ArticleEntry {
        id: "gentle-sleep-training",
        title: "Gentle Sleep Training Methods",
        excerpt: "Evidence-based approaches to help your baby learn independent sleep skills.",
        content: "Step-by-step guide to gentle sleep training methods including the pick-up-put-down method, gradual retreat, and check-and-console approaches.",
        category: "Sleep Training",
        age_group: "4-12 months",
        read_time: "10 min read",
        last_updated: "2024-01-10",
        tags: &["sleep training", "gentle methods", "independent sleep"],
    },
    ArticleEntry {
        id: "optimal-sleep-environment",
        title: "Creating the Perfect Sleep Environment",
        excerpt: "Science-backed tips for designing a nursery that promotes better sleep.",
        content: "Learn about optimal room temperature (68-70°F), lighting conditions, noise levels, and safe sleep practices for better rest.",
        category: "Sleep Environment",
        age_group: "All ages",
        read_time: "6 min read",
        last_updated: "2024-01-25",
        tags: &["nursery", "environment", "safe sleep"],
    },
];

const CATEGORIES: &[&str] = &[ALL, "Sleep Development", "Sleep Training", "Sleep Environment"];

const AGE_GROUPS: &[&str] = &[
    ALL,
    "0-3 months",
    "3-6 months",
    "4-12 months",
    "6-24 months",
    "12+ months",
    "All ages",
];

// (id, title, description, duration_seconds, category, url)
const SOUNDS: &[(&str, &str, &str, u32, &str, &str)] = &[
    ("1", "Brahms Lullaby - Classical", "Traditional German lullaby with gentle piano", 180, "Classical Lullaby", "https://www.soundjay.com/misc/sounds/bell-ringing-05.wav"),
    ("2", "Twinkle Twinkle Little Star", "Beloved nursery rhyme in soft instrumental", 120, "Nursery Rhyme", "https://www2.cs.uic.edu/~i101/SoundFiles/BabyElephantWalk60.wav"),
    ("3", "Gentle Forest Sounds", "Birds chirping softly with nature ambiance", 300, "Nature Sounds", "https://www.soundjay.com/misc/sounds/bell-ringing-05.wav"),
    ("4", "Rock-a-bye Baby", "Classic English lullaby with music box melody", 150, "Traditional Lullaby", "https://www2.cs.uic.edu/~i101/SoundFiles/BabyElephantWalk60.wav"),
    ("5", "Soft Harp Melodies", "Peaceful harp compositions for deep sleep", 240, "Instrumental", "https://www.soundjay.com/misc/sounds/bell-ringing-05.wav"),
    ("6", "Ocean Waves with Seagulls", "Calming beach sounds with distant seagulls", 350, "Nature Sounds", "https://www2.cs.uic.edu/~i101/SoundFiles/BabyElephantWalk60.wav"),
    ("7", "Mary Had a Little Lamb", "Gentle instrumental version of the classic", 100, "Nursery Rhyme", "https://www.soundjay.com/misc/sounds/bell-ringing-05.wav"),
    ("8", "Soft Rain on Leaves", "Gentle rainfall with rustling leaves", 400, "Rain Sounds", "https://www2.cs.uic.edu/~i101/SoundFiles/BabyElephantWalk60.wav"),
    ("9", "Silent Night - Music Box", "Christmas lullaby in delicate music box style", 200, "Holiday Lullaby", "https://www.soundjay.com/misc/sounds/bell-ringing-05.wav"),
    ("10", "Gentle Celtic Melodies", "Soft Celtic harp and flute combinations", 280, "Celtic", "https://www2.cs.uic.edu/~i101/SoundFiles/BabyElephantWalk60.wav"),
];

fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    match filter {
        None | Some(ALL) => true,
        Some(wanted) => value == wanted,
    }
}

/// Articles matching both filters; a missing or `all` filter matches everything
pub fn filter_articles(category: Option<&str>, age_group: Option<&str>) -> Vec<Article> {
    ARTICLES
        .iter()
        .filter(|a| matches_filter(a.category, category) && matches_filter(a.age_group, age_group))
        .map(ArticleEntry::to_article)
        .collect()
}

pub fn find_article(id: &str) -> Option<Article> {
    ARTICLES.iter().find(|a| a.id == id).map(ArticleEntry::to_article)
}

pub fn article_filters() -> ArticleFilters {
    ArticleFilters {
        categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
        age_groups: AGE_GROUPS.iter().map(|g| g.to_string()).collect(),
    }
}

/// Case-insensitive match on title or category; a blank query lists every track
pub fn search_audio(query: Option<&str>) -> Vec<AudioTrack> {
    let needle = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();

    SOUNDS
        .iter()
        .filter(|(_, title, _, _, category, _)| {
            needle.is_empty()
                || title.to_lowercase().contains(&needle)
                || category.to_lowercase().contains(&needle)
        })
        .map(|(id, title, description, duration, category, url)| AudioTrack {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            duration_seconds: *duration,
            category: category.to_string(),
            url: url.to_string(),
        })
        .collect()
}
