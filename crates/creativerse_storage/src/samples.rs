//! Starter stories for an empty gallery.

use chrono::{Duration, Utc};
use creativerse_core::{
    ChapterOption, Character, GalleryStory, NarrativeControls, StoryId, Visibility,
};
use creativerse_error::{BuilderError, CreativerseResult};

/// Author credited on the starter stories.
const SAMPLE_AUTHOR: &str = "Creativerse";

struct Sample {
    id: &'static str,
    prompt: &'static str,
    genre: &'static str,
    hero: (&'static str, &'static str),
    chapters: [(&'static str, &'static str, &'static str); 2],
    likes: u32,
    days_ago: i64,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        id: "sample-lighthouse-cat",
        prompt: "The Lighthouse Cat",
        genre: "adventure",
        hero: ("Pip", "A small grey cat with one white paw"),
        chapters: [
            (
                "The Lamp Goes Dark",
                "On the stormiest night of the year the great lamp flickered out, and only Pip was awake to notice.",
                "https://picsum.photos/seed/lighthouse-cat-1/512/512",
            ),
            (
                "A Paw on the Switch",
                "Pip climbed the spiral stairs, batted the brass switch, and the beam swept across the waves just in time for the fishing boats.",
                "https://picsum.photos/seed/lighthouse-cat-2/512/512",
            ),
        ],
        likes: 42,
        days_ago: 1,
    },
    Sample {
        id: "sample-cloud-garden",
        prompt: "The Garden Above the Clouds",
        genre: "fantasy",
        hero: ("Mira", "A girl in rain boots carrying a watering can"),
        chapters: [
            (
                "A Beanstalk of Rain",
                "Mira watered a single seed with rain she had saved all spring, and by morning it had grown past the clouds.",
                "https://picsum.photos/seed/cloud-garden-1/512/512",
            ),
            (
                "Flowers That Hum",
                "At the top she found a garden where every flower hummed a different note, waiting for someone to conduct them.",
                "https://picsum.photos/seed/cloud-garden-2/512/512",
            ),
        ],
        likes: 87,
        days_ago: 2,
    },
    Sample {
        id: "sample-sock-mystery",
        prompt: "The Case of the Vanishing Socks",
        genre: "mystery",
        hero: ("Inspector Button", "A tidy mouse in a tiny tweed coat"),
        chapters: [
            (
                "One Sock Short",
                "Every laundry day one sock went missing, and Inspector Button was finally called in to investigate.",
                "https://picsum.photos/seed/sock-mystery-1/512/512",
            ),
            (
                "The Nest Behind the Dryer",
                "The trail of lint led to a cosy nest where a family of hamsters had been knitting the socks into blankets.",
                "https://picsum.photos/seed/sock-mystery-2/512/512",
            ),
        ],
        likes: 63,
        days_ago: 3,
    },
];

/// Public starter stories, newest first, credited to "Creativerse".
///
/// Ids are fixed so seeding the same gallery twice is recognisable.
pub fn sample_stories() -> CreativerseResult<Vec<GalleryStory>> {
    let now = Utc::now();
    SAMPLES
        .iter()
        .map(|sample| -> CreativerseResult<GalleryStory> {
            let (name, description) = sample.hero;
            let hero = Character::portrait(name, description);
            let controls = NarrativeControls::builder()
                .prompt(sample.prompt)
                .genre(sample.genre)
                .num_rounds(sample.chapters.len() as u32)
                .characters(vec![hero.clone()])
                .build()
                .map_err(BuilderError::from)?;

            let chapters = sample
                .chapters
                .iter()
                .map(|(title, body, image)| ChapterOption::new(*title, *body, *image))
                .collect();

            let mut story = GalleryStory::new(
                &controls,
                chapters,
                vec![hero],
                SAMPLE_AUTHOR,
                Visibility::Public,
            );
            story.id = StoryId::from(sample.id);
            story.likes = sample.likes;
            story.created_at = now - Duration::days(sample.days_ago);
            Ok(story)
        })
        .collect()
}
