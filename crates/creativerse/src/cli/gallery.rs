//! Gallery command handlers.

use super::commands::GalleryCommands;
use creativerse::{
    sample_stories, CreativerseResult, GalleryFilter, GalleryStory, JsonFileGallery, StoryGallery,
    StoryId,
};

/// Handle gallery commands.
pub async fn handle_gallery_command(
    cmd: GalleryCommands,
    gallery: &JsonFileGallery,
) -> CreativerseResult<()> {
    if gallery.seed_if_empty(sample_stories()?).await? {
        tracing::info!(path = %gallery.path().display(), "Created gallery with sample stories");
    }

    match cmd {
        GalleryCommands::List { filter } => list_stories(gallery, filter).await,
        GalleryCommands::Show { id } => show_story(gallery, &StoryId::from(id)).await,
        GalleryCommands::Like { id } => {
            let likes = gallery.like(&StoryId::from(id)).await?;
            println!("Liked! {} like{} now.", likes, if likes == 1 { "" } else { "s" });
            Ok(())
        }
    }
}

async fn list_stories(gallery: &JsonFileGallery, filter: GalleryFilter) -> CreativerseResult<()> {
    let stories = gallery.list(filter).await?;
    if stories.is_empty() {
        println!("No {} stories yet.", filter);
        return Ok(());
    }

    println!("{:<40} {:<32} {:<20} {:>5}", "ID", "TITLE", "AUTHOR", "LIKES");
    println!("{:-<100}", "");
    for story in &stories {
        println!(
            "{:<40} {:<32} {:<20} {:>5}",
            story.id,
            truncate(&story.title, 32),
            truncate(&story.author, 20),
            story.likes
        );
    }
    println!("Total: {} stories", stories.len());
    Ok(())
}

async fn show_story(gallery: &JsonFileGallery, id: &StoryId) -> CreativerseResult<()> {
    match gallery.get(id).await? {
        Some(story) => print_story(&story),
        None => println!("No story with id {}", id),
    }
    Ok(())
}

fn print_story(story: &GalleryStory) {
    println!("{}", story.title);
    println!(
        "by {} ({}, {} likes, {})",
        story.author,
        story.visibility,
        story.likes,
        story.created_at.format("%Y-%m-%d")
    );
    if !story.characters.is_empty() {
        let names: Vec<&str> = story.characters.iter().map(|c| c.name.as_str()).collect();
        println!("Starring {}", names.join(", "));
    }
    for (i, chapter) in story.chapters.iter().enumerate() {
        println!("\nChapter {}: {}", i + 1, chapter.title);
        println!("{}", chapter.body);
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
