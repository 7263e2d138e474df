//! Interactive story session.

use super::commands::PlayArgs;
use super::input::{parse_line, PlayCommand, HELP};
use creativerse::{
    BranchController, ChapterOption, CreativerseConfig, EditOutcome, GenerationGateway,
    HttpGateway, JsonFileGallery, StoryPhase, TreeNode,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Run a story on stdin until it is saved or the user quits.
pub async fn run_play(
    args: PlayArgs,
    config: &CreativerseConfig,
    gallery: &JsonFileGallery,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider = args.provider_or(config.gateway.provider());
    let gateway = HttpGateway::new(&config.gateway)?.with_provider(provider);
    let controller = BranchController::new(gateway, config.story.clone());
    let controls = args.controls(provider)?;

    tracing::info!(
        premise = %controls.prompt(),
        rounds = *controls.num_rounds(),
        provider,
        "Starting story"
    );
    println!("Imagining \"{}\"...", controls.prompt());
    if let Err(e) = controller.start(controls.clone()).await {
        render_banners(&controller).await;
        return Err(e.into());
    }
    render_roster(&controller).await;
    render_round(&controller).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            PlayCommand::Pick(index) => {
                println!("Writing what happens next...");
                report(controller.select_option(index).await);
                render_round(&controller).await;
            }
            PlayCommand::Tree => render_tree(&controller.tree().await, 0),
            PlayCommand::Story => render_story(&controller.story_so_far().await),
            PlayCommand::Switch(path) => {
                println!("Going back to {}...", path);
                report(controller.switch_branch(path).await);
                render_round(&controller).await;
            }
            PlayCommand::Edit { path, title, body } => {
                println!("Redrawing the picture for {}...", path);
                match controller.edit_node(path, title, body).await {
                    Ok(EditOutcome::Refreshed) => println!("Chapter updated."),
                    Ok(EditOutcome::IllustrationKept { .. }) => {
                        println!("Text updated; the old picture was kept.")
                    }
                    Ok(EditOutcome::Discarded) => println!("The story moved on; edit dropped."),
                    Err(e) => println!("Can't edit: {}", e.user_message()),
                }
                render_banners(&controller).await;
            }
            PlayCommand::Feedback { path, title, body } => {
                match controller.request_feedback(&path, &title, &body).await {
                    Ok(feedback) => println!("{}", feedback),
                    Err(e) => println!("No feedback: {}", e.user_message()),
                }
            }
            PlayCommand::Save(visibility) => {
                match controller.finish(gallery, args.author.as_str(), visibility).await {
                    Ok(id) => {
                        render_banners(&controller).await;
                        println!("Story id: {}", id);
                        break;
                    }
                    Err(e) => println!("Not saved: {}", e.user_message()),
                }
            }
            PlayCommand::Dismiss => {
                controller.dismiss_error().await;
                controller.dismiss_notifications().await;
            }
            PlayCommand::Restart => {
                controller.reset().await;
                println!("Starting over...");
                report(controller.start(controls.clone()).await);
                render_roster(&controller).await;
                render_round(&controller).await;
            }
            PlayCommand::Help => println!("{}", HELP),
            PlayCommand::Quit => break,
        }
    }

    Ok(())
}

/// Print a failed operation. Generation failures also land in the banners.
fn report(result: creativerse::CreativerseResult<()>) {
    if let Err(e) = result {
        if e.is_validation() {
            println!("Can't do that: {}", e.user_message());
        } else {
            tracing::debug!(error = %e, "Operation failed");
        }
    }
}

async fn render_banners<G: GenerationGateway>(controller: &BranchController<G>) {
    let banners = controller.banners().await;
    if let Some(error) = &banners.error {
        println!("! {}", error);
    }
    for notice in &banners.notifications {
        println!("* {}", notice);
    }
}

async fn render_roster<G: GenerationGateway>(controller: &BranchController<G>) {
    for character in controller.roster().await {
        match &character.symbolic_concept {
            Some(concept) => println!("  {} appears as {}", character.name, concept),
            None => println!("  {} is ready", character.name),
        }
    }
}

async fn render_round<G: GenerationGateway>(controller: &BranchController<G>) {
    render_banners(controller).await;
    let snapshot = controller.snapshot().await;
    match snapshot.phase() {
        StoryPhase::OptionsReady => {
            let total = snapshot
                .controls()
                .as_ref()
                .map(|c| *c.num_rounds())
                .unwrap_or_default();
            println!("\nRound {} of {}:", controller.current_round().await, total);
            if let Some(options) = controller.current_options().await {
                for (i, option) in options.iter().enumerate() {
                    println!("  {}. {}", i + 1, option.title);
                    println!("     {}", option.body);
                }
            }
        }
        StoryPhase::Complete => {
            println!("\nThe end! `story` to read it, `save` to keep it, `switch <path>` to explore.");
        }
        StoryPhase::Idle => println!("No story in progress. `restart` to try again."),
        StoryPhase::Loading => {}
    }
}

fn render_tree(node: &TreeNode, depth: usize) {
    for child in &node.children {
        let marker = if child.is_on_selection_path { '*' } else { ' ' };
        let title = child
            .content
            .as_ref()
            .map(|c| c.title.as_str())
            .unwrap_or_default();
        println!("{}{} [{}] {}", "  ".repeat(depth), marker, child.path, title);
        render_tree(child, depth + 1);
    }
}

fn render_story(chapters: &[ChapterOption]) {
    if chapters.is_empty() {
        println!("Nothing chosen yet.");
    }
    for (i, chapter) in chapters.iter().enumerate() {
        println!("\nChapter {}: {}", i + 1, chapter.title);
        println!("{}", chapter.body);
    }
}
