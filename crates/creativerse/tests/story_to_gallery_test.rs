//! A whole story, from premise to a gallery file, through the facade crate.

use async_trait::async_trait;
use creativerse::{
    BranchController, ChapterOption, CreativerseResult, GalleryFilter, GenerationGateway,
    IllustrationRef, IllustrationRequest, JsonFileGallery, NarrativeControls, PortraitRequest,
    RoundOptionSet, RoundRequest, StoryConfig, StoryGallery, StoryPath, StoryPhase,
    SymbolRequest, SymbolicRealization, Visibility,
};
use tempfile::TempDir;

/// Names every option after its round and position.
struct CountingGateway;

#[async_trait]
impl GenerationGateway for CountingGateway {
    async fn generate_round(&self, req: &RoundRequest) -> CreativerseResult<RoundOptionSet> {
        let round = *req.round();
        Ok((1..=3)
            .map(|i| {
                ChapterOption::new(
                    format!("Round {round} option {i}"),
                    format!("What happened in round {round}, take {i}."),
                    format!("img://{round}/{i}"),
                )
            })
            .collect::<Vec<_>>()
            .into())
    }

    async fn regenerate_illustration(
        &self,
        req: &IllustrationRequest,
    ) -> CreativerseResult<IllustrationRef> {
        Ok(IllustrationRef::new(format!("img://edited/{}", req.title())))
    }

    async fn critique(&self, _original: &str, _edited: &str) -> CreativerseResult<String> {
        Ok("Lovely.".to_string())
    }

    async fn realize_portrait(&self, req: &PortraitRequest) -> CreativerseResult<IllustrationRef> {
        Ok(IllustrationRef::new(format!("img://portrait/{}", req.description())))
    }

    async fn realize_symbol(&self, req: &SymbolRequest) -> CreativerseResult<SymbolicRealization> {
        Ok(SymbolicRealization {
            concept: format!("a lantern for {}", req.name()),
            illustration: IllustrationRef::new("img://lantern"),
        })
    }

    fn provider_name(&self) -> &'static str {
        "counting"
    }
}

#[tokio::test]
async fn test_branching_story_lands_in_gallery_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gallery.json");
    let gallery = JsonFileGallery::new(&path);
    let controller = BranchController::new(CountingGateway, StoryConfig::default());

    let controls = NarrativeControls::builder()
        .prompt("The Lighthouse Cat")
        .num_rounds(3u32)
        .build()
        .unwrap();
    controller.start(controls).await.unwrap();
    controller.select_option(0).await.unwrap();
    controller.select_option(2).await.unwrap();

    // Change our mind about round two, then finish differently.
    controller.switch_branch(StoryPath::from(vec![0])).await.unwrap();
    controller.select_option(1).await.unwrap();
    controller
        .edit_node(StoryPath::from(vec![0, 1]), "A Better Middle", "It got better.")
        .await
        .unwrap();
    controller.select_option(1).await.unwrap();
    assert_eq!(controller.phase().await, StoryPhase::Complete);

    let id = controller
        .finish(&gallery, "Pip's biggest fan", Visibility::Public)
        .await
        .unwrap();
    assert_eq!(controller.phase().await, StoryPhase::Idle);

    let reopened = JsonFileGallery::new(&path);
    let saved = reopened.get(&id).await.unwrap().unwrap();
    let titles: Vec<_> = saved.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Round 1 option 1", "A Better Middle", "Round 3 option 2"]
    );
    assert_eq!(saved.chapters[1].illustration.as_str(), "img://edited/A Better Middle");
    assert_eq!(saved.cover.as_ref().map(|c| c.as_str()), Some("img://1/1"));
    assert_eq!(reopened.list(GalleryFilter::Public).await.unwrap().len(), 1);
}
