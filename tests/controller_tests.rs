use async_trait::async_trait;
use std::sync::Arc;
use thumbforge::error::THUMBNAIL_GENERATION_FAILED;
use thumbforge::image_data::InMemoryFile;
use thumbforge::{
    AspectRatio, EncodedImage, GeneratedThumbnail, Step, StudioController, ThumbForgeError,
    ThumbnailGenerator, ThumbnailOutcome, ThumbnailRequest, TitleCandidate, TitleGenerator,
    ValidationError,
};

struct FixedTitles(Vec<&'static str>);

#[async_trait]
impl TitleGenerator for FixedTitles {
    async fn generate_titles(&self, _topic: &str) -> Result<Vec<TitleCandidate>, ThumbForgeError> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

/// Echoes the requested title back as the image payload, or fails for "boom".
struct EchoThumbnails;

#[async_trait]
impl ThumbnailGenerator for EchoThumbnails {
    async fn generate_thumbnail(
        &self,
        request: &ThumbnailRequest,
    ) -> Result<Option<GeneratedThumbnail>, ThumbForgeError> {
        if request.title == "boom" {
            return Err(ThumbForgeError::ThumbnailGeneration(
                THUMBNAIL_GENERATION_FAILED.to_string(),
            ));
        }
        Ok(Some(EncodedImage::from_bytes(
            "image/png",
            request.title.as_bytes(),
        )))
    }
}

fn studio() -> StudioController {
    StudioController::new(
        Arc::new(FixedTitles(vec!["Judul A", "Judul B", "boom"])),
        Arc::new(EchoThumbnails),
    )
}

fn photo() -> InMemoryFile {
    InMemoryFile::new("me.png", "image/png", vec![0x89, b'P', b'N', b'G', 0, 0])
}

#[test]
fn starts_in_title_selection_without_a_title() {
    let studio = studio();
    assert_eq!(studio.step(), &Step::SelectingTitle);
    assert_eq!(studio.selected_title(), None);
}

#[test]
fn selecting_stores_the_exact_title() {
    let mut studio = studio();
    studio.select("Judul B").unwrap();
    assert_eq!(
        studio.step(),
        &Step::CreatingThumbnail {
            title: "Judul B".to_string()
        }
    );
    assert_eq!(studio.selected_title(), Some("Judul B"));
}

#[test]
fn select_is_only_valid_while_choosing_a_title() {
    let mut studio = studio();
    assert_eq!(
        studio.select(""),
        Err(ThumbForgeError::Validation(ValidationError::EmptyTitle))
    );
    assert_eq!(studio.step(), &Step::SelectingTitle);

    studio.select("Judul A").unwrap();
    assert!(matches!(
        studio.select("Judul B"),
        Err(ThumbForgeError::InvalidTransition { .. })
    ));
    assert_eq!(studio.selected_title(), Some("Judul A"));
}

#[tokio::test]
async fn generating_before_selection_is_rejected() {
    let mut studio = studio();
    assert!(matches!(
        studio.generate_thumbnail().await,
        Err(ThumbForgeError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn full_walkthrough_hands_the_title_to_the_thumbnail_flow() {
    let mut studio = studio();
    let candidates = studio
        .titles_mut()
        .generate("nasi goreng")
        .await
        .unwrap()
        .to_vec();
    studio.select(&candidates[0]).unwrap();

    studio.thumbnails_mut().upload(&photo()).await.unwrap();
    studio
        .thumbnails_mut()
        .set_aspect_ratio(AspectRatio::Portrait);

    let outcome = studio.generate_thumbnail().await.unwrap();
    let expected = EncodedImage::from_bytes("image/png", b"Judul A");
    assert_eq!(outcome, ThumbnailOutcome::Generated(expected));
    assert_eq!(
        studio.download_name().as_deref(),
        Some("thumbnail-9:16-Judul A.png")
    );
}

#[tokio::test]
async fn back_always_returns_to_a_clean_title_step() {
    // after a success
    let mut studio = studio();
    studio.select("Judul A").unwrap();
    studio.thumbnails_mut().upload(&photo()).await.unwrap();
    studio.generate_thumbnail().await.unwrap();
    studio.back();
    assert_eq!(studio.step(), &Step::SelectingTitle);
    assert_eq!(studio.selected_title(), None);
    assert!(studio.thumbnails().source_image().is_none());
    assert!(studio.thumbnails().thumbnail().is_none());

    // after a failure
    studio.select("boom").unwrap();
    studio.thumbnails_mut().upload(&photo()).await.unwrap();
    assert!(studio.generate_thumbnail().await.is_err());
    assert!(studio.thumbnails().error().is_some());
    studio.back();
    assert_eq!(studio.step(), &Step::SelectingTitle);
    assert_eq!(studio.selected_title(), None);
    assert!(studio.thumbnails().error().is_none());

    // back while already choosing is harmless
    studio.back();
    assert_eq!(studio.step(), &Step::SelectingTitle);
}

#[tokio::test]
async fn saving_writes_the_decoded_png() {
    let dir = tempfile::tempdir().unwrap();
    let mut studio = studio();
    studio.select("Judul A").unwrap();
    studio.thumbnails_mut().upload(&photo()).await.unwrap();
    studio.generate_thumbnail().await.unwrap();

    let path = studio.save_thumbnail(dir.path()).await.unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "thumbnail-16_9-Judul A.png"
    );
    assert_eq!(std::fs::read(&path).unwrap(), b"Judul A");
}
