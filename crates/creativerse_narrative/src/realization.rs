//! Giving each character art before the first round is written.

use creativerse_core::{Character, RepresentationStyle, StoryConfig};
use creativerse_error::{BuilderError, CreativerseResult};
use creativerse_interface::{GenerationGateway, PortraitRequestBuilder, SymbolRequestBuilder};
use futures::future::join_all;
use tracing::{debug, instrument, warn};

/// The realized cast plus any notices raised along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealizedCast {
    /// Characters in the order they were supplied
    pub characters: Vec<Character>,
    /// Informational notices (portrait fallbacks)
    pub notifications: Vec<String>,
}

/// Realize every character concurrently.
///
/// Characters that already have art are passed through. A portrait that
/// cannot be generated falls back to a symbol drawn from the configured
/// fallback theme and produces a notice. Results keep the input order no
/// matter which request finishes first.
///
/// # Errors
///
/// Returns the first failure that had no fallback.
#[instrument(skip(gateway, characters, config), fields(count = characters.len()))]
pub async fn realize_characters<G>(
    gateway: &G,
    characters: &[Character],
    style: &str,
    config: &StoryConfig,
) -> CreativerseResult<RealizedCast>
where
    G: GenerationGateway + ?Sized,
{
    let results = join_all(
        characters
            .iter()
            .map(|character| realize_one(gateway, character, style, config)),
    )
    .await;

    let mut cast = RealizedCast::default();
    for result in results {
        let (character, notice) = result?;
        cast.characters.push(character);
        cast.notifications.extend(notice);
    }
    Ok(cast)
}

async fn realize_one<G>(
    gateway: &G,
    character: &Character,
    style: &str,
    config: &StoryConfig,
) -> CreativerseResult<(Character, Option<String>)>
where
    G: GenerationGateway + ?Sized,
{
    if character.is_realized() {
        debug!(name = %character.name, "Character already has art");
        return Ok((character.clone(), None));
    }

    let mut realized = character.clone();
    match character.representation {
        RepresentationStyle::Portrait => {
            let mut builder = PortraitRequestBuilder::default();
            builder
                .description(character.description.clone())
                .style(style);
            if let Some(reference) = &character.reference_image {
                builder.reference_image(reference.clone());
            }
            let request = builder.build().map_err(BuilderError::from)?;

            match gateway.realize_portrait(&request).await {
                Ok(illustration) => {
                    realized.illustration = Some(illustration);
                    Ok((realized, None))
                }
                Err(e) => {
                    warn!(name = %character.name, error = %e, "Portrait failed, falling back to symbol");
                    let theme = config.portrait_fallback_theme();
                    realize_symbol(gateway, &mut realized, theme, style).await?;
                    let notice = format!(
                        "Couldn't create a portrait for {}, so we made a symbolic one instead!",
                        character.name
                    );
                    Ok((realized, Some(notice)))
                }
            }
        }
        RepresentationStyle::Symbolic => {
            let theme = character
                .symbolic_theme
                .clone()
                .unwrap_or_else(|| config.default_symbolic_theme().clone());
            realize_symbol(gateway, &mut realized, &theme, style).await?;
            Ok((realized, None))
        }
    }
}

async fn realize_symbol<G>(
    gateway: &G,
    character: &mut Character,
    theme: &str,
    style: &str,
) -> CreativerseResult<()>
where
    G: GenerationGateway + ?Sized,
{
    let request = SymbolRequestBuilder::default()
        .name(character.name.clone())
        .description(character.description.clone())
        .theme(theme)
        .style(style)
        .build()
        .map_err(BuilderError::from)?;

    let realization = gateway.realize_symbol(&request).await?;
    debug!(name = %character.name, concept = %realization.concept, "Symbol realized");
    character.apply_symbol(realization);
    Ok(())
}
