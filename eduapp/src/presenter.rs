//! Maps the state of a browser onto what the screen shows.
//!
//! Every card slot is always filled, with a fallback text where the item
//! lacks the value, so cards keep the same layout whatever fields the API
//! returned.
use chrono::{
    DateTime,
    Utc,
};
use educore::{
    api::ResourceApi,
    query::QueryState,
    resource::{
        parse_timestamp,
        Document,
        Exam,
        ExamStatus,
        Exercise,
        Module,
        Resource,
    },
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::browser::ResourceBrowser;

pub const DEFAULT_PLACEHOLDERS: usize = 6;

pub const NO_TITLE: &str = "Titre non disponible";
pub const NO_IMAGE: &str = "Image non disponible";
pub const NO_VALUE: &str = "N/A";
pub const NO_DESCRIPTION: &str = "Aucune description disponible";
pub const NO_DATE: &str = "Date inconnue";
pub const NO_LINK: &str = "Lien non disponible";
pub const UNSPECIFIED: &str = "Non spécifié";

/// The context cards are rendered in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardContext {
    pub storage_url: String,
    pub now: DateTime<Utc>,
}

impl CardContext {
    pub fn new(storage_url: impl Into<String>) -> Self {
        Self {
            storage_url: storage_url.into().trim_end_matches('/').to_string(),
            now: Utc::now(),
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn storage(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.trim().is_empty())
            .map(|p| format!("{}/{}", self.storage_url, p.trim_start_matches('/')))
    }

    fn published(&self, created_at: Option<&str>) -> String {
        created_at
            .and_then(parse_timestamp)
            .map(|then| format!("Publié {}", relative_time(then, self.now)))
            .unwrap_or_else(|| NO_DATE.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Image {
    /// `None` renders the placeholder box with `alt` as its caption.
    pub src: Option<String>,
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Link {
    pub href: Option<String>,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub image: Image,
    pub duration: String,
    pub description: String,
    pub published: String,
    pub link: Link,
}

/// Conversion of a resource into its card.
pub trait Present: Resource {
    fn card(&self, ctx: &CardContext) -> Card;
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    value.map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn image(ctx: &CardContext, path: Option<&str>, title: Option<&str>) -> Image {
    let src = ctx.storage(path);
    let alt = match src {
        Some(_) => text_or(title, NO_IMAGE),
        None => NO_IMAGE.to_string(),
    };
    Image { src, alt }
}

pub fn status_label(status: ExamStatus) -> &'static str {
    match status {
        ExamStatus::Active => "Actif",
        ExamStatus::Archived => "Archivé",
        ExamStatus::Draft => "Brouillon",
    }
}

impl Present for Module {
    fn card(&self, ctx: &CardContext) -> Card {
        Card {
            id: self.id,
            title: text_or(self.name.as_deref(), NO_TITLE),
            subtitle: text_or(self.year.as_deref(), UNSPECIFIED),
            image: image(ctx, self.image_path.as_deref(), self.name.as_deref()),
            duration: NO_VALUE.to_string(),
            description: text_or(self.description.as_deref(), NO_DESCRIPTION),
            published: ctx.published(self.created_at.as_deref()),
            link: Link {
                href: Some(format!("/modules/{}", self.id)),
                label: "Voir le module".to_string(),
            },
        }
    }
}

impl Present for Exam {
    fn card(&self, ctx: &CardContext) -> Card {
        let module = self.module.as_ref().and_then(|m| m.name.as_deref());
        let href = ctx.storage(self.path.as_deref());
        let label = match href {
            Some(_) => "Accéder à l'examen",
            None => NO_LINK,
        };
        Card {
            id: self.id,
            title: text_or(self.title.as_deref(), NO_TITLE),
            subtitle: [
                text_or(module, NO_VALUE),
                text_or(self.year.as_deref(), NO_VALUE),
                status_label(self.status).to_string(),
            ].iter().join(" · "),
            image: image(ctx, self.image_path.as_deref(), self.title.as_deref()),
            duration: self.duration.as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(|d| format!("{d} minutes"))
                .unwrap_or_else(|| NO_VALUE.to_string()),
            description: text_or(self.difficulty_level.as_deref(), UNSPECIFIED),
            published: ctx.published(self.created_at.as_deref()),
            link: Link { href, label: label.to_string() },
        }
    }
}

impl Present for Document {
    fn card(&self, ctx: &CardContext) -> Card {
        Card {
            id: self.id,
            title: text_or(self.title.as_deref(), NO_TITLE),
            subtitle: format!("{} j'aime", self.likes),
            image: image(ctx, self.image_path.as_deref(), self.title.as_deref()),
            duration: NO_VALUE.to_string(),
            description: text_or(self.description.as_deref(), NO_DESCRIPTION),
            published: ctx.published(self.created_at.as_deref()),
            link: Link {
                href: Some(format!("/documents/{}", self.id)),
                label: "Lire le document".to_string(),
            },
        }
    }
}

impl Present for Exercise {
    fn card(&self, ctx: &CardContext) -> Card {
        Card {
            id: self.id,
            title: text_or(self.title.as_deref(), NO_TITLE),
            subtitle: text_or(self.difficulty_level.as_deref(), UNSPECIFIED),
            image: image(ctx, None, None),
            duration: NO_VALUE.to_string(),
            description: text_or(self.description.as_deref(), NO_DESCRIPTION),
            published: ctx.published(self.created_at.as_deref()),
            link: Link {
                href: Some(format!("/exercises/{}", self.id)),
                label: "Voir l'exercice".to_string(),
            },
        }
    }
}

/// French relative time as shown under each card, e.g. "il y a 3 jours".
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    let (count, unit) = match delta.num_seconds() {
        s if s < 60 => return "à l'instant".to_string(),
        s if s < 3600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3600, "heure"),
        s if s < 30 * 86_400 => (s / 86_400, "jour"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "mois"),
        s => (s / (365 * 86_400), "an"),
    };
    let plural = if count > 1 && unit != "mois" { "s" } else { "" };
    format!("il y a {count} {unit}{plural}")
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Presentation {
    Placeholders(usize),
    Empty { message: String },
    Cards(Vec<Card>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presenter {
    placeholders: usize,
    ctx: CardContext,
}

impl Presenter {
    pub fn new(ctx: CardContext) -> Self {
        Self {
            placeholders: DEFAULT_PLACEHOLDERS,
            ctx,
        }
    }

    pub fn placeholders(mut self, value: usize) -> Self {
        self.placeholders = value.max(1);
        self
    }

    pub fn context(&self) -> &CardContext {
        &self.ctx
    }

    pub fn empty_message(query: &QueryState) -> String {
        match query.search_term() {
            Some(term) => format!("Aucun résultat trouvé pour la recherche : \"{term}\""),
            None => "Aucun résultat trouvé.".to_string(),
        }
    }

    pub fn present_items<T: Present>(
        &self,
        loading: bool,
        items: &[T],
        query: &QueryState,
    ) -> Presentation {
        if loading {
            Presentation::Placeholders(self.placeholders)
        } else if items.is_empty() {
            Presentation::Empty { message: Self::empty_message(query) }
        } else {
            Presentation::Cards(items.iter().map(|item| item.card(&self.ctx)).collect())
        }
    }

    pub fn present<T: Present, A: ResourceApi + 'static>(
        &self,
        browser: &ResourceBrowser<T, A>,
    ) -> Presentation {
        self.present_items(browser.loading(), &browser.view(), &browser.query())
    }
}
