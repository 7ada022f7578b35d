use educore::listing::Pagination;
use leptos::prelude::*;

use crate::presenter::{Card, Presentation};

#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="card skeleton">
            <div class="skeleton-image"></div>
            <div class="skeleton-line wide"></div>
            <div class="skeleton-line"></div>
        </div>
    }
}

#[component]
pub fn CardView(card: Card) -> impl IntoView {
    let image = match card.image.src {
        Some(src) => view! {
            <img class="card-image" src=src alt=card.image.alt/>
        }.into_any(),
        None => view! {
            <div class="card-image unavailable"><p>{card.image.alt}</p></div>
        }.into_any(),
    };
    let link = match card.link.href {
        Some(href) => view! {
            <a class="card-link" href=href>{card.link.label}</a>
        }.into_any(),
        None => view! {
            <span class="card-link disabled">{card.link.label}</span>
        }.into_any(),
    };
    view! {
        <div class="card">
            {image}
            <h2>{card.title}</h2>
            <p class="subtitle">{card.subtitle}</p>
            <p class="duration">{card.duration}</p>
            <p class="description">{card.description}</p>
            <p class="published">{card.published}</p>
            {link}
        </div>
    }
}

#[component]
pub fn CollectionView(presentation: Presentation) -> impl IntoView {
    match presentation {
        Presentation::Placeholders(count) => view! {
            <div class="grid">
                {(0..count).map(|_| view! { <CardSkeleton/> }).collect_view()}
            </div>
        }.into_any(),
        Presentation::Empty { message } => view! {
            <p class="empty">{message}</p>
        }.into_any(),
        Presentation::Cards(cards) => view! {
            <div class="grid">
                {cards.into_iter().map(|card| view! { <CardView card/> }).collect_view()}
            </div>
        }.into_any(),
    }
}

/// Re-renders whenever the presentation signal changes.
#[component]
pub fn ResourceListing(
    #[prop(into)] presentation: Signal<Presentation>,
) -> impl IntoView {
    view! {
        <div class="listing">
            {move || view! { <CollectionView presentation=presentation.get()/> }}
        </div>
    }
}

#[component]
pub fn Pager(pagination: Pagination, base: String) -> impl IntoView {
    let previous = pagination.has_previous().then(|| view! {
        <a class="pager-previous" href=format!("{base}?page={}", pagination.current_page - 1)>
            "← Précédent"
        </a>
    });
    let next = pagination.has_next().then(|| view! {
        <a class="pager-next" href=format!("{base}?page={}", pagination.current_page + 1)>
            "Suivant →"
        </a>
    });
    view! {
        <nav class="pager">
            {previous}
            <span>{format!("Page {} / {}", pagination.current_page, pagination.total_pages)}</span>
            {next}
        </nav>
    }
}
