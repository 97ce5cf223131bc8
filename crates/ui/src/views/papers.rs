use dioxus::prelude::*;

use crate::vm::PaperCardVm;

#[component]
pub fn PaperDeck(papers: Vec<PaperCardVm>) -> Element {
    if papers.is_empty() {
        return rsx! {
            p { class: "muted", "No papers published for this grade yet." }
        };
    }

    rsx! {
        div { class: "paper-grid",
            for paper in papers {
                article { key: "{paper.id}", class: "paper-card",
                    div { class: "paper-card__head",
                        span { class: "eyebrow", "{paper.subject}" }
                        span { class: "muted", "{paper.year_label}" }
                    }
                    h3 { "{paper.title}" }
                    p { "{paper.description}" }
                    a {
                        class: "btn download",
                        href: "{paper.download_url}",
                        target: "_blank",
                        rel: "noreferrer",
                        "Download Paper"
                    }
                }
            }
        }
    }
}
