use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::HomeView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                span { class: "brand", "FaceBond" }
                span { class: "muted", "Grade 9-12 quiz board" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
