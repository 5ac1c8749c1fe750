use maud::DOCTYPE;

use super::*;

pub(super) const SITE_TITLE: &str = "MFA Alumni Books";

pub(super) fn universal(body: Markup, theme: Theme, resource: &'static str, title: &str) -> Markup {
    let dark_theme = match theme {
        Theme::Dark => Some("dark-theme"),
        Theme::Light => None,
    };

    html! {
        (DOCTYPE)
        html lang="en-us" {
            head {
                meta charset="utf-8";
                title { (SITE_TITLE) " | " (title) }
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link type="text/css" rel="stylesheet" href={"/style/" (resource) ".css"};
            }
            body class=[dark_theme] {
                (body)
                script type="module" src={"/script/" (resource) ".js"} {};
            }
        }
    }
}
