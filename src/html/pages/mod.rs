use super::*;

pub fn catalog(browser: &Browser) -> Markup {
    let body = html! {
        header #masthead {
            h1 { (wrappers::SITE_TITLE) }
            (components::theme_toggle(browser.theme()))
        }
        (components::controls(browser))
        #results {
            (components::results(browser))
        }
    };
    wrappers::universal(body, browser.theme(), "catalog", "Catalog")
}
