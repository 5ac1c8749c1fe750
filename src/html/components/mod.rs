use super::*;

/// The live count line followed by the grid of cards.
pub fn results(browser: &Browser) -> Markup {
    html! {
        p.count { (browser.count_label()) }
        .book-grid {
            @for (position, book) in browser.visible() {
                (card(position, book))
            }
        }
    }
}

pub fn card(position: usize, book: &BookRecord) -> Markup {
    let genre = book.genre().map(Genre::as_str).unwrap_or_default();
    let class_year = book.class_year().map(ClassYear::label).unwrap_or_default();
    let publication_year = book.publication_year().map(|y| y.to_string());

    html! {
        .book-card data-key=(book.display_key(position)) {
            h2 { (book.title()) }
            p { strong { "Author:" } " " (book.full_name()) }
            p { strong { "Genre:" } " " (genre) }
            p { strong { "Class year:" } " " (class_year) }
            p { strong { "Publisher:" } " " (book.publisher()) }
            p { strong { "Year:" } " " (publication_year.unwrap_or_default()) }
            @if let Some(notes) = book.notes() {
                p.notes { strong { "Notes:" } " " (notes) }
            }
        }
    }
}

/// The search box and the two dropdowns, preset to the current filters.
pub fn controls(browser: &Browser) -> Markup {
    let filters = browser.filters();

    html! {
        form #controls method="get" action="/" {
            input #search-input
                name="q"
                type="text"
                placeholder="Search by author, title, publisher, etc."
                autocomplete="off"
                value=(filters.query);
            select #genre-select name="genre" {
                @for choice in browser.genre_options() {
                    option value=(choice) selected[choice == filters.genre] { (choice) }
                }
            }
            select #year-select name="year" {
                @for choice in browser.year_options() {
                    option value=(choice) selected[choice == filters.year] {
                        @match choice {
                            YearFilter::All => { "All Years" }
                            YearFilter::Only(year) => { (year) }
                        }
                    }
                }
            }
            noscript { button type="submit" { "Filter" } }
        }
    }
}

pub fn theme_toggle(theme: Theme) -> Markup {
    html! {
        a #theme-toggle href="/theme" data-theme=(theme.name()) {
            @match theme {
                Theme::Dark => { "☀️ Light Mode" }
                Theme::Light => { "🌙 Dark Mode" }
            }
        }
    }
}
