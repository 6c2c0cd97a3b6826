use maud::{DOCTYPE, Markup, html};

use crate::{
    catalog::MovieGenreView,
    models::{FormErrors, Movie, MovieForm},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";
const LINK_CLASS: &str = "text-sm text-blue-600 hover:text-blue-800";

pub fn index_page(view: &MovieGenreView) -> String {
    let selected = view.movie_genre.as_deref();

    page(
        "Movies",
        html! {
            div class="flex items-start justify-between gap-6" {
                h1 class="text-3xl font-bold text-gray-900" { "Movies" }
                a class=(LINK_CLASS) href="/movies/create" { "Create new" }
            }

            form class="mt-8 flex flex-wrap items-end gap-4" method="get" action="/movies" {
                div {
                    label class="block text-sm font-medium text-gray-700" for="movieGenre" { "Genre" }
                    select class=(INPUT_CLASS) name="movieGenre" id="movieGenre" {
                        option value="" { "All" }
                        @for genre in &view.genres {
                            option value=(genre) selected[selected == Some(genre.as_str())] { (genre) }
                        }
                    }
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="searchString" { "Title" }
                    input class=(INPUT_CLASS) name="searchString" id="searchString"
                        value=(view.search_string.as_deref().unwrap_or_default());
                }
                button class=(BUTTON_CLASS) type="submit" { "Filter" }
            }

            @if view.movies.is_empty() {
                div class="mt-10 bg-white shadow rounded-lg p-8" {
                    p class="text-gray-600" { "No movies match." }
                }
            } @else {
                table class="mt-10 w-full bg-white shadow rounded-lg text-left" {
                    thead class="text-sm text-gray-500" {
                        tr {
                            th class="p-3" { "Title" }
                            th class="p-3" { "Release date" }
                            th class="p-3" { "Genre" }
                            th class="p-3" { "Price" }
                            th class="p-3" { "Rating" }
                            th class="p-3" {}
                        }
                    }
                    tbody {
                        @for movie in &view.movies {
                            (movie_row(movie))
                        }
                    }
                }
            }
        },
    )
}

pub fn details_page(movie: &Movie) -> String {
    page(
        &movie.title,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
            div class="mt-8 bg-white shadow rounded-lg p-8" {
                (movie_facts(movie))
            }
            div class="mt-6 flex gap-6" {
                a class=(LINK_CLASS) href=(format!("/movies/edit/{}", movie.id)) { "Edit" }
                a class=(LINK_CLASS) href="/movies" { "Back to list" }
            }
        },
    )
}

pub fn create_page(form: &MovieForm, errors: &FormErrors) -> String {
    movie_form_page("Create movie", "/movies/create", form, errors)
}

pub fn edit_page(id: i32, form: &MovieForm, errors: &FormErrors) -> String {
    movie_form_page("Edit movie", &format!("/movies/edit/{id}"), form, errors)
}

pub fn delete_page(movie: &Movie) -> String {
    page(
        "Delete movie",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Delete " (movie.title) "?" }
            div class="mt-8 bg-white shadow rounded-lg p-8" {
                (movie_facts(movie))
            }
            form class="mt-6 flex items-center gap-6" method="post" action=(format!("/movies/delete/{}", movie.id)) {
                button class="rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700" type="submit" { "Delete" }
                a class=(LINK_CLASS) href="/movies" { "Back to list" }
            }
        },
    )
}

pub fn error_page(title: &str, message: &str) -> String {
    page(
        title,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { (title) }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/movies" { "Back" }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" { (body) }
            }
        }
    }
    .into_string()
}

fn movie_form_page(title: &str, action: &str, form: &MovieForm, errors: &FormErrors) -> String {
    page(
        title,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { (title) }
            form class="mt-8 space-y-6 bg-white shadow rounded-lg p-8" method="post" action=(action) {
                @if let Some(id) = form.id {
                    input type="hidden" name="id" value=(id);
                }
                @if let Some(version) = form.version {
                    input type="hidden" name="version" value=(version);
                }
                (field("Title", "title", "text", &form.title, errors))
                (field("Release date", "release_date", "date", &form.release_date, errors))
                (field("Genre", "genre", "text", &form.genre, errors))
                (field("Price", "price", "text", &form.price, errors))
                (field("Rating", "rating", "text", &form.rating, errors))
                div class="flex items-center gap-6" {
                    button class=(BUTTON_CLASS) type="submit" { "Save" }
                    a class=(LINK_CLASS) href="/movies" { "Back to list" }
                }
            }
        },
    )
}

fn field(label: &str, name: &str, kind: &str, value: &str, errors: &FormErrors) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class=(INPUT_CLASS) type=(kind) name=(name) id=(name) value=(value);
            @if let Some(message) = errors.get(name) {
                p class="mt-2 text-sm text-red-600" { (message) }
            }
        }
    }
}

fn movie_row(movie: &Movie) -> Markup {
    html! {
        tr class="border-t border-gray-100" {
            td class="p-3 font-medium text-gray-900" { (movie.title) }
            td class="p-3 text-gray-700" { (movie.release_date.to_string()) }
            td class="p-3 text-gray-700" {
                @if let Some(genre) = &movie.genre {
                    a class=(LINK_CLASS) href=(format!("/movies/bygenre/{}", urlencoding::encode(genre))) { (genre) }
                }
            }
            td class="p-3 text-gray-700" { (format_price(movie)) }
            td class="p-3 text-gray-700" { (movie.rating.as_deref().unwrap_or_default()) }
            td class="p-3 space-x-3 whitespace-nowrap" {
                a class=(LINK_CLASS) href=(format!("/movies/edit/{}", movie.id)) { "Edit" }
                a class=(LINK_CLASS) href=(format!("/movies/details/{}", movie.id)) { "Details" }
                a class=(LINK_CLASS) href=(format!("/movies/delete/{}", movie.id)) { "Delete" }
            }
        }
    }
}

fn movie_facts(movie: &Movie) -> Markup {
    html! {
        dl class="grid grid-cols-3 gap-4 text-sm" {
            dt class="font-medium text-gray-500" { "Release date" }
            dd class="col-span-2 text-gray-900" { (movie.release_date.to_string()) }
            dt class="font-medium text-gray-500" { "Genre" }
            dd class="col-span-2 text-gray-900" { (movie.genre.as_deref().unwrap_or("—")) }
            dt class="font-medium text-gray-500" { "Price" }
            dd class="col-span-2 text-gray-900" { (format_price(movie)) }
            dt class="font-medium text-gray-500" { "Rating" }
            dd class="col-span-2 text-gray-900" { (movie.rating.as_deref().unwrap_or("—")) }
        }
    }
}

fn format_price(movie: &Movie) -> String {
    format!("${:.2}", movie.price)
}
