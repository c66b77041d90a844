//! HTML pages, rendered with maud so every interpolated value is escaped.
//! Post bodies are the one exception: they are trusted author HTML/Markdown.

use crate::blog::{Post, PostFields, SITE_NAME};
use crate::mail::ContactMessage;
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub struct PostFormView<'a> {
    pub heading: &'a str,
    pub action: String,
    pub fields: &'a PostFields,
    pub token: String,
    pub error: Option<String>,
}

pub struct ContactView<'a> {
    pub values: &'a ContactMessage,
    pub error: Option<String>,
    pub success: Option<&'a str>,
}

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - " (SITE_NAME) }
            }
            body {
                nav {
                    a class="brand" href="/" { (SITE_NAME) }
                    ul {
                        li { a href="/" { "Home" } }
                        li { a href="/about" { "About" } }
                        li { a href="/contact" { "Contact" } }
                    }
                }
                main { (content) }
                footer { p { "Copyright © " (SITE_NAME) } }
            }
        }
    }
}

pub fn index(posts: &[Post]) -> Markup {
    layout(
        "Home",
        html! {
            header {
                h1 { (SITE_NAME) }
                span class="subheading" { "A collection of random musings." }
            }
            @for post in posts {
                div class="post-preview" {
                    a href={ "/" (post.id) } {
                        h2 class="post-title" { (post.title) }
                        h3 class="post-subtitle" { (post.subtitle) }
                    }
                    p class="post-meta" {
                        "Posted by " (post.author) " on " (post.date) " "
                        a href={ "/delete/" (post.id) } title="Delete post" { "✘" }
                    }
                }
                hr;
            }
            @if posts.is_empty() {
                p { "Nothing has been posted yet." }
            }
            a class="button" href="/new-post" { "Create New Post" }
        },
    )
}

/// `body_html` must already be rendered, see [`render_body`].
pub fn post(post: &Post, body_html: &str) -> Markup {
    layout(
        &post.title,
        html! {
            header {
                img class="post-image" src=(post.img_url) alt=(post.title);
                h1 { (post.title) }
                h2 class="subheading" { (post.subtitle) }
                span class="meta" { "Posted by " (post.author) " on " (post.date) }
            }
            article { (PreEscaped(body_html)) }
            a class="button" href={ "/edit-post/" (post.id) } { "Edit Post" }
        },
    )
}

pub fn post_form(view: &PostFormView<'_>) -> Markup {
    let fields = view.fields;
    layout(
        view.heading,
        html! {
            h1 { (view.heading) }
            @if let Some(error) = &view.error {
                p class="error" { (error) }
            }
            form method="post" action=(view.action) {
                input type="hidden" name="csrf_token" value=(view.token);
                label for="title" { "Blog Post Title" }
                input id="title" type="text" name="title" value=(fields.title);
                label for="sub_title" { "Subtitle" }
                input id="sub_title" type="text" name="sub_title" value=(fields.subtitle);
                label for="author" { "Your Name" }
                input id="author" type="text" name="author" value=(fields.author);
                label for="image_url" { "Blog Image URL" }
                input id="image_url" type="text" name="image_url" value=(fields.img_url);
                label for="body" { "Blog Content" }
                textarea id="body" name="body" rows="12" { (fields.body) }
                button type="submit" { "Submit Post" }
            }
        },
    )
}

pub fn about() -> Markup {
    layout(
        "About",
        html! {
            h1 { "About Me" }
            p {
                "This is a small personal blog. Posts are written, edited and "
                "published from this site, and you can reach the author through "
                "the contact page."
            }
        },
    )
}

pub fn contact(view: &ContactView<'_>) -> Markup {
    let values = view.values;
    layout(
        "Contact",
        html! {
            h1 { "Contact Me" }
            p { "Have questions? I have answers." }
            @if let Some(success) = view.success {
                p class="success" { (success) }
            }
            @if let Some(error) = &view.error {
                p class="error" { (error) }
            }
            form method="post" action="/contact" {
                label for="name" { "Name" }
                input id="name" type="text" name="name" value=(values.name);
                label for="email" { "Email address" }
                input id="email" type="email" name="email" value=(values.email);
                label for="phone" { "Phone Number" }
                input id="phone" type="tel" name="phone" value=(values.phone);
                label for="message" { "Message" }
                textarea id="message" name="message" rows="5" { (values.message) }
                button type="submit" { "Send" }
            }
        },
    )
}

pub fn not_found() -> Markup {
    layout(
        "Not Found",
        html! {
            h1 { "404" }
            p { "There is nothing here." }
            a href="/" { "Back to all posts" }
        },
    )
}

pub fn server_error() -> Markup {
    layout(
        "Error",
        html! {
            h1 { "Something went wrong" }
            p { "The request could not be completed. Please try again later." }
        },
    )
}

/// Renders a post body. Markdown is converted and raw HTML from the editor
/// passes through untouched.
pub fn render_body(body: &str) -> String {
    let mut options = comrak::Options::default();
    options.render.unsafe_ = true;
    options.extension.strikethrough = true;
    options.extension.table = true;

    comrak::markdown_to_html(body, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: 3,
            title: "Hello <World>".into(),
            subtitle: "World".into(),
            body: "text".into(),
            author: "A".into(),
            img_url: "http://x/i.jpg".into(),
            date: "June 05, 2024".into(),
        }
    }

    #[test]
    fn index_escapes_titles_and_links_posts() {
        let html = index(&[sample_post()]).into_string();
        assert!(html.contains("Hello &lt;World&gt;"));
        assert!(html.contains(r#"href="/3""#));
        assert!(html.contains(r#"href="/delete/3""#));
    }

    #[test]
    fn empty_index_has_no_previews() {
        let html = index(&[]).into_string();
        assert!(html.contains(SITE_NAME));
        assert!(!html.contains("post-preview"));
    }

    #[test]
    fn body_keeps_editor_html() {
        assert_eq!(
            render_body("<p>Hi <strong>there</strong></p>").trim(),
            "<p>Hi <strong>there</strong></p>"
        );
        assert_eq!(render_body("*hi*").trim(), "<p><em>hi</em></p>");
    }

    #[test]
    fn form_keeps_entered_values() {
        let fields = PostFields {
            title: "T".into(),
            body: "half written".into(),
            ..Default::default()
        };
        let html = post_form(&PostFormView {
            heading: "New Post",
            action: "/new-post".into(),
            fields: &fields,
            token: "tok".into(),
            error: Some("Subtitle is required".into()),
        })
        .into_string();

        assert!(html.contains(r#"value="T""#));
        assert!(html.contains("half written"));
        assert!(html.contains("Subtitle is required"));
        assert!(html.contains(r#"value="tok""#));
    }
}
