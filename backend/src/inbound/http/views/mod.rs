//! Server-rendered pages.
//!
//! Rendering is a pure function of a [`Page`] and a [`PageContext`]; the
//! handlers decide what to show and these functions decide how.

pub mod html;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;

use crate::domain::Post;
use crate::inbound::http::flash::FlashMessage;
use crate::inbound::http::session::SessionUser;

use self::html::{escape, excerpt, layout};

/// Characters of a post body shown on the home listing.
const EXCERPT_CHARS: usize = 100;

/// Data every page can draw on: the signed-in user and pending flashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Signed-in user, if any.
    pub user: Option<SessionUser>,
    /// Flash messages consumed by this render.
    pub flashes: Vec<FlashMessage>,
}

impl PageContext {
    /// Context for a visitor with no session state.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Pages the application can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page<'a> {
    /// Landing page at `/`.
    Start,
    /// Static information page.
    About,
    /// Sign-up form.
    Register,
    /// Sign-in form.
    Login,
    /// The signed-in user's post list.
    Home {
        /// Posts owned by the viewer, newest first.
        posts: &'a [Post],
    },
    /// New post form.
    Compose,
    /// A single owned post.
    Post {
        /// The post to show.
        post: &'a Post,
    },
    /// Edit form for an owned post.
    Edit {
        /// The post being edited.
        post: &'a Post,
    },
    /// Error boundary page.
    Error {
        /// Status being reported.
        status: StatusCode,
        /// Public message.
        message: &'a str,
        /// Correlation id, when known.
        trace_id: Option<&'a str>,
    },
}

impl Page<'_> {
    fn title(&self) -> String {
        match self {
            Self::Start => "Welcome".to_owned(),
            Self::About => "About".to_owned(),
            Self::Register => "Register".to_owned(),
            Self::Login => "Log in".to_owned(),
            Self::Home { .. } => "Home".to_owned(),
            Self::Compose => "Compose".to_owned(),
            Self::Post { post } => post.title.clone(),
            Self::Edit { post } => format!("Edit {}", post.title),
            Self::Error { status, .. } => status.as_u16().to_string(),
        }
    }

    fn body(&self, ctx: &PageContext) -> String {
        match self {
            Self::Start => start_body(ctx),
            Self::About => concat!(
                "<h1>About</h1><p>Blog Journal is a private journal. ",
                "Every post you write is visible only to you.</p>"
            )
            .to_owned(),
            Self::Register => register_body(),
            Self::Login => login_body(),
            Self::Home { posts } => home_body(posts),
            Self::Compose => post_form("/compose", "Compose", "", "", "Publish"),
            Self::Post { post } => post_body(post),
            Self::Edit { post } => post_form(
                &format!("/posts/{}?_method=PUT", post.id),
                "Edit post",
                &post.title,
                &post.content,
                "Save",
            ),
            Self::Error {
                status,
                message,
                trace_id,
            } => error_body(*status, message, *trace_id),
        }
    }

    /// Render the full HTML document.
    #[must_use]
    pub fn render(&self, ctx: &PageContext) -> String {
        layout(&self.title(), ctx, &self.body(ctx))
    }

    /// Render into a `text/html` response with the given status.
    #[must_use]
    pub fn respond(&self, status: StatusCode, ctx: &PageContext) -> HttpResponse {
        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(self.render(ctx))
    }
}

fn start_body(ctx: &PageContext) -> String {
    let call_to_action = if ctx.user.is_some() {
        "<a href=\"/home\">Go to your journal</a>"
    } else {
        "<a href=\"/register\">Start writing</a> or <a href=\"/login\">log in</a>"
    };
    format!("<h1>Blog Journal</h1><p>A quiet place for your thoughts.</p><p>{call_to_action}</p>")
}

fn register_body() -> String {
    concat!(
        "<h1>Register</h1><form method=\"post\" action=\"/register\">",
        "<label>Email <input type=\"email\" name=\"email\" required></label>",
        "<label>Username <input type=\"text\" name=\"username\" required></label>",
        "<label>Password <input type=\"password\" name=\"password\" required></label>",
        "<button type=\"submit\">Register</button></form>"
    )
    .to_owned()
}

fn login_body() -> String {
    concat!(
        "<h1>Log in</h1><form method=\"post\" action=\"/login\">",
        "<label>Username <input type=\"text\" name=\"username\" required></label>",
        "<label>Password <input type=\"password\" name=\"password\" required></label>",
        "<button type=\"submit\">Log in</button></form>"
    )
    .to_owned()
}

fn home_body(posts: &[Post]) -> String {
    let mut body = String::from("<h1>Home</h1><p><a href=\"/compose\">Write a new post</a></p>");
    if posts.is_empty() {
        body.push_str("<p>No posts yet.</p>");
        return body;
    }
    body.push_str("<ul class=\"posts\">");
    for post in posts {
        body.push_str(&format!(
            "<li><h2><a href=\"/posts/{id}\">{title}</a></h2><p>{excerpt}</p></li>",
            id = post.id,
            title = escape(&post.title),
            excerpt = escape(&excerpt(&post.content, EXCERPT_CHARS)),
        ));
    }
    body.push_str("</ul>");
    body
}

fn post_body(post: &Post) -> String {
    format!(
        concat!(
            "<article><h1>{title}</h1><p class=\"meta\">Written {created}</p>",
            "<div class=\"content\">{content}</div></article>",
            "<p><a href=\"/posts/{id}/edit\">Edit</a></p>",
            "<form method=\"post\" action=\"/posts/{id}?_method=DELETE\">",
            "<button type=\"submit\">Delete</button></form>"
        ),
        title = escape(&post.title),
        created = post.created_at.format("%Y-%m-%d %H:%M UTC"),
        content = escape(&post.content),
        id = post.id,
    )
}

fn post_form(action: &str, heading: &str, title: &str, content: &str, submit: &str) -> String {
    format!(
        concat!(
            "<h1>{heading}</h1><form method=\"post\" action=\"{action}\">",
            "<label>Title <input type=\"text\" name=\"postTitle\" value=\"{title}\" required></label>",
            "<label>Content <textarea name=\"postBody\" rows=\"10\" required>{content}</textarea></label>",
            "<button type=\"submit\">{submit}</button></form>"
        ),
        heading = escape(heading),
        action = escape(action),
        title = escape(title),
        content = escape(content),
        submit = escape(submit),
    )
}

fn error_body(status: StatusCode, message: &str, trace_id: Option<&str>) -> String {
    let reference = trace_id
        .map(|id| format!("<p class=\"trace\">Reference: {}</p>", escape(id)))
        .unwrap_or_default();
    format!(
        "<h1>{code}</h1><p>{message}</p>{reference}<p><a href=\"/\">Back to safety</a></p>",
        code = status.as_u16(),
        message = escape(message),
    )
}
