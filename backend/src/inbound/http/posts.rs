//! Ownership-scoped post handlers.
//!
//! Every handler here sits behind the login gate and receives the signed-in
//! [`SessionUser`]. Lookups always pass that user's id down, so a post that
//! belongs to someone else is indistinguishable from one that does not exist.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::domain::{Error, POST_NOT_FOUND_MESSAGE, PostDraft, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::flash::FlashLevel;
use crate::inbound::http::redirect::found;
use crate::inbound::http::session::{SessionContext, SessionUser};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::Page;

/// Message for an update that tries to reassign a post.
pub const AUTHOR_CHANGE_MESSAGE: &str = "The author of a post cannot be changed";

/// Compose and edit form body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    post_title: String,
    post_body: String,
    /// Never accepted; present only so an attempt can be refused.
    #[serde(default)]
    author: Option<String>,
}

fn parse_id(raw: &str) -> Result<PostId, Error> {
    PostId::new(raw).map_err(|_| Error::not_found(POST_NOT_FOUND_MESSAGE))
}

/// `GET /home`: the viewer's posts, newest first.
pub async fn home(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: SessionUser,
) -> ApiResult<HttpResponse> {
    let posts = state.posts_query.list_for_author(&user.id).await?;
    Ok(Page::Home { posts: &posts }.respond(StatusCode::OK, &session.page_context()))
}

/// `GET /compose`
pub async fn compose_form(session: SessionContext, _user: SessionUser) -> HttpResponse {
    Page::Compose.respond(StatusCode::OK, &session.page_context())
}

/// `POST /compose`
pub async fn compose(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: SessionUser,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let draft = match PostDraft::try_from_parts(&form.post_title, &form.post_body) {
        Ok(draft) => draft,
        Err(reason) => {
            session.flash(FlashLevel::Error, reason.to_string())?;
            return Ok(found("/compose"));
        }
    };
    state.posts.create(&user.id, draft).await?;
    Ok(found("/home"))
}

/// `GET /posts/{post_id}`
pub async fn show(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: SessionUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts_query.find_for_author(&user.id, &id).await?;
    Ok(Page::Post { post: &post }.respond(StatusCode::OK, &session.page_context()))
}

/// `GET /posts/{post_id}/edit`
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: SessionUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts_query.find_for_author(&user.id, &id).await?;
    Ok(Page::Edit { post: &post }.respond(StatusCode::OK, &session.page_context()))
}

/// `PUT /posts/{post_id}`: replace title and content, never the author.
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: SessionUser,
    path: web::Path<String>,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    if form.author.is_some() {
        return Err(Error::forbidden(AUTHOR_CHANGE_MESSAGE));
    }
    let draft = match PostDraft::try_from_parts(&form.post_title, &form.post_body) {
        Ok(draft) => draft,
        Err(reason) => {
            session.flash(FlashLevel::Error, reason.to_string())?;
            return Ok(found(&format!("/posts/{id}/edit")));
        }
    };
    let post = state.posts.update(&user.id, &id, draft).await?;
    Ok(found(&format!("/posts/{}", post.id)))
}

/// `DELETE /posts/{post_id}`: succeeds whether or not the post still exists.
pub async fn delete(
    state: web::Data<HttpState>,
    user: SessionUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.posts.delete(&user.id, &id).await?;
    Ok(found("/"))
}
