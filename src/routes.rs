// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Dashboard Routes
//!
//! Named routes for every view. Each page request mounts a fresh view, drives its fetch
//! to completion and renders the resulting state, so navigating back to a page always
//! refetches.
//!
//! | Route | View |
//! |---|---|
//! | `GET /` | home |
//! | `GET /users` | users grid |
//! | `GET /users/{id}/edit` | users grid with the edit modal open |
//! | `POST /users/{id}/edit` | save the submitted draft |
//! | `GET /teams`, `/activities`, `/leaderboard`, `/workouts` | resource lists |

use askama::Template;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, error, warn};
use warp::http::StatusCode;
use warp::reply::Html;
use warp::{Filter, Rejection, Reply};

use crate::client::FitnessApi;
use crate::models::UserUpdate;
use crate::views::activities::ActivitiesPage;
use crate::views::home::HomePage;
use crate::views::leaderboard::LeaderboardPage;
use crate::views::teams::TeamsPage;
use crate::views::user_edit::EditField;
use crate::views::users::{UsersPage, UsersView};
use crate::views::workouts::WorkoutsPage;
use crate::views::{ListPage, ListView, ViewState};

/// Template failed to render
#[derive(Debug)]
struct RenderFailure(String);

impl warp::reject::Reject for RenderFailure {}

/// Url-encoded body of the edit form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditSubmission {
    pub name: String,
    pub email: String,
    pub team: String,
    pub role: String,
    pub avatar: String,
}

impl EditSubmission {
    fn into_fields(self) -> [(EditField, String); 5] {
        [
            (EditField::Name, self.name),
            (EditField::Email, self.email),
            (EditField::Team, self.team),
            (EditField::Role, self.role),
            (EditField::Avatar, self.avatar),
        ]
    }
}

impl From<EditSubmission> for UserUpdate {
    fn from(submission: EditSubmission) -> Self {
        Self {
            name: submission.name,
            email: submission.email,
            team: submission.team,
            role: submission.role,
            avatar: submission.avatar,
        }
    }
}

/// All dashboard pages, with rejections recovered into HTML error pages
pub fn routes(
    api: Arc<dyn FitnessApi>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let home = warp::path::end().and(warp::get()).and_then(home_page);

    let users = warp::path!("users")
        .and(warp::get())
        .and(with_api(api.clone()))
        .and_then(users_page);

    let edit_user = warp::path!("users" / String / "edit")
        .and(warp::get())
        .and(with_api(api.clone()))
        .and_then(edit_user_page);

    let save_user = warp::path!("users" / String / "edit")
        .and(warp::post())
        .and(warp::body::content_length_limit(16 * 1024))
        .and(warp::body::form::<EditSubmission>())
        .and(with_api(api.clone()))
        .and_then(save_user);

    let teams = warp::path!("teams")
        .and(warp::get())
        .and(with_api(api.clone()))
        .and_then(list_page::<TeamsPage>);

    let activities = warp::path!("activities")
        .and(warp::get())
        .and(with_api(api.clone()))
        .and_then(list_page::<ActivitiesPage>);

    let leaderboard = warp::path!("leaderboard")
        .and(warp::get())
        .and(with_api(api.clone()))
        .and_then(list_page::<LeaderboardPage>);

    let workouts = warp::path!("workouts")
        .and(warp::get())
        .and(with_api(api))
        .and_then(list_page::<WorkoutsPage>);

    home.or(users)
        .or(edit_user)
        .or(save_user)
        .or(teams)
        .or(activities)
        .or(leaderboard)
        .or(workouts)
        .recover(handle_rejection)
}

fn with_api(
    api: Arc<dyn FitnessApi>,
) -> impl Filter<Extract = (Arc<dyn FitnessApi>,), Error = Infallible> + Clone {
    warp::any().map(move || api.clone())
}

fn render<T: Template>(page: &T) -> Result<Html<String>, Rejection> {
    page.render().map(warp::reply::html).map_err(|e| {
        error!("Failed to render page: {}", e);
        warp::reject::custom(RenderFailure(e.to_string()))
    })
}

async fn home_page() -> Result<Html<String>, Rejection> {
    render(&HomePage::new())
}

/// Mount, load and render a single-collection page
async fn list_page<P: ListPage>(api: Arc<dyn FitnessApi>) -> Result<Html<String>, Rejection> {
    let mut view = ListView::<P::Record>::mount();
    view.load(api.as_ref()).await;
    let page = P::from_view(&view);
    view.unmount();
    render(&page)
}

async fn users_page(api: Arc<dyn FitnessApi>) -> Result<Html<String>, Rejection> {
    let mut view = UsersView::mount();
    view.load(api.as_ref()).await;
    let page = UsersPage::from_view(&view);
    view.unmount();
    render(&page)
}

fn not_found_notice(id: &str) -> String {
    format!("User {} was not found.", id)
}

async fn edit_user_page(id: String, api: Arc<dyn FitnessApi>) -> Result<Html<String>, Rejection> {
    let mut view = UsersView::mount();
    view.load(api.as_ref()).await;
    let page = if view.open_edit(&id) {
        UsersPage::from_view(&view)
    } else {
        debug!("Edit requested for unknown user {}", id);
        UsersPage::from_view(&view).with_notice(not_found_notice(&id))
    };
    view.unmount();
    render(&page)
}

async fn save_user(
    id: String,
    submission: EditSubmission,
    api: Arc<dyn FitnessApi>,
) -> Result<Html<String>, Rejection> {
    let mut view = UsersView::mount();
    view.load(api.as_ref()).await;

    // Without the stored record the draft is shown again instead of being sent
    if let ViewState::Error(message) = view.users.state() {
        let message = message.clone();
        warn!("Users unavailable, not saving user {}: {}", id, message);
        view.restore_edit(&id, submission.into(), message);
    } else if view.open_edit(&id) {
        for (field, value) in submission.into_fields() {
            view.edit_field(field, value);
        }
        view.save(api.as_ref()).await;
    } else {
        debug!("Save requested for unknown user {}", id);
        view.restore_edit(&id, submission.into(), not_found_notice(&id));
    }

    let page = UsersPage::from_view(&view);
    view.unmount();
    render(&page)
}

fn error_page(status: StatusCode, message: &str) -> warp::reply::WithStatus<Html<String>> {
    let body = format!(
        "<!DOCTYPE html><html><head><title>OctoFit Tracker</title></head><body>\
         <div class=\"container mt-4\"><div class=\"alert alert-danger\">{} {}</div>\
         <a href=\"/\">Back to home</a></div></body></html>",
        status.as_u16(),
        message
    );
    warp::reply::with_status(warp::reply::html(body), status)
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if err.is_not_found() {
        Ok(error_page(StatusCode::NOT_FOUND, "Page not found"))
    } else if let Some(failure) = err.find::<RenderFailure>() {
        error!("Render failure: {}", failure.0);
        Ok(error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong",
        ))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        Ok(error_page(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"))
    } else {
        debug!("Rejected request: {:?}", err);
        Ok(error_page(StatusCode::BAD_REQUEST, "Bad request"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiError;
    use crate::models::Resource;
    use crate::views::testing::StubApi;
    use serde_json::json;

    fn dashboard(api: StubApi) -> (Arc<StubApi>, impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone) {
        let api = Arc::new(api);
        let filter = routes(api.clone());
        (api, filter)
    }

    #[tokio::test]
    async fn test_home_links_sections() {
        let (_, filter) = dashboard(StubApi::new());
        let reply = warp::test::request().path("/").reply(&filter).await;
        assert_eq!(reply.status(), 200);
        let html = String::from_utf8_lossy(reply.body()).to_string();
        assert!(html.contains("href=\"/leaderboard\""));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (_, filter) = dashboard(StubApi::new());
        let reply = warp::test::request().path("/profile").reply(&filter).await;
        assert_eq!(reply.status(), 404);
    }

    #[tokio::test]
    async fn test_each_view_is_independent() {
        let api = StubApi::new()
            .with_list(Resource::Teams, Err(ApiError::Status { status: 500 }))
            .with_list(Resource::Workouts, Ok(json!([{"name": "Yoga"}])));
        let (_, filter) = dashboard(api);

        let teams = warp::test::request().path("/teams").reply(&filter).await;
        let html = String::from_utf8_lossy(teams.body()).to_string();
        assert!(html.contains("Error: HTTP error! status: 500"));

        let workouts = warp::test::request().path("/workouts").reply(&filter).await;
        let html = String::from_utf8_lossy(workouts.body()).to_string();
        assert_eq!(html.matches("data-record=\"workout\"").count(), 1);
        assert!(!html.contains("data-state=\"error\""));
    }

    #[tokio::test]
    async fn test_edit_unknown_user_shows_notice() {
        let api = StubApi::new().with_list(Resource::Users, Ok(json!([{"id": "u1"}])));
        let (_, filter) = dashboard(api);
        let reply = warp::test::request()
            .path("/users/u404/edit")
            .reply(&filter)
            .await;
        assert_eq!(reply.status(), 200);
        let html = String::from_utf8_lossy(reply.body()).to_string();
        assert!(html.contains("User u404 was not found."));
        assert!(!html.contains("data-modal"));
    }

    #[tokio::test]
    async fn test_post_edit_saves_and_closes() {
        let api = StubApi::new().with_list(
            Resource::Users,
            Ok(json!([{"id": "u1", "name": "Tony Stark", "role": "member"}])),
        );
        let (api, filter) = dashboard(api);
        let reply = warp::test::request()
            .method("POST")
            .path("/users/u1/edit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=Tony+Stark&email=tony%40stark.com&team=Team+Marvel&role=team_lead&avatar=")
            .reply(&filter)
            .await;
        assert_eq!(reply.status(), 200);
        let html = String::from_utf8_lossy(reply.body()).to_string();
        assert!(!html.contains("data-modal"));

        let updates = api.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1, "u1");
        assert_eq!(
            updates[0].2,
            json!({
                "name": "Tony Stark",
                "email": "tony@stark.com",
                "team": "Team Marvel",
                "role": "team_lead",
                "avatar": ""
            })
        );
        assert_eq!(api.list_count(Resource::Users), 2);
    }

    fn post_edit(path: &str, body: &str) -> warp::test::RequestBuilder {
        warp::test::request()
            .method("POST")
            .path(path)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body.to_string())
    }

    #[tokio::test]
    async fn test_post_edit_while_users_unavailable_keeps_draft() {
        let api = StubApi::new().with_list(Resource::Users, Err(ApiError::Status { status: 502 }));
        let (api, filter) = dashboard(api);
        let reply = post_edit(
            "/users/u1/edit",
            "name=Tony+Stark&email=new%40x.com&team=Team+Marvel&role=member&avatar=",
        )
        .reply(&filter)
        .await;
        assert_eq!(reply.status(), 200);
        let html = String::from_utf8_lossy(reply.body()).to_string();
        assert!(html.contains("data-modal=\"edit-user\""));
        assert!(html.contains("value=\"new@x.com\""));
        assert!(html.contains("HTTP error! status: 502"));
        assert!(!html.contains("was not found"));
        assert!(api.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_edit_unknown_user_keeps_draft() {
        let api = StubApi::new().with_list(Resource::Users, Ok(json!([{"id": "u1"}])));
        let (api, filter) = dashboard(api);
        let reply = post_edit("/users/u404/edit", "name=Ghost&email=ghost%40x.com&role=member")
            .reply(&filter)
            .await;
        let html = String::from_utf8_lossy(reply.body()).to_string();
        assert!(html.contains("action=\"/users/u404/edit\""));
        assert!(html.contains("value=\"ghost@x.com\""));
        assert!(html.contains("User u404 was not found."));
        assert!(api.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_page_offers_stored_unlisted_role() {
        let api = StubApi::new().with_list(
            Resource::Users,
            Ok(json!([{"id": "u1", "name": "Tony Stark", "role": "admin"}])),
        );
        let (_, filter) = dashboard(api);
        let reply = warp::test::request()
            .path("/users/u1/edit")
            .reply(&filter)
            .await;
        let html = String::from_utf8_lossy(reply.body()).to_string();
        assert!(html.contains("<option value=\"admin\" selected>admin</option>"));
        assert!(html.contains("<option value=\"member\">Member</option>"));
        assert!(html.contains("<option value=\"\">Select Role...</option>"));
    }
}
