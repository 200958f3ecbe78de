//! Live event endpoints

use crate::endpoint::{Endpoint, UserRef};
use crate::types::{JsonObject, Scope};

/// Fields always requested when creating a live event
pub const DEFAULT_LIVE_EVENT_FIELDS: [&str; 5] = [
    "title",
    "uri",
    "rtmps_link",
    "stream_key",
    "metadata.connections.pre_live_video.uri",
];

fn live_events_path(user: &UserRef) -> String {
    format!("{}/live_events", user.path())
}

fn live_event_path(user: &UserRef, live_id: &str) -> String {
    format!("{}/live_events/{live_id}", user.path())
}

/// All live events of a user (paged)
pub fn live_events(user: &UserRef) -> Endpoint {
    Endpoint::get(live_events_path(user))
}

/// Create a live event titled `title`; entries of `params` win over the
/// defaults
pub fn create_live_event(user: &UserRef, title: &str, params: JsonObject) -> Endpoint {
    Endpoint::post(live_events_path(user))
        .requires(Scope::Create)
        .fields(DEFAULT_LIVE_EVENT_FIELDS)
        .param("title", title)
        .param("automatically_title_stream", true)
        .params(params)
}

/// Update a live event with `params`
pub fn edit_live_event(user: &UserRef, live_id: &str, params: JsonObject) -> Endpoint {
    Endpoint::patch(live_event_path(user, live_id))
        .requires(Scope::Private)
        .requires(Scope::Edit)
        .params(params)
}

/// Delete a live event; true on 204
pub fn delete_live_event(user: &UserRef, live_id: &str) -> Endpoint {
    Endpoint::delete(live_event_path(user, live_id))
        .requires(Scope::Private)
        .requires(Scope::Delete)
        .expect_status(204)
}

/// One live event
pub fn live_event(user: &UserRef, live_id: &str) -> Endpoint {
    Endpoint::get(live_event_path(user, live_id)).requires(Scope::Private)
}

/// Streaming session status of the video backing a live event
pub fn live_event_status(video_id: &str) -> Endpoint {
    Endpoint::get(format!("/videos/{video_id}/sessions/status"))
}

/// Start streaming; true on 200
pub fn activate_live_event(user: &UserRef, live_id: &str) -> Endpoint {
    Endpoint::post(format!("{}/activate", live_event_path(user, live_id)))
        .requires(Scope::Private)
        .requires(Scope::Create)
        .expect_status(200)
}

/// Stop streaming; true on 200
pub fn end_live_event(user: &UserRef, live_id: &str) -> Endpoint {
    Endpoint::post(format!("{}/end", live_event_path(user, live_id)))
        .requires(Scope::Private)
        .requires(Scope::Create)
        .expect_status(200)
}
