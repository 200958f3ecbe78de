//! Video endpoints

use crate::endpoint::{Endpoint, UserRef};
use crate::types::{JsonObject, Scope};

fn video_path(user: &UserRef, video_id: &str) -> String {
    format!("{}/videos/{video_id}", user.path())
}

/// All videos of a user (paged)
pub fn videos(user: &UserRef) -> Endpoint {
    Endpoint::get(format!("{}/videos", user.path()))
}

/// One video
pub fn video(user: &UserRef, video_id: &str) -> Endpoint {
    Endpoint::get(video_path(user, video_id))
}

/// Update video metadata with `params`
pub fn edit_video(user: &UserRef, video_id: &str, params: JsonObject) -> Endpoint {
    Endpoint::patch(video_path(user, video_id))
        .requires(Scope::Edit)
        .params(params)
}

/// Delete a video; true on 204
pub fn delete_video(user: &UserRef, video_id: &str) -> Endpoint {
    Endpoint::delete(video_path(user, video_id))
        .requires(Scope::Delete)
        .expect_status(204)
}

/// Search all public videos (paged)
pub fn search_videos(query: &str) -> Endpoint {
    Endpoint::get("/videos").search(query)
}

/// Link of the first 1920x1080 thumbnail
pub fn video_thumbnail(user: &UserRef, video_id: &str) -> Endpoint {
    Endpoint::get(video_path(user, video_id))
        .query("sizes", "1920x1080")
        .fields(["pictures.sizes.link"])
        .key("pictures.sizes.0.link")
}

/// Download links (`files`)
pub fn video_download_links(user: &UserRef, video_id: &str) -> Endpoint {
    Endpoint::get(video_path(user, video_id)).fields(["files"])
}

/// Play count
pub fn video_plays(user: &UserRef, video_id: &str) -> Endpoint {
    Endpoint::get(video_path(user, video_id))
        .fields(["stats"])
        .key("stats.plays")
}
