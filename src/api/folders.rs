//! Folder (project) endpoints

use crate::endpoint::{Endpoint, UserRef};
use crate::types::Scope;

/// Fields requested by [`folders`] unless the caller adds more
pub const DEFAULT_FOLDER_FIELDS: [&str; 3] = ["name", "created_time", "uri"];

fn projects(user: &UserRef) -> String {
    format!("{}/projects", user.path())
}

fn project(user: &UserRef, folder_id: &str) -> String {
    format!("{}/projects/{folder_id}", user.path())
}

/// All folders of a user (paged)
pub fn folders(user: &UserRef) -> Endpoint {
    Endpoint::get(projects(user))
        .requires(Scope::Private)
        .fields(DEFAULT_FOLDER_FIELDS)
}

/// One folder
pub fn folder(user: &UserRef, folder_id: &str) -> Endpoint {
    Endpoint::get(project(user, folder_id)).requires(Scope::Private)
}

/// Create a folder named `name`
pub fn create_folder(user: &UserRef, name: &str) -> Endpoint {
    Endpoint::post(projects(user))
        .requires(Scope::Create)
        .param("name", name)
}

/// Rename a folder
pub fn edit_folder(user: &UserRef, folder_id: &str, name: &str) -> Endpoint {
    Endpoint::patch(project(user, folder_id))
        .requires(Scope::Edit)
        .param("name", name)
}

/// Delete a folder, optionally with the videos it holds; true on 204
pub fn delete_folder(user: &UserRef, folder_id: &str, delete_videos: bool) -> Endpoint {
    Endpoint::delete(project(user, folder_id))
        .requires(Scope::Delete)
        .param("should_delete_clips", delete_videos)
        .expect_status(204)
}

/// Videos in a folder (paged)
pub fn folder_videos(user: &UserRef, folder_id: &str) -> Endpoint {
    Endpoint::get(format!("{}/videos", project(user, folder_id)))
}

/// Move one video into a folder; true on 204
pub fn add_video_to_folder(user: &UserRef, folder_id: &str, video_id: &str) -> Endpoint {
    Endpoint::put(format!("{}/videos/{video_id}", project(user, folder_id)))
        .requires(Scope::Interact)
        .expect_status(204)
}

/// Move several videos into a folder; `uris` are video URIs; true on 204
pub fn add_videos_to_folder<S: AsRef<str>>(user: &UserRef, folder_id: &str, uris: &[S]) -> Endpoint {
    Endpoint::put(format!("{}/videos", project(user, folder_id)))
        .requires(Scope::Interact)
        .param("uris", join(uris))
        .expect_status(204)
}

/// Take one video out of a folder; true on 204
pub fn remove_video_from_folder(user: &UserRef, folder_id: &str, video_id: &str) -> Endpoint {
    Endpoint::delete(format!("{}/videos/{video_id}", project(user, folder_id)))
        .requires(Scope::Delete)
        .expect_status(204)
}

/// Take several videos out of a folder; true on 204
pub fn remove_videos_from_folder<S: AsRef<str>>(
    user: &UserRef,
    folder_id: &str,
    uris: &[S],
) -> Endpoint {
    Endpoint::delete(format!("{}/videos", project(user, folder_id)))
        .requires(Scope::Interact)
        .param("uris", join(uris))
        .expect_status(204)
}

fn join<S: AsRef<str>>(values: &[S]) -> String {
    values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}
