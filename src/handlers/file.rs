use tower_http::services::ServeFile;

use crate::models::Route;

/// Static file service bound to a single route
///
/// The service owns the route's file path, so services built in a loop never
/// share state. Content type, ranges and conditional requests come from
/// `ServeFile`; the body is the file's bytes as they are on disk.
pub fn file_service(route: &Route) -> ServeFile {
    ServeFile::new(route.file_path.clone())
}
