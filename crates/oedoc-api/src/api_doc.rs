//! OpenAPI documentation.
//!
//! Handler annotations use paths relative to the service prefix
//! (`[/<APP_VERSION>]/<SERVICE_NAME>`), which is only known at runtime; the
//! served spec has the prefix applied.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::services;
use oedoc_core::models;

/// Prefix every path in the spec with the runtime route prefix.
fn prefix_openapi_paths(spec: &mut utoipa::openapi::OpenApi, prefix: &str) {
    if prefix.is_empty() {
        return;
    }
    let path_map = std::mem::take(&mut spec.paths.paths);
    for (key, item) in path_map {
        spec.paths.paths.insert(format!("{}{}", prefix, key), item);
    }
}

/// Returns the OpenAPI spec with paths mounted under `prefix`.
pub fn get_openapi_spec(prefix: &str) -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    prefix_openapi_paths(&mut spec, prefix);
    spec
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OE Document API",
        version = "0.1.0",
        description = "Resolves catalog documents by identifier or by company/object/type/culture, stamps qualifying article datasheets and lists the documents attached to an object."
    ),
    paths(
        handlers::file::get_file_by_guid,
        handlers::file::get_file,
        handlers::file_lookup::lookup_file,
        handlers::object_list::get_object_list,
    ),
    components(
        schemas(
            models::DocumentRecord,
            models::DocumentLanguage,
            services::ObjectListEntry,
            handlers::object_list::ObjectListResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "Document delivery and lookup"),
        (name = "objectlist", description = "Documents attached to a business object")
    )
)]
pub struct ApiDoc;
