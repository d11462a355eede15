pub mod api;
pub mod configurator;
pub mod error;
pub mod listing;
pub mod preview;
pub mod query;
pub mod types;

pub use configurator::{Configurator, DesignRequest, Fetch, Selection};
pub use error::CatalogError;
pub use types::{Category, Design, GarmentColor, Slot, View, GARMENT_COLORS};

/// Folder under which every category lives in the bucket.
pub const ROOT_PREFIX: &str = "estampados";

/// Only objects with this extension are offered as designs.
pub const IMAGE_EXTENSION: &str = ".png";

/// Content type of every design image served.
pub const IMAGE_CONTENT_TYPE: &str = "image/png";

/// Design files never change once published under a name.
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Build the relative URL under which a design image is served.
///
/// `base` is the API mount point (`/api` on the server side, the configured
/// API URL in the viewer). Both path segments are percent-encoded.
pub fn image_url(base: &str, category: &str, filename: &str) -> String {
    format!(
        "{}/image/{}/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(category),
        urlencoding::encode(filename)
    )
}

/// URL of the design list of one category.
pub fn designs_url(base: &str, category: &str) -> String {
    format!(
        "{}/designs/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(category)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designs_url() {
        assert_eq!(designs_url("/api", "Dragon Ball"), "/api/designs/Dragon%20Ball");
    }

    #[test]
    fn test_image_url_plain() {
        assert_eq!(
            image_url("/api", "Naruto", "foo.png"),
            "/api/image/Naruto/foo.png"
        );
    }

    #[test]
    fn test_image_url_encodes_segments() {
        assert_eq!(
            image_url("http://localhost:3000/api/", "One Piece", "luffy 2.png"),
            "http://localhost:3000/api/image/One%20Piece/luffy%202.png"
        );
    }
}
