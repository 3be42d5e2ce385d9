//! Brand lookup against the Brandfetch v2 API and reduction of its response
//! into a [`NormalizedBrand`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod service;
pub mod types;

pub use client::BrandfetchClient;
pub use error::BrandfetchError;
pub use normalize::{
    extract_colors, extract_fonts, extract_links, extract_logos, normalize, placeholder_brand,
    BrandFonts, BrandLinks, BrandLogos, NormalizedBrand,
};
pub use service::BrandLookupService;
pub use types::BrandLookupResult;
