//! Section-initializer error kind (§7: Validation error).
//!
//! A lookup into the registry for an unsupported `(section, template)` pair
//! fails immediately rather than falling back to a default template, and a
//! dictionary failure inside an initializer is wrapped with the section and
//! template number that were being prepared, mirroring the nested-exception
//! style the rest of this encoder uses for diagnosability.

use mars2grib_core::DictError;

#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    #[error("no initializer registered for section {section} template {template}")]
    UnknownTemplate { section: u8, template: i64 },

    #[error("error preparing section {section} with template number {template}")]
    Init {
        section: u8,
        template: i64,
        #[source]
        source: DictError,
    },
}

impl SectionError {
    pub fn init(section: u8, template: i64, source: DictError) -> Self {
        SectionError::Init {
            section,
            template,
            source,
        }
    }
}
