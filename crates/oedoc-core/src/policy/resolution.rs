//! Tiered resolution plans.
//!
//! A lookup walks an ordered list of [`Tier`]s. Each tier decides on its own
//! whether it applies to the request and which repository filter it issues;
//! the resolver stops at the first tier that returns a record.

use crate::constants::{
    BRA_COMPANY, BRA_FALLBACK_COMPANY, COMMON_COMPANY, COMMON_TIER_DOC_TYPES,
    DOC_TYPE_DISPLAY_IMAGE, DOC_TYPE_PICTURE, OBJECT_TYPE_ARTICLE, OE_COMPANIES,
};
use crate::models::ResolutionFilter;

/// True when the common catalog must be searched before the requesting company.
pub fn requires_common_tier(company: &str, object_type: &str, document_type: &str) -> bool {
    OE_COMPANIES.contains(&company)
        && object_type == OBJECT_TYPE_ARTICLE
        && COMMON_TIER_DOC_TYPES.contains(&document_type)
}

/// Normalized identifying parameters of a parameterized lookup.
///
/// Text fields are lowercased and `display-image` has already been aliased
/// to `foto`; `thumbnail` remembers that the alias was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedDocument {
    pub company: String,
    pub object_type: String,
    pub document_type: String,
    pub object_id: i64,
    pub culture: String,
    pub thumbnail: bool,
}

impl RequestedDocument {
    pub fn new(
        company: &str,
        object_type: &str,
        document_type: &str,
        object_id: i64,
        culture: &str,
    ) -> Self {
        let document_type = document_type.to_lowercase();
        let thumbnail = document_type == DOC_TYPE_DISPLAY_IMAGE;
        Self {
            company: company.to_lowercase(),
            object_type: object_type.to_lowercase(),
            document_type: if thumbnail {
                DOC_TYPE_PICTURE.to_string()
            } else {
                document_type
            },
            object_id,
            culture: culture.to_lowercase(),
            thumbnail,
        }
    }

    fn filter(&self, company: Option<&str>, company_oe: Option<&str>) -> ResolutionFilter {
        ResolutionFilter {
            guid: None,
            company: company.map(str::to_string),
            company_oe: company_oe.map(str::to_string),
            object_type: Some(self.object_type.clone()),
            document_type: Some(self.document_type.clone()),
            object_id: Some(self.object_id),
            culture: Some(self.culture.clone()),
        }
    }
}

/// One step of a resolution plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Common catalog, restricted to what the requesting company may see.
    CommonCompany,
    /// Common catalog without operating-company scoping (metadata lookups).
    CommonCompanyUnscoped,
    /// The requesting company's own catalog.
    RequestingCompany,
    /// `bra` pictures missing everywhere else are borrowed from `gro`.
    BraPictureFallback,
}

/// Tiers visited when delivering a document.
pub const DELIVERY_PLAN: [Tier; 3] = [
    Tier::CommonCompany,
    Tier::RequestingCompany,
    Tier::BraPictureFallback,
];

/// Tiers visited when only the record is returned.
pub const METADATA_PLAN: [Tier; 2] = [Tier::CommonCompanyUnscoped, Tier::RequestingCompany];

impl Tier {
    pub fn name(self) -> &'static str {
        match self {
            Tier::CommonCompany => "common",
            Tier::CommonCompanyUnscoped => "common_unscoped",
            Tier::RequestingCompany => "requesting_company",
            Tier::BraPictureFallback => "bra_picture_fallback",
        }
    }

    pub fn applies(self, request: &RequestedDocument) -> bool {
        match self {
            Tier::CommonCompany | Tier::CommonCompanyUnscoped => requires_common_tier(
                &request.company,
                &request.object_type,
                &request.document_type,
            ),
            Tier::RequestingCompany => true,
            Tier::BraPictureFallback => {
                request.company == BRA_COMPANY && request.document_type == DOC_TYPE_PICTURE
            }
        }
    }

    pub fn filter(self, request: &RequestedDocument) -> ResolutionFilter {
        match self {
            Tier::CommonCompany => request.filter(Some(COMMON_COMPANY), Some(&request.company)),
            Tier::CommonCompanyUnscoped => request.filter(Some(COMMON_COMPANY), None),
            Tier::RequestingCompany => request.filter(None, Some(&request.company)),
            Tier::BraPictureFallback => request.filter(None, Some(BRA_FALLBACK_COMPANY)),
        }
    }
}
