//! Which delivered documents get the item-number stamp.

use chrono::Datelike;

use crate::constants::{
    MIME_TYPE_PDF, OBJECT_TYPE_ARTICLE, STAMPED_DOC_TYPES, STAMP_ALWAYS_COMPANY_IDS,
    STAMP_BANDED_COMPANY_ID, STAMP_BAND_END, STAMP_BAND_START, STAMP_CUTOFF,
};
use crate::models::DocumentRecord;

/// True when the document's first page must be stamped before delivery.
pub fn must_stamp(document: &DocumentRecord) -> bool {
    document.object_type == OBJECT_TYPE_ARTICLE
        && STAMPED_DOC_TYPES.contains(&document.document_type.as_str())
        && document.mime_type == MIME_TYPE_PDF
        && company_carve_out(document)
}

fn company_carve_out(document: &DocumentRecord) -> bool {
    if STAMP_ALWAYS_COMPANY_IDS.contains(&document.company_id) {
        return true;
    }
    if document.company_id != STAMP_BANDED_COMPANY_ID {
        return false;
    }

    let in_band = (STAMP_BAND_START..=STAMP_BAND_END).contains(&document.object_id);
    !in_band || changed_since_cutoff(document)
}

fn changed_since_cutoff(document: &DocumentRecord) -> bool {
    let changed = &document.last_changed;
    (changed.year(), changed.month(), changed.day()) >= STAMP_CUTOFF
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_record;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn banded(object_id: i64, last_changed: NaiveDateTime) -> DocumentRecord {
        DocumentRecord {
            company_id: 2,
            object_id,
            last_changed,
            ..sample_record()
        }
    }

    #[test]
    fn test_band_before_cutoff_is_not_stamped() {
        assert!(!must_stamp(&banded(1_505_000_000, at(2022, 9, 30, 23, 59))));
    }

    #[test]
    fn test_band_on_cutoff_is_stamped() {
        assert!(must_stamp(&banded(1_505_000_000, at(2022, 10, 1, 0, 0))));
        assert!(must_stamp(&banded(1_505_000_000, at(2024, 2, 3, 12, 0))));
    }

    #[test]
    fn test_band_boundaries_are_closed() {
        let old = at(2020, 1, 1, 0, 0);
        assert!(!must_stamp(&banded(1_500_000_000, old)));
        assert!(!must_stamp(&banded(1_509_999_999, old)));
        assert!(must_stamp(&banded(1_499_999_999, old)));
        assert!(must_stamp(&banded(1_510_000_000, old)));
    }

    #[test]
    fn test_companies_four_and_eight_always_stamped() {
        for company_id in [4, 8] {
            let record = DocumentRecord {
                company_id,
                object_id: 1_505_000_000,
                last_changed: at(2001, 1, 1, 0, 0),
                ..sample_record()
            };
            assert!(must_stamp(&record));
        }
    }

    #[test]
    fn test_other_companies_never_stamped() {
        for company_id in [0, 1, 3, 5] {
            let record = DocumentRecord {
                company_id,
                ..sample_record()
            };
            assert!(!must_stamp(&record));
        }
    }

    #[test]
    fn test_requires_article_pdf_sheet() {
        let technical = DocumentRecord {
            document_type: "technische-fiche".to_string(),
            ..sample_record()
        };
        assert!(must_stamp(&technical));

        let picture = DocumentRecord {
            document_type: "foto".to_string(),
            ..sample_record()
        };
        assert!(!must_stamp(&picture));

        let customer = DocumentRecord {
            object_type: "klant".to_string(),
            ..sample_record()
        };
        assert!(!must_stamp(&customer));

        let word = DocumentRecord {
            mime_type: "application/msword".to_string(),
            ..sample_record()
        };
        assert!(!must_stamp(&word));
    }
}
